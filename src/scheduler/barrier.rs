use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use super::fatal;

/// Counts the leaf tasks finished in the current generation and releases the driver once all
/// `total` cells are done.
///
/// The counter is bumped lock-free by every leaf. Only the worker that finishes the last cell
/// touches the mutex.
pub struct GenerationBarrier {
    total: usize,
    completed: AtomicUsize,
    released: Mutex<bool>,
    done: Condvar,
}

impl GenerationBarrier {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
            released: Mutex::new(false),
            done: Condvar::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Leaves completed so far in this generation
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Arm the barrier for a new generation. Must only be called by the driver, while no tasks are
    /// in flight.
    pub fn reset(&self) {
        *self.lock() = false;
        self.completed.store(0, Ordering::Release);
    }

    /// Record one finished leaf. Returns `true` for the leaf that completed the generation.
    pub fn complete_leaf(&self) -> bool {
        // AcqRel so the final increment carries every other leaf's writes to the driver
        let count = self.completed.fetch_add(1, Ordering::AcqRel) + 1;

        if count > self.total {
            fatal(&format!(
                "generation completed {count} leaves, but the grid only has {} cells",
                self.total
            ));
        }

        if count < self.total {
            return false;
        }

        *self.lock() = true;
        self.done.notify_all();

        true
    }

    /// Block until the generation has been completed.
    pub fn wait(&self) {
        let mut released = self.lock();

        while !*released {
            released = self
                .done
                .wait(released)
                .unwrap_or_else(|_| fatal("barrier lock poisoned while waiting"));
        }
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.released
            .lock()
            .unwrap_or_else(|_| fatal("barrier lock poisoned"))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::thread;

    use super::GenerationBarrier;

    #[test]
    fn releases_on_last_leaf() {
        let barrier = GenerationBarrier::new(3);

        assert!(!barrier.complete_leaf());
        assert!(!barrier.complete_leaf());
        assert!(barrier.complete_leaf());

        barrier.wait();
        assert_eq!(barrier.completed(), 3);
    }

    #[test]
    fn reset_rearms() {
        let barrier = GenerationBarrier::new(1);

        assert!(barrier.complete_leaf());
        barrier.wait();

        barrier.reset();
        assert_eq!(barrier.completed(), 0);
        assert!(barrier.complete_leaf());
        barrier.wait();
    }

    #[test]
    fn concurrent_leaves_release_waiter_once() {
        let barrier = Arc::new(GenerationBarrier::new(4 * 500));

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || (0..500).filter(|_| barrier.complete_leaf()).count())
            })
            .collect();

        barrier.wait();

        let finishers: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
        assert_eq!(finishers, 1);
        assert_eq!(barrier.completed(), barrier.total());
    }
}
