use std::io;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use tracing::debug;
use tracing::trace;

use super::Scheduler;
use super::fatal;

/// A fixed set of worker threads, spawned once per run and joined once at shutdown.
pub(crate) struct WorkerPool {
    handles: Vec<JoinHandle<u64>>,
}

impl WorkerPool {
    /// Spawn `count` workers draining `scheduler`'s queue.
    ///
    /// If a thread fails to spawn, the workers already running are shut down and joined before
    /// the error is returned.
    pub(crate) fn spawn(scheduler: &Arc<Scheduler>, count: NonZeroUsize) -> io::Result<Self> {
        let mut pool = Self {
            handles: Vec::with_capacity(count.get()),
        };

        for worker_index in 0..count.get() {
            let scheduler_clone = Arc::clone(scheduler);
            let spawned = thread::Builder::new()
                .name(format!("parlife-w{worker_index}"))
                .spawn(move || worker_loop(&scheduler_clone, worker_index));

            match spawned {
                Ok(handle) => pool.handles.push(handle),
                Err(e) => {
                    scheduler.queue.shutdown();
                    pool.join();

                    return Err(e);
                }
            }
        }

        Ok(pool)
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every worker to exit. The queue must already be shut down. Returns the number of
    /// tasks processed across all workers.
    pub(crate) fn join(self) -> u64 {
        self.handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(processed) => processed,
                // Workers abort the process on panic, so there is never a payload to collect
                Err(_) => fatal("worker thread panicked"),
            })
            .sum()
    }
}

/// Aborts the process if dropped while the thread is unwinding. A dead worker would otherwise
/// leave the driver blocked on a generation that can never complete.
struct AbortOnPanic {
    worker_index: usize,
}

impl Drop for AbortOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            fatal(&format!("worker {} panicked", self.worker_index));
        }
    }
}

fn worker_loop(scheduler: &Scheduler, worker_index: usize) -> u64 {
    let _guard = AbortOnPanic { worker_index };
    let mut processed: u64 = 0;

    trace!(worker_index, "worker thread started");

    while let Some(task) = scheduler.queue.pop() {
        processed += 1;

        match task.split() {
            Some(quadrants) => scheduler.queue.push_all(quadrants),
            None => {
                scheduler
                    .buffers
                    .step_cell(&scheduler.rules, task.x, task.y);
                scheduler.barrier.complete_leaf();
            }
        }
    }

    debug!(worker_index, processed, "worker thread exiting");

    processed
}
