use std::collections::VecDeque;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::MutexGuard;

use super::fatal;
use super::task::Task;

#[derive(Default)]
struct QueueState {
    tasks: VecDeque<Task>,

    /// Set once, when no more generations will be seeded
    shutdown: bool,
}

/// Unbounded FIFO of pending tasks shared by the driver and every worker.
///
/// Consumers block while the queue is empty. Once shutdown is raised, consumers drain whatever is
/// left and then get `None` instead of blocking.
#[derive(Default)]
pub struct WorkQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the tail and wake one waiting consumer.
    pub fn push(&self, task: Task) {
        self.lock().tasks.push_back(task);
        self.available.notify_one();
    }

    /// Append every task under a single lock, waking one consumer per task.
    pub fn push_all<I>(&self, tasks: I)
    where
        I: IntoIterator<Item = Task>,
    {
        let pushed = {
            let mut state = self.lock();
            let before = state.tasks.len();
            state.tasks.extend(tasks);

            state.tasks.len() - before
        };

        for _ in 0..pushed {
            self.available.notify_one();
        }
    }

    /// Remove the head task, blocking until one is available. Returns `None` once shutdown has been
    /// raised and the queue is empty.
    pub fn pop(&self) -> Option<Task> {
        let mut state = self.lock();

        loop {
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }

            if state.shutdown {
                return None;
            }

            state = self
                .available
                .wait(state)
                .unwrap_or_else(|_| fatal("work queue lock poisoned while waiting"));
        }
    }

    /// Raise the shutdown flag and wake every blocked consumer. Idempotent.
    pub fn shutdown(&self) {
        self.lock().shutdown = true;
        self.available.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state
            .lock()
            .unwrap_or_else(|_| fatal("work queue lock poisoned"))
    }
}
