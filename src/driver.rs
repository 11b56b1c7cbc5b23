use std::io;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::grid::Grid;
use crate::rule_set::RuleSet;
use crate::scheduler::Scheduler;
use crate::scheduler::Task;
use crate::scheduler::WorkerPool;
use crate::scheduler::fatal;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of generations to advance
    pub generations: u64,

    /// Size of the worker pool, at least 1
    pub workers: usize,

    pub rules: RuleSet,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generations: 0,
            workers: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            rules: RuleSet::default(),
        }
    }
}

/// Result of a finished run.
#[derive(Debug)]
pub struct Outcome {
    pub grid: Grid,
    pub generations: u64,

    /// Wall-clock time spent computing generations, excluding worker startup and shutdown.
    pub elapsed: Duration,

    /// Tasks dequeued across all workers, composite and leaf
    pub tasks_processed: u64,

    /// Leaf completions counted by the barrier across all generations
    pub leaf_tasks: u64,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Grid side {n} is not a power of two")]
    NotPowerOfTwo { n: usize },

    #[error("At least one worker is required")]
    NoWorkers,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Runs generations on a worker pool that lives as long as the driver.
///
/// The driver is the only owner of the buffer roles: it seeds one root task per generation, waits
/// for the barrier, then swaps. Dropping a driver without calling [`Driver::finish`] still shuts
/// the pool down and joins every worker.
pub struct Driver {
    scheduler: Arc<Scheduler>,
    pool: Option<WorkerPool>,
    generation: u64,
    leaf_tasks: u64,
    elapsed: Duration,
}

impl Driver {
    /// Validate the grid and start `workers` threads. Workers block on the empty queue until the
    /// first generation is seeded.
    pub fn start(grid: &Grid, rules: RuleSet, workers: usize) -> Result<Self, SimulationError> {
        let n = grid.side();
        if !n.is_power_of_two() {
            return Err(SimulationError::NotPowerOfTwo { n });
        }

        let workers = NonZeroUsize::new(workers).ok_or(SimulationError::NoWorkers)?;

        let scheduler = Arc::new(Scheduler::new(grid, rules));
        let pool = WorkerPool::spawn(&scheduler, workers).map_err(SimulationError::Spawn)?;

        debug!(n, workers = pool.len(), "worker pool started");

        Ok(Self {
            scheduler,
            pool: Some(pool),
            generation: 0,
            leaf_tasks: 0,
            elapsed: Duration::ZERO,
        })
    }

    /// Generations completed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn workers(&self) -> usize {
        self.pool.as_ref().map_or(0, WorkerPool::len)
    }

    /// Copy of the current generation.
    pub fn current(&self) -> Grid {
        self.scheduler.buffers.snapshot()
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        let start = Instant::now();
        let scheduler = &self.scheduler;
        let n = scheduler.buffers.side();

        scheduler.barrier.reset();
        scheduler.queue.push(Task::root(n));
        scheduler.barrier.wait();

        let completed = scheduler.barrier.completed();
        if completed != scheduler.barrier.total() {
            fatal(&format!(
                "barrier released after {completed} of {} leaves",
                scheduler.barrier.total()
            ));
        }

        scheduler.buffers.swap();

        self.generation += 1;
        self.leaf_tasks += completed as u64;
        self.elapsed += start.elapsed();

        debug!(generation = self.generation, "generation complete");
    }

    /// Advance `generations` generations.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Shut the pool down, join every worker and hand back the final grid.
    pub fn finish(mut self) -> Outcome {
        let tasks_processed = self.shutdown();

        Outcome {
            grid: self.scheduler.buffers.snapshot(),
            generations: self.generation,
            elapsed: self.elapsed,
            tasks_processed,
            leaf_tasks: self.leaf_tasks,
        }
    }

    fn shutdown(&mut self) -> u64 {
        let Some(pool) = self.pool.take() else {
            return 0;
        };

        self.scheduler.queue.shutdown();
        let processed = pool.join();

        debug!(processed, "worker pool joined");

        processed
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run `config.generations` generations of `grid` on a fresh worker pool.
pub fn simulate(grid: &Grid, config: &SimulationConfig) -> Result<Outcome, SimulationError> {
    info!(
        n = grid.side(),
        generations = config.generations,
        workers = config.workers,
        rules = %config.rules,
        "starting simulation"
    );

    let mut driver = Driver::start(grid, config.rules, config.workers)?;
    driver.run(config.generations);
    let outcome = driver.finish();

    info!(
        generations = outcome.generations,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        population = outcome.grid.population(),
        "simulation finished"
    );

    Ok(outcome)
}
