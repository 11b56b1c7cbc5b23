//! The parallel generation scheduler.
//!
//! One generation is computed by seeding a single [`Task`] covering the whole grid. Workers split
//! composite tasks into quadrants and push them back onto the shared [`WorkQueue`], compute leaf
//! tasks directly, and count finished leaves on the [`GenerationBarrier`]. The driver waits on the
//! barrier and swaps the [`Buffers`] roles between generations.

use tracing::error;

use crate::grid::Grid;
use crate::rule_set::RuleSet;

pub use self::barrier::GenerationBarrier;
pub use self::buffers::Buffers;
pub(crate) use self::pool::WorkerPool;
pub use self::queue::WorkQueue;
pub use self::task::Task;
pub use self::task::tasks_per_generation;

mod barrier;
mod buffers;
mod pool;
mod queue;
mod task;

/// Everything the driver and the workers of one simulation share.
pub(crate) struct Scheduler {
    pub(crate) queue: WorkQueue,
    pub(crate) barrier: GenerationBarrier,
    pub(crate) buffers: Buffers,
    pub(crate) rules: RuleSet,
}

impl Scheduler {
    /// `grid` must have a power-of-two side, which [`crate::Driver::start`] checks.
    pub(crate) fn new(grid: &Grid, rules: RuleSet) -> Self {
        let n = grid.side();
        debug_assert!(n.is_power_of_two(), "grid side {n} is not a power of two");

        Self {
            queue: WorkQueue::new(),
            barrier: GenerationBarrier::new(n * n),
            buffers: Buffers::from_grid(grid),
            rules,
        }
    }
}

/// Report a broken scheduler invariant and abort. There is no recovery from these: they mean a
/// logic bug or a dead thread, and continuing would produce a wrong grid or hang.
#[cold]
pub(crate) fn fatal(msg: &str) -> ! {
    error!("fatal scheduler error: {msg}");
    eprintln!("parlife: fatal scheduler error: {msg}");

    std::process::abort()
}
