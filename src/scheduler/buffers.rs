use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::grid::Grid;
use crate::grid::count_neighbors;
use crate::rule_set::RuleSet;

/// The two cell planes of a running simulation.
///
/// Which plane is "current" is a role, swapped by the driver between generations without copying
/// cells. During a generation the current plane is never written and each cell of the next plane
/// is written by exactly one leaf task, so relaxed per-cell accesses are enough: the barrier and
/// the queue lock order them against the swap.
pub struct Buffers {
    n: usize,
    planes: [Box<[AtomicBool]>; 2],

    /// Index of the current plane in `planes`
    current: AtomicUsize,
}

impl Buffers {
    pub fn from_grid(grid: &Grid) -> Self {
        let n = grid.side();
        let current = grid.cells().iter().map(|&c| AtomicBool::new(c)).collect();
        let next = (0..n * n).map(|_| AtomicBool::new(false)).collect();

        Self {
            n,
            planes: [current, next],
            current: AtomicUsize::new(0),
        }
    }

    pub fn side(&self) -> usize {
        self.n
    }

    /// Compute cell `(x, y)` of the next generation from the current plane.
    pub fn step_cell(&self, rules: &RuleSet, x: usize, y: usize) {
        let current = self.current.load(Ordering::Acquire);
        let (src, dst) = (&self.planes[current], &self.planes[current ^ 1]);

        let at = |x: usize, y: usize| y * self.n + x;
        let alive = |x, y| src[at(x, y)].load(Ordering::Relaxed);

        let neighbors = count_neighbors(self.n, x, y, alive);
        let next = rules.next(alive(x, y), neighbors);

        dst[at(x, y)].store(next, Ordering::Relaxed);
    }

    /// Swap the current and next roles. Driver only, strictly between generations.
    pub fn swap(&self) {
        self.current.fetch_xor(1, Ordering::AcqRel);
    }

    /// Copy the current plane out.
    pub fn snapshot(&self) -> Grid {
        let current = self.current.load(Ordering::Acquire);
        let cells = self.planes[current]
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect();

        match Grid::from_cells(self.n, cells) {
            Ok(grid) => grid,
            Err(e) => unreachable!("planes always hold n * n cells: {e}"),
        }
    }
}
