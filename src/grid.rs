use std::fmt;

use thiserror::Error;

use crate::rule_set::RuleSet;

/// A square bitmap of cells, stored row-major: cell `(x, y)` lives at `y * n + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// Side length
    n: usize,

    cells: Vec<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid side length must be positive")]
    Empty,

    #[error("Expected {expected} cells for a side of {n}, got {got}")]
    CellCount {
        n: usize,
        expected: usize,
        got: usize,
    },
}

impl Grid {
    /// Create an `n` by `n` grid of dead cells.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "grid side length must be positive");

        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Wrap row-major cell states into a grid of side `n`.
    pub fn from_cells(n: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        if n == 0 {
            return Err(GridError::Empty);
        }

        let expected = n * n;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                n,
                expected,
                got: cells.len(),
            });
        }

        Ok(Self { n, cells })
    }

    /// Build a grid of side `n` with the given cells alive.
    pub fn with_alive<I>(n: usize, alive: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(n);

        for (x, y) in alive {
            grid.set(x, y, true);
        }

        grid
    }

    pub fn side(&self) -> usize {
        self.n
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.index(x, y);
        self.cells[i] = alive;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of every live cell, in row-major order.
    pub fn alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.n;

        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(move |(i, _)| (i % n, i / n))
    }

    /// Compute the next generation on the calling thread. This is the reference the parallel
    /// scheduler must agree with.
    pub fn next_generation(&self, rules: &RuleSet) -> Grid {
        let n = self.n;
        let mut next = Grid::new(n);

        for y in 0..n {
            for x in 0..n {
                let neighbors = count_neighbors(n, x, y, |x, y| self.get(x, y));
                next.set(x, y, rules.next(self.get(x, y), neighbors));
            }
        }

        next
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.n, "x is out of bounds");
        assert!(y < self.n, "y is out of bounds");

        y * self.n + x
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid({}x{})", self.n, self.n)?;
        f.write_str(&crate::render::plain(self))
    }
}

/// Count the live neighbors of `(x, y)` on an `n` by `n` board. Neighbors outside the board do
/// not count; there is no wraparound.
#[inline]
pub fn count_neighbors<F>(n: usize, x: usize, y: usize, alive: F) -> u8
where
    F: Fn(usize, usize) -> bool,
{
    let (x_lo, x_hi) = (x.saturating_sub(1), (x + 1).min(n - 1));
    let (y_lo, y_hi) = (y.saturating_sub(1), (y + 1).min(n - 1));

    let mut count = 0;

    for j in y_lo..=y_hi {
        for i in x_lo..=x_hi {
            if (i, j) != (x, y) && alive(i, j) {
                count += 1;
            }
        }
    }

    count
}
