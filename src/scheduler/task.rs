/// A rectangular region of the grid whose next generation still has to be computed.
///
/// Tasks carry no identity beyond their coordinates. A task with extent `1x1` is a leaf and is
/// computed directly; anything larger is split into four quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Task {
    pub x: usize,
    pub y: usize,
    pub dx: usize,
    pub dy: usize,
}

impl Task {
    /// The single task covering a whole `n` by `n` grid
    pub const fn root(n: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            dx: n,
            dy: n,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        self.dx == 1 && self.dy == 1
    }

    /// Number of cells covered
    pub const fn area(&self) -> usize {
        self.dx * self.dy
    }

    /// Splits the task into four equal quadrants, or returns `None` for a leaf.
    ///
    /// Goes: nw, ne, sw, se. Both extents must be even; sides that are not powers of two are
    /// rejected before a simulation starts.
    pub fn split(&self) -> Option<[Task; 4]> {
        if self.is_leaf() {
            return None;
        }

        let (hx, hy) = (self.dx / 2, self.dy / 2);
        assert!(
            hx * 2 == self.dx && hy * 2 == self.dy,
            "task extent {}x{} cannot be split into quadrants",
            self.dx,
            self.dy
        );

        let quadrant = |x, y| Task {
            x,
            y,
            dx: hx,
            dy: hy,
        };

        Some([
            quadrant(self.x, self.y),
            quadrant(self.x + hx, self.y),
            quadrant(self.x, self.y + hy),
            quadrant(self.x + hx, self.y + hy),
        ])
    }
}

/// Number of tasks a single generation processes on a grid of side `n` (a power of two):
/// `1 + 4 + 16 + ... + n*n`.
pub const fn tasks_per_generation(n: usize) -> u64 {
    let mut total = 0;
    let mut side = n;

    while side >= 1 {
        let per_side = (n / side) as u64;
        total += per_side * per_side;

        if side == 1 {
            break;
        }
        side /= 2;
    }

    total
}
