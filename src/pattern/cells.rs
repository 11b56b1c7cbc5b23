//! Plaintext `.cells` patterns.
//!
//! Lines starting with `!` are comments. Every other line is a row of `.` (dead) and `O` (alive)
//! cells. Short rows and missing rows are dead.
//!
//! See: https://conwaylife.com/wiki/Plaintext

use std::io;
use std::io::Write;

use thiserror::Error;
use tracing::warn;

use crate::grid::Grid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellsError {
    #[error("Unexpected character '{got}' at line {line}, column {column}")]
    InvalidCell {
        line: usize,
        column: usize,
        got: char,
    },

    #[error("Grid side {n} is not a power of two")]
    NotPowerOfTwo { n: usize },
}

/// Parse a `.cells` pattern into a grid of side `n`. Without `n`, the grid is the smallest power
/// of two that holds the whole pattern.
pub fn read_cells(text: &str, n: Option<usize>) -> Result<Grid, CellsError> {
    let mut rows: Vec<Vec<bool>> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.starts_with('!') {
            continue;
        }

        // Blank lines are dead rows, not skipped lines
        let mut row = Vec::with_capacity(line.len());

        for (j, c) in line.trim_end().chars().enumerate() {
            match c {
                '.' => row.push(false),
                'O' => row.push(true),
                got => {
                    return Err(CellsError::InvalidCell {
                        line: i + 1,
                        column: j + 1,
                        got,
                    });
                }
            }
        }

        rows.push(row);
    }

    // Trailing blank lines carry no cells
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let height = rows.len();

    let n = match n {
        Some(n) if n.is_power_of_two() => n,
        Some(n) => return Err(CellsError::NotPowerOfTwo { n }),
        None => width.max(height).max(1).next_power_of_two(),
    };

    if width > n || height > n {
        warn!(width, height, n, "Pattern does not fit the grid. Truncating");
    }

    let mut grid = Grid::new(n);

    for (y, row) in rows.iter().enumerate().take(n) {
        for (x, &alive) in row.iter().enumerate().take(n) {
            grid.set(x, y, alive);
        }
    }

    Ok(grid)
}

/// Write every row of `grid`, without comments.
pub fn write_cells<W: Write>(grid: &Grid, mut writer: W) -> io::Result<()> {
    writer.write_all(crate::render::plain(grid).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod test {
    use super::CellsError;
    use super::read_cells;
    use super::write_cells;
    use crate::grid::Grid;

    const GLIDER: &str = "!Name: Glider\n!\n.O\n..O\nOOO\n";

    #[test]
    fn glider_auto_size() {
        let grid = read_cells(GLIDER, None).unwrap();

        assert_eq!(grid.side(), 4);
        assert_eq!(
            grid.alive().collect::<Vec<_>>(),
            vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn explicit_size_pads_and_truncates() {
        let padded = read_cells(GLIDER, Some(8)).unwrap();
        assert_eq!(padded.side(), 8);
        assert_eq!(padded.population(), 5);

        let truncated = read_cells(GLIDER, Some(2)).unwrap();
        assert_eq!(truncated.alive().collect::<Vec<_>>(), vec![(1, 0)]);
    }

    #[test]
    fn blank_lines_are_dead_rows() {
        let grid = read_cells("O\n\nO\n\n\n", None).unwrap();

        assert_eq!(grid.side(), 4);
        assert_eq!(grid.alive().collect::<Vec<_>>(), vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn crlf_and_empty_input() {
        let grid = read_cells(".O\r\nO.\r\n", None).unwrap();
        assert_eq!(grid.alive().collect::<Vec<_>>(), vec![(1, 0), (0, 1)]);

        let empty = read_cells("!only a comment\n", None).unwrap();
        assert_eq!(empty, Grid::new(1));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            read_cells(".O\n.*\n", None),
            Err(CellsError::InvalidCell {
                line: 2,
                column: 2,
                got: '*'
            })
        );
        assert_eq!(
            read_cells(GLIDER, Some(3)),
            Err(CellsError::NotPowerOfTwo { n: 3 })
        );
    }

    #[test]
    fn write_then_read() {
        let grid = Grid::with_alive(4, [(3, 0), (1, 2)]);

        let mut out = Vec::new();
        write_cells(&grid, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "...O\n....\n.O..\n....\n");
    }
}
