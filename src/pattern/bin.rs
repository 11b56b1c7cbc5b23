//! One byte per cell, row-major, no header. A zero byte is a dead cell and anything else is alive.
//! The side length is recovered from the file length, which must be the square of a power of two.

use std::io;
use std::io::Write;

use thiserror::Error;

use crate::grid::Grid;

#[derive(Debug, Error)]
pub enum BinError {
    #[error("Pattern is empty")]
    Empty,

    #[error("Pattern length {len} is not a perfect square")]
    NotSquare { len: usize },

    #[error("Pattern side {n} is not a power of two")]
    NotPowerOfTwo { n: usize },
}

/// Decode a pattern held in memory.
pub fn decode(bytes: &[u8]) -> Result<Grid, BinError> {
    let len = bytes.len();
    if len == 0 {
        return Err(BinError::Empty);
    }

    let n = len.isqrt();
    if n * n != len {
        return Err(BinError::NotSquare { len });
    }

    if !n.is_power_of_two() {
        return Err(BinError::NotPowerOfTwo { n });
    }

    let cells = bytes.iter().map(|&b| b != 0).collect();

    match Grid::from_cells(n, cells) {
        Ok(grid) => Ok(grid),
        Err(e) => unreachable!("length was checked to be n * n: {e}"),
    }
}

pub fn encode(grid: &Grid) -> Vec<u8> {
    grid.cells().iter().map(|&c| c as u8).collect()
}

pub fn write_bin<W: Write>(grid: &Grid, mut writer: W) -> io::Result<()> {
    writer.write_all(&encode(grid))?;
    writer.flush()
}

#[cfg(test)]
mod test {
    use super::BinError;
    use super::decode;
    use super::encode;
    use crate::grid::Grid;

    #[test]
    fn decode_any_nonzero_as_alive() {
        let grid = decode(&[0, 1, 0xFF, 0]).unwrap();

        assert_eq!(grid.side(), 2);
        assert_eq!(grid.alive().collect::<Vec<_>>(), vec![(1, 0), (0, 1)]);
        assert_eq!(encode(&grid), vec![0, 1, 1, 0]);
    }

    #[test]
    fn decode_rejects_bad_lengths() {
        assert!(matches!(decode(&[]), Err(BinError::Empty)));
        assert!(matches!(decode(&[0; 5]), Err(BinError::NotSquare { len: 5 })));
        assert!(matches!(decode(&[0; 9]), Err(BinError::NotPowerOfTwo { n: 3 })));
        assert!(decode(&[0; 1]).is_ok());
        assert!(decode(&[0; 256]).is_ok());
    }

    #[test]
    fn encode_is_row_major() {
        let grid = Grid::with_alive(4, [(3, 0), (0, 2)]);
        let bytes = encode(&grid);

        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[3], 1);
        assert_eq!(bytes[2 * 4], 1);
        assert_eq!(decode(&bytes).unwrap(), grid);
    }
}
