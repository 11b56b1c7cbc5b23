use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::grid::Grid;

pub use self::bin::BinError;
pub use self::cells::CellsError;

pub mod bin;
pub mod cells;

/// On-disk pattern encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFormat {
    /// Raw bytes, one per cell
    Bin,

    /// Plaintext `.cells`
    Cells,
}

impl PatternFormat {
    /// Pick the format from the file extension. Anything but `.cells` is binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("cells") => Self::Cells,
            _ => Self::Bin,
        }
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid binary pattern: {0}")]
    Bin(#[from] BinError),

    #[error("Invalid .cells pattern: {0}")]
    Cells(#[from] CellsError),
}

/// Load a pattern from `path`. `size` sets the side of a `.cells` grid; binary patterns carry
/// their own size.
pub fn load(path: &Path, size: Option<usize>) -> Result<Grid, PatternError> {
    let io_err = |source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    };

    let format = PatternFormat::from_path(path);

    let grid = match format {
        PatternFormat::Bin => {
            if size.is_some() {
                warn!(?path, "Binary patterns carry their own size. Ignoring requested size");
            }

            let bytes = fs::read(path).map_err(io_err)?;
            bin::decode(&bytes)?
        }
        PatternFormat::Cells => {
            let text = fs::read_to_string(path).map_err(io_err)?;
            cells::read_cells(&text, size)?
        }
    };

    debug!(?path, ?format, n = grid.side(), population = grid.population(), "pattern loaded");

    Ok(grid)
}

/// Save `grid` to `path`, in the format its extension selects.
pub fn save(path: &Path, grid: &Grid) -> Result<(), PatternError> {
    let io_err = |source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    };

    let writer = BufWriter::new(File::create(path).map_err(io_err)?);
    let format = PatternFormat::from_path(path);

    let written = match format {
        PatternFormat::Bin => bin::write_bin(grid, writer),
        PatternFormat::Cells => cells::write_cells(grid, writer),
    };
    written.map_err(io_err)?;

    debug!(?path, ?format, "pattern saved");

    Ok(())
}
