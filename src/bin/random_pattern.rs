//! Generate a random binary pattern.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::bail;
use argh::FromArgs;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use parlife::Grid;
use parlife::pattern::bin;

/// Write a random binary pattern of side n.
#[derive(FromArgs)]
struct Args {
    /// dimension of the output (power of 2)
    #[argh(positional)]
    n: usize,

    /// output file
    #[argh(positional)]
    output: PathBuf,

    /// probability of a cell being alive
    #[argh(option, default = "0.5")]
    density: f64,

    /// seed for a reproducible pattern
    #[argh(option)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    if !args.n.is_power_of_two() {
        bail!("n should be a power of 2, got {}", args.n)
    }

    if !(0.0..=1.0).contains(&args.density) {
        bail!("density must be within [0, 1], got {}", args.density)
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let cells = (0..args.n * args.n)
        .map(|_| rng.random_bool(args.density))
        .collect();
    let grid = Grid::from_cells(args.n, cells)?;

    fs::write(&args.output, bin::encode(&grid))
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    Ok(())
}
