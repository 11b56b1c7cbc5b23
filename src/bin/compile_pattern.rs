//! Compile a plaintext `.cells` pattern into the binary format, padded to `n` by `n`.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::bail;
use argh::FromArgs;

use parlife::pattern::bin;
use parlife::pattern::cells;

/// Compile a `.cells` pattern into a binary pattern of side n.
#[derive(FromArgs)]
struct Args {
    /// input `.cells` file
    #[argh(positional)]
    input: PathBuf,

    /// output file
    #[argh(positional)]
    output: PathBuf,

    /// dimension of the output (power of 2)
    #[argh(positional)]
    n: usize,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    if !args.n.is_power_of_two() {
        bail!("n should be a power of 2, got {}", args.n)
    }

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {:?}", args.input))?;
    let grid = cells::read_cells(&text, Some(args.n)).context("Failed to parse pattern")?;

    fs::write(&args.output, bin::encode(&grid))
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    Ok(())
}
