//! Turn a binary pattern back into plaintext `.cells`.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use argh::FromArgs;

use parlife::pattern::bin;
use parlife::pattern::cells;

/// Decompile a binary pattern into a `.cells` file.
#[derive(FromArgs)]
struct Args {
    /// input pattern file
    #[argh(positional)]
    input: PathBuf,

    /// output `.cells` file
    #[argh(positional)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let bytes = fs::read(&args.input).with_context(|| format!("Failed to read {:?}", args.input))?;
    let grid = bin::decode(&bytes).context("Invalid binary pattern")?;

    let out = File::create(&args.output)
        .with_context(|| format!("Failed to create {:?}", args.output))?;
    cells::write_cells(&grid, BufWriter::new(out)).context("Failed to write pattern")?;

    Ok(())
}
