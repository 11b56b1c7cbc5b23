use std::io;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use argh::FromArgs;
use crossterm::queue;
use crossterm::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parlife::B3S23;
use parlife::RuleSet;
use parlife::SimulationConfig;
use parlife::pattern;
use parlife::render::RenderMode;

/// Run Conway's Game of Life on a square pattern for a fixed number of generations, splitting
/// every generation across a pool of worker threads.
#[derive(FromArgs)]
struct Args {
    /// pattern file, `.cells` plaintext or one byte per cell
    #[argh(positional)]
    input: PathBuf,

    /// number of generations to simulate
    #[argh(positional)]
    generations: u64,

    /// number of worker threads, at least 1
    #[argh(positional)]
    workers: usize,

    /// write the final grid here, format chosen by extension
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// how to print the final grid: auto, plain, braille or none
    #[argh(option, default = "RenderMode::Auto")]
    render: RenderMode,

    /// life-like rule, such as B3/S23
    #[argh(option, default = "B3S23")]
    rule: RuleSet,

    /// side length for `.cells` input, a power of two
    #[argh(option)]
    size: Option<usize>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Args = argh::from_env();

    let grid = pattern::load(&args.input, args.size)
        .with_context(|| format!("Failed to load pattern {:?}", args.input))?;

    let config = SimulationConfig {
        generations: args.generations,
        workers: args.workers,
        rules: args.rule,
    };

    let outcome = parlife::simulate(&grid, &config).context("Simulation failed")?;

    info!(
        "Simulated {} generations in {} milliseconds",
        outcome.generations,
        outcome.elapsed.as_millis()
    );

    if let Some(path) = &args.output {
        pattern::save(path, &outcome.grid)
            .with_context(|| format!("Failed to save result to {path:?}"))?;
    }

    if let Some(view) = args.render.render(&outcome.grid) {
        let mut stdout = io::stdout().lock();

        queue!(stdout, style::Print(view))?;
        stdout.flush()?;
    }

    Ok(())
}
