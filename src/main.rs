//! Animated maze generation in the terminal

use std::{io, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use mazecarve::{
    app::{App, Settings},
    config::{ConfigSource, RunConfig, interactive::configure_run, run_queue},
    generators::Algorithm,
    logging,
    random::RandomSource,
};

/// Watch mazes being carved by backtracking, growing tree, Eller's algorithm
/// and recursive division
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Batch file of runs to play before prompting (four integers per run)
    #[arg(long, default_value = "run.dat")]
    run_queue: PathBuf,

    /// Random seed, for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,

    /// Algorithm of the first run: 1 backtrack, 2 growing tree, 3 Eller's, 4 division
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(i32).range(1..=4))]
    algorithm: i32,

    /// Rows of the first run
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(3..=60))]
    rows: u8,

    /// Columns of the first run
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(3..=60))]
    cols: u8,

    /// Delay between animation steps in milliseconds
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(0..=2000))]
    delay: u64,

    /// Do not draw, and stop once the run queue is exhausted
    #[arg(long)]
    headless: bool,

    /// Foreground refresh interval in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Directory for the log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = logging::init(&args.log_dir).context("could not set up logging")?;

    let algorithm =
        Algorithm::from_code(args.algorithm).context("algorithm code must be between 1 and 4")?;
    let defaults = RunConfig::new(
        algorithm,
        usize::from(args.rows),
        usize::from(args.cols),
        args.delay,
    )?;

    let mut queue = run_queue::load(&args.run_queue).into_iter();
    let interactive = !args.headless;

    // Queued runs go first, otherwise ask before opening the display
    let first = match queue.next() {
        Some(config) => config,
        None if interactive => {
            match configure_run(&mut io::stdin().lock(), &mut io::stdout(), defaults)? {
                Some(config) => config,
                None => return Ok(()),
            }
        }
        None => defaults,
    };

    let app = App::new(Settings {
        frame_interval: Duration::from_millis(args.frame_ms),
        headless: args.headless,
        ..Settings::default()
    });
    let reports = app.run(
        first,
        ConfigSource::new(queue, interactive),
        RandomSource::new(args.seed),
    )?;

    if args.headless {
        for report in reports {
            println!(
                "{}: {} passages, {} cells reachable, {} steps",
                report.config, report.passages, report.reachable, report.steps
            );
        }
    }
    Ok(())
}
