use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Runs one day's puzzle solver on its input file")]
struct Args {
    /// Day number
    day: u8,
    /// 1 or 2; both parts are run when omitted
    part: Option<u8>,
    /// Read day{DAY}test{TEST}.in instead of day{DAY}.in
    #[arg(short, long)]
    test: Option<u32>,
    /// Input file, overriding the name derived from the day
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// More log output; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn input_path(&self) -> PathBuf {
        match (&self.input, self.test) {
            (Some(path), _) => path.clone(),
            (None, Some(test)) => PathBuf::from(format!("day{}test{}.in", self.day, test)),
            (None, None) => PathBuf::from(format!("day{}.in", self.day)),
        }
    }
}

fn enable_tracing(verbose: u8) {
    let level = match verbose {0 => "warn", 1 => "info", 2 => "debug", _ => "trace"};
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    enable_tracing(args.verbose);

    ensure!(aoc2023::DAYS.contains(&args.day), "no solver for day {}, have {:?}", args.day, aoc2023::DAYS);
    let parts = match args.part {
        Some(part) => vec![part],
        None => vec![1, 2],
    };

    let fname = args.input_path();
    info!("reading {}", fname.display());
    let input = std::fs::read_to_string(&fname)
        .with_context(|| format!("cannot read {}", fname.display()))?;

    let time = std::time::Instant::now();
    for part in parts {
        let answer = aoc2023::solve(args.day, part, &input)
            .with_context(|| format!("day {} part {} on {}", args.day, part, fname.display()))?;
        println!("Part {}: {}", part, answer);
    }
    println!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}
