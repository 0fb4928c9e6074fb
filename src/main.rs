use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::time::Instant;

use primecount::counters::{count_primes_with, CountConfig, Strategy};
use primecount::partition::{PartitionScheme, Remainder};
use primecount::report::{get_memory_usage_bytes, Config, Report, Results};
use primecount::sample::{SampleSource, UniformSource};

#[derive(Parser, Debug)]
#[command(name = "primecount")]
#[command(about = "Counts the primes in a random sample with statically partitioned workers", long_about = None)]
struct Args {
    /// Number of values in the sample
    #[arg(short = 'n', long, default_value_t = 10_000_000)]
    size: usize,

    /// Values are drawn from [0, upper-bound)
    #[arg(short = 'u', long, default_value_t = 10)]
    upper_bound: u32,

    /// Number of workers
    #[arg(short = 't', long, default_value_t = 4)]
    threads: usize,

    /// Dispatch strategy (sequential, threads, rayon, elements)
    #[arg(short = 'c', long, default_value = "threads")]
    strategy: Strategy,

    /// Seed for a reproducible sample
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// What to do when the size is not a multiple of the thread count (widen, strict)
    #[arg(short = 'r', long, default_value = "widen")]
    remainder: Remainder,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr so --json output stays parseable
    TermLogger::init(
        args.log_level(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let config = CountConfig::new(args.threads)
        .with_strategy(args.strategy)
        .with_remainder(args.remainder);

    // Reject a bad configuration before paying for the sample
    let scheme = PartitionScheme::new(args.size, args.threads, args.remainder)?;
    info!(
        "Splitting {} values over {} workers, {} per chunk",
        scheme.sample_len(),
        scheme.workers(),
        scheme.chunk_size()
    );

    let start = Instant::now();
    let mut source = match args.seed {
        Some(seed) => UniformSource::with_seed(seed),
        None => UniformSource::new(),
    };
    let sample = source.generate(args.size, args.upper_bound)?;
    let generate_time = start.elapsed();
    info!("Generated {} values in {:.2?}", sample.len(), generate_time);

    let count_start = Instant::now();
    let outcome = count_primes_with(&sample, &config)?;
    let count_time = count_start.elapsed();
    info!(
        "Counted {} primes with {} in {:.2?}",
        outcome.total, args.strategy, count_time
    );

    let report = Report {
        config: Config {
            size: args.size,
            upper_bound: args.upper_bound,
            threads: scheme.workers(),
            strategy: args.strategy.to_string(),
            chunk_size: scheme.chunk_size(),
            remainder: scheme.remainder().to_string(),
            seed: args.seed,
        },
        results: Results::new(
            outcome.total,
            outcome.partials,
            generate_time,
            count_time,
            get_memory_usage_bytes(),
        ),
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_human();
    }

    Ok(())
}
