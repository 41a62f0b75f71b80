use anyhow::{Context, Result};
use clap::Parser;
use jiff::civil::Date;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use caselog::config::{GeneratorConfig, default_output_path};

#[derive(Parser)]
#[command(
    name = "caselog",
    about = "Generate a synthetic activity log for debt-collection cases",
    version
)]
struct Cli {
    /// Output CSV path; `-` writes to stdout [default: <project>/data/activities.csv]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Number of cases to generate
    #[arg(short = 'n', long)]
    cases: Option<u32>,

    /// Seed for all random streams
    #[arg(long)]
    seed: Option<u64>,

    /// First day a writ can be received (YYYY-MM-DD)
    #[arg(long)]
    start: Option<Date>,

    /// Last day a writ can be received (YYYY-MM-DD)
    #[arg(long)]
    end: Option<Date>,

    /// Probability that a case reaches enforcement proceedings
    #[arg(long)]
    enforcement_probability: Option<f64>,

    /// Probability that an enforced case lands in the long tail
    #[arg(long)]
    long_tail_probability: Option<f64>,

    /// Sampling weight of days in the high-activity quarter
    #[arg(long)]
    seasonal_weight: Option<f64>,

    /// Print a run summary with timings to stderr
    #[arg(long)]
    stats: bool,

    /// Don't print the completion message
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(n) = self.cases {
            config.num_cases = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(start) = self.start {
            config.window_start = start;
        }
        if let Some(end) = self.end {
            config.window_end = end;
        }
        if let Some(p) = self.enforcement_probability {
            config.enforcement_probability = p;
        }
        if let Some(p) = self.long_tail_probability {
            config.long_tail_probability = p;
        }
        if let Some(w) = self.seasonal_weight {
            config.seasonal_weight = w;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("invalid generator configuration")?;

    let t0 = Instant::now();
    let dataset = caselog::generate(&config)?;
    let t_generate = t0.elapsed();

    let t1 = Instant::now();
    let destination = match &cli.output {
        Some(path) if path.as_os_str() == "-" => {
            let stdout = io::stdout().lock();
            let mut out = BufWriter::with_capacity(128 * 1024, stdout);
            caselog::output::write_records(&mut out, &dataset.records)?;
            out.flush().context("failed to write stdout")?;
            None
        }
        Some(path) => Some(path.clone()),
        None => Some(default_output_path()),
    };
    if let Some(path) = &destination {
        caselog::output::write_csv(path, &dataset.records)?;
    }
    let t_write = t1.elapsed();

    let summary = dataset.summary;
    if cli.stats {
        eprintln!("--- caselog summary (seed {}) ---", config.seed);
        eprintln!("  cases:        {:>8}", summary.cases);
        eprintln!("  rows:         {:>8}", summary.rows);
        eprintln!(
            "  enforcement:  {:>8}  ({:.1}%)",
            summary.enforcement_cases,
            summary.enforcement_rate() * 100.0
        );
        eprintln!(
            "  long tail:    {:>8}  ({:.1}% of enforced)",
            summary.long_tail_cases,
            summary.long_tail_rate() * 100.0
        );
        eprintln!(
            "  Q{} {}:      {:>8}  ({:.1}% of cases, {} window days)",
            config.high_activity_quarter.quarter,
            config.high_activity_quarter.year,
            summary.high_activity_cases,
            summary.high_activity_rate() * 100.0,
            summary.window_days
        );
        eprintln!("  generate: {:>8.2}ms", t_generate.as_secs_f64() * 1000.0);
        eprintln!("  write:    {:>8.2}ms", t_write.as_secs_f64() * 1000.0);
    }

    if !cli.quiet
        && let Some(path) = &destination
    {
        eprintln!(
            "wrote {} rows for {} cases to {}",
            summary.rows,
            summary.cases,
            path.display()
        );
    }

    Ok(())
}
