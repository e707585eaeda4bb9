use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use qtr2d_sweep_driver::{SweepConfig, SweepDriver};

#[derive(Parser, Debug)]
#[command(name = "qtr2d", about = "k-space transport solver for 2D lattice models")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: PathBuf,
    /// Path to CSV output (overrides the config; stdout when absent in both)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Number of worker threads (defaults to the config or all cores)
    #[arg(long)]
    threads: Option<usize>,
    /// Suppress progress logs (stderr)
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[cli] error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.quiet {
        eprintln!("[cli] loading config {}", cli.config.display());
    }
    let mut config = SweepConfig::from_file(&cli.config)?;
    if let Some(output) = cli.output {
        config.output.path = Some(output);
    }
    if let Some(threads) = cli.threads {
        config.threads = Some(threads);
    }

    let driver = SweepDriver::new(config)?;
    if !cli.quiet {
        eprintln!("[cli] expanded {} jobs", driver.job_count());
    }
    let stats = driver.run()?;
    if !cli.quiet {
        eprintln!(
            "[cli] {} jobs completed, {} failed in {:.2}s",
            stats.completed, stats.failed, stats.duration_secs
        );
        if stats.edge_cases > 0 {
            eprintln!(
                "[cli] {} recoverable numerical edge cases encountered",
                stats.edge_cases
            );
        }
    }
    for job_error in &stats.errors {
        eprintln!("[cli] job {}: {}", job_error.index, job_error.message);
    }
    if stats.failed > 0 {
        return Err(format!("{} parameter points failed", stats.failed).into());
    }
    Ok(())
}
