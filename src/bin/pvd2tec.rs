// src/bin/pvd2tec.rs
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pvd2tec::{run_batch, BatchConfig, ErrorPolicy, StepRange};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Index base names ending in .pvd (e.g. results/tem.pvd). The first
    /// one also provides the mesh.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output base name; step N is written to <OUTPUT>.N.tec
    #[arg(short, long)]
    output: PathBuf,

    /// First time step
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    start: i64,

    /// End of the step range (exclusive); defaults to start + 1
    #[arg(long, allow_negative_numbers = true)]
    end: Option<i64>,

    /// Step increment
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    step: i64,

    /// Number of time steps converted in parallel
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Log failed time steps and continue instead of aborting
    #[arg(long)]
    skip_failed: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            _ => "trace",
        }
    }

    fn into_config(self) -> BatchConfig {
        let end = self.end.unwrap_or(self.start + 1);
        BatchConfig {
            inputs: self.inputs,
            output: self.output,
            steps: StepRange::new(self.start, end, self.step),
            workers: self.jobs.max(1),
            on_error: if self.skip_failed {
                ErrorPolicy::Skip
            } else {
                ErrorPolicy::Abort
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level())).init();

    let config = args.into_config();
    info!(
        "converting steps {}..{} by {} of {} series",
        config.steps.start,
        config.steps.end,
        config.steps.step,
        config.inputs.len()
    );
    let report = run_batch(&config).context("conversion failed")?;

    println!(
        "{} files written, {} steps skipped",
        report.written.len(),
        report.skipped.len()
    );
    for (step, reason) in &report.skipped {
        eprintln!("step {}: {}", step, reason);
    }
    Ok(())
}
