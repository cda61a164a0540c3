// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Farbwerk — Parallel image recoloring CLI
//
// Entry point. Initialises logging, parses arguments, and dispatches to the
// recolor or benchmark path.

mod io;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use farbwerk_bench::BenchmarkHarness;
use farbwerk_core::EngineConfig;
use farbwerk_core::error::{FarbwerkError, Result};
use farbwerk_core::types::PartitionMode;
use farbwerk_engine::RecolorEngine;

const USAGE: &str = "usage: farbwerk <command> [options]

commands:
  recolor <input> <output>   recolor an image file
  bench <input>              run worker-count and resolution sweeps

options:
  --config <path>            load engine settings from a JSON file
  --workers <n>              override the configured worker count
  --grid                     use the n-by-n grid partition instead of strips";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Recolor { input: PathBuf, output: PathBuf },
    Bench { input: PathBuf },
}

/// Option flags shared by both commands.
#[derive(Debug, Default, PartialEq, Eq)]
struct Overrides {
    config: Option<PathBuf>,
    workers: Option<usize>,
    grid: bool,
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args).and_then(run) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("farbwerk: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

/// Parse the raw argument list into a command plus overrides.
fn parse_args(args: &[String]) -> Result<(Command, Overrides)> {
    let invalid = |message: String| FarbwerkError::InvalidArgument(format!("{message}\n\n{USAGE}"));

    let mut positional = Vec::new();
    let mut overrides = Overrides::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| invalid("--config needs a path".into()))?;
                overrides.config = Some(PathBuf::from(value));
            }
            "--workers" => {
                let value = iter
                    .next()
                    .ok_or_else(|| invalid("--workers needs a count".into()))?;
                let workers = value
                    .parse::<usize>()
                    .map_err(|_| invalid(format!("invalid worker count '{value}'")))?;
                overrides.workers = Some(workers);
            }
            "--grid" => overrides.grid = true,
            flag if flag.starts_with("--") => {
                return Err(invalid(format!("unknown option '{flag}'")));
            }
            _ => positional.push(arg.clone()),
        }
    }

    let command = match positional.first().map(String::as_str) {
        Some("recolor") => match &positional[1..] {
            [input, output] => Command::Recolor {
                input: PathBuf::from(input),
                output: PathBuf::from(output),
            },
            _ => return Err(invalid("recolor takes <input> and <output>".into())),
        },
        Some("bench") => match &positional[1..] {
            [input] => Command::Bench {
                input: PathBuf::from(input),
            },
            _ => return Err(invalid("bench takes <input>".into())),
        },
        Some(other) => return Err(invalid(format!("unknown command '{other}'"))),
        None => return Err(invalid("no command given".into())),
    };
    Ok((command, overrides))
}

/// Resolve the effective configuration and dispatch the command.
fn run((command, overrides): (Command, Overrides)) -> Result<()> {
    let mut config = match &overrides.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(workers) = overrides.workers {
        config.worker_count = workers;
    }
    if overrides.grid {
        config.partition_mode = PartitionMode::Grid;
    }

    match command {
        Command::Recolor { input, output } => run_recolor(&config, &input, &output),
        Command::Bench { input } => run_bench(&config, &input),
    }
}

/// Decode, recolor with the configured worker count, encode.
fn run_recolor(config: &EngineConfig, input: &PathBuf, output: &PathBuf) -> Result<()> {
    let source = io::load_image(input)?;
    let engine = RecolorEngine::from_config(config);

    let started = Instant::now();
    let recolored = engine.recolor_to_new(&source, config.worker_count)?;
    let elapsed = started.elapsed();
    tracing::info!(
        workers = config.worker_count,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "recolor complete"
    );

    io::save_image(&recolored, output)?;
    println!(
        "recolored {}x{} with {} worker(s) in {:.3} ms",
        source.width(),
        source.height(),
        config.worker_count,
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Run both benchmark sweeps and print their reports.
fn run_bench(config: &EngineConfig, input: &PathBuf) -> Result<()> {
    let source = io::load_image(input)?;
    let harness = BenchmarkHarness::from_config(config);

    let worker_results = harness.sweep_worker_count(&source, config.benchmark_workers)?;
    report::print_report("worker-count sweep:", &worker_results);

    let resolution_results =
        harness.sweep_resolution(&source, config.worker_count, config.benchmark_resolutions)?;
    report::print_report(
        &format!("resolution sweep ({} workers):", config.worker_count),
        &resolution_results,
    );
    Ok(())
}
