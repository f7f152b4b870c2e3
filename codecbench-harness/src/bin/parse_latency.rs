// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Steady-state parse latency benchmark for the nested benchmark message.

use std::path::PathBuf;

use clap::Parser;
use codecbench_harness::metrics::BenchmarkReport;
use codecbench_harness::{generator, BenchmarkDriver, JsonReporter};
use codecbench_schema::{codec, BenchmarkEnvelope};

#[derive(Parser)]
#[command(name = "parse_latency")]
#[command(about = "Measure steady-state parse latency of the nested benchmark message")]
struct Args {
    /// Directory to additionally save the report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    println!("=== Nested Message Parse Benchmark ===");
    println!();

    println!("Preparing benchmark request data...");
    let envelope = generator::benchmark_envelope();
    let payload = codec::encode(&envelope)?;

    println!("Data prepared:");
    println!("  Serialized size: {} bytes", payload.len());
    println!("  Tree depth: {} levels", generator::TREE_LEVELS);
    println!("  Branching factor: {} children per node", generator::FAN_OUT);
    println!();

    let driver = BenchmarkDriver::new();
    let outcome = driver.run(&payload, |bytes| codec::decode::<BenchmarkEnvelope>(bytes));

    let report = BenchmarkReport::new(driver.run_config(payload.len()), &outcome.rounds);
    report.render();

    if let Some(error) = &outcome.failure {
        println!();
        println!(
            "Parse FAILED after {} successful operations ({} ms elapsed): {error}",
            outcome.completed_ops,
            outcome.elapsed.as_millis()
        );
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        // A codec failure is an observed result, not a harness defect: the
        // partial report above is the deliverable and the process exits 0.
    }

    if let Some(dir) = &args.output {
        let reporter = JsonReporter::new(dir)?;
        let path = reporter.save("parse_latency", &report)?;
        println!();
        println!("Benchmark report saved to: {}", path.display());
    }

    Ok(())
}
