// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Amplification measurement for the repeated-embedded-message payload.
//!
//! Parses the bundled malicious payload one or more times and reports how
//! much memory and time the codec spends per KB of input.

use std::path::PathBuf;

use clap::Parser;
use codecbench_harness::{
    fixture, AmplificationAnalyzer, AmplificationReport, AmplificationSample, JsonReporter,
};
use codecbench_schema::{codec, VulnerableRecord};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "amplification")]
#[command(about = "Measure resource amplification when parsing a known-malicious payload")]
struct Args {
    /// Number of times to parse the payload (suggested: 1000-10000 to
    /// simulate a sustained attack)
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    iterations: u64,

    /// Directory to additionally save the report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct AmplificationDocument<'a> {
    sample: &'a AmplificationSample,
    impact: &'a AmplificationReport,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    println!("Repeated Embedded Message Amplification Test");
    println!("============================================");
    println!();

    let payload = fixture::load(fixture::REPEATED_EMBEDDED_BOMB)?;
    println!("Loaded payload: {} bytes", payload.len());
    println!("Parse iterations: {}", args.iterations);

    if args.iterations > 1 {
        println!();
        println!(
            "WARNING: Running {} iterations to simulate a repeated parse attack",
            args.iterations
        );
        println!("Expect sustained allocator pressure and memory growth!");
    }

    println!();
    println!("Parsing with VulnerableRecord (repeated embedded entries)...");

    let mut analyzer = AmplificationAnalyzer::new();
    let (sample, failure) = analyzer.analyze(&payload, args.iterations, |bytes| {
        codec::decode::<VulnerableRecord>(bytes)
    });

    println!();
    println!("=================================================");
    println!("Results:");
    println!("=================================================");
    println!("Total parse time: {} ms", sample.elapsed.as_millis());
    println!("Average time per parse: {:.2} ms", sample.avg_parse_ms());
    println!(
        "Success count: {}/{}",
        sample.completed_iterations, sample.requested_iterations
    );
    println!("Memory delta: {} KB", sample.memory_delta_kb);

    if let Some(error) = &failure {
        println!();
        println!(
            "FAILED at iteration {}: {error}",
            sample.completed_iterations + 1
        );
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        // Observing the failure is the point; the process still exits 0.
    }

    let impact = AmplificationReport::derive(&sample);
    println!();
    println!("=================================================");
    println!("Impact Analysis:");
    println!("=================================================");
    impact.render();

    if let Some(dir) = &args.output {
        let reporter = JsonReporter::new(dir)?;
        let document = AmplificationDocument {
            sample: &sample,
            impact: &impact,
        };
        let path = reporter.save("amplification", &document)?;
        println!();
        println!("Report saved to: {}", path.display());
    }

    println!();
    println!("=================================================");
    println!("Usage Tips:");
    println!("=================================================");
    println!("1. Single parse (observe amplification in one payload):");
    println!("   cargo run --release --bin amplification");
    println!();
    println!("2. Repeated parse DoS simulation (sustain allocator pressure):");
    println!("   cargo run --release --bin amplification -- 10");
    println!();
    println!("3. With harness diagnostics:");
    println!("   cargo run --release --bin amplification -- --verbose 5000");

    Ok(())
}
