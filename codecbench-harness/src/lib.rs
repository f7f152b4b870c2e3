// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! codecbench measurement engine.
//!
//! Micro-benchmark and vulnerability-amplification harness for a nested
//! message codec. The codec itself is external (see `codecbench-schema`);
//! this crate only generates deterministic inputs, drives timed parse loops,
//! and turns the collected samples into comparable statistics.
//!
//! # Tools
//!
//! - **Parse latency** (`parse_latency` bin): warmup/measure rounds of parse
//!   operations over one pre-serialized synthetic message.
//! - **Amplification** (`amplification` bin): repeated parses of a bundled
//!   malicious payload, reporting memory and throughput amplification ratios
//!   relative to the payload's raw size.

pub mod amplification;
pub mod error;
pub mod fixture;
pub mod generator;
pub mod harness;
pub mod memory;
pub mod metrics;
pub mod reporter;

pub use amplification::{AmplificationAnalyzer, AmplificationReport, AmplificationSample};
pub use error::{HarnessError, HarnessResult};
pub use harness::{BenchmarkDriver, DriverOutcome, ResultSink};
pub use metrics::{BenchmarkReport, LatencyMetrics, LatencySample, RunConfig, ThroughputMetrics};
pub use reporter::JsonReporter;
