// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Statistics engine for benchmark results.
//!
//! Converts per-round timing samples into per-operation latency statistics
//! and derived throughput. Percentiles use nearest-rank selection: round
//! counts are small, and a selecting estimator stays deterministic and
//! testable where interpolation would not.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One measured benchmark round: elapsed wall time for `batch` operations.
#[derive(Debug, Clone, Copy)]
pub struct LatencySample {
    pub elapsed: Duration,
    pub batch: u64,
}

impl LatencySample {
    /// Per-operation latency in microseconds.
    pub fn per_op_us(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.batch as f64 / 1_000.0
    }
}

/// Per-operation latency statistics, in microseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// Number of per-operation samples summarized (one per round)
    pub samples: u64,
    pub min_us: f64,
    pub mean_us: f64,
    pub median_us: f64,
    pub p95_us: f64,
    pub p99_us: f64,
    pub max_us: f64,
    pub std_dev_us: f64,
}

impl LatencyMetrics {
    /// Summarize measured rounds into per-operation statistics.
    ///
    /// Each round contributes one per-operation value (round elapsed time
    /// divided by its batch size); mean and standard deviation use the
    /// population formulas over those values. Empty input yields the
    /// no-data value rather than an arithmetic error.
    pub fn from_rounds(rounds: &[LatencySample]) -> Self {
        if rounds.is_empty() {
            return Self::no_data();
        }

        let mut per_op: Vec<f64> = rounds.iter().map(LatencySample::per_op_us).collect();
        per_op.sort_by(f64::total_cmp);
        let count = per_op.len();

        let mean = per_op.iter().sum::<f64>() / count as f64;
        let variance = per_op
            .iter()
            .map(|&value| {
                let diff = value - mean;
                diff * diff
            })
            .sum::<f64>()
            / count as f64;

        Self {
            samples: count as u64,
            min_us: per_op[0],
            mean_us: mean,
            median_us: nearest_rank(&per_op, 50.0),
            p95_us: nearest_rank(&per_op, 95.0),
            p99_us: nearest_rank(&per_op, 99.0),
            max_us: per_op[count - 1],
            std_dev_us: variance.sqrt(),
        }
    }

    /// The explicit empty report returned for zero samples.
    pub fn no_data() -> Self {
        Self {
            samples: 0,
            min_us: 0.0,
            mean_us: 0.0,
            median_us: 0.0,
            p95_us: 0.0,
            p99_us: 0.0,
            max_us: 0.0,
            std_dev_us: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

/// Nearest-rank percentile on an ascending-sorted slice:
/// `index = ceil(p/100 * n) - 1`, clamped into `[0, n-1]`.
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = (percentile / 100.0 * sorted.len() as f64).ceil() as isize - 1;
    let index = rank.clamp(0, sorted.len() as isize - 1) as usize;
    sorted[index]
}

/// Throughput derived from mean per-operation latency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThroughputMetrics {
    pub ops_per_sec: f64,
    pub mb_per_sec: f64,
}

impl ThroughputMetrics {
    /// Derive throughput for a message of `message_bytes` from latency
    /// statistics. Empty latency yields zero throughput.
    pub fn from_latency(latency: &LatencyMetrics, message_bytes: usize) -> Self {
        if latency.is_empty() || latency.mean_us == 0.0 {
            return Self {
                ops_per_sec: 0.0,
                mb_per_sec: 0.0,
            };
        }

        let ops_per_sec = 1_000_000.0 / latency.mean_us;
        let mb_per_sec = ops_per_sec * message_bytes as f64 / (1024.0 * 1024.0);
        Self {
            ops_per_sec,
            mb_per_sec,
        }
    }
}

/// Configuration echo carried into every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub warmup_iterations: u64,
    pub batch_size: u64,
    pub rounds: u64,
    pub message_bytes: usize,
}

impl RunConfig {
    pub fn total_operations(&self) -> u64 {
        self.rounds * self.batch_size
    }
}

/// Aggregate benchmark report: latency table, throughput, configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub config: RunConfig,
    pub latency: LatencyMetrics,
    pub throughput: ThroughputMetrics,
}

impl BenchmarkReport {
    pub fn new(config: RunConfig, rounds: &[LatencySample]) -> Self {
        let latency = LatencyMetrics::from_rounds(rounds);
        let throughput = ThroughputMetrics::from_latency(&latency, config.message_bytes);
        Self {
            config,
            latency,
            throughput,
        }
    }

    /// Render the human-readable results table to stdout.
    pub fn render(&self) {
        if self.latency.is_empty() {
            println!();
            println!("No data collected");
            return;
        }

        println!();
        println!("=== Benchmark Results ===");
        println!();
        println!("Latency per operation (μs):");
        println!("  Min:    {:8.2} μs", self.latency.min_us);
        println!("  Mean:   {:8.2} μs", self.latency.mean_us);
        println!("  Median: {:8.2} μs", self.latency.median_us);
        println!("  P95:    {:8.2} μs", self.latency.p95_us);
        println!("  P99:    {:8.2} μs", self.latency.p99_us);
        println!("  Max:    {:8.2} μs", self.latency.max_us);
        println!("  StdDev: {:8.2} μs", self.latency.std_dev_us);
        println!();
        println!("Throughput:");
        println!("  Operations/sec: {:.0} ops/s", self.throughput.ops_per_sec);
        println!("  Throughput:     {:.2} MB/s", self.throughput.mb_per_sec);
        println!();
        println!("Configuration:");
        println!("  Warmup iterations:      {}", self.config.warmup_iterations);
        println!("  Measurement iterations: {} per round", self.config.batch_size);
        println!("  Benchmark rounds:       {}", self.config.rounds);
        println!("  Total operations:       {}", self.config.total_operations());
        println!("  Message size:           {} bytes", self.config.message_bytes);
    }
}
