// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark driver for repeated parse operations.
//!
//! Drives warmup, stabilization, and measured rounds against one
//! pre-serialized byte buffer, collecting one latency sample per round.
//! Parsing is injected as a closure; the driver never touches the wire
//! format itself.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::memory;
use crate::metrics::LatencySample;

/// Write-only sink for parse results.
///
/// Holds the most recent value behind `black_box` so the optimizer cannot
/// prove the parse result unused and elide the timed call. There is no
/// contract to read it back.
#[derive(Debug)]
pub struct ResultSink<T> {
    last: Option<T>,
}

impl<T> ResultSink<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Swallow a value, replacing the previous one.
    pub fn swallow(&mut self, value: T) {
        self.last = Some(value);
        black_box(&self.last);
    }
}

impl<T> Default for ResultSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one driver run.
///
/// When a parse fails mid-measurement the outcome carries the rounds that
/// completed before the failure, the partial operation counts, and the codec
/// error itself.
#[derive(Debug)]
pub struct DriverOutcome<E> {
    /// Fully measured rounds; an aborted round contributes no sample
    pub rounds: Vec<LatencySample>,
    /// Successful parse operations inside measured rounds
    pub completed_ops: u64,
    /// Failed parse operations (0 or 1; the loop stops at the first)
    pub failed_ops: u64,
    /// Wall time spent in the measurement phase
    pub elapsed: Duration,
    pub failure: Option<E>,
}

impl<E> DriverOutcome<E> {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Benchmark driver: INIT → WARMUP → STABILIZE → MEASURE × rounds → REPORT.
///
/// Defaults mirror the standard run configuration: 100 warmup parses, then
/// 5 rounds of 100 measured parses, with a 100 ms stabilization pause in
/// between.
pub struct BenchmarkDriver {
    warmup_iterations: u64,
    batch_size: u64,
    rounds: u64,
    stabilize_delay: Duration,
}

impl BenchmarkDriver {
    pub fn new() -> Self {
        Self {
            warmup_iterations: 100,
            batch_size: 100,
            rounds: 5,
            stabilize_delay: Duration::from_millis(100),
        }
    }

    /// Set the number of untimed warmup parses.
    pub fn warmup(mut self, iterations: u64) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    /// Set the number of parses timed per round.
    pub fn batch(mut self, size: u64) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the number of measured rounds.
    pub fn rounds(mut self, rounds: u64) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the settling pause between warmup and measurement.
    pub fn stabilize(mut self, delay: Duration) -> Self {
        self.stabilize_delay = delay;
        self
    }

    /// Configuration echo for a report over a message of `message_bytes`.
    pub fn run_config(&self, message_bytes: usize) -> crate::metrics::RunConfig {
        crate::metrics::RunConfig {
            warmup_iterations: self.warmup_iterations,
            batch_size: self.batch_size,
            rounds: self.rounds,
            message_bytes,
        }
    }

    /// Run the benchmark against `payload`, parsing with `parse`.
    ///
    /// Only parse calls inside measured rounds count toward the samples; the
    /// same buffer is reused throughout, so input preparation is never
    /// timed. The first parse failure aborts the loop and is carried in the
    /// outcome rather than returned as an error: observing a codec failure
    /// is a valid measurement, not a harness defect.
    pub fn run<T, E, F>(&self, payload: &[u8], mut parse: F) -> DriverOutcome<E>
    where
        F: FnMut(&[u8]) -> Result<T, E>,
    {
        let mut sink = ResultSink::new();

        println!("Warming up ({} iterations)...", self.warmup_iterations);
        tracing::debug!(iterations = self.warmup_iterations, "warmup phase");
        for _ in 0..self.warmup_iterations {
            match parse(payload) {
                Ok(value) => sink.swallow(value),
                Err(error) => {
                    return DriverOutcome {
                        rounds: Vec::new(),
                        completed_ops: 0,
                        failed_ops: 1,
                        elapsed: Duration::ZERO,
                        failure: Some(error),
                    };
                }
            }
        }
        println!("Warmup complete.");
        println!();

        tracing::debug!(delay_ms = self.stabilize_delay.as_millis() as u64, "stabilize phase");
        memory::reclaim_and_settle(self.stabilize_delay);

        println!(
            "Running benchmark ({} rounds of {} iterations each)...",
            self.rounds, self.batch_size
        );
        println!();

        let mut rounds = Vec::with_capacity(self.rounds as usize);
        let mut completed = 0u64;
        let decile = (self.rounds / 10).max(1);
        let started = Instant::now();

        for round in 0..self.rounds {
            let round_start = Instant::now();
            for _ in 0..self.batch_size {
                match parse(payload) {
                    Ok(value) => {
                        completed += 1;
                        sink.swallow(value);
                    }
                    Err(error) => {
                        return DriverOutcome {
                            rounds,
                            completed_ops: completed,
                            failed_ops: 1,
                            elapsed: started.elapsed(),
                            failure: Some(error),
                        };
                    }
                }
            }

            let sample = LatencySample {
                elapsed: round_start.elapsed(),
                batch: self.batch_size,
            };
            // One line per round, collapsing to decile boundaries for large
            // round counts.
            if self.rounds <= 20 || (round + 1) % decile == 0 {
                println!(
                    "Round {:2}/{}: {:.2} ms total, {:.2} μs/op",
                    round + 1,
                    self.rounds,
                    sample.elapsed.as_secs_f64() * 1_000.0,
                    sample.per_op_us()
                );
            }
            rounds.push(sample);
        }

        DriverOutcome {
            rounds,
            completed_ops: completed,
            failed_ops: 0,
            elapsed: started.elapsed(),
            failure: None,
        }
    }
}

impl Default for BenchmarkDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_driver() -> BenchmarkDriver {
        BenchmarkDriver::new()
            .warmup(5)
            .batch(10)
            .rounds(3)
            .stabilize(Duration::ZERO)
    }

    #[test]
    fn test_completes_all_rounds() {
        let mut calls = 0u64;
        let outcome = quick_driver().run(&[0u8; 4], |_| {
            calls += 1;
            Ok::<u64, String>(calls)
        });

        assert!(outcome.is_complete());
        assert_eq!(outcome.rounds.len(), 3);
        assert_eq!(outcome.completed_ops, 30);
        assert_eq!(outcome.failed_ops, 0);
        // Warmup parses run but are not measured.
        assert_eq!(calls, 35);
        for sample in &outcome.rounds {
            assert_eq!(sample.batch, 10);
        }
    }

    #[test]
    fn test_failure_mid_round_reports_partial_counts() {
        let mut calls = 0u64;
        // Fails on the 25th measured parse: 5 warmup + 24 measured succeed.
        let outcome = quick_driver().run(&[0u8; 4], |_| {
            calls += 1;
            if calls == 5 + 25 {
                Err("malformed input".to_string())
            } else {
                Ok(calls)
            }
        });

        assert!(!outcome.is_complete());
        assert_eq!(outcome.rounds.len(), 2);
        assert_eq!(outcome.completed_ops, 24);
        assert_eq!(outcome.failed_ops, 1);
        assert_eq!(outcome.failure.as_deref(), Some("malformed input"));
    }

    #[test]
    fn test_failure_during_warmup_yields_no_samples() {
        let outcome = quick_driver().run(&[0u8; 4], |_| Err::<u64, &str>("broken"));

        assert!(outcome.rounds.is_empty());
        assert_eq!(outcome.completed_ops, 0);
        assert_eq!(outcome.failed_ops, 1);
        assert!(outcome.failure.is_some());
    }

    #[test]
    fn test_run_config_echo() {
        let config = quick_driver().run_config(4096);
        assert_eq!(config.warmup_iterations, 5);
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.message_bytes, 4096);
        assert_eq!(config.total_operations(), 30);
    }

    #[test]
    fn test_sink_swallows_repeatedly() {
        let mut sink = ResultSink::new();
        sink.swallow(vec![1u8, 2, 3]);
        sink.swallow(vec![4u8]);
    }
}
