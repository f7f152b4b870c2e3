// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Amplification analysis for adversarial payloads.
//!
//! Repeatedly parses a fixed malicious payload, measuring elapsed time and
//! memory-footprint delta, and derives amplification ratios relative to the
//! payload's raw byte size. Quantifies how disproportionately the codec pays
//! for repeated embedded fields in a small input.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::memory::{self, MemoryProbe};

/// Raw measurements from one analyzer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmplificationSample {
    pub payload_bytes: usize,
    pub requested_iterations: u64,
    pub completed_iterations: u64,
    /// Failed parse attempts (0 or 1; the loop stops at the first)
    pub failures: u64,
    pub elapsed: Duration,
    /// Resident-set delta across the loop; negative when reclamation wins
    pub memory_delta_kb: i64,
}

impl AmplificationSample {
    /// Mean wall time per completed parse, in milliseconds. Zero when
    /// nothing completed.
    pub fn avg_parse_ms(&self) -> f64 {
        if self.completed_iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1_000.0 / self.completed_iterations as f64
    }
}

/// Ratios derived from a sample, all relative to the payload's raw size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmplificationReport {
    /// Memory delta (KB) per KB of payload
    pub memory_amplification: f64,
    pub throughput_kb_per_sec: f64,
    pub total_data_mb: f64,
    pub avg_parse_ms: f64,
}

impl AmplificationReport {
    /// Derive the amplification ratios, guarding the zero-iteration and
    /// zero-elapsed cases instead of dividing by zero.
    pub fn derive(sample: &AmplificationSample) -> Self {
        let payload_kb = sample.payload_bytes as f64 / 1024.0;

        let memory_amplification = if payload_kb == 0.0 {
            0.0
        } else {
            sample.memory_delta_kb as f64 / payload_kb
        };

        let elapsed_secs = sample.elapsed.as_secs_f64();
        let throughput_kb_per_sec = if sample.completed_iterations == 0 || elapsed_secs == 0.0 {
            0.0
        } else {
            payload_kb * sample.completed_iterations as f64 / elapsed_secs
        };

        let total_data_mb = sample.payload_bytes as f64 * sample.completed_iterations as f64
            / (1024.0 * 1024.0);

        Self {
            memory_amplification,
            throughput_kb_per_sec,
            total_data_mb,
            avg_parse_ms: sample.avg_parse_ms(),
        }
    }

    /// Render the impact-analysis lines to stdout.
    pub fn render(&self) {
        println!("  - Memory amplification: {:.2}x", self.memory_amplification);
        println!("  - Parse throughput: {:.2} KB/s", self.throughput_kb_per_sec);
        println!("  - Total data processed: {:.2} MB", self.total_data_mb);
    }
}

/// Repeatedly parses a fixed adversarial payload and measures its cost.
pub struct AmplificationAnalyzer {
    probe: MemoryProbe,
    settle_delay: Duration,
}

impl AmplificationAnalyzer {
    pub fn new() -> Self {
        Self {
            probe: MemoryProbe::new(),
            settle_delay: Duration::from_millis(100),
        }
    }

    /// Override the settling pause after the reclamation pass.
    pub fn settle(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Parse `payload` up to `iterations` times, stopping at the first
    /// failure.
    ///
    /// Only the last successfully parsed result is retained; it stays alive
    /// until after the ending footprint read so the decoded object graph is
    /// part of the measured delta. Returns the raw sample together with the
    /// codec error when the loop stopped early.
    pub fn analyze<T, E, F>(
        &mut self,
        payload: &[u8],
        iterations: u64,
        mut parse: F,
    ) -> (AmplificationSample, Option<E>)
    where
        F: FnMut(&[u8]) -> Result<T, E>,
    {
        memory::reclaim_and_settle(self.settle_delay);
        let baseline_kb = self.probe.resident_kb();
        tracing::debug!(baseline_kb, iterations, "starting amplification loop");

        let mut completed = 0u64;
        let mut failures = 0u64;
        let mut failure = None;
        let mut last = None;

        let started = Instant::now();
        for iteration in 0..iterations {
            if iterations > 100 && iteration % (iterations / 10) == 0 {
                println!(
                    "  Progress: {}/{} ({} ms elapsed)",
                    iteration,
                    iterations,
                    started.elapsed().as_millis()
                );
            }

            match parse(payload) {
                Ok(value) => {
                    last = Some(value);
                    completed += 1;
                }
                Err(error) => {
                    failures += 1;
                    failure = Some(error);
                    break;
                }
            }
        }
        let elapsed = started.elapsed();

        let ending_kb = self.probe.resident_kb();
        // The retained result must not be droppable before the footprint
        // read above.
        std::hint::black_box(&last);

        let sample = AmplificationSample {
            payload_bytes: payload.len(),
            requested_iterations: iterations,
            completed_iterations: completed,
            failures,
            elapsed,
            memory_delta_kb: ending_kb as i64 - baseline_kb as i64,
        };
        (sample, failure)
    }
}

impl Default for AmplificationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_analyzer() -> AmplificationAnalyzer {
        AmplificationAnalyzer::new().settle(Duration::ZERO)
    }

    #[test]
    fn test_zero_iterations_is_safe() {
        let (sample, failure) =
            quick_analyzer().analyze(&[0u8; 128], 0, |_| Ok::<(), String>(()));

        assert_eq!(sample.completed_iterations, 0);
        assert_eq!(sample.failures, 0);
        assert!(failure.is_none());
        assert_eq!(sample.avg_parse_ms(), 0.0);

        let report = AmplificationReport::derive(&sample);
        assert_eq!(report.throughput_kb_per_sec, 0.0);
        assert_eq!(report.total_data_mb, 0.0);
        assert_eq!(report.avg_parse_ms, 0.0);
    }

    #[test]
    fn test_all_iterations_complete() {
        let mut calls = 0u64;
        let (sample, failure) = quick_analyzer().analyze(&[0u8; 64], 5, |_| {
            calls += 1;
            Ok::<u64, String>(calls)
        });

        assert!(failure.is_none());
        assert_eq!(calls, 5);
        assert_eq!(sample.completed_iterations, 5);
        assert_eq!(sample.failures, 0);
        assert_eq!(sample.payload_bytes, 64);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let mut calls = 0u64;
        let (sample, failure) = quick_analyzer().analyze(&[0u8; 64], 10, |_| {
            calls += 1;
            if calls == 3 {
                Err("truncated field".to_string())
            } else {
                Ok(calls)
            }
        });

        // Exactly three attempts: two successes, then the failing third.
        assert_eq!(calls, 3);
        assert_eq!(sample.completed_iterations, 2);
        assert_eq!(sample.failures, 1);
        assert_eq!(failure.as_deref(), Some("truncated field"));
    }

    #[test]
    fn test_amplification_scales_linearly_with_memory_delta() {
        let base = AmplificationSample {
            payload_bytes: 1024,
            requested_iterations: 1,
            completed_iterations: 1,
            failures: 0,
            elapsed: Duration::from_millis(10),
            memory_delta_kb: 100,
        };
        let doubled = AmplificationSample {
            memory_delta_kb: 200,
            ..base.clone()
        };

        let base_report = AmplificationReport::derive(&base);
        let doubled_report = AmplificationReport::derive(&doubled);
        assert!((base_report.memory_amplification - 100.0).abs() < 1e-9);
        assert!(
            (doubled_report.memory_amplification - 2.0 * base_report.memory_amplification).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_throughput_and_total_data_derivation() {
        let sample = AmplificationSample {
            payload_bytes: 2048,
            requested_iterations: 4,
            completed_iterations: 4,
            failures: 0,
            elapsed: Duration::from_secs(2),
            memory_delta_kb: 0,
        };

        let report = AmplificationReport::derive(&sample);
        // 2 KB * 4 parses over 2 seconds.
        assert!((report.throughput_kb_per_sec - 4.0).abs() < 1e-9);
        assert!((report.total_data_mb - 8192.0 / (1024.0 * 1024.0)).abs() < 1e-12);
        assert!((report.avg_parse_ms - 500.0).abs() < 1e-9);
    }
}
