// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! JSON persistence for benchmark reports.
//!
//! Wraps any report payload in a document carrying the suite version, a UTC
//! timestamp, and a snapshot of the host, then writes it to a timestamped
//! file for later comparison across runs.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sysinfo::System;
use thiserror::Error;

/// Errors that can occur while persisting a report.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to create output file or directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Host details captured alongside every persisted report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub kernel_version: Option<String>,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub memory_bytes: u64,
}

impl SystemInfo {
    pub fn collect() -> Self {
        let system = System::new_all();
        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: system
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: system.cpus().len(),
            memory_bytes: system.total_memory(),
        }
    }
}

/// Envelope written around every persisted report payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument<T> {
    pub suite: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub report: T,
}

/// JSON reporter writing timestamped documents into one directory.
pub struct JsonReporter {
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a reporter, creating the output directory if needed.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Save a report under `<prefix>_<timestamp>.json`.
    ///
    /// Returns the path to the created file.
    pub fn save<T: Serialize>(&self, prefix: &str, report: &T) -> Result<PathBuf, ReporterError> {
        let timestamp = Utc::now();
        let document = ReportDocument {
            suite: "codecbench".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp,
            system: SystemInfo::collect(),
            report,
        };

        let filename = format!("{}_{}.json", prefix, timestamp.format("%Y-%m-%dT%H-%M-%SZ"));
        let filepath = self.output_dir.join(&filename);

        let file = File::create(&filepath)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &document)?;

        Ok(filepath)
    }

    /// Load a previously saved document.
    pub fn load<T: DeserializeOwned>(
        path: impl AsRef<Path>,
    ) -> Result<ReportDocument<T>, ReporterError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BenchmarkReport, LatencySample, RunConfig};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = JsonReporter::new(temp_dir.path()).unwrap();

        let config = RunConfig {
            warmup_iterations: 10,
            batch_size: 100,
            rounds: 1,
            message_bytes: 2048,
        };
        let rounds = [LatencySample {
            elapsed: Duration::from_micros(500),
            batch: 100,
        }];
        let report = BenchmarkReport::new(config, &rounds);

        let path = reporter.save("parse_latency", &report).unwrap();
        assert!(path.exists());

        let loaded: ReportDocument<BenchmarkReport> = JsonReporter::load(&path).unwrap();
        assert_eq!(loaded.suite, "codecbench");
        assert_eq!(loaded.report.config.message_bytes, 2048);
        assert_eq!(loaded.report.latency.samples, 1);
        assert_eq!(loaded.report.latency.mean_us, 5.0);
    }

    #[test]
    fn test_system_info_collects_host_details() {
        let info = SystemInfo::collect();
        assert!(!info.os.is_empty());
        assert!(info.cpu_cores > 0);
        assert!(info.memory_bytes > 0);
    }
}
