// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Harness-level error types.
//!
//! Only configuration problems are errors here: they abort before any timed
//! work starts and exit non-zero. Codec failures observed inside a
//! measurement loop are carried in the loop's outcome instead; reporting
//! them is the harness's job, so they never become process failures.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Fixture resource not found: {name} (looked for {})", .path.display())]
    FixtureMissing {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report output error: {0}")]
    Reporter(#[from] crate::reporter::ReporterError),
}

/// Result type alias using HarnessError.
pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_missing_display_names_resource() {
        let err = HarnessError::FixtureMissing {
            name: "bomb.bin".to_string(),
            path: PathBuf::from("/tmp/fixtures/bomb.bin"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = err.to_string();
        assert!(message.contains("bomb.bin"));
        assert!(message.contains("/tmp/fixtures"));
    }
}
