// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Bundled fixture loading.
//!
//! The amplification tool parses a fixed binary payload shipped with the
//! crate. Loading happens by resource name before any benchmarking begins;
//! a missing resource is a startup configuration failure, never a parse
//! failure.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, HarnessResult};

/// Resource name of the known-malicious payload: tens of thousands of
/// repeated embedded entries packed into a few hundred KB of wire bytes.
pub const REPEATED_EMBEDDED_BOMB: &str = "repeated-embedded-bomb.bin";

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load a bundled fixture by resource name.
pub fn load(name: &str) -> HarnessResult<Vec<u8>> {
    let path = fixture_dir().join(name);
    tracing::debug!(path = %path.display(), "loading fixture");
    fs::read(&path).map_err(|source| HarnessError::FixtureMissing {
        name: name.to_string(),
        path,
        source,
    })
}
