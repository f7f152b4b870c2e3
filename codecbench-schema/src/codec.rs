// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Thin wrappers over the codec under test.
//!
//! The harness times these two entry points and nothing else. Both use
//! bincode's standard configuration; decode consumes the whole buffer and
//! returns the decoded value, discarding the consumed-byte count.

use bincode::config;
use serde::{de::DeserializeOwned, Serialize};

pub type EncodeError = bincode::error::EncodeError;
pub type DecodeError = bincode::error::DecodeError;

/// Serialize a message into its wire form.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    bincode::serde::encode_to_vec(value, config::standard())
}

/// Parse a message from its wire form.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    bincode::serde::decode_from_slice(bytes, config::standard()).map(|(value, _)| value)
}
