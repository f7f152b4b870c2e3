// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Message schema and codec glue for codecbench.
//!
//! Defines the wire messages the harness feeds to the codec under test and
//! thin encode/decode wrappers around that codec. The codec itself (bincode
//! with its standard configuration) is an external, unmodified library: the
//! harness treats these entry points as opaque operations and never reaches
//! into the wire format.

pub mod codec;
pub mod message;

pub use codec::{decode, encode, DecodeError, EncodeError};
pub use message::{BenchmarkEnvelope, EmbeddedEntry, TreeNode, VulnerableRecord};
