// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Deterministic synthetic tree generation.
//!
//! Builds the fixed-shape nested message the latency benchmark parses. The
//! tree is generated once per run, serialized once, and the byte buffer is
//! reused across every warmup and measured round, so the benchmark times
//! parse cost only.

use codecbench_schema::{BenchmarkEnvelope, TreeNode};

/// Children per non-leaf node.
pub const FAN_OUT: i64 = 8;

/// Levels in the standard benchmark tree, root included.
pub const TREE_LEVELS: u32 = 8;

/// Build a synthetic tree rooted at `name`/`value` with `depth` generations
/// of children below the root; `depth == 0` yields a single leaf.
///
/// Pure and deterministic: identical arguments always produce structurally
/// and value-identical trees. Child names append the 1-based child index to
/// the parent lineage (`root.1`, `root.1.1`, ...) and child values add that
/// index to the parent value, so values strictly increase along every
/// root-to-leaf path.
///
/// Callers must keep `depth` within the schema's fixed nesting
/// (`TREE_LEVELS - 1`); exceeding it is a programming error, not a runtime
/// condition this function defends against.
pub fn generate(name: &str, value: i64, depth: u32) -> TreeNode {
    let mut node = TreeNode {
        name: name.to_string(),
        value,
        children: Vec::new(),
    };

    if depth == 0 {
        return node;
    }

    node.children.reserve_exact(FAN_OUT as usize);
    for index in 1..=FAN_OUT {
        let child_name = format!("{name}.{index}");
        node.children.push(generate(&child_name, value + index, depth - 1));
    }

    node
}

/// The standard benchmark message: [`TREE_LEVELS`] levels with [`FAN_OUT`]
/// branching, rooted at `("root", 0)`.
pub fn benchmark_envelope() -> BenchmarkEnvelope {
    BenchmarkEnvelope {
        root: generate("root", 0, TREE_LEVELS - 1),
    }
}
