// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Wire message definitions.
//!
//! Two independent schemas share this module: the synthetic nested message
//! used by the latency benchmark, and the adversarial schema whose repeated
//! embedded records make a small payload decode into a disproportionately
//! large object graph.

use serde::{Deserialize, Serialize};

/// A node in the synthetic benchmark tree.
///
/// Non-leaf nodes carry exactly the schema fan-out of children; leaves carry
/// none. Names encode lineage (`root`, `root.1`, `root.1.1`, ...) and each
/// child's value is the parent's value plus the 1-based child index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub value: i64,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Total number of nodes in the subtree rooted here, self included.
    pub fn node_count(&self) -> u64 {
        1 + self.children.iter().map(TreeNode::node_count).sum::<u64>()
    }

    /// Depth of the subtree rooted here, in levels. A leaf is one level.
    pub fn levels(&self) -> u32 {
        1 + self
            .children
            .iter()
            .map(TreeNode::levels)
            .max()
            .unwrap_or(0)
    }
}

/// Top-level request message for the latency benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEnvelope {
    pub root: TreeNode,
}

/// Top-level message for the amplification payload.
///
/// Every entry is an embedded message that decodes into three owned
/// containers, so a payload of many near-empty entries costs the decoder far
/// more memory than its own wire size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerableRecord {
    pub entries: Vec<EmbeddedEntry>,
}

/// One repeated embedded record inside a [`VulnerableRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedEntry {
    pub values: Vec<u64>,
    pub flags: Vec<u32>,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, value: i64) -> TreeNode {
        TreeNode {
            name: name.to_string(),
            value,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_node_count_counts_self_and_descendants() {
        let tree = TreeNode {
            name: "root".to_string(),
            value: 0,
            children: vec![leaf("root.1", 1), leaf("root.2", 2)],
        };
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.levels(), 2);
    }

    #[test]
    fn test_leaf_is_one_level() {
        let node = leaf("root", 0);
        assert_eq!(node.node_count(), 1);
        assert_eq!(node.levels(), 1);
    }
}
