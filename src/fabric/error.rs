//! Error types for building the fabric graph

use thiserror::Error;

use super::types::{Node, Position};

/// Errors that can occur while instantiating or wiring nodes
#[derive(Debug, Error)]
pub enum BuildError {
    /// Resolved template is inconsistent
    #[error("invalid fabric: {reason}")]
    Validation { reason: String },

    /// A required tier is missing or declares an unusable node count
    #[error("invalid {tier} tier in {group}: {reason}")]
    TierCount {
        tier: Position,
        group: String,
        reason: String,
    },

    /// A node's uplink count (or index) exceeds the capacity setting sizing its interface blocks
    #[error("{node}: {value} exceeds {setting} {limit}")]
    CapacityExceeded {
        node: String,
        setting: &'static str,
        value: u32,
        limit: u32,
    },

    /// An interface index does not fit in 32 bits
    #[error("{node}: interface index towards {peer} overflows")]
    IndexOverflow { node: String, peer: String },
}

impl BuildError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn tier_count(tier: Position, group: impl ToString, reason: impl Into<String>) -> Self {
        Self::TierCount {
            tier,
            group: group.to_string(),
            reason: reason.into(),
        }
    }

    /// Tier of a pod entry that is missing altogether
    pub fn missing_tier(tier: Position, pod_entry: usize) -> Self {
        Self::tier_count(
            tier,
            format!("pod entry {}", pod_entry + 1),
            "tier is not defined",
        )
    }

    pub fn capacity(node: &Node, setting: &'static str, value: u32, limit: u32) -> Self {
        Self::CapacityExceeded {
            node: node.label(),
            setting,
            value,
            limit,
        }
    }

    pub fn index_overflow(node: &Node, peer: &Node) -> Self {
        Self::IndexOverflow {
            node: node.label(),
            peer: peer.label(),
        }
    }
}
