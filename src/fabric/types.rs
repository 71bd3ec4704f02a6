//! Core types for the fabric graph

use std::collections::BTreeMap;
use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::template::VendorInfo;

/// Graph-local identity of a node
pub type NodeId = NodeIndex;

/// Tier a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Superspine,
    Spine,
    Leaf,
    BorderLeaf,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Superspine,
        Position::Spine,
        Position::Leaf,
        Position::BorderLeaf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Superspine => "superspine",
            Position::Spine => "spine",
            Position::Leaf => "leaf",
            Position::BorderLeaf => "borderleaf",
        }
    }

    /// Tier depth, counted from the core (superspine = 0) to the edge
    pub fn level(&self) -> u32 {
        match self {
            Position::Superspine => 0,
            Position::Spine => 1,
            Position::Leaf => 2,
            Position::BorderLeaf => 3,
        }
    }

    /// Whether nodes at this position carry an uplink count
    pub fn has_uplinks(&self) -> bool {
        matches!(self, Position::Spine | Position::Leaf)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Group a node is indexed within
///
/// Derived solely from the position: spines and leafs live in a pod,
/// superspines in a plane, border-leafs in one fabric-wide group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Pod(u32),
    Plane(u32),
    None,
}

impl GroupKey {
    pub fn for_position(position: Position, index: u32) -> Self {
        match position {
            Position::Superspine => GroupKey::Plane(index),
            Position::Spine | Position::Leaf => GroupKey::Pod(index),
            Position::BorderLeaf => GroupKey::None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Pod(i) => write!(f, "pod {}", i),
            GroupKey::Plane(i) => write!(f, "plane {}", i),
            GroupKey::None => write!(f, "fabric"),
        }
    }
}

/// Opaque location tags attached to every node (e.g. latitude/longitude)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(BTreeMap<String, String>);

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything needed to create a node, except its id
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub position: Position,
    /// Pod index for spines/leafs, plane index for superspines, ignored for border-leafs
    pub group_index: u32,
    pub relative_index: u32,
    pub uplinks_per_node: u32,
    pub vendor: VendorInfo,
    pub location: Option<Location>,
    pub to_be_deployed: bool,
}

/// A device instance in the fabric
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    /// 1-based index within the node's group
    pub relative_index: u32,
    pub group: GroupKey,
    /// Uplinks towards the next tier up; zero for superspines and border-leafs
    pub uplinks_per_node: u32,
    pub vendor: VendorInfo,
    pub location: Option<Location>,
    /// False for nodes of pods that are planned but not rolled out
    pub to_be_deployed: bool,
}

impl Node {
    pub(crate) fn from_spec(id: NodeId, spec: NodeSpec) -> Self {
        let uplinks_per_node = if spec.position.has_uplinks() {
            spec.uplinks_per_node
        } else {
            0
        };
        Self {
            id,
            position: spec.position,
            relative_index: spec.relative_index,
            group: GroupKey::for_position(spec.position, spec.group_index),
            uplinks_per_node,
            vendor: spec.vendor,
            location: spec.location,
            to_be_deployed: spec.to_be_deployed,
        }
    }

    pub fn pod_index(&self) -> Option<u32> {
        match self.group {
            GroupKey::Pod(i) => Some(i),
            _ => None,
        }
    }

    pub fn plane_index(&self) -> Option<u32> {
        match self.group {
            GroupKey::Plane(i) => Some(i),
            _ => None,
        }
    }

    pub fn platform(&self) -> &str {
        &self.vendor.platform
    }

    /// Generated node name, e.g. `pod1-leaf3`, `plane2-superspine1`, `borderleaf1`
    pub fn label(&self) -> String {
        match self.group {
            GroupKey::Plane(plane) => {
                format!("plane{}-{}{}", plane, self.position, self.relative_index)
            }
            GroupKey::Pod(pod) => format!("pod{}-{}{}", pod, self.position, self.relative_index),
            GroupKey::None => format!("{}{}", self.position, self.relative_index),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One physical link between two nodes of adjacent tiers
///
/// `from` is always the upper-tier endpoint of the uplink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    pub from_if: String,
    pub to_if: String,
    /// Uplink slot this link occupies between the node pair
    pub uplink: u32,
}

impl Link {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            from_if: String::new(),
            to_if: String::new(),
            uplink: 0,
        }
    }
}
