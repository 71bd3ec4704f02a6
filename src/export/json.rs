//! JSON node/edge document

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fabric::{FabricGraph, Location, Node};

/// Errors that can occur while exporting a graph
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize topology: {0}")]
    Json(#[from] serde_json::Error),
}

/// The whole graph as flat node and edge lists
///
/// Both lists are always present, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopologyDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: usize,
    pub label: String,
    pub level: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nos: String,
    /// Position string
    pub cid: String,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Only written for planned nodes
    #[serde(
        rename = "toBeDeployed",
        default = "deployed",
        skip_serializing_if = "is_deployed"
    )]
    pub to_be_deployed: bool,
}

fn deployed() -> bool {
    true
}

fn is_deployed(to_be_deployed: &bool) -> bool {
    *to_be_deployed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: usize,
    pub to: usize,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.index(),
            label: node.label(),
            level: node.position.level(),
            nos: node.vendor.vendor_type.nos().to_string(),
            cid: node.position.to_string(),
            data: NodeData {
                model: node.platform().to_string(),
                location: node.location.clone(),
                to_be_deployed: node.to_be_deployed,
            },
        }
    }
}

/// Build the node/edge document; nodes in id order, edges in creation order
pub fn to_document(graph: &FabricGraph) -> TopologyDocument {
    TopologyDocument {
        nodes: graph.nodes().map(NodeRecord::from).collect(),
        edges: graph
            .links()
            .map(|l| EdgeRecord {
                from: l.from.index(),
                to: l.to.index(),
            })
            .collect(),
    }
}

/// Serialize the graph as a JSON node/edge document
pub fn render_json(
    graph: &FabricGraph,
    config: &super::ExportConfig,
) -> Result<String, ExportError> {
    let document = to_document(graph);
    let json = if config.pretty_print {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}
