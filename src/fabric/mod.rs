//! Fabric graph construction
//!
//! This module takes a resolved [`FabricTemplate`] and produces the concrete
//! topology: one node per device instance and one link per uplink, each link
//! labelled with the interface it uses on both ends.

pub mod builder;
pub mod connect;
pub mod error;
pub mod graph;
pub mod types;

pub use builder::populate_nodes;
pub use connect::connect;
pub use error::BuildError;
pub use graph::{FabricGraph, NodeSelector};
pub use types::*;

use tracing::info;

use crate::template::{FabricSettings, FabricTemplate};
use crate::CompileConfig;

/// A compiled fabric: the topology graph plus the settings it was wired with
///
/// The graph is only mutated while [`Fabric::build`] runs.
#[derive(Debug, Clone)]
pub struct Fabric {
    name: String,
    settings: FabricSettings,
    graph: FabricGraph,
}

impl Fabric {
    /// Instantiate and wire all nodes of `template`
    pub fn build(template: &FabricTemplate, config: &CompileConfig) -> Result<Self, BuildError> {
        let mut graph = FabricGraph::new();

        populate_nodes(&mut graph, template, config.location.as_ref())?;
        info!(
            fabric = %config.fabric_name,
            nodes = graph.node_count(),
            pods = template.pod.len(),
            "instantiated nodes"
        );

        connect(&mut graph, &template.settings, &config.port_offsets)?;
        info!(
            fabric = %config.fabric_name,
            links = graph.link_count(),
            "wired fabric"
        );

        Ok(Self {
            name: config.fabric_name.clone(),
            settings: template.settings,
            graph,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &FabricSettings {
        &self.settings
    }

    pub fn graph(&self) -> &FabricGraph {
        &self.graph
    }

    /// Nodes matching `selector`, ordered by group and relative index
    pub fn select(&self, selector: &NodeSelector) -> Vec<&Node> {
        self.graph.select_nodes(selector)
    }
}
