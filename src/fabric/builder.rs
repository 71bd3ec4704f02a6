//! Node instantiation from a resolved fabric template

use std::collections::HashMap;

use tracing::debug;

use crate::template::{FabricTemplate, TierTemplate};

use super::error::BuildError;
use super::graph::FabricGraph;
use super::types::{GroupKey, Location, NodeSpec, Position};

/// Add one node per declared device instance to `graph`
///
/// Pods come first (spines then leafs per pod), then the superspine planes,
/// then the border-leafs.
pub fn populate_nodes(
    graph: &mut FabricGraph,
    template: &FabricTemplate,
    location: Option<&Location>,
) -> Result<(), BuildError> {
    // pod index -> (pod entry, occurrence) that claimed it
    let mut claimed: HashMap<u32, (usize, u32)> = HashMap::new();

    for (p, pod) in template.pod.iter().enumerate() {
        let spines = pod
            .tier2
            .as_ref()
            .ok_or_else(|| BuildError::missing_tier(Position::Spine, p))?;
        let leafs = pod
            .tier3
            .as_ref()
            .ok_or_else(|| BuildError::missing_tier(Position::Leaf, p))?;

        for i in 0..pod.pod_number() {
            let pod_index = pod_index(p, i);
            if let Some((other_p, other_i)) = claimed.insert(pod_index, (p, i)) {
                return Err(BuildError::validation(format!(
                    "pod {} of pod entry {} and pod {} of pod entry {} both map to pod index {}",
                    other_i + 1,
                    other_p + 1,
                    i + 1,
                    p + 1,
                    pod_index
                )));
            }

            let deployed = pod.to_be_deployed();
            add_tier(graph, Position::Spine, pod_index, spines, location, deployed)?;
            add_tier(graph, Position::Leaf, pod_index, leafs, location, deployed)?;
        }
    }

    if let Some(superspines) = &template.tier1 {
        for plane in 1..=template.superspine_planes() {
            add_tier(graph, Position::Superspine, plane, superspines, location, true)?;
        }
    }

    if let Some(border_leafs) = &template.border_leaf {
        add_tier(graph, Position::BorderLeaf, 1, border_leafs, location, true)?;
    }

    Ok(())
}

/// Pod index of occurrence `i` of pod entry `p`, both counted from 0
pub fn pod_index(p: usize, i: u32) -> u32 {
    (p as u32 + 1) * (i + 1)
}

/// Instantiate the nodes of one tier within one group
fn add_tier(
    graph: &mut FabricGraph,
    position: Position,
    group_index: u32,
    tier: &TierTemplate,
    location: Option<&Location>,
    to_be_deployed: bool,
) -> Result<(), BuildError> {
    let group = GroupKey::for_position(position, group_index);
    if tier.node_number == 0 {
        return Err(BuildError::tier_count(position, group, "tier declares zero nodes"));
    }
    if tier.vendor_info.is_empty() {
        return Err(BuildError::tier_count(position, group, "tier declares no vendor info"));
    }

    for n in 0..tier.node_number {
        // 2 vendors alternate odd/even, 3 vendors rotate
        let vendor = &tier.vendor_info[n as usize % tier.vendor_info.len()];
        let id = graph.add_node(NodeSpec {
            position,
            group_index,
            relative_index: n + 1,
            uplinks_per_node: tier.uplinks_per_node,
            vendor: vendor.clone(),
            location: location.cloned(),
            to_be_deployed,
        });
        debug!(
            id = id.index(),
            node = %graph.node(id).map(|n| n.label()).unwrap_or_default(),
            vendor = %vendor.vendor_type,
            platform = %vendor.platform,
            "added node"
        );
    }
    Ok(())
}
