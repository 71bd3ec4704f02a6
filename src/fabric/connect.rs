//! Wiring of adjacent tiers with deterministic interface assignment
//!
//! Every node reserves a block of interfaces per peer, sized by the capacity
//! settings rather than the actual uplink count:
//!
//! - spine  -> leaf:       `u + 1 + (leaf.rel - 1) * maxUplinksTier3ToTier2`
//! - leaf   -> spine:      `u + 1 + (spine.rel - 1) * maxUplinksTier3ToTier2`
//! - superspine -> spine:  `u + 1 + (spine.pod - 1) * maxUplinksTier2ToTier1`
//! - spine -> superspine:  `u + 1 + (superspine.rel - 1) * maxUplinksTier2ToTier1`
//! - borderleaf -> spine:  `u + 1 + ((spine.pod - 1) + (spine.rel - 1) * maxSpinesPerPod) * maxUplinksTier2ToTier1`
//! - spine -> borderleaf:  `u + 1 + (borderleaf.rel - 1) * maxUplinksTier2ToTier1`
//!
//! Blocks of unrelated peers never overlap, so growing a node's uplink count
//! up to the maximum leaves existing links untouched. The lower-tier endpoint
//! of each link is shifted by its platform port offset.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::platform::{interface_name, PortOffsetTable};
use crate::template::FabricSettings;

use super::error::BuildError;
use super::graph::{FabricGraph, NodeSelector};
use super::types::{Node, NodeId, Position};

/// Create every inter-tier link of `graph`
///
/// All three passes are planned, capacities and interface indices checked,
/// before the first link is added, so a rejected fabric has no links at all.
pub fn connect(
    graph: &mut FabricGraph,
    settings: &FabricSettings,
    offsets: &PortOffsetTable,
) -> Result<(), BuildError> {
    check_capacity(graph, settings)?;

    let spine_leaf = plan_spine_to_leaf(graph, settings, offsets)?;
    let superspine_spine = plan_superspine_to_spine(graph, settings, offsets)?;
    let border_leaf_spine = plan_border_leaf_to_spine(graph, settings, offsets)?;

    let links = add_links(graph, spine_leaf);
    info!(links, "wired spine-leaf");

    let links = add_links(graph, superspine_spine);
    info!(links, "wired superspine-spine");

    let links = add_links(graph, border_leaf_spine);
    info!(links, "wired borderleaf-spine");

    Ok(())
}

/// Validate every node's uplink count (and pod index) against the settings
pub fn check_capacity(graph: &FabricGraph, settings: &FabricSettings) -> Result<(), BuildError> {
    for leaf in graph.select_nodes(&NodeSelector::position(Position::Leaf)) {
        if leaf.uplinks_per_node > settings.max_uplinks_tier3_to_tier2 {
            return Err(BuildError::capacity(
                leaf,
                "maxUplinksTier3ToTier2",
                leaf.uplinks_per_node,
                settings.max_uplinks_tier3_to_tier2,
            ));
        }
    }

    let has_superspines = !graph
        .select_nodes(&NodeSelector::position(Position::Superspine))
        .is_empty();
    let has_border_leafs = !graph
        .select_nodes(&NodeSelector::position(Position::BorderLeaf))
        .is_empty();
    if !has_superspines && !has_border_leafs {
        return Ok(());
    }

    for spine in graph.select_nodes(&NodeSelector::position(Position::Spine)) {
        if spine.uplinks_per_node > settings.max_uplinks_tier2_to_tier1 {
            return Err(BuildError::capacity(
                spine,
                "maxUplinksTier2ToTier1",
                spine.uplinks_per_node,
                settings.max_uplinks_tier2_to_tier1,
            ));
        }
        // the pod index is the fast-moving term of the border-leaf block
        let pod_index = spine.pod_index().unwrap_or(0);
        if has_border_leafs && pod_index > settings.max_spines_per_pod {
            return Err(BuildError::capacity(
                spine,
                "maxSpinesPerPod",
                pod_index,
                settings.max_spines_per_pod,
            ));
        }
    }
    Ok(())
}

/// A link whose endpoints and interfaces are known but not yet in the graph
#[derive(Debug)]
struct PlannedLink {
    from: NodeId,
    to: NodeId,
    from_if: String,
    to_if: String,
    uplink: u32,
}

/// Wire every spine to every leaf of the same pod
fn plan_spine_to_leaf(
    graph: &FabricGraph,
    settings: &FabricSettings,
    offsets: &PortOffsetTable,
) -> Result<Vec<PlannedLink>, BuildError> {
    let max = settings.max_uplinks_tier3_to_tier2;
    let pods: BTreeSet<u32> = graph
        .select_nodes(&NodeSelector::position(Position::Spine))
        .iter()
        .filter_map(|n| n.pod_index())
        .collect();

    let mut planned = Vec::new();
    for pod in pods {
        let spines = graph.select_nodes(&NodeSelector::position(Position::Spine).with_pod(pod));
        let leafs = graph.select_nodes(&NodeSelector::position(Position::Leaf).with_pod(pod));

        for spine in &spines {
            for leaf in &leafs {
                for u in 0..leaf.uplinks_per_node {
                    let spine_index = slot(u, Some(leaf.relative_index - 1), max);
                    let leaf_index = slot(u, Some(spine.relative_index - 1), max);
                    planned.push(plan_link(offsets, spine, spine_index, leaf, leaf_index, u)?);
                }
            }
        }
    }
    Ok(planned)
}

/// Wire plane k superspines to the k-th spine of every pod
fn plan_superspine_to_spine(
    graph: &FabricGraph,
    settings: &FabricSettings,
    offsets: &PortOffsetTable,
) -> Result<Vec<PlannedLink>, BuildError> {
    let max = settings.max_uplinks_tier2_to_tier1;
    let superspines = graph.select_nodes(&NodeSelector::position(Position::Superspine));
    let spines = graph.select_nodes(&NodeSelector::position(Position::Spine));
    warn_if_unwired(&superspines, &spines);

    let mut planned = Vec::new();
    for superspine in &superspines {
        for spine in &spines {
            if superspine.plane_index() != Some(spine.relative_index) {
                continue;
            }
            let pod = spine.pod_index().unwrap_or(1);
            for u in 0..spine.uplinks_per_node {
                let superspine_index = slot(u, Some(pod - 1), max);
                let spine_index = slot(u, Some(superspine.relative_index - 1), max);
                planned.push(plan_link(
                    offsets,
                    superspine,
                    superspine_index,
                    spine,
                    spine_index,
                    u,
                )?);
            }
        }
    }
    Ok(planned)
}

/// Wire every border-leaf to every spine of the fabric
fn plan_border_leaf_to_spine(
    graph: &FabricGraph,
    settings: &FabricSettings,
    offsets: &PortOffsetTable,
) -> Result<Vec<PlannedLink>, BuildError> {
    let max = settings.max_uplinks_tier2_to_tier1;
    let border_leafs = graph.select_nodes(&NodeSelector::position(Position::BorderLeaf));
    let spines = graph.select_nodes(&NodeSelector::position(Position::Spine));
    warn_if_unwired(&border_leafs, &spines);

    let mut planned = Vec::new();
    for border_leaf in &border_leafs {
        for spine in &spines {
            let pod = spine.pod_index().unwrap_or(1);
            let block = (spine.relative_index - 1)
                .checked_mul(settings.max_spines_per_pod)
                .and_then(|b| b.checked_add(pod - 1));
            for u in 0..spine.uplinks_per_node {
                let border_leaf_index = slot(u, block, max);
                let spine_index = slot(u, Some(border_leaf.relative_index - 1), max);
                planned.push(plan_link(
                    offsets,
                    border_leaf,
                    border_leaf_index,
                    spine,
                    spine_index,
                    u,
                )?);
            }
        }
    }
    Ok(planned)
}

/// Interface index `u + 1 + block * stride`, `None` once it leaves the u32 range
fn slot(u: u32, block: Option<u32>, stride: u32) -> Option<u32> {
    block?.checked_mul(stride)?.checked_add(u)?.checked_add(1)
}

fn warn_if_unwired(upper: &[&Node], spines: &[&Node]) {
    if let (Some(node), true) = (upper.first(), spines.is_empty()) {
        warn!(
            position = %node.position,
            nodes = upper.len(),
            "no spines to connect to, nodes stay unwired"
        );
    }
}

/// Name both ends of one link; `to` is the lower-tier endpoint and gets the platform offset
fn plan_link(
    offsets: &PortOffsetTable,
    from: &Node,
    from_index: Option<u32>,
    to: &Node,
    to_index: Option<u32>,
    uplink: u32,
) -> Result<PlannedLink, BuildError> {
    let from_if = from_index
        .map(interface_name)
        .ok_or_else(|| BuildError::index_overflow(from, to))?;
    let to_if = to_index
        .and_then(|index| offsets.interface_name_with_offset(to, index))
        .ok_or_else(|| BuildError::index_overflow(to, from))?;
    debug!(
        from = %from,
        from_if = %from_if,
        to = %to,
        to_if = %to_if,
        uplink,
        "planned link"
    );

    Ok(PlannedLink {
        from: from.id,
        to: to.id,
        from_if,
        to_if,
        uplink,
    })
}

fn add_links(graph: &mut FabricGraph, planned: Vec<PlannedLink>) -> usize {
    let count = planned.len();
    for p in planned {
        let link = graph.add_link(p.from, p.to);
        link.from_if = p.from_if;
        link.to_if = p.to_if;
        link.uplink = p.uplink;
    }
    count
}
