//! Plain-text listings for terminals and logs

use std::fmt::Write;

use crate::fabric::{FabricGraph, NodeSelector, Position};

/// One generated link label per line, in creation order
pub fn render_links(graph: &FabricGraph) -> String {
    let mut out = String::new();
    for link in graph.links() {
        out.push_str(&graph.link_label(link));
        out.push('\n');
    }
    out
}

/// Node counts per position followed by one line per node
///
/// Nodes of pods that are not deployed yet are marked `planned`.
pub fn render_summary(graph: &FabricGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "nodes: {}, links: {}", graph.node_count(), graph.link_count());

    for position in Position::ALL {
        let nodes = graph.select_nodes(&NodeSelector::position(position));
        if nodes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}: {}", position, nodes.len());
        for node in nodes {
            let _ = write!(
                out,
                "  {} {} {} uplinks={} links={}",
                node.label(),
                node.vendor.vendor_type,
                node.platform(),
                node.uplinks_per_node,
                graph.links_of(node.id).len()
            );
            if !node.to_be_deployed {
                out.push_str(" planned");
            }
            out.push('\n');
        }
    }
    out
}
