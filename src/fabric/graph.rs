//! Undirected multigraph of fabric nodes and links

use petgraph::graph::{EdgeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::types::{Link, Node, NodeId, NodeSpec, Position};

/// Conjunction of attribute constraints used to select nodes
///
/// Unset fields match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeSelector {
    pub position: Option<Position>,
    pub pod_index: Option<u32>,
    pub plane_index: Option<u32>,
}

impl NodeSelector {
    /// Select every node
    pub fn any() -> Self {
        Self::default()
    }

    /// Select nodes at a position
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn with_pod(mut self, pod_index: u32) -> Self {
        self.pod_index = Some(pod_index);
        self
    }

    pub fn with_plane(mut self, plane_index: u32) -> Self {
        self.plane_index = Some(plane_index);
        self
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.position.map_or(true, |p| node.position == p)
            && self.pod_index.map_or(true, |i| node.pod_index() == Some(i))
            && self.plane_index.map_or(true, |i| node.plane_index() == Some(i))
    }
}

/// Graph owning all nodes and links of one compiled fabric
#[derive(Debug, Clone, Default)]
pub struct FabricGraph {
    graph: UnGraph<Node, Link>,
}

impl FabricGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id
    pub fn add_node(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.graph.node_count();
        let id = self
            .graph
            .add_node(Node::from_spec(NodeId::new(id), spec));
        debug_assert_eq!(self.graph[id].id, id);
        id
    }

    /// Add a link between two nodes; the caller attaches the interface names
    ///
    /// The same pair may be linked several times, once per uplink slot.
    pub fn add_link(&mut self, from: NodeId, to: NodeId) -> &mut Link {
        let edge = self.graph.add_edge(from, to, Link::new(from, to));
        &mut self.graph[edge]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node_weight(id)
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// All links in creation order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Links attached to a node, in creation order
    pub fn links_of(&self, id: NodeId) -> Vec<&Link> {
        let mut edges: Vec<EdgeIndex> = self.graph.edges(id).map(|e| e.id()).collect();
        edges.sort();
        edges.dedup();
        edges.into_iter().map(|e| &self.graph[e]).collect()
    }

    /// Select nodes matching all constraints of `selector`
    ///
    /// Results are ordered by group, then by relative index, regardless of
    /// insertion order.
    pub fn select_nodes(&self, selector: &NodeSelector) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self
            .graph
            .node_weights()
            .filter(|n| selector.matches(n))
            .collect();
        nodes.sort_by_key(|n| (n.position, n.group, n.relative_index));
        nodes
    }

    /// Generated link name, e.g. `pod1-spine1-int-1-1-pod1-leaf1-int-1-27`
    pub fn link_label(&self, link: &Link) -> String {
        let from = self.node_label(link.from);
        let to = self.node_label(link.to);
        format!("{}-{}-{}-{}", from, link.from_if, to, link.to_if).replace('/', "-")
    }

    fn node_label(&self, id: NodeId) -> String {
        self.node(id).map(Node::label).unwrap_or_default()
    }
}
