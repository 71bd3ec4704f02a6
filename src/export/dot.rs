//! DOT text description of the fabric graph

use crate::fabric::{FabricGraph, Link, Node};

use super::ExportConfig;

/// Builder for DOT output
pub struct DotBuilder {
    config: ExportConfig,
    nodes: Vec<String>,
    edges: Vec<String>,
}

impl DotBuilder {
    /// Create a new DOT builder
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            nodes: vec![],
            edges: vec![],
        }
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            " "
        }
    }

    /// Declare a node, identified by its label
    pub fn add_node(&mut self, node: &Node) {
        let mut line = format!("{}{}", self.indent_str(), quote(&node.label()));
        if self.config.node_attributes {
            line.push_str(&format!(
                " [position={}, level={}]",
                quote(node.position.as_str()),
                node.position.level()
            ));
        }
        line.push(';');
        self.nodes.push(line);
    }

    /// Add an edge with both endpoint interfaces as attributes
    pub fn add_link(&mut self, from: &Node, to: &Node, link: &Link) {
        self.edges.push(format!(
            "{}{} -- {} [from_if={}, to_if={}];",
            self.indent_str(),
            quote(&from.label()),
            quote(&to.label()),
            quote(&link.from_if),
            quote(&link.to_if)
        ));
    }

    /// Build the final DOT string
    pub fn build(self) -> String {
        let nl = self.newline();
        let mut out = match &self.config.graph_name {
            Some(name) => format!("graph {} {{", quote(name)),
            None => "graph {".to_string(),
        };
        out.push_str(nl);
        for line in self.nodes.iter().chain(self.edges.iter()) {
            out.push_str(line);
            out.push_str(nl);
        }
        out.push('}');
        if self.config.pretty_print {
            out.push('\n');
        }
        out
    }
}

/// Quote a DOT identifier
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render the graph as an undirected DOT graph
///
/// Nodes are declared in id order, links follow in creation order.
pub fn render_dot(graph: &FabricGraph, config: &ExportConfig) -> String {
    let mut builder = DotBuilder::new(config.clone());
    for node in graph.nodes() {
        builder.add_node(node);
    }
    for link in graph.links() {
        if let (Some(from), Some(to)) = (graph.node(link.from), graph.node(link.to)) {
            builder.add_link(from, to, link);
        }
    }
    builder.build()
}
