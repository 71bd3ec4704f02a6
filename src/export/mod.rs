//! Exporters for compiled fabric graphs
//!
//! All exporters only read the graph and accept an empty one.

pub mod config;
pub mod dot;
pub mod json;
pub mod text;

pub use config::ExportConfig;
pub use dot::{render_dot, DotBuilder};
pub use json::{
    render_json, to_document, EdgeRecord, ExportError, NodeData, NodeRecord, TopologyDocument,
};
pub use text::{render_links, render_summary};
