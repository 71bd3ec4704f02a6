//! Fabric Topology - compiles Clos data-center fabric templates into topology graphs
//!
//! This library provides a template resolver, a node builder, the tier
//! interconnector and exporters for the resulting graph.
//!
//! # Example
//!
//! ```rust
//! use fabric_topology::template::{FabricTemplate, PodTemplate, TierTemplate, VendorInfo};
//! use fabric_topology::{compile_template, CompileConfig};
//!
//! let srl = vec![VendorInfo::new("nokiaSRL", "IXR-D3")];
//! let template = FabricTemplate {
//!     pod: vec![PodTemplate::inline(
//!         1,
//!         TierTemplate::new(2, 1, srl.clone()),
//!         TierTemplate::new(4, 1, srl),
//!     )],
//!     ..FabricTemplate::default()
//! };
//!
//! let fabric = compile_template(&template, &CompileConfig::default()).unwrap();
//! assert_eq!(fabric.graph().node_count(), 6);
//! assert_eq!(fabric.graph().link_count(), 8);
//! ```

pub mod error;
pub mod export;
pub mod fabric;
pub mod loader;
pub mod platform;
pub mod template;

pub use error::LoadError;
pub use export::{render_dot, render_json, render_links, render_summary, ExportConfig, ExportError};
pub use fabric::{BuildError, Fabric, FabricGraph, Location, NodeSelector, Position};
pub use loader::TemplateSet;
pub use platform::PortOffsetTable;
pub use template::{FabricTemplate, TemplateError, TemplateRegistry};

use thiserror::Error;
use tracing::info;

/// Errors that can occur during the compile pipeline
#[derive(Debug, Error)]
pub enum CompileError {
    /// Error while validating or resolving templates
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Error while instantiating or wiring nodes
    #[error("build error: {0}")]
    Build(#[from] BuildError),
}

/// Configuration for the complete compile pipeline
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Name of the compiled fabric
    pub fabric_name: String,
    /// Location tags attached to every node
    pub location: Option<Location>,
    /// Port offsets applied to uplink interfaces
    pub port_offsets: PortOffsetTable,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            fabric_name: "fabric".to_string(),
            location: None,
            port_offsets: PortOffsetTable::default(),
        }
    }
}

impl CompileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fabric name
    pub fn with_fabric_name(mut self, name: impl Into<String>) -> Self {
        self.fabric_name = name.into();
        self
    }

    /// Attach location tags to every node
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Replace the built-in port offset table
    pub fn with_port_offsets(mut self, offsets: PortOffsetTable) -> Self {
        self.port_offsets = offsets;
        self
    }
}

/// Resolve the templates of `registry` and compile the result
///
/// This is the main entry point for the library. It validates the pool,
/// inlines pod references, instantiates every node and wires the tiers.
///
/// # Example
///
/// ```rust
/// use fabric_topology::template::{
///     FabricTemplate, NamedTemplate, PodTemplate, TierTemplate, VendorInfo,
/// };
/// use fabric_topology::{compile, CompileConfig, TemplateRegistry};
///
/// let srl = vec![VendorInfo::new("nokiaSRL", "IXR-D2")];
/// let mut registry = TemplateRegistry::new();
/// registry.register(NamedTemplate::master("dc1", FabricTemplate {
///     pod: vec![PodTemplate::reference("pod-a")],
///     ..FabricTemplate::default()
/// })).unwrap();
/// registry.register(NamedTemplate::child("pod-a", FabricTemplate {
///     pod: vec![PodTemplate::inline(
///         1,
///         TierTemplate::new(1, 1, srl.clone()),
///         TierTemplate::new(2, 1, srl),
///     )],
///     ..FabricTemplate::default()
/// })).unwrap();
///
/// let fabric = compile(&registry, &CompileConfig::new().with_fabric_name("dc1")).unwrap();
/// assert_eq!(fabric.name(), "dc1");
/// assert_eq!(fabric.graph().link_count(), 2);
/// ```
pub fn compile(
    registry: &TemplateRegistry,
    config: &CompileConfig,
) -> Result<Fabric, CompileError> {
    let template = registry.resolve()?;
    info!(
        templates = registry.len(),
        pods = template.pod.len(),
        "resolved templates"
    );
    compile_template(&template, config)
}

/// Compile an already resolved fabric template
///
/// A template that still holds pod references is rejected.
pub fn compile_template(
    template: &FabricTemplate,
    config: &CompileConfig,
) -> Result<Fabric, CompileError> {
    if template.has_reference() {
        return Err(
            BuildError::validation("template still holds unresolved pod references").into(),
        );
    }
    Ok(Fabric::build(template, config)?)
}
