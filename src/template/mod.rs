//! Template system for describing fabrics
//!
//! A fabric is described by a master template whose pod entries are either
//! inline spine/leaf tiers or references to separately defined pod templates.
//! Resolution turns such a pool into one self-contained [`FabricTemplate`].
//!
//! # Example
//!
//! ```text
//! [[template]]
//! name = "dc1"
//! master = true
//! [[template.fabric.pod]]
//! templateRef = "pod-small"
//!
//! [[template]]
//! name = "pod-small"
//! [[template.fabric.pod]]
//! tier2 = { num = 2, uplinkPerNode = 1, vendorInfo = [{ vendorType = "nokiaSRL", platform = "IXR-D3" }] }
//! tier3 = { num = 4, uplinkPerNode = 2, vendorInfo = [{ vendorType = "nokiaSRL", platform = "IXR-D2" }] }
//! ```

mod registry;
mod resolver;
pub mod types;

pub use registry::{
    check_fabric_template, check_pod_template, PodTemplateSource, TemplateError, TemplateRegistry,
};
pub use resolver::{resolve_fabric_template, resolve_templates};
pub use types::{
    FabricSettings, FabricTemplate, NamedTemplate, PodTemplate, TierTemplate, VendorInfo,
    VendorType,
};
