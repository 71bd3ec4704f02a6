//! Platform port-offset table and interface naming
//!
//! Some platforms reserve their first ports for fixed downlinks, so uplink
//! numbering starts after them. The offsets are configuration data: the
//! built-in table is embedded as TOML and can be replaced from a file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::fabric::{Node, Position};
use crate::template::VendorType;

/// One (vendor type, position, platform) entry of the offset table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortOffset {
    pub vendor_type: VendorType,
    pub position: Position,
    pub platform: String,
    pub offset: u32,
}

/// Offsets added to logical uplink indices before naming the interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOffsetTable {
    entries: Vec<PortOffset>,
}

/// TOML structure for deserializing offset tables
#[derive(Deserialize)]
struct TomlPortOffsets {
    #[serde(default)]
    offset: Vec<PortOffset>,
}

/// Built-in offsets; combinations not listed here have offset 0
const DEFAULT_PORT_OFFSETS: &str = r#"
[[offset]]
vendorType = "nokiaSRL"
position = "leaf"
platform = "IXR-D3"
offset = 26

[[offset]]
vendorType = "nokiaSRL"
position = "leaf"
platform = "IXR-D2"
offset = 48

[[offset]]
vendorType = "nokiaSRL"
position = "spine"
platform = "IXR-D3"
offset = 24
"#;

impl PortOffsetTable {
    /// Table without any offsets
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load an offset table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load an offset table from a TOML string
    pub fn from_str(content: &str) -> Result<Self, LoadError> {
        let parsed: TomlPortOffsets = toml::from_str(content)?;
        Ok(Self {
            entries: parsed.offset,
        })
    }

    pub fn entries(&self) -> &[PortOffset] {
        &self.entries
    }

    /// Offset for a vendor/position/platform combination, 0 when unmatched
    pub fn offset(&self, vendor_type: &VendorType, position: Position, platform: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| {
                &e.vendor_type == vendor_type && e.position == position && e.platform == platform
            })
            .map(|e| e.offset)
            .unwrap_or(0)
    }

    /// Interface name for `index` on `node`, shifted by the node's platform offset
    ///
    /// Returns `None` when the shifted index does not fit in a `u32`.
    pub fn interface_name_with_offset(&self, node: &Node, index: u32) -> Option<String> {
        let offset = self.offset(&node.vendor.vendor_type, node.position, node.platform());
        index.checked_add(offset).map(interface_name)
    }
}

impl Default for PortOffsetTable {
    fn default() -> Self {
        Self::from_str(DEFAULT_PORT_OFFSETS).expect("Default port offsets should be valid TOML")
    }
}

/// Bare interface name for a logical index
pub fn interface_name(index: u32) -> String {
    format!("int-1/{}", index)
}
