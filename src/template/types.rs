//! Template types describing a fabric declaratively
//!
//! Field names follow the camelCase wire format used by the template files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default headroom for uplinks between adjacent tiers
const DEFAULT_MAX_UPLINKS: u32 = 1;

/// Default headroom for spines per pod (also the pod stride on border-leafs)
const DEFAULT_MAX_SPINES_PER_POD: u32 = 16;

/// Vendor family of a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VendorType {
    NokiaSrl,
    NokiaSros,
    /// Any vendor type the compiler has no special handling for
    Other(String),
}

impl VendorType {
    pub fn as_str(&self) -> &str {
        match self {
            VendorType::NokiaSrl => "nokiaSRL",
            VendorType::NokiaSros => "nokiaSROS",
            VendorType::Other(s) => s.as_str(),
        }
    }

    /// Normalized network operating system name used in exports
    pub fn nos(&self) -> &str {
        match self {
            VendorType::NokiaSrl => "srlinux",
            VendorType::NokiaSros => "sros",
            VendorType::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for VendorType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "nokiaSRL" => VendorType::NokiaSrl,
            "nokiaSROS" => VendorType::NokiaSros,
            _ => VendorType::Other(s),
        }
    }
}

impl From<&str> for VendorType {
    fn from(s: &str) -> Self {
        VendorType::from(s.to_string())
    }
}

impl From<VendorType> for String {
    fn from(v: VendorType) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for VendorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor and platform assigned to a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfo {
    pub vendor_type: VendorType,
    #[serde(default)]
    pub platform: String,
}

impl VendorInfo {
    pub fn new(vendor_type: impl Into<VendorType>, platform: impl Into<String>) -> Self {
        Self {
            vendor_type: vendor_type.into(),
            platform: platform.into(),
        }
    }
}

/// One tier of nodes (superspine, spine, leaf or border-leaf)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTemplate {
    /// Vendors assigned round-robin over the nodes of the tier
    #[serde(default)]
    pub vendor_info: Vec<VendorInfo>,
    /// Number of nodes in the tier
    #[serde(rename = "num", default)]
    pub node_number: u32,
    /// Uplinks per node towards the next tier up
    #[serde(rename = "uplinkPerNode", default)]
    pub uplinks_per_node: u32,
}

impl TierTemplate {
    pub fn new(node_number: u32, uplinks_per_node: u32, vendor_info: Vec<VendorInfo>) -> Self {
        Self {
            vendor_info,
            node_number,
            uplinks_per_node,
        }
    }
}

/// A pod definition: inline spine/leaf tiers or a reference to a pod template
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplate {
    /// Number of pods built from this entry
    #[serde(rename = "num", default, skip_serializing_if = "Option::is_none")]
    pub pod_number: Option<u32>,
    /// Spine tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier2: Option<TierTemplate>,
    /// Leaf tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier3: Option<TierTemplate>,
    /// Name of a template defining this pod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_ref: Option<String>,
    /// Whether the pods of this entry are rolled out or only planned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_be_deployed: Option<bool>,
}

impl PodTemplate {
    /// Inline pod with spine and leaf tiers
    pub fn inline(pod_number: u32, spines: TierTemplate, leafs: TierTemplate) -> Self {
        Self {
            pod_number: Some(pod_number),
            tier2: Some(spines),
            tier3: Some(leafs),
            template_ref: None,
            to_be_deployed: None,
        }
    }

    /// Pod defined by a named pod template
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            template_ref: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn has_reference(&self) -> bool {
        self.template_ref.is_some()
    }

    pub fn has_inline_tiers(&self) -> bool {
        self.tier2.is_some() || self.tier3.is_some()
    }

    /// Number of pod occurrences, 1 when unset
    pub fn pod_number(&self) -> u32 {
        self.pod_number.unwrap_or(1)
    }

    /// Whether the pods are deployed, true when unset
    pub fn to_be_deployed(&self) -> bool {
        self.to_be_deployed.unwrap_or(true)
    }

    pub fn with_to_be_deployed(mut self, to_be_deployed: bool) -> Self {
        self.to_be_deployed = Some(to_be_deployed);
        self
    }
}

/// Fabric-wide capacity headroom
///
/// These are not counts: they size the interface block reserved per peer so
/// that growing a tier never renumbers existing links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricSettings {
    #[serde(default = "default_max_uplinks")]
    pub max_uplinks_tier3_to_tier2: u32,
    #[serde(default = "default_max_uplinks")]
    pub max_uplinks_tier2_to_tier1: u32,
    #[serde(default = "default_max_spines_per_pod")]
    pub max_spines_per_pod: u32,
}

fn default_max_uplinks() -> u32 {
    DEFAULT_MAX_UPLINKS
}

fn default_max_spines_per_pod() -> u32 {
    DEFAULT_MAX_SPINES_PER_POD
}

impl Default for FabricSettings {
    fn default() -> Self {
        Self {
            max_uplinks_tier3_to_tier2: DEFAULT_MAX_UPLINKS,
            max_uplinks_tier2_to_tier1: DEFAULT_MAX_UPLINKS,
            max_spines_per_pod: DEFAULT_MAX_SPINES_PER_POD,
        }
    }
}

impl FabricSettings {
    pub fn new(
        max_uplinks_tier3_to_tier2: u32,
        max_uplinks_tier2_to_tier1: u32,
        max_spines_per_pod: u32,
    ) -> Self {
        Self {
            max_uplinks_tier3_to_tier2,
            max_uplinks_tier2_to_tier1,
            max_spines_per_pod,
        }
    }
}

/// Complete fabric description
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricTemplate {
    /// Superspine tier, instantiated once per plane
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier1: Option<TierTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_leaf: Option<TierTemplate>,
    #[serde(default)]
    pub pod: Vec<PodTemplate>,
    #[serde(default)]
    pub settings: FabricSettings,
}

impl FabricTemplate {
    pub fn has_reference(&self) -> bool {
        self.pod.iter().any(PodTemplate::has_reference)
    }

    /// Number of superspine planes: the largest spine count over all pods
    pub fn superspine_planes(&self) -> u32 {
        self.pod
            .iter()
            .filter_map(|p| p.tier2.as_ref())
            .map(|t| t.node_number)
            .max()
            .unwrap_or(0)
    }
}

/// A template as stored in the template pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTemplate {
    pub name: String,
    /// Master templates may reference pod templates by name
    #[serde(default)]
    pub master: bool,
    pub fabric: FabricTemplate,
}

impl NamedTemplate {
    pub fn master(name: impl Into<String>, fabric: FabricTemplate) -> Self {
        Self {
            name: name.into(),
            master: true,
            fabric,
        }
    }

    pub fn child(name: impl Into<String>, fabric: FabricTemplate) -> Self {
        Self {
            name: name.into(),
            master: false,
            fabric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_type_roundtrip_strings() {
        assert_eq!(VendorType::from("nokiaSRL"), VendorType::NokiaSrl);
        assert_eq!(VendorType::from("nokiaSROS"), VendorType::NokiaSros);
        assert_eq!(
            VendorType::from("arista"),
            VendorType::Other("arista".to_string())
        );
        assert_eq!(String::from(VendorType::NokiaSrl), "nokiaSRL");
    }

    #[test]
    fn test_vendor_type_nos() {
        assert_eq!(VendorType::NokiaSrl.nos(), "srlinux");
        assert_eq!(VendorType::NokiaSros.nos(), "sros");
        assert_eq!(VendorType::from("eos").nos(), "eos");
    }

    #[test]
    fn test_pod_number_defaults_to_one() {
        assert_eq!(PodTemplate::reference("pod-a").pod_number(), 1);
    }

    #[test]
    fn test_to_be_deployed_wire_format() {
        let pod: PodTemplate = serde_json::from_str(r#"{"num": 2}"#).unwrap();
        assert_eq!(pod.to_be_deployed, None);
        assert!(pod.to_be_deployed());

        let pod: PodTemplate =
            serde_json::from_str(r#"{"templateRef": "pod-a", "toBeDeployed": false}"#).unwrap();
        assert!(!pod.to_be_deployed());
        assert_eq!(
            serde_json::to_string(&pod).unwrap(),
            r#"{"templateRef":"pod-a","toBeDeployed":false}"#
        );
    }

    #[test]
    fn test_superspine_planes_is_max_spine_count() {
        let tier = |n| TierTemplate::new(n, 1, vec![VendorInfo::new("nokiaSRL", "IXR-D3")]);
        let fabric = FabricTemplate {
            pod: vec![
                PodTemplate::inline(1, tier(2), tier(4)),
                PodTemplate::inline(1, tier(4), tier(4)),
                PodTemplate::inline(1, tier(3), tier(4)),
            ],
            ..FabricTemplate::default()
        };
        assert_eq!(fabric.superspine_planes(), 4);
    }

    #[test]
    fn test_settings_defaults_when_omitted() {
        let fabric: FabricTemplate = serde_json::from_str(r#"{"pod": []}"#).unwrap();
        assert_eq!(fabric.settings, FabricSettings::default());
        assert_eq!(fabric.settings.max_spines_per_pod, 16);
    }
}
