//! Loading template sets from TOML or JSON files
//!
//! A template set is a list of named templates:
//!
//! ```toml
//! [[template]]
//! name = "dc1"
//! master = true
//! [template.fabric.settings]
//! maxUplinksTier3ToTier2 = 2
//! [[template.fabric.pod]]
//! templateRef = "pod-small"
//!
//! [[template]]
//! name = "pod-small"
//! [[template.fabric.pod]]
//! tier2 = { num = 2, uplinkPerNode = 1, vendorInfo = [{ vendorType = "nokiaSRL", platform = "IXR-D3" }] }
//! tier3 = { num = 4, uplinkPerNode = 2, vendorInfo = [{ vendorType = "nokiaSRL", platform = "IXR-D2" }] }
//! ```
//!
//! The JSON form is `{"template": [...]}` with the same field names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::template::{NamedTemplate, TemplateError, TemplateRegistry};

/// Serialization format of a template file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Toml,
    Json,
}

impl TemplateFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(TemplateFormat::Toml),
            Some("json") => Ok(TemplateFormat::Json),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Templates loaded from one or more files, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    #[serde(rename = "template", default)]
    pub templates: Vec<NamedTemplate>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a template set, choosing the parser from the file extension
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let format = TemplateFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    pub fn parse(content: &str, format: TemplateFormat) -> Result<Self, LoadError> {
        match format {
            TemplateFormat::Toml => Self::from_toml_str(content),
            TemplateFormat::Json => Self::from_json_str(content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Append the templates of another set
    pub fn extend(&mut self, other: TemplateSet) {
        self.templates.extend(other.templates);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Register every template; a name defined twice is an error
    pub fn into_registry(self) -> Result<TemplateRegistry, TemplateError> {
        let mut registry = TemplateRegistry::new();
        for template in self.templates {
            registry.register(template)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::template::{FabricSettings, VendorType};

    const TOML_SET: &str = r#"
        [[template]]
        name = "dc1"
        master = true
        [template.fabric]
        tier1 = { num = 2, vendorInfo = [{ vendorType = "nokiaSROS", platform = "7750" }] }
        [template.fabric.settings]
        maxUplinksTier3ToTier2 = 2
        [[template.fabric.pod]]
        templateRef = "pod-small"

        [[template]]
        name = "pod-small"
        [[template.fabric.pod]]
        tier2 = { num = 2, uplinkPerNode = 1, vendorInfo = [{ vendorType = "nokiaSRL", platform = "IXR-D3" }] }
        tier3 = { num = 4, uplinkPerNode = 2, vendorInfo = [{ vendorType = "nokiaSRL", platform = "IXR-D2" }] }
    "#;

    #[test]
    fn test_toml_set() {
        let set = TemplateSet::from_toml_str(TOML_SET).unwrap();
        assert_eq!(set.len(), 2);

        let master = &set.templates[0];
        assert!(master.master);
        assert_eq!(master.fabric.pod[0].template_ref.as_deref(), Some("pod-small"));
        assert_eq!(
            master.fabric.settings,
            FabricSettings::new(2, 1, 16)
        );
        let tier1 = master.fabric.tier1.as_ref().unwrap();
        assert_eq!(tier1.vendor_info[0].vendor_type, VendorType::NokiaSros);
        assert_eq!(tier1.uplinks_per_node, 0);

        let child = &set.templates[1];
        assert!(!child.master);
        assert_eq!(child.fabric.pod[0].tier3.as_ref().unwrap().uplinks_per_node, 2);
    }

    #[test]
    fn test_json_matches_toml() {
        let toml_set = TemplateSet::from_toml_str(TOML_SET).unwrap();
        let json = serde_json::to_string(&toml_set).unwrap();
        let json_set = TemplateSet::from_json_str(&json).unwrap();
        assert_eq!(json_set, toml_set);
    }

    #[test]
    fn test_into_registry() {
        let registry = TemplateSet::from_toml_str(TOML_SET)
            .unwrap()
            .into_registry()
            .unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["dc1", "pod-small"]);
    }

    #[test]
    fn test_duplicate_names_across_sets() {
        let mut set = TemplateSet::from_toml_str(TOML_SET).unwrap();
        set.extend(TemplateSet::from_toml_str(TOML_SET).unwrap());
        assert!(matches!(
            set.into_registry(),
            Err(TemplateError::Duplicate { name }) if name == "dc1"
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            TemplateFormat::from_path(&PathBuf::from("a/fabric.toml")).unwrap(),
            TemplateFormat::Toml
        );
        assert_eq!(
            TemplateFormat::from_path(&PathBuf::from("fabric.json")).unwrap(),
            TemplateFormat::Json
        );
        assert!(matches!(
            TemplateFormat::from_path(&PathBuf::from("fabric.yaml")),
            Err(LoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_reports_span() {
        let err = TemplateSet::from_toml_str("[[template]]\nname = 3\n").unwrap_err();
        assert!(matches!(err, LoadError::Toml(_)));
        assert!(err.span().is_some());
    }
}
