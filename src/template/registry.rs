//! Template registry for storing and validating named fabric templates

use std::collections::HashMap;

use thiserror::Error;

use super::types::{FabricTemplate, NamedTemplate, PodTemplate};

/// Errors that can occur during template validation and resolution
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template is structurally invalid
    #[error("invalid template {template}: {reason}")]
    Validation { template: String, reason: String },

    /// Referenced pod template does not exist in the pool
    #[error("unresolved pod template reference: {name}")]
    UnresolvedReference { name: String },

    /// Referenced pod template holds a reference itself
    #[error("template {template} references {reference}, but a pod template cannot reference another template")]
    NestedReference { template: String, reference: String },

    /// Duplicate template definition
    #[error("duplicate template definition: {name}")]
    Duplicate { name: String },
}

impl TemplateError {
    pub fn validation(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            template: template.into(),
            reason: reason.into(),
        }
    }
}

/// Lookup of pod templates by name
///
/// Stands in for whatever store holds the templates. Returns the full
/// template so the caller can validate it before taking its pod.
pub trait PodTemplateSource {
    fn pod_template(&self, name: &str) -> Option<&FabricTemplate>;
}

impl PodTemplateSource for HashMap<String, FabricTemplate> {
    fn pod_template(&self, name: &str) -> Option<&FabricTemplate> {
        self.get(name)
    }
}

/// Registry of named templates, in registration order
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    templates: Vec<NamedTemplate>,
    by_name: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template
    pub fn register(&mut self, template: NamedTemplate) -> Result<(), TemplateError> {
        if self.by_name.contains_key(&template.name) {
            return Err(TemplateError::Duplicate {
                name: template.name,
            });
        }
        self.by_name
            .insert(template.name.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&NamedTemplate> {
        self.by_name.get(name).map(|&i| &self.templates[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn masters(&self) -> impl Iterator<Item = &NamedTemplate> {
        self.templates.iter().filter(|t| t.master)
    }

    pub fn children(&self) -> impl Iterator<Item = &NamedTemplate> {
        self.templates.iter().filter(|t| !t.master)
    }

    /// Get all template names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    /// Check the pool as a whole and every template in it
    ///
    /// A pool holds either one master plus any number of pod templates, or
    /// exactly one standalone template.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.is_empty() {
            return Err(TemplateError::validation(
                "<none>",
                "cannot build a fabric without a template",
            ));
        }

        let masters: Vec<&str> = self.masters().map(|t| t.name.as_str()).collect();
        let children: Vec<&str> = self.children().map(|t| t.name.as_str()).collect();

        if masters.len() > 1 {
            return Err(TemplateError::validation(
                masters.join(", "),
                "cannot have multiple master templates",
            ));
        }
        if masters.is_empty() && children.len() != 1 {
            return Err(TemplateError::validation(
                children.join(", "),
                "without a master template exactly one standalone template is allowed",
            ));
        }

        for t in self.masters() {
            check_fabric_template(&t.name, &t.fabric, true)?;
        }
        for t in self.children() {
            check_fabric_template(&t.name, &t.fabric, false)?;
        }
        Ok(())
    }

    /// Validate the pool and resolve it into one fabric template
    pub fn resolve(&self) -> Result<FabricTemplate, TemplateError> {
        super::resolver::resolve_templates(self)
    }
}

impl PodTemplateSource for TemplateRegistry {
    fn pod_template(&self, name: &str) -> Option<&FabricTemplate> {
        self.get(name).map(|t| &t.fabric)
    }
}

/// Validate a fabric template as a master or as a child (pod) template
pub fn check_fabric_template(
    name: &str,
    template: &FabricTemplate,
    master: bool,
) -> Result<(), TemplateError> {
    if !master && template.pod.len() > 1 {
        return Err(TemplateError::validation(
            name,
            format!(
                "a child template can only have 1 pod defined, got {}",
                template.pod.len()
            ),
        ));
    }
    for pod in &template.pod {
        check_pod_template(name, pod, master)?;
    }
    Ok(())
}

/// Validate a single pod entry of a master or child template
pub fn check_pod_template(
    name: &str,
    pod: &PodTemplate,
    master: bool,
) -> Result<(), TemplateError> {
    if pod.has_inline_tiers() && pod.has_reference() {
        return Err(TemplateError::validation(
            name,
            "inline pod tiers cannot be mixed with a template reference",
        ));
    }

    if master {
        if pod.has_reference() && pod.pod_number.is_some() {
            return Err(TemplateError::validation(
                name,
                "a pod with a template reference cannot define the pod number",
            ));
        }
        if !pod.has_reference() && pod.pod_number.is_none() {
            return Err(TemplateError::validation(
                name,
                "a pod without a template reference must define the pod number",
            ));
        }
    } else {
        if let Some(reference) = &pod.template_ref {
            return Err(TemplateError::NestedReference {
                template: name.to_string(),
                reference: reference.clone(),
            });
        }
        if let Some(n) = pod.pod_number {
            if n != 1 {
                return Err(TemplateError::validation(
                    name,
                    format!("a child template can only define 1 pod instance, got {}", n),
                ));
            }
        }
    }
    Ok(())
}
