//! Template resolution - inlines referenced pod templates into one fabric template

use tracing::debug;

use super::registry::{check_fabric_template, PodTemplateSource, TemplateError, TemplateRegistry};
use super::types::{FabricTemplate, PodTemplate};

/// Resolve the templates of a registry into one self-contained fabric template
///
/// This function:
/// 1. Validates the pool (one master, or exactly one standalone template)
/// 2. Inlines every pod reference of the master from the pool
/// 3. Returns the resolved template; a standalone template is returned as is
pub fn resolve_templates(registry: &TemplateRegistry) -> Result<FabricTemplate, TemplateError> {
    registry.validate()?;

    match registry.masters().next() {
        Some(master) => {
            debug!(template = %master.name, "resolving master template");
            resolve_fabric_template(&master.fabric, registry)
        }
        None => {
            // validate() guarantees exactly one child here
            let root = registry
                .children()
                .next()
                .ok_or_else(|| TemplateError::validation("<none>", "no template to resolve"))?;
            debug!(template = %root.name, "using standalone template");
            Ok(root.fabric.clone())
        }
    }
}

/// Inline all pod references of `master` using `source` for lookups
///
/// Inline pods keep their position; each reference is replaced by the single
/// pod of the referenced template. A template without references is returned
/// unchanged.
pub fn resolve_fabric_template(
    master: &FabricTemplate,
    source: &dyn PodTemplateSource,
) -> Result<FabricTemplate, TemplateError> {
    if !master.has_reference() {
        return Ok(master.clone());
    }

    let mut pods = Vec::with_capacity(master.pod.len());
    for pod in &master.pod {
        match &pod.template_ref {
            Some(name) => {
                let mut resolved = resolve_reference(name, source)?;
                if pod.to_be_deployed.is_some() {
                    resolved.to_be_deployed = pod.to_be_deployed;
                }
                pods.push(resolved);
            }
            None => pods.push(pod.clone()),
        }
    }

    Ok(FabricTemplate {
        tier1: master.tier1.clone(),
        border_leaf: master.border_leaf.clone(),
        pod: pods,
        settings: master.settings,
    })
}

/// Look up a pod template by name and return its pod entry
fn resolve_reference(
    name: &str,
    source: &dyn PodTemplateSource,
) -> Result<PodTemplate, TemplateError> {
    let child = source
        .pod_template(name)
        .ok_or_else(|| TemplateError::UnresolvedReference {
            name: name.to_string(),
        })?;

    check_fabric_template(name, child, false)?;

    let pod = child.pod.first().ok_or_else(|| {
        TemplateError::validation(name, "a referenced pod template must define a pod")
    })?;
    debug!(reference = name, "inlined pod template");
    Ok(pod.clone())
}
