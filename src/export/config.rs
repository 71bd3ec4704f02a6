//! Configuration for topology export

/// Configuration options for JSON and DOT output
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Name of the DOT graph; anonymous when unset
    pub graph_name: Option<String>,

    /// Whether DOT node declarations carry position/level attributes
    pub node_attributes: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            graph_name: Some("fabric".to_string()),
            node_attributes: true,
        }
    }
}

impl ExportConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the DOT graph name
    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = Some(name.into());
        self
    }

    /// Emit an anonymous DOT graph
    pub fn without_graph_name(mut self) -> Self {
        self.graph_name = None;
        self
    }

    /// Set whether node attributes are written
    pub fn with_node_attributes(mut self, enabled: bool) -> Self {
        self.node_attributes = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert!(config.pretty_print);
        assert_eq!(config.graph_name.as_deref(), Some("fabric"));
        assert!(config.node_attributes);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ExportConfig::new()
            .with_pretty_print(false)
            .with_graph_name("dc1")
            .with_node_attributes(false);
        assert!(!config.pretty_print);
        assert_eq!(config.graph_name.as_deref(), Some("dc1"));
        assert!(!config.node_attributes);

        let anonymous = config.without_graph_name();
        assert_eq!(anonymous.graph_name, None);
    }
}
