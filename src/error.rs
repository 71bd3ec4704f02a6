//! Error types for loading template and port-offset files

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that can occur when loading input files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },
}

impl LoadError {
    /// Source range of the error, when the parser reports one
    pub fn span(&self) -> Option<Span> {
        match self {
            LoadError::Toml(e) => e.span(),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors without a source location fall back to their plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = match self.span() {
            Some(span) => span,
            None => return self.to_string(),
        };
        let message = match self {
            LoadError::Toml(e) => e.message().to_string(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid template file")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_has_span() {
        let err: LoadError = toml::from_str::<toml::Value>("a = ").unwrap_err().into();
        assert!(err.span().is_some());
    }

    #[test]
    fn test_format_includes_filename() {
        let source = "[[template]]\nname = \n";
        let err: LoadError = toml::from_str::<toml::Value>(source).unwrap_err().into();
        let report = err.format(source, "fabric.toml");
        assert!(report.contains("fabric.toml"));
    }

    #[test]
    fn test_format_without_span_is_plain_message() {
        let err = LoadError::UnsupportedFormat {
            path: PathBuf::from("fabric.yaml"),
        };
        assert_eq!(err.format("", "fabric.yaml"), err.to_string());
    }
}
