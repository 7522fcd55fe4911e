//! Decode Diagnostics
//!
//! Structured reports of what the decoder recovered and what it could not
//! understand. Diagnostics never abort decoding.

use serde::Serialize;

use crate::model::SetCollection;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A diagnostic message, optionally tied to a set path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Result of decoding macro source: whatever was recovered plus diagnostics
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DecodeResult {
    pub sets: SetCollection,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodeResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_success(&mut self, path: Option<String>, message: String) {
        self.push(Severity::Success, path, message);
    }

    pub fn add_warning(&mut self, path: Option<String>, message: String) {
        self.push(Severity::Warning, path, message);
    }

    pub fn add_error(&mut self, path: Option<String>, message: String) {
        self.push(Severity::Error, path, message);
    }

    fn push(&mut self, severity: Severity, path: Option<String>, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            message,
            path,
        });
    }

    /// No error-level diagnostics were produced
    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_result_validity() {
        let mut result = DecodeResult::new();
        assert!(result.is_valid());

        result.add_success(Some("idle".to_string()), "Imported".to_string());
        result.add_warning(Some("engaged".to_string()), "Test warning".to_string());
        assert!(result.is_valid()); // Warnings don't make it invalid
        assert_eq!(result.warnings().count(), 1);

        result.add_error(None, "Test error".to_string());
        assert!(!result.is_valid());
        assert_eq!(result.errors().count(), 1);
    }

    #[test]
    fn test_diagnostic_json_shape() {
        let diagnostic = Diagnostic {
            severity: Severity::Warning,
            message: "No table".to_string(),
            path: None,
        };
        let json = serde_json::to_string(&diagnostic).expect("serialize");
        assert_eq!(json, r#"{"severity":"warning","message":"No table"}"#);
    }
}
