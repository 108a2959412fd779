//! Batch diagnostics report
//!
//! Every parse failure and lint finding lands here as a per-file
//! diagnostic. The report never decides whether a problem is fatal;
//! the invoking process reads the counts and picks its own exit policy.

use anyhow::Result;
use serde::Serialize;

/// How severe a diagnostic is: parse failures are errors (the document
/// was skipped), lint findings are warnings (the document was ingested).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Source file the finding belongs to (relative path)
    pub source: String,
    pub severity: Severity,
    /// Stable machine-readable classification
    pub kind: String,
    /// Human-readable description
    pub message: String,
}

/// Collected diagnostics for one batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a parse failure for a skipped document
    pub fn error(&mut self, source: String, kind: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            source,
            severity: Severity::Error,
            kind: kind.to_string(),
            message,
        });
    }

    /// Record an advisory lint finding
    pub fn warning(&mut self, source: String, kind: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            source,
            severity: Severity::Warning,
            kind: kind.to_string(),
            message,
        });
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Order diagnostics by file, errors before warnings within a file.
    /// The batch may have been produced concurrently; sorting keeps the
    /// output deterministic. Stable sort preserves per-file finding order.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.source.cmp(&b.source).then(a.severity.cmp(&b.severity)));
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no problems found".to_string();
        }

        let mut parts = Vec::new();
        match self.error_count() {
            0 => {}
            1 => parts.push("1 error".to_string()),
            n => parts.push(format!("{} errors", n)),
        }
        match self.warning_count() {
            0 => {}
            1 => parts.push("1 warning".to_string()),
            n => parts.push(format!("{} warnings", n)),
        }
        parts.join(", ")
    }

    /// Render the report as JSON for machine consumers
    pub fn to_json(&self) -> Result<String> {
        let value = serde_json::json!({
            "errors": self.error_count(),
            "warnings": self.warning_count(),
            "diagnostics": self.diagnostics,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = Report::new();
        assert!(report.is_empty());
        assert!(!report.has_errors());
        assert_eq!(report.summary(), "no problems found");
    }

    #[test]
    fn test_counts_and_summary() {
        let mut report = Report::new();
        report.error("a.md".into(), "MalformedFrontMatter", "bad".into());
        report.warning("b.md".into(), "UnknownLayout", "odd".into());
        report.warning("c.md".into(), "EmptyTitle", "blank".into());

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.summary(), "1 error, 2 warnings");
    }

    #[test]
    fn test_sort_orders_by_file_then_severity() {
        let mut report = Report::new();
        report.warning("b.md".into(), "UnknownLayout", "odd".into());
        report.error("a.md".into(), "MalformedFrontMatter", "bad".into());
        report.error("b.md".into(), "MissingRequiredField", "gone".into());
        report.sort();

        let order: Vec<(&str, Severity)> = report
            .diagnostics
            .iter()
            .map(|d| (d.source.as_str(), d.severity))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.md", Severity::Error),
                ("b.md", Severity::Error),
                ("b.md", Severity::Warning),
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let mut report = Report::new();
        report.error("a.md".into(), "MalformedFrontMatter", "bad".into());

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["errors"], 1);
        assert_eq!(value["warnings"], 0);
        assert_eq!(value["diagnostics"][0]["source"], "a.md");
        assert_eq!(value["diagnostics"][0]["severity"], "error");
    }
}
