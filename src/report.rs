//! Validation findings and report rendering.
//!
//! `Config::validate` produces a [`ValidationReport`]: an ordered list of
//! findings, each with a severity and an optional section/option location.
//! The CLI renders the report and maps any error finding to exit code 2.

use serde::Serialize;

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    pub message: String,
}

impl Finding {
    /// Create an error finding.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            section: None,
            option: None,
            message: message.into(),
        }
    }

    /// Create a warning finding.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            section: None,
            option: None,
            message: message.into(),
        }
    }

    /// Attach the section the finding refers to.
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Attach the option the finding refers to.
    pub fn for_option(mut self, option: impl Into<String>) -> Self {
        self.option = Some(option.into());
        self
    }

    /// Render the finding as a single report line.
    pub fn render(&self) -> String {
        let location = match (&self.section, &self.option) {
            (Some(section), Some(option)) => format!("[{}] {}: ", section, option),
            (Some(section), None) => format!("[{}]: ", section),
            _ => String::new(),
        };
        format!("{:7} {}{}", self.severity.to_string(), location, self.message)
    }
}

/// Ordered collection of validation findings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// True if the report blocks a run: errors always do, warnings only
    /// under strict mode.
    pub fn is_blocking(&self, strict: bool) -> bool {
        self.has_errors() || (strict && self.warning_count() > 0)
    }

    /// One-line summary for error messages and report footers.
    pub fn summary(&self) -> String {
        format!(
            "{} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        )
    }

    /// Render the full report, errors first, one finding per line.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for finding in self.findings.iter().filter(|f| f.severity == Severity::Error) {
            lines.push(finding.render());
        }
        for finding in self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
        {
            lines.push(finding.render());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_severity() {
        let mut report = ValidationReport::default();
        report.push(Finding::error("a"));
        report.push(Finding::warning("b"));
        report.push(Finding::warning("c"));

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 2);
        assert!(report.has_errors());
        assert_eq!(report.summary(), "1 error(s), 2 warning(s)");
    }

    #[test]
    fn strictness_blocks_warnings() {
        let mut report = ValidationReport::default();
        report.push(Finding::warning("provisional value"));

        assert!(!report.is_blocking(false));
        assert!(report.is_blocking(true));
    }

    #[test]
    fn render_locates_findings() {
        let finding = Finding::error("raw_index is required")
            .in_section("github:issues")
            .for_option("raw_index");
        assert_eq!(
            finding.render(),
            "error   [github:issues] raw_index: raw_index is required"
        );

        let bare = Finding::warning("no data sources declared");
        assert_eq!(bare.render(), "warning no data sources declared");
    }

    #[test]
    fn render_lists_errors_before_warnings() {
        let mut report = ValidationReport::default();
        report.push(Finding::warning("later"));
        report.push(Finding::error("first"));

        let rendered = report.render();
        let first_line = rendered.lines().next().unwrap();
        assert!(first_line.contains("first"));
    }
}
