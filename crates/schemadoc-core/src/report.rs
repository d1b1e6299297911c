//! Lint report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::warning::{RuleCode, Warning};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a lint run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintSummary {
    /// Total number of warnings
    pub total: usize,

    /// Number of tables in the linted schema
    pub tables_checked: usize,

    /// Warning count per rule
    pub by_rule: BTreeMap<RuleCode, usize>,
}

/// Lint report (report.json v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintReport {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Name of the linted schema
    pub schema: String,

    /// Summary statistics
    pub summary: LintSummary,

    /// All warnings, in rule evaluation order
    pub warnings: Vec<Warning>,
}

impl LintReport {
    /// Create a new empty report
    pub fn new(schema: impl Into<String>, tables_checked: usize) -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            schema: schema.into(),
            summary: LintSummary {
                tables_checked,
                ..LintSummary::default()
            },
            warnings: Vec::new(),
        }
    }

    /// Create a report from warnings
    pub fn from_warnings(
        schema: impl Into<String>,
        tables_checked: usize,
        warnings: Vec<Warning>,
    ) -> Self {
        let mut report = Self::new(schema, tables_checked);
        for warning in warnings {
            report.add_warning(warning);
        }
        report
    }

    /// Add a warning to the report
    pub fn add_warning(&mut self, warning: Warning) {
        *self.summary.by_rule.entry(warning.rule).or_insert(0) += 1;
        self.summary.total += 1;
        self.warnings.push(warning);
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        self.summary.total > 0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::Target;

    #[test]
    fn empty_report() {
        let report = LintReport::new("app", 3);
        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.tables_checked, 3);
        assert!(!report.has_warnings());
    }

    #[test]
    fn report_with_warnings() {
        let warnings = vec![
            Warning::new(RuleCode::RequireTableComment, Target::table("a"), "table `a` has no comment"),
            Warning::new(RuleCode::RequireColumnComment, Target::column("b", "b"), "column `b.b` has no comment"),
            Warning::new(RuleCode::RequireTableComment, Target::table("c"), "table `c` has no comment"),
        ];

        let report = LintReport::from_warnings("app", 3, warnings);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.by_rule[&RuleCode::RequireTableComment], 2);
        assert_eq!(report.summary.by_rule[&RuleCode::RequireColumnComment], 1);
        assert!(!report.summary.by_rule.contains_key(&RuleCode::ColumnCount));
        assert!(report.has_warnings());
    }

    #[test]
    fn report_serialization() {
        let mut report = LintReport::new("app", 1);
        report.add_warning(Warning::new(
            RuleCode::ColumnCount,
            Target::table("wide"),
            "table `wide` has too many columns. [4/3]",
        ));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"column_count\": 1"));
        assert!(json.contains("\"warnings\""));
    }
}
