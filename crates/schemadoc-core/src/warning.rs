//! Lint rule codes and warnings
//!
//! Rule codes are stable identifiers: they appear in config keys, in
//! report.json, and in CLI output. Add new codes, never rename old ones.

use serde::{Deserialize, Serialize};

/// Lint rule registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    /// Table has an empty comment
    RequireTableComment,

    /// Column has an empty comment
    RequireColumnComment,

    /// Table takes part in no relation
    UnrelatedTable,

    /// Table has more columns than allowed
    ColumnCount,
}

impl RuleCode {
    /// Every rule, in evaluation order
    pub const ALL: [RuleCode; 4] = [
        Self::RequireTableComment,
        Self::RequireColumnComment,
        Self::UnrelatedTable,
        Self::ColumnCount,
    ];

    /// Get the rule code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequireTableComment => "require_table_comment",
            Self::RequireColumnComment => "require_column_comment",
            Self::UnrelatedTable => "unrelated_table",
            Self::ColumnCount => "column_count",
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a warning points at: a table, or a column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl Target {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: None,
        }
    }

    pub fn column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: Some(column.into()),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.column {
            Some(column) => write!(f, "{}.{}", self.table, column),
            None => write!(f, "{}", self.table),
        }
    }
}

/// A single lint finding
///
/// Warnings are ordinary output, never errors. The caller decides what
/// they mean for the exit code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub rule: RuleCode,

    pub target: Target,

    pub message: String,
}

impl Warning {
    pub fn new(rule: RuleCode, target: Target, message: impl Into<String>) -> Self {
        Self {
            rule,
            target,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.target, self.message)
    }
}
