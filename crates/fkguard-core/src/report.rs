//! Report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use crate::violation::Violation;

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

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of SQL files checked
    pub files_checked: usize,

    /// Number of statements visited
    pub statements_checked: usize,

    /// Number of foreign key declarations evaluated
    pub foreign_keys_checked: usize,

    /// Number of violations found
    pub violations: usize,
}

/// Violations found in one file, in traversal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub violations: Vec<Violation>,
}

/// Check report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Summary statistics
    pub summary: ReportSummary,

    /// Per-file results, in the order files were checked
    pub files: Vec<FileReport>,
}

impl Report {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary: ReportSummary::default(),
            files: Vec::new(),
        }
    }

    /// Record the outcome of checking one file
    pub fn add_file(
        &mut self,
        file: impl Into<String>,
        statements: usize,
        foreign_keys: usize,
        violations: Vec<Violation>,
    ) {
        self.summary.files_checked += 1;
        self.summary.statements_checked += statements;
        self.summary.foreign_keys_checked += foreign_keys;
        self.summary.violations += violations.len();

        self.files.push(FileReport {
            file: file.into(),
            violations,
        });
    }

    pub fn has_violations(&self) -> bool {
        self.summary.violations > 0
    }

    /// One line per violation, files in check order
    pub fn render_lines(&self) -> Vec<String> {
        self.files
            .iter()
            .flat_map(|f| f.violations.iter().map(move |v| v.report_line(&f.file)))
            .collect()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}
