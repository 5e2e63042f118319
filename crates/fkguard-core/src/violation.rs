//! Violation records
//!
//! IMPORTANT: Violation reason codes are stable.
//! NEVER rename or remove codes - JSON reports are consumed by CI tooling.

use serde::{Deserialize, Serialize};

/// Statement shape a foreign key was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// `CREATE TABLE` with an inline or table-level foreign key
    #[serde(rename = "Create Table")]
    CreateTable,

    /// `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY`
    #[serde(rename = "Alter Table")]
    AlterTable,
}

impl StatementKind {
    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateTable => "Create Table",
            Self::AlterTable => "Alter Table",
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a reference was rejected
///
/// These codes are STABLE. Add new ones, never rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationReason {
    /// Both tables are governed but live in different schemas
    CrossSchemaReference,

    /// The referencing table is not governed, the referenced one is
    UngovernedSource,
}

impl ViolationReason {
    /// Stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrossSchemaReference => "CROSS_SCHEMA_REFERENCE",
            Self::UngovernedSource => "UNGOVERNED_SOURCE",
        }
    }
}

impl std::fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Position of a foreign key declaration inside the SQL text (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl Location {
    pub fn new(line: u64, column: u64) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A foreign key declaration that breaks the schema policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Statement the foreign key was found in
    pub statement: StatementKind,

    /// Table declaring the foreign key
    pub source_table: String,

    /// Table the foreign key points at
    pub target_table: String,

    /// Stable reason code
    pub reason: ViolationReason,

    /// Source location (best-effort)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Violation {
    pub fn new(
        statement: StatementKind,
        source_table: impl Into<String>,
        target_table: impl Into<String>,
        reason: ViolationReason,
    ) -> Self {
        Self {
            statement,
            source_table: source_table.into(),
            target_table: target_table.into(),
            reason,
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// One report line for this violation found in `file`
    pub fn report_line(&self, file: &str) -> String {
        format!(
            "Foreign key constraint \"{} -> {}\" in {} is not allowed",
            self.source_table, self.target_table, file
        )
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.statement, self.source_table, self.target_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_code_stability() {
        assert_eq!(ViolationReason::CrossSchemaReference.as_str(), "CROSS_SCHEMA_REFERENCE");
        assert_eq!(ViolationReason::UngovernedSource.as_str(), "UNGOVERNED_SOURCE");
    }

    #[test]
    fn display_and_report_line() {
        let v = Violation::new(
            StatementKind::AlterTable,
            "addresses",
            "users",
            ViolationReason::CrossSchemaReference,
        );

        assert_eq!(v.to_string(), "Alter Table: addresses -> users");
        assert_eq!(
            v.report_line("migrations/1_.up.sql"),
            "Foreign key constraint \"addresses -> users\" in migrations/1_.up.sql is not allowed"
        );
    }

    #[test]
    fn violation_serialization() {
        let v = Violation::new(
            StatementKind::CreateTable,
            "users",
            "addresses",
            ViolationReason::CrossSchemaReference,
        )
        .with_location(Some(Location::new(3, 28)));

        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"Create Table\""));
        assert!(json.contains("CROSS_SCHEMA_REFERENCE"));
        assert!(json.contains("\"line\":3"));

        let without = Violation::new(
            StatementKind::CreateTable,
            "users",
            "addresses",
            ViolationReason::CrossSchemaReference,
        );
        assert!(!serde_json::to_string(&without).unwrap().contains("location"));
    }
}
