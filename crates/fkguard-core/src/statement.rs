//! Parser-independent statement nodes
//!
//! The rule checker never sees a concrete SQL AST. A parser lowers each
//! statement into a [`StatementNode`] carrying only what the policy needs.

use crate::violation::Location;

/// A foreign key declaration found inside a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// Table the foreign key points at
    pub referenced_table: String,

    /// Position of the referenced table name (best-effort)
    pub location: Option<Location>,
}

impl ForeignKeyRef {
    pub fn new(referenced_table: impl Into<String>) -> Self {
        Self {
            referenced_table: referenced_table.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }
}

/// One parsed SQL statement, reduced to the shapes the policy cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementNode {
    /// `CREATE TABLE`, with its column-level and table-level foreign keys
    CreateTable {
        table: String,
        foreign_keys: Vec<ForeignKeyRef>,
    },

    /// `ALTER TABLE`, with the foreign keys of its `ADD CONSTRAINT` operations
    AlterTable {
        table: String,
        foreign_keys: Vec<ForeignKeyRef>,
    },

    /// Anything else (`SELECT`, `INSERT`, `CREATE INDEX`, ...)
    Other {
        kind: String,
    },
}

impl StatementNode {
    /// Table declaring the foreign keys, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::CreateTable { table, .. } | Self::AlterTable { table, .. } => Some(table),
            Self::Other { .. } => None,
        }
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyRef] {
        match self {
            Self::CreateTable { foreign_keys, .. } | Self::AlterTable { foreign_keys, .. } => {
                foreign_keys
            }
            Self::Other { .. } => &[],
        }
    }
}

/// SQL text could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("SQL parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Turns SQL text into statement nodes
///
/// Implemented by `fkguard-sql`; tests can supply their own.
pub trait StatementParser {
    fn parse(&self, sql: &str) -> Result<Vec<StatementNode>, ParseError>;
}
