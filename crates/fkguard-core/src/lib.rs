//! fkguard Core
//!
//! Domain model shared by the parser, the rule checker and the CLI.
//! Never rename violation codes - they are part of the public output.

pub mod violation;
pub mod policy;
pub mod statement;
pub mod report;
pub mod config;

pub use violation::{Violation, ViolationReason, StatementKind, Location};
pub use policy::{SchemaIndex, ReferenceDecision};
pub use statement::{StatementNode, ForeignKeyRef, StatementParser, ParseError};
pub use report::{Report, ReportVersion, ReportSummary, FileReport};
pub use config::{Config, ConfigError, DialectConfig};
