//! SQL parsing for fkguard
//!
//! This crate handles:
//! - Parsing migration SQL using datafusion-sqlparser-rs
//! - Lowering `CREATE TABLE` / `ALTER TABLE` statements into
//!   [`fkguard_core::StatementNode`]s with their foreign keys
//! - Extracting location information for violations

pub mod parser;
pub mod lower;

pub use parser::SqlParser;
pub use lower::{lower_statement, terminal_name};
