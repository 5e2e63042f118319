//! SQL parsing using datafusion-sqlparser-rs

use fkguard_core::{DialectConfig, ParseError, StatementNode, StatementParser};
use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;

use crate::lower::lower_statement;

/// SQL parser with configurable dialect
pub struct SqlParser {
    dialect: Box<dyn Dialect + Send + Sync>,
}

impl SqlParser {
    /// Create a new SQL parser with the default (generic) dialect
    pub fn new() -> Self {
        Self {
            dialect: Box::new(GenericDialect {}),
        }
    }

    /// Create a SQL parser for MySQL
    pub fn mysql() -> Self {
        Self {
            dialect: Box::new(MySqlDialect {}),
        }
    }

    /// Create a SQL parser for PostgreSQL
    pub fn postgres() -> Self {
        Self {
            dialect: Box::new(PostgreSqlDialect {}),
        }
    }

    /// Create a SQL parser for SQLite
    pub fn sqlite() -> Self {
        Self {
            dialect: Box::new(SQLiteDialect {}),
        }
    }

    /// Create a parser from a dialect config
    pub fn from_dialect(dialect: DialectConfig) -> Self {
        match dialect {
            DialectConfig::Generic => Self::new(),
            DialectConfig::MySql => Self::mysql(),
            DialectConfig::Postgres => Self::postgres(),
            DialectConfig::Sqlite => Self::sqlite(),
        }
    }

    /// Parse SQL into raw sqlparser statements
    pub fn parse_statements(&self, sql: &str) -> Result<Vec<Statement>, ParseError> {
        Parser::parse_sql(&*self.dialect, sql).map_err(|e| ParseError::new(e.to_string()))
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for SqlParser {
    fn parse(&self, sql: &str) -> Result<Vec<StatementNode>, ParseError> {
        let statements = self.parse_statements(sql)?;
        tracing::trace!(count = statements.len(), "parsed SQL statements");

        Ok(statements.iter().map(lower_statement).collect())
    }
}
