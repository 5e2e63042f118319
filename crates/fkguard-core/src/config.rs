//! Configuration (schema map + parser dialect)
//!
//! Two on-disk formats are accepted:
//! - `*.json`: a bare `{"schema": ["table", ...]}` object
//! - `*.toml`: `dialect = "..."` plus a `[schemas]` table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::policy::SchemaIndex;

/// SQL dialect configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectConfig {
    /// Generic SQL dialect
    #[default]
    Generic,

    /// MySQL / TiDB dialect
    MySql,

    /// PostgreSQL dialect
    Postgres,

    /// SQLite dialect
    Sqlite,
}

impl std::str::FromStr for DialectConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(Self::Generic),
            "mysql" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::UnknownDialect(other.to_string())),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQL dialect used to parse migration files
    #[serde(default)]
    pub dialect: DialectConfig,

    /// Schema name -> tables governed by that schema
    #[serde(default)]
    pub schemas: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Build a config directly from a schema map
    pub fn from_schema_map(schemas: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            dialect: DialectConfig::default(),
            schemas,
        }
    }

    /// Load config from a `.json` or `.toml` file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            Some("toml") => Self::from_toml(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a bare JSON schema map
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let schemas: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(Self::from_schema_map(schemas))
    }

    /// Parse config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Build the schema index for this config
    pub fn schema_index(&self) -> Result<SchemaIndex, ConfigError> {
        SchemaIndex::build(&self.schemas)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    IoError(String, String),

    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("unsupported config format {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("unknown SQL dialect '{0}' (expected generic, mysql, postgres or sqlite)")]
    UnknownDialect(String),

    #[error("table {table} already exists (listed under {first_schema} and {second_schema})")]
    DuplicateTable {
        table: String,
        first_schema: String,
        second_schema: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.dialect, DialectConfig::Generic);
        assert!(config.schemas.is_empty());
    }

    #[test]
    fn json_schema_map() {
        let config = Config::from_json(
            r#"{"schema1": ["users", "table1"], "schema2": ["addresses"]}"#,
        )
        .unwrap();

        assert_eq!(config.schemas["schema1"], vec!["users", "table1"]);
        assert_eq!(config.schemas["schema2"], vec!["addresses"]);
        assert_eq!(config.dialect, DialectConfig::Generic);
    }

    #[test]
    fn toml_config() {
        let config = Config::from_toml(
            r#"
            dialect = "mysql"

            [schemas]
            schema1 = ["users", "table1"]
            schema2 = ["addresses"]
            "#,
        )
        .unwrap();

        assert_eq!(config.dialect, DialectConfig::MySql);
        assert_eq!(config.schemas.len(), 2);
        assert_eq!(config.schemas["schema2"], vec!["addresses"]);
    }

    #[test]
    fn malformed_json_rejected() {
        let err = Config::from_json(r#"{"schema1": "users"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fkguard.yaml");
        std::fs::write(&path, "schema1: [users]").unwrap();

        let err = Config::from_file(&path).unwrap_err();

        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn json_file_round_trip_through_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fkguard.json");
        std::fs::write(&path, r#"{"schema1": ["users"], "schema2": ["addresses"]}"#).unwrap();

        let index = Config::from_file(&path).unwrap().schema_index().unwrap();
        assert_eq!(index.owning_schema("addresses"), Some("schema2"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/fkguard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(..)));
    }

    #[test]
    fn dialect_from_str() {
        assert_eq!("MySQL".parse::<DialectConfig>().unwrap(), DialectConfig::MySql);
        assert_eq!("postgresql".parse::<DialectConfig>().unwrap(), DialectConfig::Postgres);
        assert!("oracle".parse::<DialectConfig>().is_err());
    }

    #[test]
    fn duplicate_table_surfaces_from_index() {
        let config = Config::from_json(r#"{"a": ["users"], "b": ["users"]}"#).unwrap();
        let err = config.schema_index().unwrap_err();
        assert_eq!(
            err.to_string(),
            "table users already exists (listed under a and b)"
        );
    }
}
