//! Schema membership index and the cross-schema reference rule

use crate::config::ConfigError;
use crate::violation::ViolationReason;
use std::collections::HashMap;

/// Outcome of evaluating one `source -> target` reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDecision {
    /// Reference is permitted
    Allowed,

    /// Reference breaks the policy
    Denied(ViolationReason),
}

impl ReferenceDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Immutable `table -> schema` map
///
/// Built once from a `schema -> [tables]` config. A table may belong to at
/// most one schema; names are compared case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    schema_by_table: HashMap<String, String>,
}

impl SchemaIndex {
    /// Build the index from a `schema -> [tables]` mapping
    ///
    /// Fails on the first table listed twice, whether under two schemas or
    /// twice under the same one. Feed an ordered map for a deterministic error.
    pub fn build<'a, I, T>(tables_by_schema: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a T)>,
        T: AsRef<[String]> + 'a + ?Sized,
    {
        let mut schema_by_table: HashMap<String, String> = HashMap::new();

        for (schema, tables) in tables_by_schema {
            for table in tables.as_ref() {
                if let Some(existing) = schema_by_table.get(table) {
                    return Err(ConfigError::DuplicateTable {
                        table: table.clone(),
                        first_schema: existing.clone(),
                        second_schema: schema.clone(),
                    });
                }
                schema_by_table.insert(table.clone(), schema.clone());
            }
        }

        tracing::debug!(tables = schema_by_table.len(), "built schema index");

        Ok(Self { schema_by_table })
    }

    /// Schema owning `table`, if the table is governed
    pub fn owning_schema(&self, table: &str) -> Option<&str> {
        self.schema_by_table.get(table).map(String::as_str)
    }

    /// Evaluate a foreign key from `source` to `target`
    ///
    /// | source known | target known | result |
    /// |---|---|---|
    /// | no  | no  | allowed |
    /// | yes | no  | allowed |
    /// | no  | yes | denied  |
    /// | yes | yes | allowed iff same schema |
    pub fn evaluate(&self, source: &str, target: &str) -> ReferenceDecision {
        match (self.owning_schema(source), self.owning_schema(target)) {
            (None, None) | (Some(_), None) => ReferenceDecision::Allowed,
            (None, Some(_)) => ReferenceDecision::Denied(ViolationReason::UngovernedSource),
            (Some(s), Some(t)) if s == t => ReferenceDecision::Allowed,
            (Some(_), Some(_)) => ReferenceDecision::Denied(ViolationReason::CrossSchemaReference),
        }
    }

    pub fn is_allowed_reference(&self, source: &str, target: &str) -> bool {
        self.evaluate(source, target).is_allowed()
    }

    /// Number of governed tables
    pub fn len(&self) -> usize {
        self.schema_by_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schema_by_table.is_empty()
    }

    /// Distinct schema names, sorted
    pub fn schemas(&self) -> Vec<&str> {
        let mut schemas: Vec<&str> = self.schema_by_table.values().map(String::as_str).collect();
        schemas.sort_unstable();
        schemas.dedup();
        schemas
    }
}
