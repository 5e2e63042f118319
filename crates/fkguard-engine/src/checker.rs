//! Foreign key rule checker
//!
//! Single pass over the statement list. Every statement and every foreign
//! key inside it is visited exactly once; checking never stops early.

use fkguard_core::{
    ForeignKeyRef, ParseError, ReferenceDecision, SchemaIndex, StatementKind, StatementNode,
    StatementParser, Violation,
};

/// Outcome of checking one SQL input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Violations in traversal order (statement order, then declaration order)
    pub violations: Vec<Violation>,

    /// Number of statements visited
    pub statements: usize,

    /// Number of foreign keys evaluated
    pub foreign_keys: usize,
}

impl CheckResult {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks statements against the schema policy
///
/// Holds the index read-only, so one checker can serve any number of
/// concurrent `check` calls.
#[derive(Debug, Clone)]
pub struct RuleChecker {
    index: SchemaIndex,
}

impl RuleChecker {
    pub fn new(index: SchemaIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &SchemaIndex {
        &self.index
    }

    /// Check already-parsed statements
    pub fn check(&self, statements: &[StatementNode]) -> CheckResult {
        let mut result = CheckResult::default();

        for statement in statements {
            result.statements += 1;

            match statement {
                StatementNode::CreateTable { table, foreign_keys } => {
                    self.check_references(StatementKind::CreateTable, table, foreign_keys, &mut result);
                }
                StatementNode::AlterTable { table, foreign_keys } => {
                    self.check_references(StatementKind::AlterTable, table, foreign_keys, &mut result);
                }
                StatementNode::Other { kind } => {
                    tracing::trace!(kind = %kind, "skipping statement");
                }
            }
        }

        tracing::debug!(
            statements = result.statements,
            foreign_keys = result.foreign_keys,
            violations = result.violations.len(),
            "checked statements"
        );

        result
    }

    /// Parse `sql` with `parser`, then check it
    ///
    /// A parse failure short-circuits: nothing is checked for that input.
    pub fn check_sql<P>(&self, parser: &P, sql: &str) -> Result<CheckResult, ParseError>
    where
        P: StatementParser + ?Sized,
    {
        let statements = parser.parse(sql)?;
        Ok(self.check(&statements))
    }

    fn check_references(
        &self,
        kind: StatementKind,
        source: &str,
        foreign_keys: &[ForeignKeyRef],
        result: &mut CheckResult,
    ) {
        for fk in foreign_keys {
            result.foreign_keys += 1;

            if let ReferenceDecision::Denied(reason) = self.index.evaluate(source, &fk.referenced_table) {
                tracing::debug!(
                    statement = %kind,
                    source,
                    target = %fk.referenced_table,
                    reason = %reason,
                    "foreign key violates schema policy"
                );

                result.violations.push(
                    Violation::new(kind, source, fk.referenced_table.as_str(), reason)
                        .with_location(fk.location),
                );
            }
        }
    }
}
