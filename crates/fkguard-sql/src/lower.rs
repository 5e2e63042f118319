//! Lowering of sqlparser statements into policy statement nodes

use fkguard_core::{ForeignKeyRef, Location, StatementNode};
use sqlparser::ast::{
    AlterTableOperation, ColumnDef, ColumnOption, CreateTable, Ident, ObjectName, Statement,
    TableConstraint,
};

/// Reduce one parsed statement to the shape the rule checker understands
pub fn lower_statement(statement: &Statement) -> StatementNode {
    match statement {
        Statement::CreateTable(create) => lower_create_table(create),
        Statement::AlterTable { name, operations, .. } => StatementNode::AlterTable {
            table: terminal_name(name),
            foreign_keys: operations
                .iter()
                .filter_map(|op| match op {
                    AlterTableOperation::AddConstraint(constraint) => {
                        table_constraint_reference(constraint)
                    }
                    _ => None,
                })
                .collect(),
        },
        other => StatementNode::Other {
            kind: statement_keyword(other),
        },
    }
}

fn lower_create_table(create: &CreateTable) -> StatementNode {
    // Inline `REFERENCES` come first, in column order, then table constraints.
    let mut foreign_keys: Vec<ForeignKeyRef> =
        create.columns.iter().flat_map(column_references).collect();
    foreign_keys.extend(create.constraints.iter().filter_map(table_constraint_reference));

    StatementNode::CreateTable {
        table: terminal_name(&create.name),
        foreign_keys,
    }
}

fn column_references(column: &ColumnDef) -> impl Iterator<Item = ForeignKeyRef> + '_ {
    column.options.iter().filter_map(|def| match &def.option {
        ColumnOption::ForeignKey { foreign_table, .. } => Some(reference_to(foreign_table)),
        _ => None,
    })
}

fn table_constraint_reference(constraint: &TableConstraint) -> Option<ForeignKeyRef> {
    match constraint {
        TableConstraint::ForeignKey { foreign_table, .. } => Some(reference_to(foreign_table)),
        _ => None,
    }
}

fn reference_to(foreign_table: &ObjectName) -> ForeignKeyRef {
    ForeignKeyRef::new(terminal_name(foreign_table))
        .with_location(foreign_table.0.last().and_then(ident_location))
}

/// Unqualified table name (`shop.public.users` -> `users`), case preserved
pub fn terminal_name(name: &ObjectName) -> String {
    name.0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn ident_location(ident: &Ident) -> Option<Location> {
    let start = ident.span.start;
    // Synthesized identifiers carry an empty span (line 0).
    (start.line > 0).then(|| Location::new(start.line, start.column))
}

fn statement_keyword(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}
