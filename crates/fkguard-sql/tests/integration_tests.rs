//! Integration tests for SQL lowering on migration-style input

use fkguard_core::{DialectConfig, StatementNode, StatementParser};
use fkguard_sql::SqlParser;
use pretty_assertions::assert_eq;

fn summarize(nodes: &[StatementNode]) -> Vec<(String, Vec<String>)> {
    nodes
        .iter()
        .map(|node| {
            let label = match node {
                StatementNode::CreateTable { table, .. } => format!("create {table}"),
                StatementNode::AlterTable { table, .. } => format!("alter {table}"),
                StatementNode::Other { kind } => format!("other {kind}"),
            };
            let targets = node
                .foreign_keys()
                .iter()
                .map(|fk| fk.referenced_table.clone())
                .collect();
            (label, targets)
        })
        .collect()
}

#[test]
fn mysql_migration_file() {
    let sql = r#"
        CREATE TABLE `users` (
            `id` BIGINT NOT NULL AUTO_INCREMENT,
            `address_id` BIGINT NOT NULL,
            PRIMARY KEY (`id`),
            CONSTRAINT `fk_users_addresses` FOREIGN KEY (`address_id`) REFERENCES `addresses` (`id`) ON DELETE CASCADE
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;

        CREATE INDEX idx_users_address ON users (address_id);

        ALTER TABLE `addresses`
            ADD CONSTRAINT `fk_addresses_users` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`);
    "#;

    let nodes = SqlParser::from_dialect(DialectConfig::MySql).parse(sql).unwrap();

    assert_eq!(
        summarize(&nodes),
        vec![
            ("create users".to_string(), vec!["addresses".to_string()]),
            ("other CREATE".to_string(), vec![]),
            ("alter addresses".to_string(), vec!["users".to_string()]),
        ]
    );
}

#[test]
fn postgres_migration_file() {
    let sql = r#"
        CREATE TABLE IF NOT EXISTS public.orders (
            id SERIAL PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES public.customers (id) ON DELETE RESTRICT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );

        ALTER TABLE ONLY public.orders
            ADD CONSTRAINT orders_invoice_fk FOREIGN KEY (invoice_id) REFERENCES billing.invoices (id),
            ADD COLUMN note TEXT;
    "#;

    let nodes = SqlParser::postgres().parse(sql).unwrap();

    assert_eq!(
        summarize(&nodes),
        vec![
            ("create orders".to_string(), vec!["customers".to_string()]),
            ("alter orders".to_string(), vec!["invoices".to_string()]),
        ]
    );
}

#[test]
fn multiple_add_constraints_keep_operation_order() {
    let sql = "ALTER TABLE t
                 ADD CONSTRAINT a FOREIGN KEY (x) REFERENCES first_target(id),
                 ADD CONSTRAINT b UNIQUE (y),
                 ADD CONSTRAINT c FOREIGN KEY (z) REFERENCES second_target(id)";

    let nodes = SqlParser::new().parse(sql).unwrap();

    assert_eq!(
        summarize(&nodes),
        vec![(
            "alter t".to_string(),
            vec!["first_target".to_string(), "second_target".to_string()]
        )]
    );
}
