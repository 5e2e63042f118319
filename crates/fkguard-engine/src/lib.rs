//! fkguard Engine
//!
//! Walks parsed statements, evaluates every foreign key against the
//! [`fkguard_core::SchemaIndex`] policy and collects violations.

pub mod checker;

pub use checker::{RuleChecker, CheckResult};
