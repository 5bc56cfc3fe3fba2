//! Service layer for table designer
//!
//! Provides dialect rules, DDL generation, ALTER diffing and table loading.

mod alter_differ;
mod ddl_generator;
mod ddl_plan;
mod dialect_rules;
mod table_loader;

pub use alter_differ::{AlterDiffer, DiffEntry, EntryChanges, diff_columns, diff_entries};
pub use ddl_generator::DdlGenerator;
pub use ddl_plan::{DdlPlan, DdlStatement, StatementKind};
pub use dialect_rules::{AutoIncrementRule, DialectRules, IndexStyle, ModifyGranularity};
pub use table_loader::TableLoader;
