//! Error types for the table designer

use tabula_core::TabulaError;
use thiserror::Error;

use crate::models::{ColumnId, ForeignKeyId, IndexId, ValidationError, summarize_validation};

pub type DesignerResult<T> = Result<T, DesignerError>;

/// Errors raised while editing, synthesizing or saving a table design
#[derive(Debug, Error)]
pub enum DesignerError {
    /// Raised before any DDL text is produced
    #[error("invalid table definition: {}", summarize_validation(.0))]
    InvalidDefinition(Vec<ValidationError>),

    /// A construct the target dialect has no lowering for
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The execution collaborator rejected a statement; later statements were not attempted
    #[error(
        "statement {index} of {total} failed ({source}); {remaining} remaining statement(s) not attempted: {statement}"
    )]
    ExecutionFailure {
        /// 1-based position of the failed statement
        index: usize,
        total: usize,
        remaining: usize,
        statement: String,
        #[source]
        source: TabulaError,
    },

    #[error("failed to load table '{table}': {source}")]
    LoadFailed {
        table: String,
        #[source]
        source: TabulaError,
    },

    #[error("schema introspection not supported for this connection")]
    SchemaNotSupported,

    #[error("column {0} not found")]
    ColumnNotFound(ColumnId),

    #[error("index {0} not found")]
    IndexNotFound(IndexId),

    #[error("foreign key {0} not found")]
    ForeignKeyNotFound(ForeignKeyId),

    #[error("{0} is marked deleted and cannot be edited")]
    RowDeleted(String),

    #[error("the table name cannot be changed while editing an existing table")]
    TableRenameNotSupported,
}
