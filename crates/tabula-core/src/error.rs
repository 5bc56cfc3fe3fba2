//! Error types for Tabula collaborators

use thiserror::Error;

/// Error reported by a connection or a schema introspection backend
///
/// The designer wraps these in its own error type, so the message should
/// name the database-side failure and nothing else.
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement was rejected by the database
    #[error("Query error: {0}")]
    Query(String),

    /// Catalog or pragma reads failed
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl TabulaError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TabulaError::NotFound(_))
    }
}

/// Result type alias for collaborator operations
pub type Result<T> = std::result::Result<T, TabulaError>;
