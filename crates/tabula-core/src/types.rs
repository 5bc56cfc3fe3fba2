//! Core types for Tabula

use serde::{Deserialize, Serialize};

/// Outcome of executing a single statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementResult {
    /// Rows affected (0 for most DDL)
    pub affected_rows: u64,
}

impl StatementResult {
    pub fn new(affected_rows: u64) -> Self {
        Self { affected_rows }
    }
}
