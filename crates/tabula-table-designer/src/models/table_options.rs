//! Table-level options
//!
//! Only the MySQL-like dialect renders these; other dialects ignore them.

use serde::{Deserialize, Serialize};

/// Table-level options (MySQL-like dialect)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Storage engine (InnoDB, MyISAM, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Default character set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    /// Collation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// AUTO_INCREMENT starting value, rendered only when greater than 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment_start: Option<u64>,
}

impl TableOptions {
    /// Whether any option would be rendered
    pub fn has_options(&self) -> bool {
        !self.clauses().is_empty()
    }

    /// `ENGINE=...`-style clauses in rendering order
    pub fn clauses(&self) -> Vec<String> {
        let mut clauses = Vec::new();
        if let Some(engine) = &self.engine {
            clauses.push(format!("ENGINE={}", engine));
        }
        if let Some(charset) = &self.charset {
            clauses.push(format!("DEFAULT CHARSET={}", charset));
        }
        if let Some(collation) = &self.collation {
            clauses.push(format!("COLLATE={}", collation));
        }
        if let Some(start) = self.auto_increment_start.filter(|start| *start > 1) {
            clauses.push(format!("AUTO_INCREMENT={}", start));
        }
        clauses
    }

    /// MySQL options with the usual defaults
    pub fn mysql() -> Self {
        Self {
            engine: Some("InnoDB".to_string()),
            charset: Some("utf8mb4".to_string()),
            collation: Some("utf8mb4_0900_ai_ci".to_string()),
            auto_increment_start: Some(1),
        }
    }
}
