//! Models for table design
//!
//! Core data structures for representing table structure, columns, indexes,
//! foreign keys, and dialect-specific options.

mod column_design;
mod default_value;
mod foreign_key_design;
mod ids;
mod index_design;
mod row_status;
mod table_design;
mod table_options;
mod validation;

use serde::{Deserialize, Serialize};

pub use column_design::{ColumnDesign, ColumnEdit};
pub use default_value::{DefaultValue, quote_string_literal};
pub use foreign_key_design::{ForeignKeyDesign, ForeignKeyEdit};
pub use ids::{ColumnId, ForeignKeyId, IndexId};
pub use index_design::{IndexDesign, IndexEdit, IndexKind};
pub use row_status::{EntryStatus, RowStatus};
pub use table_design::TableDesign;
pub use table_options::TableOptions;
pub use validation::ValidationError;
pub(crate) use validation::summarize as summarize_validation;

/// Database dialect for DDL generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDialect {
    #[default]
    Sqlite,
    Postgres,
    Mysql,
}

impl DatabaseDialect {
    /// Create from driver name string, `None` for drivers the designer cannot target
    pub fn from_driver_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Some(DatabaseDialect::Sqlite),
            "postgres" | "postgresql" | "pg" => Some(DatabaseDialect::Postgres),
            "mysql" | "mariadb" => Some(DatabaseDialect::Mysql),
            _ => None,
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseDialect::Sqlite => "SQLite",
            DatabaseDialect::Postgres => "PostgreSQL",
            DatabaseDialect::Mysql => "MySQL",
        }
    }

    /// Get the driver name used in configuration and on the command line
    pub fn driver_name(&self) -> &'static str {
        match self {
            DatabaseDialect::Sqlite => "sqlite",
            DatabaseDialect::Postgres => "postgres",
            DatabaseDialect::Mysql => "mysql",
        }
    }
}

impl std::fmt::Display for DatabaseDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DatabaseDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_driver_name(s).ok_or_else(|| format!("unknown dialect '{}'", s))
    }
}
