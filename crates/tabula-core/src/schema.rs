//! Schema introspection: the structure fetch the designer opens tables with

use crate::{Result, TabulaError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Catalog reads for one database
///
/// Backends implement the per-object fetches; `get_table` composes them and
/// only needs overriding when the catalog can answer in a single round trip.
#[async_trait]
pub trait SchemaIntrospection: Send + Sync {
    /// Tables visible in `schema` (the default schema when `None`)
    async fn list_tables(&self, schema: Option<&str>) -> Result<Vec<TableInfo>>;

    /// Columns in declaration order
    async fn get_columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<ColumnInfo>>;

    /// All indexes, including the one backing the primary key
    async fn get_indexes(&self, schema: Option<&str>, table: &str) -> Result<Vec<IndexInfo>>;

    async fn get_foreign_keys(
        &self,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>>;

    /// Full structure of one table; `NotFound` when it does not exist
    async fn get_table(&self, schema: Option<&str>, name: &str) -> Result<TableDetails> {
        let info = self
            .list_tables(schema)
            .await?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TabulaError::NotFound(format!("Table '{}' not found", name)))?;

        Ok(TableDetails {
            info,
            columns: self.get_columns(schema, name).await?,
            foreign_keys: self.get_foreign_keys(schema, name).await?,
            indexes: self.get_indexes(schema, name).await?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableInfo {
    pub schema: Option<String>,
    pub name: String,
    pub comment: Option<String>,
}

/// Everything the designer needs to rebuild a table design
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableDetails {
    pub info: TableInfo,
    pub columns: Vec<ColumnInfo>,
    pub foreign_keys: Vec<ForeignKeyInfo>,
    pub indexes: Vec<IndexInfo>,
}

/// One column as the catalog reports it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// 0-based declaration position
    pub ordinal: usize,
    /// Base type without the length qualifier
    pub data_type: String,
    pub nullable: bool,
    /// Default as catalog SQL text (`'abc'`, `0`, `CURRENT_TIMESTAMP`)
    pub default_value: Option<String>,
    pub max_length: Option<i64>,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    pub columns: Vec<String>,
    pub is_unique: bool,
    /// Backs the primary key; the designer models that on the columns instead
    pub is_primary: bool,
    /// Access method as reported by the catalog (BTREE, HASH, FULLTEXT, ...)
    pub index_type: String,
}

/// A foreign key; composite keys list their column pairs in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyInfo {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub on_update: ForeignKeyAction,
    pub on_delete: ForeignKeyAction,
}

/// Referential action for ON UPDATE / ON DELETE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForeignKeyAction {
    #[default]
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ForeignKeyAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyAction::NoAction => "NO ACTION",
            ForeignKeyAction::Restrict => "RESTRICT",
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
        }
    }

    /// Parse a catalog action string; unknown spellings fall back to `NoAction`
    pub fn from_sql(action: &str) -> Self {
        match action.trim().to_uppercase().as_str() {
            "RESTRICT" => ForeignKeyAction::Restrict,
            "CASCADE" => ForeignKeyAction::Cascade,
            "SET NULL" => ForeignKeyAction::SetNull,
            "SET DEFAULT" => ForeignKeyAction::SetDefault,
            _ => ForeignKeyAction::NoAction,
        }
    }
}
