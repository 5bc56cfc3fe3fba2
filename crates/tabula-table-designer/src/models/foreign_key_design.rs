//! Foreign key design model

use serde::{Deserialize, Serialize};
use tabula_core::{ForeignKeyAction, ForeignKeyInfo};

use super::{EntryStatus, ForeignKeyId};

/// Foreign key design model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyDesign {
    pub id: ForeignKeyId,
    #[serde(default)]
    pub status: EntryStatus,
    /// Constraint name (may be empty for unnamed keys)
    #[serde(default)]
    pub name: String,
    /// Local column
    pub source_column: String,
    /// Referenced table name
    pub ref_table: String,
    /// Referenced column
    pub ref_column: String,
    #[serde(default)]
    pub on_delete: ForeignKeyAction,
    #[serde(default)]
    pub on_update: ForeignKeyAction,
}

/// A single field edit applied to a foreign key entry
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignKeyEdit {
    Name(String),
    SourceColumn(String),
    RefTable(String),
    RefColumn(String),
    OnDelete(ForeignKeyAction),
    OnUpdate(ForeignKeyAction),
}

impl ForeignKeyDesign {
    /// Create a new foreign key added in the designer
    pub fn new() -> Self {
        Self {
            id: ForeignKeyId::generate(),
            status: EntryStatus::New,
            name: String::new(),
            source_column: String::new(),
            ref_table: String::new(),
            ref_column: String::new(),
            on_delete: ForeignKeyAction::NoAction,
            on_update: ForeignKeyAction::NoAction,
        }
    }

    /// Create from existing foreign key info
    ///
    /// Only the first column pair of a composite key is modelled.
    pub fn from_foreign_key_info(ordinal: usize, info: &ForeignKeyInfo) -> Self {
        if info.columns.len() > 1 {
            tracing::warn!(
                constraint = %info.name,
                column_count = info.columns.len(),
                "composite foreign key truncated to its first column"
            );
        }

        Self {
            id: ForeignKeyId::seeded(ordinal),
            status: EntryStatus::Clean,
            name: info.name.clone(),
            source_column: info.columns.first().cloned().unwrap_or_default(),
            ref_table: info.referenced_table.clone(),
            ref_column: info.referenced_columns.first().cloned().unwrap_or_default(),
            on_delete: info.on_delete,
            on_update: info.on_update,
        }
    }

    /// Builder: set constraint name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder: set local column
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.source_column = name.into();
        self
    }

    /// Builder: set referenced table and column
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.ref_table = table.into();
        self.ref_column = column.into();
        self
    }

    /// Builder: set on delete action
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }

    /// Builder: set on update action
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }

    /// Structural equality of the definition, ignoring status
    pub fn same_definition(&self, other: &ForeignKeyDesign) -> bool {
        self.name == other.name
            && self.source_column == other.source_column
            && self.ref_table == other.ref_table
            && self.ref_column == other.ref_column
            && self.on_delete == other.on_delete
            && self.on_update == other.on_update
    }

    pub fn apply(&mut self, edit: ForeignKeyEdit) {
        match edit {
            ForeignKeyEdit::Name(name) => self.name = name,
            ForeignKeyEdit::SourceColumn(column) => self.source_column = column,
            ForeignKeyEdit::RefTable(table) => self.ref_table = table,
            ForeignKeyEdit::RefColumn(column) => self.ref_column = column,
            ForeignKeyEdit::OnDelete(action) => self.on_delete = action,
            ForeignKeyEdit::OnUpdate(action) => self.on_update = action,
        }
        self.status = self.status.after_edit();
    }
}

impl Default for ForeignKeyDesign {
    fn default() -> Self {
        Self::new()
    }
}
