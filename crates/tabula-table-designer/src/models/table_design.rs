//! Table design model
//!
//! A `TableDesign` is one snapshot of a table's definition: the original copy
//! loaded from the catalog, or the working copy the designer edits in place.

use serde::{Deserialize, Serialize};
use tabula_core::TableDetails;

use super::{
    ColumnDesign, ColumnEdit, ColumnId, ForeignKeyDesign, ForeignKeyEdit, ForeignKeyId,
    IndexDesign, IndexEdit, IndexId, RowStatus, TableOptions, ValidationError,
};
use crate::error::{DesignerError, DesignerResult};

/// Table design model for creating/editing tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDesign {
    /// Table name
    pub table_name: String,
    /// Schema name (optional, not used by SQLite)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Columns, in declaration order
    #[serde(default)]
    pub columns: Vec<ColumnDesign>,
    #[serde(default)]
    pub indexes: Vec<IndexDesign>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDesign>,
    /// Table-level options (MySQL-like dialect only)
    #[serde(default)]
    pub options: TableOptions,
    /// Comment/description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TableDesign {
    /// Create a new empty table design with a name
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    /// Create from existing table details
    pub fn from_table_details(details: &TableDetails) -> Self {
        let columns = details
            .columns
            .iter()
            .map(ColumnDesign::from_column_info)
            .collect();

        let indexes = details
            .indexes
            .iter()
            .filter(|i| !i.is_primary)
            .enumerate()
            .map(|(ordinal, i)| IndexDesign::from_index_info(ordinal, i))
            .collect();

        let foreign_keys = details
            .foreign_keys
            .iter()
            .enumerate()
            .map(|(ordinal, fk)| ForeignKeyDesign::from_foreign_key_info(ordinal, fk))
            .collect();

        Self {
            table_name: details.info.name.clone(),
            schema: details.info.schema.clone(),
            columns,
            indexes,
            foreign_keys,
            options: TableOptions::default(),
            comment: details.info.comment.clone().filter(|c| !c.is_empty()),
        }
    }

    /// Builder: add a column
    pub fn with_column(mut self, column: ColumnDesign) -> Self {
        self.columns.push(column);
        self
    }

    /// Builder: add an index
    pub fn with_index(mut self, index: IndexDesign) -> Self {
        self.indexes.push(index);
        self
    }

    /// Builder: add a foreign key
    pub fn with_foreign_key(mut self, fk: ForeignKeyDesign) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Builder: set table options
    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder: set table comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Columns that are not marked deleted
    pub fn live_columns(&self) -> impl Iterator<Item = &ColumnDesign> {
        self.columns.iter().filter(|c| !c.is_deleted())
    }

    pub fn live_indexes(&self) -> impl Iterator<Item = &IndexDesign> {
        self.indexes.iter().filter(|i| !i.is_deleted())
    }

    pub fn live_foreign_keys(&self) -> impl Iterator<Item = &ForeignKeyDesign> {
        self.foreign_keys.iter().filter(|fk| !fk.is_deleted())
    }

    /// Copy of this design with every deleted row removed
    pub fn live(&self) -> TableDesign {
        TableDesign {
            columns: self.live_columns().cloned().collect(),
            indexes: self.live_indexes().cloned().collect(),
            foreign_keys: self.live_foreign_keys().cloned().collect(),
            ..self.clone()
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&ColumnDesign> {
        self.columns.iter().find(|c| c.id == *id)
    }

    fn column_position(&self, id: &ColumnId) -> DesignerResult<usize> {
        self.columns
            .iter()
            .position(|c| c.id == *id)
            .ok_or_else(|| DesignerError::ColumnNotFound(id.clone()))
    }

    /// Append a column and return its identity
    pub fn add_column(&mut self, column: ColumnDesign) -> ColumnId {
        let id = column.id.clone();
        self.columns.push(column);
        id
    }

    /// Edit a column in place, promoting a clean row to modified
    ///
    /// A rename is carried into the indexes and foreign keys that cover the
    /// column; their status is left alone.
    pub fn update_column(&mut self, id: &ColumnId, edit: ColumnEdit) -> DesignerResult<()> {
        let pos = self.column_position(id)?;
        let column = &mut self.columns[pos];
        if column.is_deleted() {
            return Err(DesignerError::RowDeleted(format!("column '{}'", column.name)));
        }
        let old_name = column.name.clone();
        column.apply(edit);
        let new_name = column.name.clone();
        self.rename_column_references(&old_name, &new_name);
        Ok(())
    }

    /// Point index and foreign key column references at a column's new name
    fn rename_column_references(&mut self, old: &str, new: &str) {
        if old == new || old.is_empty() {
            return;
        }
        for index in &mut self.indexes {
            for column in index.columns.iter_mut().filter(|c| c.eq_ignore_ascii_case(old)) {
                *column = new.to_string();
            }
        }
        for fk in &mut self.foreign_keys {
            if fk.source_column.eq_ignore_ascii_case(old) {
                fk.source_column = new.to_string();
            }
        }
    }

    /// Remove an added column outright, mark any other column deleted
    pub fn delete_column(&mut self, id: &ColumnId) -> DesignerResult<()> {
        let pos = self.column_position(id)?;
        if self.columns[pos].status == RowStatus::Added {
            self.columns.remove(pos);
        } else {
            self.columns[pos].status = RowStatus::Deleted;
        }
        Ok(())
    }

    /// Replace a row with a restored copy, keeping its position
    pub(crate) fn restore_column(&mut self, restored: ColumnDesign) -> DesignerResult<()> {
        let pos = self.column_position(&restored.id)?;
        let current_name = std::mem::replace(&mut self.columns[pos], restored).name;
        let restored_name = self.columns[pos].name.clone();
        self.rename_column_references(&current_name, &restored_name);
        Ok(())
    }

    /// Move a column up
    pub fn move_column_up(&mut self, id: &ColumnId) -> DesignerResult<()> {
        let pos = self.column_position(id)?;
        if pos > 0 {
            self.columns.swap(pos, pos - 1);
        }
        Ok(())
    }

    /// Move a column down
    pub fn move_column_down(&mut self, id: &ColumnId) -> DesignerResult<()> {
        let pos = self.column_position(id)?;
        if pos + 1 < self.columns.len() {
            self.columns.swap(pos, pos + 1);
        }
        Ok(())
    }

    fn index_position(&self, id: &IndexId) -> DesignerResult<usize> {
        self.indexes
            .iter()
            .position(|i| i.id == *id)
            .ok_or_else(|| DesignerError::IndexNotFound(id.clone()))
    }

    pub fn add_index(&mut self, index: IndexDesign) -> IndexId {
        let id = index.id.clone();
        self.indexes.push(index);
        id
    }

    pub fn update_index(&mut self, id: &IndexId, edit: IndexEdit) -> DesignerResult<()> {
        let pos = self.index_position(id)?;
        let index = &mut self.indexes[pos];
        if index.is_deleted() {
            return Err(DesignerError::RowDeleted(format!("index '{}'", index.name)));
        }
        index.apply(edit);
        Ok(())
    }

    pub fn delete_index(&mut self, id: &IndexId) -> DesignerResult<()> {
        let pos = self.index_position(id)?;
        if self.indexes[pos].status == super::EntryStatus::New {
            self.indexes.remove(pos);
        } else {
            self.indexes[pos].status = super::EntryStatus::Deleted;
        }
        Ok(())
    }

    fn foreign_key_position(&self, id: &ForeignKeyId) -> DesignerResult<usize> {
        self.foreign_keys
            .iter()
            .position(|fk| fk.id == *id)
            .ok_or_else(|| DesignerError::ForeignKeyNotFound(id.clone()))
    }

    pub fn add_foreign_key(&mut self, fk: ForeignKeyDesign) -> ForeignKeyId {
        let id = fk.id.clone();
        self.foreign_keys.push(fk);
        id
    }

    pub fn update_foreign_key(
        &mut self,
        id: &ForeignKeyId,
        edit: ForeignKeyEdit,
    ) -> DesignerResult<()> {
        let pos = self.foreign_key_position(id)?;
        let fk = &mut self.foreign_keys[pos];
        if fk.is_deleted() {
            return Err(DesignerError::RowDeleted(format!("foreign key '{}'", fk.name)));
        }
        fk.apply(edit);
        Ok(())
    }

    pub fn delete_foreign_key(&mut self, id: &ForeignKeyId) -> DesignerResult<()> {
        let pos = self.foreign_key_position(id)?;
        if self.foreign_keys[pos].status == super::EntryStatus::New {
            self.foreign_keys.remove(pos);
        } else {
            self.foreign_keys[pos].status = super::EntryStatus::Deleted;
        }
        Ok(())
    }

    /// Check the live part of the design for errors
    ///
    /// Deleted rows are ignored: they only ever produce a DROP.
    pub fn validate(&self) -> Vec<ValidationError> {
        super::validation::validate_design(self)
    }

    /// Get live column names for use in dropdowns
    pub fn column_names(&self) -> Vec<&str> {
        self.live_columns().map(|c| c.name.as_str()).collect()
    }

    /// Live primary key columns, in declaration order
    pub fn primary_key_columns(&self) -> Vec<&ColumnDesign> {
        self.live_columns().filter(|c| c.is_primary_key).collect()
    }
}
