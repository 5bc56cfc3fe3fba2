//! Column design model

use serde::{Deserialize, Serialize};
use tabula_core::ColumnInfo;

use super::{ColumnId, DefaultValue, RowStatus};

/// Column design model for table designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDesign {
    /// Stable identity, the join key between original and working copies
    pub id: ColumnId,
    /// Name the column had when last persisted (None for added columns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Column name
    pub name: String,
    /// Data type (e.g., "INT", "VARCHAR", "TEXT")
    pub data_type: String,
    /// Size or precision qualifier, kept as text (e.g., "255" or "10,2")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_not_null: bool,
    #[serde(default)]
    pub is_auto_increment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub status: RowStatus,
}

/// A single field edit applied to a column row
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnEdit {
    Name(String),
    DataType(String),
    Length(Option<String>),
    PrimaryKey(bool),
    NotNull(bool),
    AutoIncrement(bool),
    Default(Option<DefaultValue>),
    Comment(Option<String>),
}

impl ColumnDesign {
    /// Create a column added by the user, with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ColumnId::generate(),
            original_name: None,
            name: name.into(),
            data_type: "VARCHAR".to_string(),
            length: Some("255".to_string()),
            is_primary_key: false,
            is_not_null: false,
            is_auto_increment: false,
            default_value: None,
            comment: None,
            status: RowStatus::Added,
        }
    }

    /// Create a persisted (clean) column with a specific name and identity
    pub fn named(id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            original_name: Some(name.clone()),
            name,
            data_type: "TEXT".to_string(),
            length: None,
            status: RowStatus::Clean,
            ..Self::new("")
        }
    }

    /// Create from existing column info
    ///
    /// Catalog defaults are already SQL text, so they are kept as expressions.
    pub fn from_column_info(info: &ColumnInfo) -> Self {
        Self {
            id: ColumnId::seeded(info.ordinal),
            original_name: Some(info.name.clone()),
            name: info.name.clone(),
            data_type: info.data_type.clone(),
            length: info.max_length.map(|l| l.to_string()),
            is_primary_key: info.is_primary_key,
            is_not_null: !info.nullable,
            is_auto_increment: info.is_auto_increment,
            default_value: info
                .default_value
                .as_ref()
                .filter(|d| !d.trim().is_empty())
                .map(|d| DefaultValue::expression(d.clone())),
            comment: info.comment.clone().filter(|c| !c.is_empty()),
            status: RowStatus::Clean,
        }
    }

    /// Builder: set data type
    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self.length = None;
        self
    }

    /// Builder: set length
    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(length.into());
        self
    }

    /// Builder: set as primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_not_null = true;
        self
    }

    /// Builder: set as not null
    pub fn not_null(mut self) -> Self {
        self.is_not_null = true;
        self
    }

    /// Builder: set as auto increment
    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// Builder: set default value
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Builder: set comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// `NOT NULL` is implied by primary key membership
    pub fn effective_not_null(&self) -> bool {
        self.is_not_null || self.is_primary_key
    }

    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }

    /// Structural equality of the definition, ignoring edit bookkeeping
    pub fn same_definition(&self, other: &ColumnDesign) -> bool {
        self.name == other.name
            && self.data_type == other.data_type
            && self.length == other.length
            && self.is_primary_key == other.is_primary_key
            && self.is_not_null == other.is_not_null
            && self.is_auto_increment == other.is_auto_increment
            && self.default_value == other.default_value
            && self.comment == other.comment
    }

    /// Apply a field edit and promote the status of a clean row
    pub fn apply(&mut self, edit: ColumnEdit) {
        match edit {
            ColumnEdit::Name(name) => self.name = name,
            ColumnEdit::DataType(data_type) => self.data_type = data_type,
            ColumnEdit::Length(length) => self.length = length.filter(|l| !l.trim().is_empty()),
            ColumnEdit::PrimaryKey(value) => self.is_primary_key = value,
            ColumnEdit::NotNull(value) => self.is_not_null = value,
            ColumnEdit::AutoIncrement(value) => self.is_auto_increment = value,
            ColumnEdit::Default(value) => self.default_value = value,
            ColumnEdit::Comment(value) => self.comment = value.filter(|c| !c.is_empty()),
        }
        self.status = self.status.after_edit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_column_info_seeds_clean_row() {
        let info = ColumnInfo {
            name: "email".to_string(),
            ordinal: 2,
            data_type: "varchar".to_string(),
            nullable: false,
            default_value: Some("''::character varying".to_string()),
            max_length: Some(255),
            ..Default::default()
        };

        let col = ColumnDesign::from_column_info(&info);
        assert_eq!(col.id, ColumnId::seeded(2));
        assert_eq!(col.original_name.as_deref(), Some("email"));
        assert_eq!(col.length.as_deref(), Some("255"));
        assert!(col.is_not_null);
        assert_eq!(
            col.default_value,
            Some(DefaultValue::expression("''::character varying"))
        );
        assert_eq!(col.status, RowStatus::Clean);
    }

    #[test]
    fn test_apply_edit_promotes_clean_row() {
        let mut col = ColumnDesign::named("c1", "email");
        col.apply(ColumnEdit::Name("email_address".to_string()));

        assert_eq!(col.name, "email_address");
        assert_eq!(col.original_name.as_deref(), Some("email"));
        assert_eq!(col.status, RowStatus::Modified);
    }

    #[test]
    fn test_apply_edit_keeps_added_status() {
        let mut col = ColumnDesign::new("nickname");
        col.apply(ColumnEdit::NotNull(true));
        assert_eq!(col.status, RowStatus::Added);
    }

    #[test]
    fn test_same_definition_ignores_status() {
        let a = ColumnDesign::named("c1", "email");
        let mut b = a.clone();
        b.status = RowStatus::Modified;
        b.original_name = None;
        assert!(a.same_definition(&b));

        b.is_not_null = true;
        assert!(!a.same_definition(&b));
    }
}
