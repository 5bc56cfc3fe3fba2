//! Index design model

use serde::{Deserialize, Serialize};
use tabula_core::IndexInfo;

use super::{EntryStatus, IndexId};

/// Kind of secondary index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    Normal,
    Unique,
    Fulltext,
}

/// Index design model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDesign {
    pub id: IndexId,
    #[serde(default)]
    pub status: EntryStatus,
    /// Index name
    pub name: String,
    #[serde(default)]
    pub kind: IndexKind,
    /// Covered columns, in index order
    pub columns: Vec<String>,
}

/// A single field edit applied to an index entry
#[derive(Debug, Clone, PartialEq)]
pub enum IndexEdit {
    Name(String),
    Kind(IndexKind),
    Columns(Vec<String>),
    /// Add the column if it is not covered yet, remove it otherwise
    ToggleColumn(String),
}

impl IndexDesign {
    /// Create a new index added in the designer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: IndexId::generate(),
            status: EntryStatus::New,
            name: name.into(),
            kind: IndexKind::Normal,
            columns: Vec::new(),
        }
    }

    /// Create from existing index info
    pub fn from_index_info(ordinal: usize, info: &IndexInfo) -> Self {
        let kind = if info.index_type.eq_ignore_ascii_case("fulltext") {
            IndexKind::Fulltext
        } else if info.is_unique {
            IndexKind::Unique
        } else {
            IndexKind::Normal
        };

        Self {
            id: IndexId::seeded(ordinal),
            status: EntryStatus::Clean,
            name: info.name.clone(),
            kind,
            columns: info.columns.clone(),
        }
    }

    /// Builder: add a column
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push(name.into());
        self
    }

    /// Builder: set as unique
    pub fn unique(mut self) -> Self {
        self.kind = IndexKind::Unique;
        self
    }

    /// Builder: set as fulltext
    pub fn fulltext(mut self) -> Self {
        self.kind = IndexKind::Fulltext;
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }

    /// Structural equality of the definition, ignoring status
    pub fn same_definition(&self, other: &IndexDesign) -> bool {
        self.name == other.name && self.kind == other.kind && self.columns == other.columns
    }

    pub fn apply(&mut self, edit: IndexEdit) {
        match edit {
            IndexEdit::Name(name) => self.name = name,
            IndexEdit::Kind(kind) => self.kind = kind,
            IndexEdit::Columns(columns) => self.columns = columns,
            IndexEdit::ToggleColumn(column) => {
                if let Some(pos) = self.columns.iter().position(|c| *c == column) {
                    self.columns.remove(pos);
                } else {
                    self.columns.push(column);
                }
            }
        }
        self.status = self.status.after_edit();
    }
}
