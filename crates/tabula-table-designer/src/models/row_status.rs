//! Per-row edit provenance shown by the designer
//!
//! Status is a rendering hint. The ALTER differ never reads it; it recomputes
//! changes from the original and working snapshots.

use serde::{Deserialize, Serialize};

/// Lifecycle of a column row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// Unchanged since it was loaded
    #[default]
    Clean,
    /// Loaded, then edited
    Modified,
    /// Created in this session
    Added,
    /// Marked for removal; field values are kept for display and undo
    Deleted,
}

impl RowStatus {
    /// Status after a field edit: only a clean row changes
    pub fn after_edit(self) -> Self {
        match self {
            RowStatus::Clean => RowStatus::Modified,
            other => other,
        }
    }

    pub fn is_deleted(self) -> bool {
        self == RowStatus::Deleted
    }
}

/// Lifecycle of an index or foreign key entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Clean,
    New,
    Modified,
    Deleted,
}

impl EntryStatus {
    pub fn after_edit(self) -> Self {
        match self {
            EntryStatus::Clean => EntryStatus::Modified,
            other => other,
        }
    }

    pub fn is_deleted(self) -> bool {
        self == EntryStatus::Deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_promotes_only_clean_rows() {
        assert_eq!(RowStatus::Clean.after_edit(), RowStatus::Modified);
        assert_eq!(RowStatus::Added.after_edit(), RowStatus::Added);
        assert_eq!(RowStatus::Modified.after_edit(), RowStatus::Modified);

        assert_eq!(EntryStatus::Clean.after_edit(), EntryStatus::Modified);
        assert_eq!(EntryStatus::New.after_edit(), EntryStatus::New);
    }
}
