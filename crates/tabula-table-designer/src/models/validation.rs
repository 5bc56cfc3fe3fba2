//! Design validation
//!
//! Checks run on the live projection of a design before any DDL is generated.
//! Field paths index into the live rows (`columns[2].name`), so deleted rows
//! never shift or trigger errors.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::TableDesign;

/// A problem found in a table design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path of the offending field, e.g. `indexes[0].columns`
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn row(collection: &str, position: usize, attribute: &str, message: impl Into<String>) -> Self {
        Self::new(format!("{collection}[{position}].{attribute}"), message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Join errors into one line for error messages
pub(crate) fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn validate_design(design: &TableDesign) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if design.table_name.trim().is_empty() {
        errors.push(ValidationError::new("table_name", "Table name is required"));
    }

    check_columns(design, &mut errors);
    check_indexes(design, &mut errors);
    check_foreign_keys(design, &mut errors);

    errors
}

fn check_columns(design: &TableDesign, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut any = false;

    for (i, col) in design.live_columns().enumerate() {
        any = true;
        if col.name.trim().is_empty() {
            errors.push(ValidationError::row(
                "columns",
                i,
                "name",
                format!("Column {} name is required", i + 1),
            ));
        } else if !seen.insert(col.name.to_lowercase()) {
            errors.push(ValidationError::new(
                "columns",
                format!("Duplicate column name: {}", col.name),
            ));
        }

        if col.data_type.trim().is_empty() {
            errors.push(ValidationError::row(
                "columns",
                i,
                "data_type",
                format!("Column {} data type is required", i + 1),
            ));
        }

        if let Some(default) = &col.default_value
            && !default.is_valid()
        {
            errors.push(ValidationError::row(
                "columns",
                i,
                "default_value",
                format!("Invalid default value for column '{}'", col.name),
            ));
        }
    }

    if !any {
        errors.push(ValidationError::new(
            "columns",
            "At least one column is required",
        ));
    }
}

fn known_columns(design: &TableDesign) -> HashSet<String> {
    design
        .live_columns()
        .map(|c| c.name.to_lowercase())
        .collect()
}

fn check_indexes(design: &TableDesign, errors: &mut Vec<ValidationError>) {
    let columns = known_columns(design);
    let mut seen = HashSet::new();

    for (i, idx) in design.live_indexes().enumerate() {
        if idx.name.trim().is_empty() {
            errors.push(ValidationError::row(
                "indexes",
                i,
                "name",
                format!("Index {} name is required", i + 1),
            ));
        } else if !seen.insert(idx.name.to_lowercase()) {
            errors.push(ValidationError::new(
                "indexes",
                format!("Duplicate index name: {}", idx.name),
            ));
        }

        if idx.columns.is_empty() {
            errors.push(ValidationError::row(
                "indexes",
                i,
                "columns",
                format!("Index '{}' has no columns", idx.name),
            ));
        }
        for col in idx.columns.iter().filter(|c| !columns.contains(&c.to_lowercase())) {
            errors.push(ValidationError::row(
                "indexes",
                i,
                "columns",
                format!("Index column '{}' does not exist in table", col),
            ));
        }
    }
}

fn check_foreign_keys(design: &TableDesign, errors: &mut Vec<ValidationError>) {
    let columns = known_columns(design);

    for (i, fk) in design.live_foreign_keys().enumerate() {
        if !columns.contains(&fk.source_column.to_lowercase()) {
            errors.push(ValidationError::row(
                "foreign_keys",
                i,
                "source_column",
                format!(
                    "Foreign key column '{}' does not exist in table",
                    fk.source_column
                ),
            ));
        }
        if fk.ref_table.trim().is_empty() || fk.ref_column.trim().is_empty() {
            errors.push(ValidationError::row(
                "foreign_keys",
                i,
                "ref_table",
                "Foreign key must reference a table and column",
            ));
        }
    }
}
