//! JSON design files
//!
//! A design file is one serialized `TableDesign`. `export` writes them with
//! seeded ids so a later `diff` or `apply` matches rows by identity.

use anyhow::{Context, Result};
use std::path::Path;
use tabula_table_designer::TableDesign;

pub fn read_design(path: &Path) -> Result<TableDesign> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read design file {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse design JSON in {:?}", path))
}

pub fn to_json(design: &TableDesign) -> Result<String> {
    serde_json::to_string_pretty(design).context("Failed to serialize design")
}
