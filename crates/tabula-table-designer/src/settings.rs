//! Designer settings
//!
//! Defaults used when a new table is started, loaded from
//! `<config dir>/tabula/designer.toml` when that file exists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{DatabaseDialect, TableOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    pub default_dialect: DatabaseDialect,
    pub new_table: NewTableSettings,
    pub mysql: MysqlSettings,
}

/// Shape of the table a NEW session starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTableSettings {
    pub table_name: String,
    pub id_column: String,
    pub id_type: String,
}

/// Table options a NEW MySQL session starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MysqlSettings {
    pub engine: String,
    pub charset: String,
    pub collation: String,
    pub auto_increment_start: u64,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            default_dialect: DatabaseDialect::Sqlite,
            new_table: NewTableSettings::default(),
            mysql: MysqlSettings::default(),
        }
    }
}

impl Default for NewTableSettings {
    fn default() -> Self {
        Self {
            table_name: "new_table".to_string(),
            id_column: "id".to_string(),
            id_type: "INT".to_string(),
        }
    }
}

impl Default for MysqlSettings {
    fn default() -> Self {
        let options = TableOptions::mysql();
        Self {
            engine: options.engine.unwrap_or_default(),
            charset: options.charset.unwrap_or_default(),
            collation: options.collation.unwrap_or_default(),
            auto_increment_start: options.auto_increment_start.unwrap_or(1),
        }
    }
}

impl MysqlSettings {
    /// Table options for a new MySQL table; blank settings are left out
    pub fn table_options(&self) -> TableOptions {
        let non_empty = |value: &str| Some(value.trim().to_string()).filter(|v| !v.is_empty());
        TableOptions {
            engine: non_empty(&self.engine),
            charset: non_empty(&self.charset),
            collation: non_empty(&self.collation),
            auto_increment_start: Some(self.auto_increment_start),
        }
    }
}

impl DesignerSettings {
    /// Load from the default location, falling back to defaults when the file is absent
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no designer settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read designer settings from {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse designer settings TOML in {:?}", path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join("tabula").join("designer.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: DesignerSettings = toml::from_str(indoc! {r#"
            default_dialect = "postgres"

            [new_table]
            id_type = "BIGINT"
        "#})
        .unwrap();

        assert_eq!(settings.default_dialect, DatabaseDialect::Postgres);
        assert_eq!(settings.new_table.id_type, "BIGINT");
        assert_eq!(settings.new_table.table_name, "new_table");
        assert_eq!(settings.mysql.engine, "InnoDB");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("designer.toml");

        let mut settings = DesignerSettings::default();
        settings.mysql.engine = "MyISAM".to_string();
        settings.save_to(&path).unwrap();

        let loaded = DesignerSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_blank_mysql_settings_are_omitted() {
        let mysql = MysqlSettings {
            charset: "  ".to_string(),
            ..MysqlSettings::default()
        };
        let options = mysql.table_options();
        assert_eq!(options.engine.as_deref(), Some("InnoDB"));
        assert_eq!(options.charset, None);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("designer.toml");
        std::fs::write(&path, "default_dialect = \"oracle\"").unwrap();

        let err = DesignerSettings::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("designer.toml"));
    }
}
