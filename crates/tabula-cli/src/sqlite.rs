//! SQLite connection for the `tabula` binary
//!
//! Executes designer statements and answers the per-object structure fetches
//! from `sqlite_master` and the `table_info` / `index_list` / `index_info` /
//! `foreign_key_list` pragmas.

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use std::path::Path;
use std::sync::Arc;
use tabula_core::{
    ColumnInfo, Connection, ForeignKeyAction, ForeignKeyInfo, IndexInfo, Result,
    SchemaIntrospection, StatementResult, TableInfo, TabulaError,
};

/// SQLite connection wrapper
pub struct SqliteConnection {
    conn: Arc<Mutex<RusqliteConnection>>,
}

impl SqliteConnection {
    /// Open (or create) a SQLite database file
    pub fn open(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "opening SQLite database");

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(TabulaError::Connection(format!(
                "Parent directory does not exist: {}",
                parent.display()
            )));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = RusqliteConnection::open_with_flags(path, flags).map_err(|e| {
            TabulaError::Connection(format!(
                "Failed to open SQLite database at '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::configure(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = RusqliteConnection::open_in_memory().map_err(|e| {
            TabulaError::Connection(format!("Failed to open in-memory database: {}", e))
        })?;
        Self::configure(conn)
    }

    fn configure(conn: RusqliteConnection) -> Result<Self> {
        // Enable foreign keys (PRAGMA commands return results, so use pragma_update)
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| TabulaError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a pragma that takes a quoted name argument and map each row
    fn pragma_rows<T>(
        &self,
        pragma: &str,
        argument: &str,
        map: impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.conn.lock();
        let sql = format!("PRAGMA {}('{}')", pragma, argument.replace('\'', "''"));
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| TabulaError::Schema(format!("Failed to prepare {}: {}", pragma, e)))?;
        let rows = stmt
            .query_map([], map)
            .map_err(|e| TabulaError::Schema(format!("Failed to run {}: {}", pragma, e)))?;
        rows.collect::<rusqlite::Result<Vec<T>>>()
            .map_err(|e| TabulaError::Schema(format!("Failed to read {}: {}", pragma, e)))
    }
}

#[async_trait]
impl Connection for SqliteConnection {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    #[tracing::instrument(skip(self, sql))]
    async fn execute(&self, sql: &str) -> Result<StatementResult> {
        tracing::debug!(sql = %sql, "executing statement");
        let conn = self.conn.lock();
        let affected = conn
            .execute(sql, [])
            .map_err(|e| TabulaError::Query(format!("Failed to execute statement: {}", e)))?;
        Ok(StatementResult::new(affected as u64))
    }

    fn as_schema_introspection(&self) -> Option<&dyn SchemaIntrospection> {
        Some(self)
    }
}

#[async_trait]
impl SchemaIntrospection for SqliteConnection {
    #[tracing::instrument(skip(self))]
    async fn list_tables(&self, _schema: Option<&str>) -> Result<Vec<TableInfo>> {
        tracing::debug!("listing tables from sqlite_master");
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .map_err(|e| TabulaError::Schema(format!("Failed to list tables: {}", e)))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| TabulaError::Schema(format!("Failed to list tables: {}", e)))?;

        Ok(names
            .into_iter()
            .map(|name| TableInfo {
                schema: None,
                name,
                comment: None,
            })
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_columns(&self, _schema: Option<&str>, table: &str) -> Result<Vec<ColumnInfo>> {
        tracing::trace!(table = %table, "fetching column information");
        self.pragma_rows("table_info", table, |row| {
            let ordinal: i64 = row.get(0)?;
            let declared: String = row.get::<_, Option<String>>(2)?.unwrap_or_default();
            let (data_type, max_length) = split_declared_type(&declared);
            let not_null: i64 = row.get(3)?;
            let pk_position: i64 = row.get(5)?;

            // The designer has no SQLite auto-increment lowering, so rowid
            // aliases are reported as plain primary keys.
            Ok(ColumnInfo {
                name: row.get(1)?,
                ordinal: ordinal as usize,
                data_type,
                nullable: not_null == 0 && pk_position == 0,
                default_value: row.get(4)?,
                max_length,
                is_primary_key: pk_position > 0,
                is_auto_increment: false,
                comment: None,
            })
        })
    }

    #[tracing::instrument(skip(self))]
    async fn get_indexes(&self, _schema: Option<&str>, table: &str) -> Result<Vec<IndexInfo>> {
        tracing::trace!(table = %table, "fetching index information");
        let listed = self.pragma_rows("index_list", table, |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)? == 1,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut indexes = Vec::new();
        for (name, is_unique, origin) in listed {
            let columns = self.pragma_rows("index_info", &name, |row| {
                row.get::<_, Option<String>>(2)
            })?;

            indexes.push(IndexInfo {
                name,
                columns: columns.into_iter().flatten().collect(),
                is_unique,
                is_primary: origin == "pk",
                index_type: "btree".to_string(),
            });
        }

        Ok(indexes)
    }

    #[tracing::instrument(skip(self))]
    async fn get_foreign_keys(
        &self,
        _schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>> {
        tracing::trace!(table = %table, "fetching foreign key information");
        let rows = self.pragma_rows("foreign_key_list", table, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        // One row per column pair; rows of a composite key share the id.
        // SQLite keeps no constraint names, so the id keeps made-up names unique.
        let mut fks: Vec<(i64, ForeignKeyInfo)> = Vec::new();
        for (id, ref_table, from_col, to_col, on_update, on_delete) in rows {
            let to_col = to_col.unwrap_or_default();
            match fks.iter_mut().find(|(fk_id, _)| *fk_id == id) {
                Some((_, fk)) => {
                    fk.columns.push(from_col);
                    fk.referenced_columns.push(to_col);
                }
                None => fks.push((
                    id,
                    ForeignKeyInfo {
                        name: format!("fk_{}_{}_{}", table, ref_table, id),
                        columns: vec![from_col],
                        referenced_table: ref_table,
                        referenced_columns: vec![to_col],
                        on_update: ForeignKeyAction::from_sql(&on_update),
                        on_delete: ForeignKeyAction::from_sql(&on_delete),
                    },
                )),
            }
        }

        Ok(fks.into_iter().map(|(_, fk)| fk).collect())
    }
}

/// Split `VARCHAR(255)` into `("VARCHAR", Some(255))`; other shapes are kept whole
fn split_declared_type(declared: &str) -> (String, Option<i64>) {
    let declared = declared.trim();
    if let Some((base, rest)) = declared.split_once('(')
        && let Some(length) = rest.strip_suffix(')')
        && let Ok(length) = length.trim().parse::<i64>()
    {
        return (base.trim().to_string(), Some(length));
    }
    (declared.to_string(), None)
}
