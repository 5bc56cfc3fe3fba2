//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tabula_core::{
    ColumnInfo, Connection, ForeignKeyInfo, IndexInfo, Result, SchemaIntrospection,
    StatementResult, TableDetails, TableInfo, TabulaError,
};

/// Mock connection for testing the designer without a real database.
///
/// Serves canned table structures and records every executed statement.
pub struct MockConnection {
    pub driver: String,
    pub introspection: bool,
    pub tables: Vec<TableDetails>,
    /// 1-based position of the statement that fails, if any
    pub fail_on: Option<usize>,
    /// Log of all SQL statements submitted, for assertion in tests
    pub query_log: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl MockConnection {
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            introspection: true,
            tables: Vec::new(),
            fail_on: None,
            query_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    pub fn with_table(mut self, table: TableDetails) -> Self {
        self.tables.push(table);
        self
    }

    pub fn failing_on(mut self, position: usize) -> Self {
        self.fail_on = Some(position);
        self
    }

    pub fn without_introspection(mut self) -> Self {
        self.introspection = false;
        self
    }

    pub fn query_log(&self) -> Vec<String> {
        self.query_log.lock().clone()
    }

    fn table(&self, name: &str) -> Result<&TableDetails> {
        self.tables
            .iter()
            .find(|t| t.info.name == name)
            .ok_or_else(|| TabulaError::NotFound(format!("table '{}'", name)))
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn driver_name(&self) -> &str {
        &self.driver
    }

    async fn execute(&self, sql: &str) -> Result<StatementResult> {
        let mut log = self.query_log.lock();
        log.push(sql.to_string());
        if self.fail_on == Some(log.len()) {
            return Err(TabulaError::Query("Execute failed".into()));
        }
        Ok(StatementResult::new(0))
    }

    fn as_schema_introspection(&self) -> Option<&dyn SchemaIntrospection> {
        if self.introspection { Some(self) } else { None }
    }
}

#[async_trait]
impl SchemaIntrospection for MockConnection {
    async fn list_tables(&self, _schema: Option<&str>) -> Result<Vec<TableInfo>> {
        Ok(self.tables.iter().map(|t| t.info.clone()).collect())
    }

    async fn get_columns(&self, _schema: Option<&str>, table: &str) -> Result<Vec<ColumnInfo>> {
        Ok(self.table(table)?.columns.clone())
    }

    async fn get_indexes(&self, _schema: Option<&str>, table: &str) -> Result<Vec<IndexInfo>> {
        Ok(self.table(table)?.indexes.clone())
    }

    async fn get_foreign_keys(
        &self,
        _schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<ForeignKeyInfo>> {
        Ok(self.table(table)?.foreign_keys.clone())
    }
}

/// `users(id integer pk, email varchar(255) not null, name text)` with an index on name
pub fn users_table() -> TableDetails {
    TableDetails {
        info: TableInfo {
            schema: None,
            name: "users".to_string(),
            comment: None,
        },
        columns: vec![
            ColumnInfo {
                name: "id".to_string(),
                ordinal: 0,
                data_type: "integer".to_string(),
                nullable: false,
                is_primary_key: true,
                ..Default::default()
            },
            ColumnInfo {
                name: "email".to_string(),
                ordinal: 1,
                data_type: "varchar".to_string(),
                nullable: false,
                max_length: Some(255),
                ..Default::default()
            },
            ColumnInfo {
                name: "name".to_string(),
                ordinal: 2,
                data_type: "text".to_string(),
                nullable: true,
                ..Default::default()
            },
        ],
        indexes: vec![
            IndexInfo {
                name: "users_pkey".to_string(),
                columns: vec!["id".to_string()],
                is_unique: true,
                is_primary: true,
                index_type: "btree".to_string(),
            },
            IndexInfo {
                name: "idx_users_name".to_string(),
                columns: vec!["name".to_string()],
                is_unique: false,
                is_primary: false,
                index_type: "btree".to_string(),
            },
        ],
        foreign_keys: Vec::new(),
    }
}
