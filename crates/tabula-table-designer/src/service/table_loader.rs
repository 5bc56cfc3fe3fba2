//! Table loader for loading existing table structures
//!
//! Fetches a table's structure through the connection's schema introspection
//! and converts it to a `TableDesign` for editing.

use tabula_core::Connection;

use crate::error::{DesignerError, DesignerResult};
use crate::models::TableDesign;

/// Table loader for converting database tables to TableDesign
pub struct TableLoader;

impl TableLoader {
    /// Load an existing table's structure for editing
    ///
    /// Fails with `SchemaNotSupported` when the connection cannot introspect,
    /// and `LoadFailed` when the fetch itself fails.
    #[tracing::instrument(skip(connection), fields(driver = connection.driver_name()))]
    pub async fn load_table(
        connection: &dyn Connection,
        schema: Option<&str>,
        table_name: &str,
    ) -> DesignerResult<TableDesign> {
        let introspection = connection
            .as_schema_introspection()
            .ok_or(DesignerError::SchemaNotSupported)?;

        let details = introspection
            .get_table(schema, table_name)
            .await
            .map_err(|source| {
                if source.is_not_found() {
                    tracing::warn!(table = %table_name, "table does not exist");
                } else {
                    tracing::error!(table = %table_name, error = %source, "structure fetch failed");
                }
                DesignerError::LoadFailed {
                    table: table_name.to_string(),
                    source,
                }
            })?;

        tracing::debug!(
            columns = details.columns.len(),
            indexes = details.indexes.len(),
            foreign_keys = details.foreign_keys.len(),
            "loaded table structure"
        );

        Ok(TableDesign::from_table_details(&details))
    }

    /// Names of the tables a foreign key may reference
    pub async fn list_table_names(
        connection: &dyn Connection,
        schema: Option<&str>,
    ) -> DesignerResult<Vec<String>> {
        let introspection = connection
            .as_schema_introspection()
            .ok_or(DesignerError::SchemaNotSupported)?;

        let tables = introspection
            .list_tables(schema)
            .await
            .map_err(|source| DesignerError::LoadFailed {
                table: "<table list>".to_string(),
                source,
            })?;

        Ok(tables.into_iter().map(|t| t.name).collect())
    }
}
