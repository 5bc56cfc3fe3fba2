//! Connection trait

use crate::{Result, SchemaIntrospection, StatementResult};
use async_trait::async_trait;

/// A database connection the designer hands its DDL to
///
/// The engine never inspects results beyond success or failure, so the
/// contract is a single statement in, an affected-row count (or an error) out.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgresql", "mysql")
    fn driver_name(&self) -> &str;

    /// Execute one statement
    async fn execute(&self, sql: &str) -> Result<StatementResult>;

    /// Get schema introspection interface if supported
    fn as_schema_introspection(&self) -> Option<&dyn SchemaIntrospection> {
        None
    }
}
