//! Table Designer for Tabula
//!
//! Schema diff and DDL synthesis for one table at a time.
//!
//! ## Features
//!
//! - Dialect-neutral column, index and foreign key models with per-row status
//! - CREATE TABLE synthesis for SQLite, PostgreSQL and MySQL
//! - ALTER TABLE diffing by stable row identity, so renames stay renames
//! - A designer session with a preview-then-execute workflow
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tabula_table_designer::{DatabaseDialect, DesignerSession, ColumnEdit};
//!
//! // Load an existing table for editing
//! let mut session = DesignerSession::open(&connection, DatabaseDialect::Sqlite, None, "users").await?;
//! let id = session.working().columns[1].id.clone();
//! session.update_column(&id, ColumnEdit::Name("email_address".into()))?;
//!
//! println!("{}", session.preview()?);
//! session.save(&connection).await?;
//! ```

pub mod error;
pub mod models;
pub mod service;
pub mod session;
pub mod settings;

// Re-exports for convenience
pub use error::{DesignerError, DesignerResult};
pub use models::{
    ColumnDesign, ColumnEdit, ColumnId, DatabaseDialect, DefaultValue, EntryStatus,
    ForeignKeyDesign, ForeignKeyEdit, ForeignKeyId, IndexDesign, IndexEdit, IndexId, IndexKind,
    RowStatus, TableDesign, TableOptions, ValidationError,
};
pub use service::{
    AlterDiffer, DdlGenerator, DdlPlan, DdlStatement, DialectRules, StatementKind, TableLoader,
    diff_columns,
};
pub use session::{DesignerMode, DesignerSession, SaveOutcome};
pub use settings::DesignerSettings;
