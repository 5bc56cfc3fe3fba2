//! Tabula Core - collaborator contracts for the table designer
//!
//! This crate defines the narrow boundary the DDL engine talks to:
//!
//! - `Connection` - executes one SQL statement against a live database
//! - `SchemaIntrospection` - fetches a table's structure from the catalog
//! - Catalog DTOs like `TableDetails`, `ColumnInfo`, `IndexInfo`, `ForeignKeyInfo`
//! - `TabulaError` and the crate-wide `Result` alias

mod connection;
mod error;
mod schema;
mod types;

pub use connection::*;
pub use error::*;
pub use schema::*;
pub use types::*;
