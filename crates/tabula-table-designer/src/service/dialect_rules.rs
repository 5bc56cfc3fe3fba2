//! Per-dialect rendering rules
//!
//! Each dialect resolves to one static `DialectRules` record. The generators
//! consult the record and never match on `DatabaseDialect` themselves, so a new
//! dialect is one more table here.

use crate::models::DatabaseDialect;

/// How an auto-increment column is lowered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrementRule {
    /// Append a keyword to the column clause (`AUTO_INCREMENT`)
    Suffix(&'static str),
    /// Replace the declared type with `SERIAL` / `BIGSERIAL`
    SerialType,
    /// No lowering exists
    Unsupported,
}

/// How property changes on an existing column are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyGranularity {
    /// One `ALTER COLUMN` statement per changed property
    PerProperty,
    /// One `MODIFY COLUMN` statement restating the whole definition
    WholeDefinition,
    /// In-place alteration is rejected by the database
    Unsupported,
}

/// How secondary indexes are declared and removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStyle {
    /// `INDEX name (cols)` inside the table body, `ALTER TABLE .. ADD/DROP INDEX`
    Inline,
    /// Unique indexes are named `CONSTRAINT .. UNIQUE` table constraints, others are
    /// standalone `CREATE INDEX` statements
    UniqueConstraint,
    /// Every index is a standalone `CREATE [UNIQUE] INDEX` statement
    Standalone,
}

/// Static rendering rules of one dialect
#[derive(Debug, Clone, Copy)]
pub struct DialectRules {
    pub dialect: DatabaseDialect,
    pub identifier_quote: char,
    /// Whether a schema name may qualify the table name
    pub schemas: bool,
    pub auto_increment: AutoIncrementRule,
    /// Column rename clause, `{old}` and `{new}` are replaced by quoted names
    pub rename_clause: &'static str,
    pub modify: ModifyGranularity,
    /// `COMMENT '..'` on column clauses
    pub column_comments: bool,
    /// Engine / charset / collation / auto-increment / comment after the table body
    pub table_options: bool,
    pub index_style: IndexStyle,
    pub fulltext: bool,
    /// Clause dropping a foreign key, `None` when keys cannot be altered in place
    pub foreign_key_drop: Option<&'static str>,
}

static POSTGRES: DialectRules = DialectRules {
    dialect: DatabaseDialect::Postgres,
    identifier_quote: '"',
    schemas: true,
    auto_increment: AutoIncrementRule::SerialType,
    rename_clause: "RENAME COLUMN {old} TO {new}",
    modify: ModifyGranularity::PerProperty,
    column_comments: false,
    table_options: false,
    index_style: IndexStyle::UniqueConstraint,
    fulltext: false,
    foreign_key_drop: Some("DROP CONSTRAINT"),
};

static MYSQL: DialectRules = DialectRules {
    dialect: DatabaseDialect::Mysql,
    identifier_quote: '`',
    schemas: true,
    auto_increment: AutoIncrementRule::Suffix("AUTO_INCREMENT"),
    rename_clause: "RENAME COLUMN {old} TO {new}",
    modify: ModifyGranularity::WholeDefinition,
    column_comments: true,
    table_options: true,
    index_style: IndexStyle::Inline,
    fulltext: true,
    foreign_key_drop: Some("DROP FOREIGN KEY"),
};

static SQLITE: DialectRules = DialectRules {
    dialect: DatabaseDialect::Sqlite,
    identifier_quote: '"',
    schemas: false,
    auto_increment: AutoIncrementRule::Unsupported,
    rename_clause: "RENAME COLUMN {old} TO {new}",
    modify: ModifyGranularity::Unsupported,
    column_comments: false,
    table_options: false,
    index_style: IndexStyle::Standalone,
    fulltext: false,
    foreign_key_drop: None,
};

impl DatabaseDialect {
    /// Rendering rules for this dialect
    pub fn rules(&self) -> &'static DialectRules {
        match self {
            DatabaseDialect::Postgres => &POSTGRES,
            DatabaseDialect::Mysql => &MYSQL,
            DatabaseDialect::Sqlite => &SQLITE,
        }
    }
}

impl DialectRules {
    /// Wrap an identifier with the dialect's quote character, doubling embedded quotes
    pub fn quote_ident(&self, name: &str) -> String {
        let q = self.identifier_quote;
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Quoted table name, schema-qualified where the dialect has schemas
    pub fn qualified_table(&self, schema: Option<&str>, table: &str) -> String {
        match schema.filter(|s| self.schemas && !s.is_empty()) {
            Some(schema) => format!("{}.{}", self.quote_ident(schema), self.quote_ident(table)),
            None => self.quote_ident(table),
        }
    }

    /// Render the rename clause for one column
    pub fn rename(&self, old: &str, new: &str) -> String {
        self.rename_clause
            .replace("{old}", &self.quote_ident(old))
            .replace("{new}", &self.quote_ident(new))
    }

    /// Type substituted for an auto-increment column under `SerialType`
    pub fn serial_type(data_type: &str) -> &'static str {
        if data_type.to_lowercase().contains("big") {
            "BIGSERIAL"
        } else {
            "SERIAL"
        }
    }
}
