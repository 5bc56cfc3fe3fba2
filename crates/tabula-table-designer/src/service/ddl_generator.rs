//! DDL generation for table designs
//!
//! Generates CREATE TABLE statements and the column, index and foreign key
//! fragments shared with the ALTER differ. Dialect-specific behaviour is read
//! from the dialect's `DialectRules` rather than hardcoded at each call site.

use crate::error::{DesignerError, DesignerResult};
use crate::models::{
    ColumnDesign, DatabaseDialect, ForeignKeyDesign, IndexDesign, IndexKind, TableDesign,
    TableOptions, quote_string_literal,
};

use super::dialect_rules::{AutoIncrementRule, DialectRules, IndexStyle};
use super::ddl_plan::DdlPlan;

/// DDL Generator for creating SQL statements from table designs
///
/// Stateless: all methods are associated functions over the design data.
pub struct DdlGenerator;

impl DdlGenerator {
    /// Generate the CREATE TABLE plan for a design
    ///
    /// The first statement is the CREATE TABLE itself, and on MySQL it is the
    /// only one. PostgreSQL has no inline `INDEX` clause and SQLite has no inline
    /// index clause at all, so there the plan carries one follow-up
    /// `CREATE [UNIQUE] INDEX` statement per index that could not be declared in
    /// the table body. A save executes them in plan order.
    pub fn generate_create_table(
        design: &TableDesign,
        dialect: DatabaseDialect,
    ) -> DesignerResult<DdlPlan> {
        let errors = design.validate();
        if !errors.is_empty() {
            return Err(DesignerError::InvalidDefinition(errors));
        }

        let rules = dialect.rules();
        let table = rules.qualified_table(design.schema.as_deref(), &design.table_name);

        let columns: Vec<&ColumnDesign> = design.live_columns().collect();
        let pk_columns = design.primary_key_columns();
        let inline_pk = pk_columns.len() == 1;

        let mut body = Vec::new();
        for column in &columns {
            body.push(Self::column_definition(column, rules, inline_pk)?);
        }

        // Composite primary key constraint (more than one PK column)
        if pk_columns.len() > 1 {
            body.push(format!(
                "PRIMARY KEY ({})",
                Self::column_list(pk_columns.iter().map(|c| c.name.as_str()), rules)
            ));
        }

        let mut follow_up = Vec::new();
        for index in design.live_indexes() {
            Self::check_index_kind(index, rules)?;
            match (rules.index_style, index.kind) {
                (IndexStyle::Inline, _) => body.push(Self::inline_index_clause(index, rules)),
                (IndexStyle::UniqueConstraint, IndexKind::Unique) => {
                    body.push(Self::unique_constraint_clause(index, rules))
                }
                _ => follow_up.push(Self::create_index_statement(&table, index, rules)),
            }
        }

        for fk in design.live_foreign_keys() {
            body.push(Self::foreign_key_clause(fk, rules));
        }

        let mut ddl = format!("CREATE TABLE {} (\n  ", table);
        ddl.push_str(&body.join(",\n  "));
        ddl.push_str("\n)");
        if rules.table_options {
            ddl.push_str(&Self::table_options(
                &design.options,
                design.comment.as_deref(),
            ));
        }
        ddl.push(';');

        let mut plan = DdlPlan::new();
        plan.push_executable(ddl);
        for statement in follow_up {
            plan.push_executable(statement);
        }

        tracing::debug!(
            table = %design.table_name,
            dialect = %dialect,
            statements = plan.len(),
            "generated CREATE TABLE plan"
        );
        Ok(plan)
    }

    /// Build the type specification string (e.g. "VARCHAR(255)" or "DECIMAL(10,2)")
    pub(crate) fn column_type_spec(column: &ColumnDesign) -> String {
        match column.length.as_deref().map(str::trim) {
            Some(length) if !length.is_empty() => format!("{}({})", column.data_type, length),
            _ => column.data_type.clone(),
        }
    }

    /// Declared type, substituted with a serial type where the dialect requires it
    fn declared_type(column: &ColumnDesign, rules: &DialectRules) -> String {
        if column.is_auto_increment && rules.auto_increment == AutoIncrementRule::SerialType {
            DialectRules::serial_type(&column.data_type).to_string()
        } else {
            Self::column_type_spec(column)
        }
    }

    /// Generate a column clause
    ///
    /// `with_primary_key` is false when the clause restates an existing column or
    /// when the key is declared as a table constraint.
    pub(crate) fn column_definition(
        column: &ColumnDesign,
        rules: &DialectRules,
        with_primary_key: bool,
    ) -> DesignerResult<String> {
        let mut def = format!(
            "{} {}",
            rules.quote_ident(&column.name),
            Self::declared_type(column, rules)
        );

        if with_primary_key && column.is_primary_key {
            def.push_str(" PRIMARY KEY");
        }

        if column.effective_not_null() {
            def.push_str(" NOT NULL");
        }

        if column.is_auto_increment {
            match rules.auto_increment {
                AutoIncrementRule::Suffix(keyword) => {
                    def.push(' ');
                    def.push_str(keyword);
                }
                AutoIncrementRule::SerialType => {}
                AutoIncrementRule::Unsupported => {
                    return Err(DesignerError::UnsupportedOperation(format!(
                        "{} has no auto-increment column type; column '{}' must be declared without it",
                        rules.dialect.name(),
                        column.name
                    )));
                }
            }
        }

        if let Some(default) = &column.default_value {
            def.push_str(" DEFAULT ");
            def.push_str(&default.to_sql());
        }

        if rules.column_comments {
            if let Some(comment) = column.comment.as_deref().filter(|c| !c.is_empty()) {
                def.push_str(" COMMENT ");
                def.push_str(&quote_string_literal(comment));
            }
        }

        Ok(def)
    }

    fn column_list<'a>(columns: impl Iterator<Item = &'a str>, rules: &DialectRules) -> String {
        columns
            .map(|c| rules.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn check_index_kind(index: &IndexDesign, rules: &DialectRules) -> DesignerResult<()> {
        if index.kind == IndexKind::Fulltext && !rules.fulltext {
            return Err(DesignerError::UnsupportedOperation(format!(
                "{} has no fulltext index lowering (index '{}')",
                rules.dialect.name(),
                index.name
            )));
        }
        Ok(())
    }

    fn index_keyword(kind: IndexKind) -> &'static str {
        match kind {
            IndexKind::Normal => "INDEX",
            IndexKind::Unique => "UNIQUE INDEX",
            IndexKind::Fulltext => "FULLTEXT INDEX",
        }
    }

    /// `INDEX name (cols)` clause for the table body
    fn inline_index_clause(index: &IndexDesign, rules: &DialectRules) -> String {
        format!(
            "{} {} ({})",
            Self::index_keyword(index.kind),
            rules.quote_ident(&index.name),
            Self::column_list(index.columns.iter().map(String::as_str), rules)
        )
    }

    fn unique_constraint_clause(index: &IndexDesign, rules: &DialectRules) -> String {
        format!(
            "CONSTRAINT {} UNIQUE ({})",
            rules.quote_ident(&index.name),
            Self::column_list(index.columns.iter().map(String::as_str), rules)
        )
    }

    /// Generate CREATE INDEX statement
    fn create_index_statement(table: &str, index: &IndexDesign, rules: &DialectRules) -> String {
        let unique = if index.kind == IndexKind::Unique {
            "UNIQUE "
        } else {
            ""
        };
        format!(
            "CREATE {}INDEX {} ON {} ({});",
            unique,
            rules.quote_ident(&index.name),
            table,
            Self::column_list(index.columns.iter().map(String::as_str), rules)
        )
    }

    /// Statement adding an index to an existing table
    pub(crate) fn add_index_statement(
        table: &str,
        index: &IndexDesign,
        rules: &DialectRules,
    ) -> DesignerResult<String> {
        Self::check_index_kind(index, rules)?;
        Ok(match (rules.index_style, index.kind) {
            (IndexStyle::Inline, _) => format!(
                "ALTER TABLE {} ADD {};",
                table,
                Self::inline_index_clause(index, rules)
            ),
            (IndexStyle::UniqueConstraint, IndexKind::Unique) => format!(
                "ALTER TABLE {} ADD {};",
                table,
                Self::unique_constraint_clause(index, rules)
            ),
            _ => Self::create_index_statement(table, index, rules),
        })
    }

    /// Statement dropping an index from an existing table
    pub(crate) fn drop_index_statement(
        table: &str,
        schema: Option<&str>,
        index: &IndexDesign,
        rules: &DialectRules,
    ) -> String {
        match (rules.index_style, index.kind) {
            (IndexStyle::Inline, _) => format!(
                "ALTER TABLE {} DROP INDEX {};",
                table,
                rules.quote_ident(&index.name)
            ),
            (IndexStyle::UniqueConstraint, IndexKind::Unique) => format!(
                "ALTER TABLE {} DROP CONSTRAINT {};",
                table,
                rules.quote_ident(&index.name)
            ),
            _ => format!("DROP INDEX {};", rules.qualified_table(schema, &index.name)),
        }
    }

    /// Generate foreign key constraint SQL fragment
    pub(crate) fn foreign_key_clause(fk: &ForeignKeyDesign, rules: &DialectRules) -> String {
        let mut constraint = String::new();

        if !fk.name.is_empty() {
            constraint.push_str(&format!("CONSTRAINT {} ", rules.quote_ident(&fk.name)));
        }

        constraint.push_str(&format!(
            "FOREIGN KEY ({}) REFERENCES {}({}) ON DELETE {} ON UPDATE {}",
            rules.quote_ident(&fk.source_column),
            rules.quote_ident(&fk.ref_table),
            rules.quote_ident(&fk.ref_column),
            fk.on_delete.as_sql(),
            fk.on_update.as_sql()
        ));

        constraint
    }

    /// Generate the table options suffix (MySQL-like dialect)
    fn table_options(options: &TableOptions, comment: Option<&str>) -> String {
        let mut opts = options.clauses();
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            opts.push(format!("COMMENT={}", quote_string_literal(comment)));
        }

        if opts.is_empty() {
            String::new()
        } else {
            format!(" {}", opts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DefaultValue, ForeignKeyDesign};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tabula_core::ForeignKeyAction;

    fn create_sql(design: &TableDesign, dialect: DatabaseDialect) -> String {
        let plan = DdlGenerator::generate_create_table(design, dialect).unwrap();
        plan.statements()[0].sql.clone()
    }

    fn identity_column() -> ColumnDesign {
        ColumnDesign::named("c1", "id")
            .data_type("INT")
            .primary_key()
            .auto_increment()
    }

    #[test]
    fn test_generate_mysql_table() {
        let design = TableDesign::new("users")
            .with_column(identity_column())
            .with_column(
                ColumnDesign::new("email")
                    .data_type("VARCHAR")
                    .with_length("255")
                    .not_null()
                    .default(DefaultValue::string(""))
                    .comment("Login's email"),
            )
            .with_index(IndexDesign::new("uq_email").column("email").unique())
            .with_options(TableOptions::mysql());

        let expected = indoc! {"
            CREATE TABLE `users` (
              `id` INT PRIMARY KEY NOT NULL AUTO_INCREMENT,
              `email` VARCHAR(255) NOT NULL DEFAULT '' COMMENT 'Login''s email',
              UNIQUE INDEX `uq_email` (`email`)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci;"};

        assert_eq!(create_sql(&design, DatabaseDialect::Mysql), expected);
    }

    #[test]
    fn test_postgres_serial_substitution() {
        let design = TableDesign::new("users").with_column(identity_column());
        let sql = create_sql(&design, DatabaseDialect::Postgres);

        assert!(sql.contains("\"id\" SERIAL PRIMARY KEY NOT NULL"));
        assert!(!sql.contains("AUTO_INCREMENT"));
        assert!(!sql.contains("INT PRIMARY"));

        let big = TableDesign::new("events").with_column(
            ColumnDesign::named("c1", "id")
                .data_type("BIGINT")
                .primary_key()
                .auto_increment(),
        );
        assert!(create_sql(&big, DatabaseDialect::Postgres).contains("\"id\" BIGSERIAL"));
    }

    #[test]
    fn test_mysql_keeps_declared_type_with_auto_increment() {
        let design = TableDesign::new("users").with_column(identity_column());
        let sql = create_sql(&design, DatabaseDialect::Mysql);
        assert!(sql.contains("`id` INT PRIMARY KEY NOT NULL AUTO_INCREMENT"));
    }

    #[test]
    fn test_sqlite_auto_increment_is_unsupported() {
        let design = TableDesign::new("users").with_column(identity_column());
        let err = DdlGenerator::generate_create_table(&design, DatabaseDialect::Sqlite)
            .unwrap_err();
        assert!(matches!(err, DesignerError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_primary_key_forces_not_null() {
        let mut column = ColumnDesign::named("c1", "code").data_type("TEXT").primary_key();
        column.is_not_null = false;
        let design = TableDesign::new("codes").with_column(column);

        for dialect in [
            DatabaseDialect::Postgres,
            DatabaseDialect::Mysql,
            DatabaseDialect::Sqlite,
        ] {
            let sql = create_sql(&design, dialect);
            assert!(sql.contains("PRIMARY KEY NOT NULL"), "{dialect}: {sql}");
        }
    }

    #[test]
    fn test_single_statement_with_one_clause_per_column() {
        let design = TableDesign::new("t")
            .with_column(ColumnDesign::new("a"))
            .with_column(ColumnDesign::new("b").data_type("INT"))
            .with_column(ColumnDesign::new("c").data_type("TEXT"));

        for dialect in [
            DatabaseDialect::Postgres,
            DatabaseDialect::Mysql,
            DatabaseDialect::Sqlite,
        ] {
            let plan = DdlGenerator::generate_create_table(&design, dialect).unwrap();
            assert_eq!(plan.len(), 1);
            let sql = plan.preview();
            assert_eq!(sql.matches("CREATE TABLE").count(), 1);
            assert!(sql.ends_with(';'));
            let body = sql.lines().filter(|l| l.starts_with("  ")).count();
            assert_eq!(body, 3);
            assert_eq!(sql.matches(",\n").count(), 2);
        }
    }

    #[test]
    fn test_deleted_rows_are_excluded() {
        let mut design = TableDesign::new("t")
            .with_column(ColumnDesign::named("c1", "keep").data_type("INT"))
            .with_column(ColumnDesign::named("c2", "gone").data_type("INT"));
        design.delete_column(&"c2".into()).unwrap();

        let sql = create_sql(&design, DatabaseDialect::Postgres);
        assert!(sql.contains("\"keep\""));
        assert!(!sql.contains("\"gone\""));
    }

    #[test]
    fn test_postgres_indexes() {
        let design = TableDesign::new("users")
            .with_column(ColumnDesign::new("email").data_type("TEXT"))
            .with_column(ColumnDesign::new("name").data_type("TEXT"))
            .with_index(IndexDesign::new("uq_email").column("email").unique())
            .with_index(IndexDesign::new("idx_name").column("name"));

        let plan = DdlGenerator::generate_create_table(&design, DatabaseDialect::Postgres).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.statements()[0]
            .sql
            .contains("CONSTRAINT \"uq_email\" UNIQUE (\"email\")"));
        assert_eq!(
            plan.statements()[1].sql,
            "CREATE INDEX \"idx_name\" ON \"users\" (\"name\");"
        );
    }

    #[test]
    fn test_sqlite_indexes_are_standalone() {
        let design = TableDesign::new("users")
            .with_column(ColumnDesign::new("email").data_type("TEXT"))
            .with_index(IndexDesign::new("uq_email").column("email").unique());

        let plan = DdlGenerator::generate_create_table(&design, DatabaseDialect::Sqlite).unwrap();
        assert_eq!(
            plan.statements()[1].sql,
            "CREATE UNIQUE INDEX \"uq_email\" ON \"users\" (\"email\");"
        );
        assert!(!plan.statements()[0].sql.contains("UNIQUE"));
    }

    #[test]
    fn test_index_follow_ups_per_dialect() {
        let design = TableDesign::new("users")
            .with_column(ColumnDesign::new("email").data_type("TEXT"))
            .with_column(ColumnDesign::new("name").data_type("TEXT"))
            .with_index(IndexDesign::new("uq_email").column("email").unique())
            .with_index(IndexDesign::new("idx_name").column("name"));

        let count = |dialect: DatabaseDialect| {
            let plan = DdlGenerator::generate_create_table(&design, dialect).unwrap();
            assert!(plan.statements()[0].sql.starts_with("CREATE TABLE"));
            plan.len()
        };
        assert_eq!(count(DatabaseDialect::Mysql), 1);
        assert_eq!(count(DatabaseDialect::Postgres), 2);
        assert_eq!(count(DatabaseDialect::Sqlite), 3);
    }

    #[test]
    fn test_fulltext_only_on_mysql() {
        let design = TableDesign::new("posts")
            .with_column(ColumnDesign::new("body").data_type("TEXT"))
            .with_index(IndexDesign::new("ft_body").column("body").fulltext());

        assert!(create_sql(&design, DatabaseDialect::Mysql)
            .contains("FULLTEXT INDEX `ft_body` (`body`)"));
        let err = DdlGenerator::generate_create_table(&design, DatabaseDialect::Postgres)
            .unwrap_err();
        assert!(matches!(err, DesignerError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_foreign_key_clause() {
        let design = TableDesign::new("orders")
            .with_column(ColumnDesign::new("user_id").data_type("INT"))
            .with_foreign_key(
                ForeignKeyDesign::new()
                    .named("fk_orders_user")
                    .column("user_id")
                    .references("users", "id")
                    .on_delete(ForeignKeyAction::Cascade),
            );

        let sql = create_sql(&design, DatabaseDialect::Sqlite);
        assert!(sql.contains(
            "CONSTRAINT \"fk_orders_user\" FOREIGN KEY (\"user_id\") REFERENCES \"users\"(\"id\") ON DELETE CASCADE ON UPDATE NO ACTION"
        ));
    }

    #[test]
    fn test_composite_primary_key() {
        let design = TableDesign::new("memberships")
            .with_column(ColumnDesign::new("user_id").data_type("INT").primary_key())
            .with_column(ColumnDesign::new("group_id").data_type("INT").primary_key());

        let sql = create_sql(&design, DatabaseDialect::Postgres);
        assert!(sql.contains("PRIMARY KEY (\"user_id\", \"group_id\")"));
        assert!(!sql.contains("INT PRIMARY KEY"));
        assert!(sql.contains("\"user_id\" INT NOT NULL"));
    }

    #[test]
    fn test_mysql_table_options_and_comment() {
        let design = TableDesign::new("logs")
            .with_column(ColumnDesign::new("line").data_type("TEXT"))
            .with_options(TableOptions {
                auto_increment_start: Some(100),
                ..TableOptions::mysql()
            })
            .with_comment("app's log");

        let sql = create_sql(&design, DatabaseDialect::Mysql);
        assert!(sql.ends_with(
            ") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci AUTO_INCREMENT=100 COMMENT='app''s log';"
        ));

        // Options are ignored outside the MySQL-like dialect
        let sql = create_sql(&design, DatabaseDialect::Postgres);
        assert!(sql.ends_with("\n);"));
    }

    #[test]
    fn test_invalid_definition_is_rejected_before_synthesis() {
        let empty_name = TableDesign::new("").with_column(ColumnDesign::new("a"));
        let err =
            DdlGenerator::generate_create_table(&empty_name, DatabaseDialect::Mysql).unwrap_err();
        assert!(matches!(err, DesignerError::InvalidDefinition(_)));

        let no_columns = TableDesign::new("t");
        let err =
            DdlGenerator::generate_create_table(&no_columns, DatabaseDialect::Mysql).unwrap_err();
        assert!(matches!(err, DesignerError::InvalidDefinition(_)));
    }

    #[test]
    fn test_default_kinds_are_rendered_safely() {
        let design = TableDesign::new("t")
            .with_column(
                ColumnDesign::new("note")
                    .data_type("TEXT")
                    .default(DefaultValue::string("x'); DROP TABLE t; --")),
            )
            .with_column(
                ColumnDesign::new("created_at")
                    .data_type("TIMESTAMP")
                    .default(DefaultValue::expression("CURRENT_TIMESTAMP")),
            );

        let sql = create_sql(&design, DatabaseDialect::Sqlite);
        assert!(sql.contains("DEFAULT 'x''); DROP TABLE t; --'"));
        assert!(sql.contains("DEFAULT CURRENT_TIMESTAMP"));
    }
}
