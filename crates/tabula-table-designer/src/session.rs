//! Designer session
//!
//! Owns the original and working snapshots of one table and drives the
//! preview-then-execute workflow. A session without an original is creating a
//! new table; a session opened from a connection is editing an existing one.

use tabula_core::Connection;

use crate::error::{DesignerError, DesignerResult};
use crate::models::{
    ColumnDesign, ColumnEdit, ColumnId, DatabaseDialect, ForeignKeyDesign, ForeignKeyEdit,
    ForeignKeyId, IndexDesign, IndexEdit, IndexId, RowStatus, TableDesign, TableOptions,
    ValidationError,
};
use crate::service::{AlterDiffer, AutoIncrementRule, DdlGenerator, DdlPlan, TableLoader};
use crate::settings::DesignerSettings;

/// Which synthesizer a session drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignerMode {
    /// No original: preview and save produce a CREATE TABLE
    New,
    /// Original loaded from the database: preview and save produce ALTER statements
    Editing,
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created {
        statements: Vec<String>,
    },
    Altered {
        executed: Vec<String>,
        /// Advisory statements shown in the preview but not sent to the database
        skipped: Vec<String>,
    },
    NothingToSave,
}

#[derive(Debug, Clone)]
pub struct DesignerSession {
    dialect: DatabaseDialect,
    original: Option<TableDesign>,
    working: TableDesign,
    available_tables: Vec<String>,
}

impl DesignerSession {
    /// Start designing a new table
    ///
    /// The working copy starts with one identity column. Dialects without an
    /// auto-increment lowering get a plain primary key.
    pub fn new_table(dialect: DatabaseDialect, settings: &DesignerSettings) -> Self {
        let rules = dialect.rules();
        let defaults = &settings.new_table;

        let mut id = ColumnDesign::new(defaults.id_column.clone())
            .data_type(defaults.id_type.clone())
            .primary_key();
        if rules.auto_increment != AutoIncrementRule::Unsupported {
            id = id.auto_increment();
        }

        let mut working = TableDesign::new(defaults.table_name.clone()).with_column(id);
        if rules.table_options {
            working.options = settings.mysql.table_options();
        }

        Self {
            dialect,
            original: None,
            working,
            available_tables: Vec::new(),
        }
    }

    /// Open an existing table for editing
    #[tracing::instrument(skip(connection), fields(driver = connection.driver_name()))]
    pub async fn open(
        connection: &dyn Connection,
        dialect: DatabaseDialect,
        schema: Option<&str>,
        table: &str,
    ) -> DesignerResult<Self> {
        let original = TableLoader::load_table(connection, schema, table).await?;
        tracing::info!(
            table = %original.table_name,
            columns = original.columns.len(),
            "opened table for editing"
        );

        Ok(Self {
            dialect,
            working: original.clone(),
            original: Some(original),
            available_tables: Vec::new(),
        })
    }

    /// Builder: set the tables foreign keys may reference
    pub fn with_available_tables(mut self, tables: Vec<String>) -> Self {
        self.available_tables = tables;
        self
    }

    pub fn mode(&self) -> DesignerMode {
        if self.original.is_some() {
            DesignerMode::Editing
        } else {
            DesignerMode::New
        }
    }

    pub fn dialect(&self) -> DatabaseDialect {
        self.dialect
    }

    pub fn original(&self) -> Option<&TableDesign> {
        self.original.as_ref()
    }

    pub fn working(&self) -> &TableDesign {
        &self.working
    }

    /// Tables a foreign key of this table may reference, excluding the table itself
    pub fn foreign_key_targets(&self) -> Vec<&str> {
        self.available_tables
            .iter()
            .map(String::as_str)
            .filter(|t| *t != self.working.table_name)
            .collect()
    }

    /// Rename the table being created
    pub fn set_table_name(&mut self, name: impl Into<String>) -> DesignerResult<()> {
        if self.mode() == DesignerMode::Editing {
            return Err(DesignerError::TableRenameNotSupported);
        }
        self.working.table_name = name.into();
        Ok(())
    }

    pub fn set_table_comment(&mut self, comment: Option<String>) {
        self.working.comment = comment.filter(|c| !c.is_empty());
    }

    pub fn options_mut(&mut self) -> &mut TableOptions {
        &mut self.working.options
    }

    /// Swap in an externally edited working copy, keeping the original
    pub fn replace_working(&mut self, working: TableDesign) -> DesignerResult<()> {
        if let Some(original) = &self.original
            && original.table_name != working.table_name
        {
            return Err(DesignerError::TableRenameNotSupported);
        }
        self.working = working;
        Ok(())
    }

    /// Add a user-created column; it is marked added whatever status it carries
    pub fn add_column(&mut self, mut column: ColumnDesign) -> ColumnId {
        column.status = RowStatus::Added;
        column.original_name = None;
        self.working.add_column(column)
    }

    pub fn update_column(&mut self, id: &ColumnId, edit: ColumnEdit) -> DesignerResult<()> {
        self.working.update_column(id, edit)
    }

    pub fn delete_column(&mut self, id: &ColumnId) -> DesignerResult<()> {
        self.working.delete_column(id)
    }

    /// Undo a delete, discarding any edit made before it
    pub fn undo_delete_column(&mut self, id: &ColumnId) -> DesignerResult<()> {
        let current = self
            .working
            .column(id)
            .ok_or_else(|| DesignerError::ColumnNotFound(id.clone()))?;
        if !current.is_deleted() {
            return Ok(());
        }

        let restored = match self.original.as_ref().and_then(|o| o.column(id)) {
            Some(original) => ColumnDesign {
                status: RowStatus::Clean,
                ..original.clone()
            },
            None => ColumnDesign {
                status: RowStatus::Clean,
                ..current.clone()
            },
        };
        self.working.restore_column(restored)
    }

    pub fn move_column_up(&mut self, id: &ColumnId) -> DesignerResult<()> {
        self.working.move_column_up(id)
    }

    pub fn move_column_down(&mut self, id: &ColumnId) -> DesignerResult<()> {
        self.working.move_column_down(id)
    }

    pub fn add_index(&mut self, index: IndexDesign) -> IndexId {
        self.working.add_index(index)
    }

    pub fn update_index(&mut self, id: &IndexId, edit: IndexEdit) -> DesignerResult<()> {
        self.working.update_index(id, edit)
    }

    pub fn delete_index(&mut self, id: &IndexId) -> DesignerResult<()> {
        self.working.delete_index(id)
    }

    pub fn add_foreign_key(&mut self, fk: ForeignKeyDesign) -> ForeignKeyId {
        self.working.add_foreign_key(fk)
    }

    pub fn update_foreign_key(
        &mut self,
        id: &ForeignKeyId,
        edit: ForeignKeyEdit,
    ) -> DesignerResult<()> {
        self.working.update_foreign_key(id, edit)
    }

    pub fn delete_foreign_key(&mut self, id: &ForeignKeyId) -> DesignerResult<()> {
        self.working.delete_foreign_key(id)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        self.working.validate()
    }

    /// Synthesize the statements a save would run
    pub fn preview(&self) -> DesignerResult<DdlPlan> {
        match &self.original {
            None => DdlGenerator::generate_create_table(&self.working, self.dialect),
            Some(original) => {
                AlterDiffer::generate_alter_table(original, &self.working.live(), self.dialect)
            }
        }
    }

    /// Execute the previewed statements one at a time
    ///
    /// The first failure aborts the sequence; statements already executed are
    /// not rolled back.
    #[tracing::instrument(
        skip(self, connection),
        fields(table = %self.working.table_name, dialect = %self.dialect)
    )]
    pub async fn save(&self, connection: &dyn Connection) -> DesignerResult<SaveOutcome> {
        let plan = self.preview()?;
        if plan.is_empty() {
            tracing::info!("nothing to save");
            return Ok(SaveOutcome::NothingToSave);
        }

        let skipped: Vec<String> = plan.advisories().map(|s| s.sql.clone()).collect();
        for advisory in &skipped {
            tracing::warn!(statement = %advisory, "advisory statement not executed");
        }

        let statements: Vec<&str> = plan.executable().map(|s| s.sql.as_str()).collect();
        let total = statements.len();
        let mut executed = Vec::with_capacity(total);

        for (position, statement) in statements.iter().enumerate() {
            tracing::debug!(index = position + 1, total, "executing: {}", statement);
            if let Err(source) = connection.execute(statement).await {
                tracing::error!(
                    index = position + 1,
                    total,
                    error = %source,
                    "statement failed, remaining statements not attempted"
                );
                return Err(DesignerError::ExecutionFailure {
                    index: position + 1,
                    total,
                    remaining: total - position - 1,
                    statement: statement.to_string(),
                    source,
                });
            }
            executed.push(statement.to_string());
        }

        tracing::info!(statement_count = executed.len(), "table saved");

        Ok(match self.mode() {
            DesignerMode::New => SaveOutcome::Created {
                statements: executed,
            },
            DesignerMode::Editing => SaveOutcome::Altered { executed, skipped },
        })
    }
}
