//! ALTER TABLE generation
//!
//! Compares an original snapshot with an edited one and emits the ordered
//! statements that migrate one into the other. Rows are matched by id, never by
//! name, and the row `status` is not consulted: callers pass the live projection
//! of the working copy.

use crate::error::{DesignerError, DesignerResult};
use crate::models::{
    ColumnDesign, ColumnId, DatabaseDialect, ForeignKeyDesign, ForeignKeyId, IndexDesign,
    IndexId, TableDesign,
};

use super::ddl_generator::DdlGenerator;
use super::ddl_plan::DdlPlan;
use super::dialect_rules::{AutoIncrementRule, DialectRules, ModifyGranularity};

/// A row type that can be matched across two snapshots
pub trait DiffEntry {
    type Id: PartialEq;

    fn entry_id(&self) -> &Self::Id;

    /// Structural equality of everything that ends up in DDL
    fn matches_definition(&self, other: &Self) -> bool;
}

impl DiffEntry for ColumnDesign {
    type Id = ColumnId;

    fn entry_id(&self) -> &ColumnId {
        &self.id
    }

    fn matches_definition(&self, other: &Self) -> bool {
        self.same_definition(other)
    }
}

impl DiffEntry for IndexDesign {
    type Id = IndexId;

    fn entry_id(&self) -> &IndexId {
        &self.id
    }

    fn matches_definition(&self, other: &Self) -> bool {
        self.same_definition(other)
    }
}

impl DiffEntry for ForeignKeyDesign {
    type Id = ForeignKeyId;

    fn entry_id(&self) -> &ForeignKeyId {
        &self.id
    }

    fn matches_definition(&self, other: &Self) -> bool {
        self.same_definition(other)
    }
}

/// Rows classified by comparing two snapshots
#[derive(Debug)]
pub struct EntryChanges<'a, T> {
    /// In the original only, in original order
    pub removed: Vec<&'a T>,
    /// In the working copy only, in working order
    pub added: Vec<&'a T>,
    /// `(original, working)` pairs whose definitions differ, in working order
    pub changed: Vec<(&'a T, &'a T)>,
}

impl<T> EntryChanges<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

/// Classify rows of two collections by id
pub fn diff_entries<'a, T: DiffEntry>(original: &'a [T], working: &'a [T]) -> EntryChanges<'a, T> {
    let removed = original
        .iter()
        .filter(|o| !working.iter().any(|w| w.entry_id() == o.entry_id()))
        .collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    for entry in working {
        match original.iter().find(|o| o.entry_id() == entry.entry_id()) {
            None => added.push(entry),
            Some(old) if !old.matches_definition(entry) => changed.push((old, entry)),
            Some(_) => {}
        }
    }

    EntryChanges {
        removed,
        added,
        changed,
    }
}

/// Classify the columns of two snapshots
pub fn diff_columns<'a>(
    original: &'a [ColumnDesign],
    working: &'a [ColumnDesign],
) -> EntryChanges<'a, ColumnDesign> {
    diff_entries(original, working)
}

/// `(original name, working name)` of every renamed column
fn column_renames<'a>(columns: &EntryChanges<'a, ColumnDesign>) -> Vec<(&'a str, &'a str)> {
    columns
        .changed
        .iter()
        .filter(|(old, new)| old.name != new.name)
        .map(|(old, new)| (old.name.as_str(), new.name.as_str()))
        .collect()
}

fn renamed(column: &str, renames: &[(&str, &str)]) -> String {
    renames
        .iter()
        .find(|(old, _)| old.eq_ignore_ascii_case(column))
        .map_or_else(|| column.to_string(), |(_, new)| new.to_string())
}

/// Stateless generator of ALTER TABLE plans
pub struct AlterDiffer;

impl AlterDiffer {
    /// Generate the statements that transform `original` into `working`
    ///
    /// Order: foreign key drops, index drops, column drops, column adds, column
    /// modifications (renames first), index creates, foreign key adds. An
    /// unchanged pair of snapshots yields an empty plan.
    pub fn generate_alter_table(
        original: &TableDesign,
        working: &TableDesign,
        dialect: DatabaseDialect,
    ) -> DesignerResult<DdlPlan> {
        let errors = working.validate();
        if !errors.is_empty() {
            return Err(DesignerError::InvalidDefinition(errors));
        }

        let rules = dialect.rules();
        let table = rules.qualified_table(original.schema.as_deref(), &original.table_name);

        let columns = diff_columns(&original.columns, &working.columns);

        // Renamed columns carry their index and foreign key references along, so
        // the original entries are compared under the new names.
        let renames = column_renames(&columns);
        let original_indexes: Vec<IndexDesign> = original
            .indexes
            .iter()
            .map(|index| IndexDesign {
                columns: index.columns.iter().map(|c| renamed(c, &renames)).collect(),
                ..index.clone()
            })
            .collect();
        let original_foreign_keys: Vec<ForeignKeyDesign> = original
            .foreign_keys
            .iter()
            .map(|fk| ForeignKeyDesign {
                source_column: renamed(&fk.source_column, &renames),
                ..fk.clone()
            })
            .collect();

        let indexes = diff_entries(&original_indexes, &working.indexes);
        let foreign_keys = diff_entries(&original_foreign_keys, &working.foreign_keys);

        let mut plan = DdlPlan::new();

        // --- Dropped foreign keys ---
        let fk_drops = foreign_keys
            .removed
            .iter()
            .copied()
            .chain(foreign_keys.changed.iter().map(|(old, _)| *old));
        for fk in fk_drops {
            Self::drop_foreign_key(&mut plan, &table, fk, rules);
        }

        // --- Dropped indexes ---
        let index_drops = indexes
            .removed
            .iter()
            .copied()
            .chain(indexes.changed.iter().map(|(old, _)| *old));
        for index in index_drops {
            if index.name.starts_with("sqlite_autoindex_") {
                plan.push_advisory(format!(
                    "Index {} backs a table constraint and cannot be dropped; recreate the table to remove it.",
                    rules.quote_ident(&index.name)
                ));
            } else {
                plan.push_executable(DdlGenerator::drop_index_statement(
                    &table,
                    original.schema.as_deref(),
                    index,
                    rules,
                ));
            }
        }

        // --- Dropped columns ---
        for column in &columns.removed {
            plan.push_executable(format!(
                "ALTER TABLE {} DROP COLUMN {};",
                table,
                rules.quote_ident(&column.name)
            ));
        }

        // --- Added columns ---
        for column in &columns.added {
            if column.is_primary_key {
                tracing::warn!(
                    column = %column.name,
                    "primary key membership of an added column is not applied by ALTER"
                );
            }
            if column.is_auto_increment && rules.auto_increment == AutoIncrementRule::Unsupported {
                plan.push_advisory(format!(
                    "{} cannot add auto-increment column {} to an existing table; recreate the table to add it.",
                    rules.dialect.name(),
                    rules.quote_ident(&column.name)
                ));
                continue;
            }
            plan.push_executable(format!(
                "ALTER TABLE {} ADD COLUMN {};",
                table,
                DdlGenerator::column_definition(column, rules, false)?
            ));
        }

        // --- Modified columns ---
        let mut unsupported = Vec::new();
        for (old, new) in &columns.changed {
            if old.name != new.name {
                plan.push_executable(format!(
                    "ALTER TABLE {} {};",
                    table,
                    rules.rename(&old.name, &new.name)
                ));
            }

            if old.is_primary_key != new.is_primary_key {
                tracing::warn!(
                    column = %new.name,
                    "primary key membership change is not applied by ALTER"
                );
            }

            match rules.modify {
                ModifyGranularity::PerProperty => {
                    Self::alter_column_properties(&mut plan, &table, old, new, rules)
                }
                ModifyGranularity::WholeDefinition => {
                    if Self::restated_properties_changed(old, new) {
                        plan.push_executable(format!(
                            "ALTER TABLE {} MODIFY COLUMN {};",
                            table,
                            DdlGenerator::column_definition(new, rules, false)?
                        ));
                    }
                }
                ModifyGranularity::Unsupported => {
                    if Self::properties_changed(old, new) {
                        unsupported.push(rules.quote_ident(&new.name));
                    }
                }
            }
        }

        if !unsupported.is_empty() {
            plan.push_advisory(format!(
                "{} does not support altering columns in place: {}.\nA manual migration is required: recreate the table with the new definition and copy the data.",
                rules.dialect.name(),
                unsupported.join(", ")
            ));
        }

        // --- Added indexes ---
        let index_creates = indexes
            .added
            .iter()
            .copied()
            .chain(indexes.changed.iter().map(|(_, new)| *new));
        for index in index_creates {
            plan.push_executable(DdlGenerator::add_index_statement(&table, index, rules)?);
        }

        // --- Added foreign keys ---
        let fk_adds = foreign_keys
            .added
            .iter()
            .copied()
            .chain(foreign_keys.changed.iter().map(|(_, new)| *new));
        for fk in fk_adds {
            if rules.foreign_key_drop.is_some() {
                plan.push_executable(format!(
                    "ALTER TABLE {} ADD {};",
                    table,
                    DdlGenerator::foreign_key_clause(fk, rules)
                ));
            } else {
                plan.push_advisory(format!(
                    "{} cannot add a foreign key to an existing table: {}.\nRecreate the table to add it.",
                    rules.dialect.name(),
                    DdlGenerator::foreign_key_clause(fk, rules)
                ));
            }
        }

        tracing::debug!(
            table = %original.table_name,
            dialect = %dialect,
            dropped = columns.removed.len(),
            added = columns.added.len(),
            modified = columns.changed.len(),
            statements = plan.len(),
            "generated ALTER TABLE plan"
        );

        Ok(plan)
    }

    fn drop_foreign_key(
        plan: &mut DdlPlan,
        table: &str,
        fk: &ForeignKeyDesign,
        rules: &DialectRules,
    ) {
        match rules.foreign_key_drop {
            Some(_) if fk.name.is_empty() => plan.push_advisory(format!(
                "The foreign key on column {} has no name and cannot be dropped by name.",
                rules.quote_ident(&fk.source_column)
            )),
            Some(clause) => plan.push_executable(format!(
                "ALTER TABLE {} {} {};",
                table,
                clause,
                rules.quote_ident(&fk.name)
            )),
            None => plan.push_advisory(format!(
                "{} cannot drop a foreign key from an existing table (column {}).\nRecreate the table to remove it.",
                rules.dialect.name(),
                rules.quote_ident(&fk.source_column)
            )),
        }
    }

    /// One statement per changed property (PostgreSQL-like)
    fn alter_column_properties(
        plan: &mut DdlPlan,
        table: &str,
        old: &ColumnDesign,
        new: &ColumnDesign,
        rules: &DialectRules,
    ) {
        let col = rules.quote_ident(&new.name);

        if old.data_type != new.data_type || old.length != new.length {
            plan.push_executable(format!(
                "ALTER TABLE {} ALTER COLUMN {} TYPE {};",
                table,
                col,
                DdlGenerator::column_type_spec(new)
            ));
        }

        if old.is_auto_increment != new.is_auto_increment {
            plan.push_advisory(format!(
                "{} cannot switch column {} to or from a serial type in place; manage its sequence manually.",
                rules.dialect.name(),
                col
            ));
        }

        if old.effective_not_null() != new.effective_not_null() {
            let action = if new.effective_not_null() {
                "SET NOT NULL"
            } else {
                "DROP NOT NULL"
            };
            plan.push_executable(format!(
                "ALTER TABLE {} ALTER COLUMN {} {};",
                table, col, action
            ));
        }

        if old.default_value != new.default_value {
            match &new.default_value {
                Some(default) => plan.push_executable(format!(
                    "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {};",
                    table,
                    col,
                    default.to_sql()
                )),
                None => plan.push_executable(format!(
                    "ALTER TABLE {} ALTER COLUMN {} DROP DEFAULT;",
                    table, col
                )),
            }
        }
    }

    /// Properties a MySQL-like `MODIFY COLUMN` restates
    fn restated_properties_changed(old: &ColumnDesign, new: &ColumnDesign) -> bool {
        old.data_type != new.data_type
            || old.length != new.length
            || old.effective_not_null() != new.effective_not_null()
            || old.default_value != new.default_value
            || old.comment != new.comment
            || old.is_auto_increment != new.is_auto_increment
    }

    /// Any change other than the name
    fn properties_changed(old: &ColumnDesign, new: &ColumnDesign) -> bool {
        let renamed = ColumnDesign {
            name: old.name.clone(),
            ..new.clone()
        };
        !old.same_definition(&renamed)
    }
}
