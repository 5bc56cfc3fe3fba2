//! tabula - preview and apply table designs from the command line
//!
//! Commands:
//!   create   Print the CREATE TABLE plan for a design file
//!   diff     Print the ALTER TABLE plan between two design files
//!   export   Print a SQLite table's structure as a design file
//!   apply    Create or alter a SQLite table from a design file

mod design_file;
mod logging;
mod sqlite;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabula_table_designer::{
    AlterDiffer, DatabaseDialect, DdlGenerator, DdlPlan, DesignerSession, DesignerSettings,
    SaveOutcome, TableLoader,
};

use crate::sqlite::SqliteConnection;

#[derive(Parser)]
#[command(name = "tabula", version, about = "Table designer DDL previews and migrations")]
struct Cli {
    /// Designer settings file (defaults to <config dir>/tabula/designer.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Target dialect: sqlite, postgres or mysql
    #[arg(long, global = true, env = "TABULA_DIALECT")]
    dialect: Option<DatabaseDialect>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the CREATE TABLE plan for a design
    Create {
        #[arg(long)]
        design: PathBuf,
    },
    /// Print the ALTER TABLE plan that turns one design into another
    Diff {
        #[arg(long)]
        original: PathBuf,
        #[arg(long)]
        working: PathBuf,
    },
    /// Print a SQLite table's structure as a design file
    Export {
        #[arg(long)]
        sqlite: PathBuf,
        #[arg(long)]
        table: String,
    },
    /// Create (no --table) or alter (--table) a SQLite table from a design
    Apply {
        #[arg(long)]
        sqlite: PathBuf,
        #[arg(long)]
        design: PathBuf,
        /// Existing table to alter
        #[arg(long)]
        table: Option<String>,
        /// Execute the plan instead of only printing it
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = logging::LoggingConfig::with_verbosity(cli.verbose);
    log_config.json = cli.log_json;
    logging::init(log_config)?;

    let settings = load_settings(cli.config.as_deref())?;
    let dialect = cli.dialect.unwrap_or(settings.default_dialect);

    match cli.command {
        Command::Create { design } => {
            let design = design_file::read_design(&design)?;
            let plan = DdlGenerator::generate_create_table(&design, dialect)?;
            print_plan(&plan);
        }
        Command::Diff { original, working } => {
            let original = design_file::read_design(&original)?;
            let working = design_file::read_design(&working)?;
            let plan = AlterDiffer::generate_alter_table(&original, &working.live(), dialect)?;
            print_plan(&plan);
        }
        Command::Export { sqlite, table } => {
            let conn = SqliteConnection::open(&sqlite)?;
            let design = TableLoader::load_table(&conn, None, &table).await?;
            println!("{}", design_file::to_json(&design)?);
        }
        Command::Apply {
            sqlite,
            design,
            table,
            yes,
        } => {
            if dialect != DatabaseDialect::Sqlite {
                tracing::warn!(%dialect, "apply always targets SQLite");
            }
            apply(&settings, &sqlite, &design, table.as_deref(), yes).await?;
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<DesignerSettings> {
    match path {
        Some(path) => DesignerSettings::load_from(path),
        None => DesignerSettings::load(),
    }
}

fn print_plan(plan: &DdlPlan) {
    if plan.is_empty() {
        println!("-- No changes detected");
    } else {
        println!("{}", plan.preview());
    }
}

async fn apply(
    settings: &DesignerSettings,
    database: &Path,
    design: &Path,
    table: Option<&str>,
    yes: bool,
) -> Result<()> {
    let conn = SqliteConnection::open(database)?;
    let tables = TableLoader::list_table_names(&conn, None).await?;
    let working = design_file::read_design(design)?;

    let mut session = match table {
        Some(table) => DesignerSession::open(&conn, DatabaseDialect::Sqlite, None, table).await?,
        None => DesignerSession::new_table(DatabaseDialect::Sqlite, settings),
    }
    .with_available_tables(tables);
    session.replace_working(working)?;

    let plan = session.preview()?;
    print_plan(&plan);

    if !yes {
        eprintln!("Dry run: pass --yes to execute these statements.");
        return Ok(());
    }

    let outcome = session
        .save(&conn)
        .await
        .with_context(|| format!("Failed to apply design to {:?}", database))?;

    match outcome {
        SaveOutcome::Created { statements } => {
            eprintln!("Created table ({} statement(s) executed).", statements.len());
        }
        SaveOutcome::Altered { executed, skipped } => {
            eprintln!(
                "Altered table: {} statement(s) executed, {} advisory statement(s) skipped.",
                executed.len(),
                skipped.len()
            );
        }
        SaveOutcome::NothingToSave => eprintln!("Nothing to save."),
    }

    Ok(())
}
