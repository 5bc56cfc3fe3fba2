//! End-to-end tests for the `tabula` binary against temporary SQLite files

use indoc::indoc;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("designer.toml"), "default_dialect = \"sqlite\"\n").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tabula"))
            .arg("--config")
            .arg(self.path("designer.toml"))
            .args(args)
            .env_remove("TABULA_DIALECT")
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "tabula {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn sqlite(&self, sql: &str) -> PathBuf {
        let path = self.path("app.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(sql).unwrap();
        path
    }
}

fn column_names(db: &Path, table: &str) -> Vec<String> {
    let conn = rusqlite::Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare(&format!("SELECT name FROM pragma_table_info('{}')", table))
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<rusqlite::Result<Vec<String>>>()
        .unwrap()
}

const USERS_DESIGN: &str = indoc! {r#"
    {
      "table_name": "users",
      "columns": [
        {"id": "col_0", "name": "id", "data_type": "INTEGER", "is_primary_key": true},
        {"id": "col_1", "name": "email", "data_type": "VARCHAR", "length": "255", "is_not_null": true}
      ]
    }
"#};

#[test]
fn test_create_prints_dialect_specific_ddl() {
    let ws = Workspace::new();
    let design = ws.write("users.json", USERS_DESIGN);

    let stdout = ws.run_ok(&["create", "--design", design.to_str().unwrap(), "--dialect", "mysql"]);
    assert_eq!(
        stdout.trim_end(),
        indoc! {"
            CREATE TABLE `users` (
              `id` INTEGER PRIMARY KEY NOT NULL,
              `email` VARCHAR(255) NOT NULL
            );"}
    );
}

#[test]
fn test_dialect_from_environment() {
    let ws = Workspace::new();
    let design = ws.write("users.json", USERS_DESIGN);

    let output = Command::new(env!("CARGO_BIN_EXE_tabula"))
        .arg("--config")
        .arg(ws.path("designer.toml"))
        .args(["create", "--design", design.to_str().unwrap()])
        .env("TABULA_DIALECT", "postgres")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("CREATE TABLE \"users\""));
}

#[test]
fn test_diff_of_identical_designs() {
    let ws = Workspace::new();
    let design = ws.write("users.json", USERS_DESIGN);
    let path = design.to_str().unwrap();

    let stdout = ws.run_ok(&["diff", "--original", path, "--working", path]);
    assert_eq!(stdout.trim_end(), "-- No changes detected");
}

#[test]
fn test_export_edit_apply_round_trip() {
    let ws = Workspace::new();
    let db = ws.sqlite(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, email VARCHAR(255) NOT NULL, name TEXT);",
    );
    let db_path = db.to_str().unwrap();

    let exported = ws.run_ok(&["export", "--sqlite", db_path, "--table", "users"]);
    let mut design: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(design["columns"][1]["id"], "col_1");

    design["columns"][1]["name"] = "email_address".into();
    let edited = ws.write("edited.json", &design.to_string());
    let edited_path = edited.to_str().unwrap();

    // Without --yes the plan is only printed
    let stdout = ws.run_ok(&[
        "apply", "--sqlite", db_path, "--design", edited_path, "--table", "users",
    ]);
    assert_eq!(
        stdout.trim_end(),
        "ALTER TABLE \"users\" RENAME COLUMN \"email\" TO \"email_address\";"
    );
    assert_eq!(column_names(&db, "users"), vec!["id", "email", "name"]);

    ws.run_ok(&[
        "apply", "--sqlite", db_path, "--design", edited_path, "--table", "users", "--yes",
    ]);
    assert_eq!(column_names(&db, "users"), vec!["id", "email_address", "name"]);

    // Applying the same design again finds nothing to change
    let stdout = ws.run_ok(&[
        "apply", "--sqlite", db_path, "--design", edited_path, "--table", "users",
    ]);
    assert_eq!(stdout.trim_end(), "-- No changes detected");
}

#[test]
fn test_apply_creates_new_table() {
    let ws = Workspace::new();
    let db = ws.sqlite("CREATE TABLE orgs (id INTEGER PRIMARY KEY);");
    let design = ws.write("users.json", USERS_DESIGN);

    ws.run_ok(&[
        "apply",
        "--sqlite",
        db.to_str().unwrap(),
        "--design",
        design.to_str().unwrap(),
        "--yes",
    ]);
    assert_eq!(column_names(&db, "users"), vec!["id", "email"]);
}

#[test]
fn test_failed_statement_is_reported() {
    let ws = Workspace::new();
    let db = ws.sqlite("CREATE TABLE users (id INTEGER PRIMARY KEY);");
    let design = ws.write("users.json", USERS_DESIGN);

    // CREATE against an existing table fails inside SQLite
    let output = ws.run(&[
        "apply",
        "--sqlite",
        db.to_str().unwrap(),
        "--design",
        design.to_str().unwrap(),
        "--yes",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("statement 1 of 1 failed"), "{stderr}");
}
