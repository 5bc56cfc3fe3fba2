//! Synthesized statement plans
//!
//! A plan is what the preview shows and what a save executes. The executable
//! statements are carried verbatim so the preview never differs from what runs.

use serde::Serialize;

/// Whether a statement is sent to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Executable,
    /// A `-- ` comment explaining an operation the dialect cannot perform
    Advisory,
}

/// One statement of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DdlStatement {
    pub sql: String,
    pub kind: StatementKind,
}

impl DdlStatement {
    pub fn executable(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            kind: StatementKind::Executable,
        }
    }

    /// Build an advisory comment; each line of the message is commented out
    pub fn advisory(message: impl AsRef<str>) -> Self {
        let sql = message
            .as_ref()
            .lines()
            .map(|line| format!("-- {}", line))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            sql,
            kind: StatementKind::Advisory,
        }
    }

    pub fn is_executable(&self) -> bool {
        self.kind == StatementKind::Executable
    }
}

/// Ordered list of statements produced by a synthesizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DdlPlan {
    statements: Vec<DdlStatement>,
}

impl DdlPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: DdlStatement) {
        self.statements.push(statement);
    }

    pub fn push_executable(&mut self, sql: impl Into<String>) {
        self.push(DdlStatement::executable(sql));
    }

    pub fn push_advisory(&mut self, message: impl AsRef<str>) {
        self.push(DdlStatement::advisory(message));
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn statements(&self) -> &[DdlStatement] {
        &self.statements
    }

    /// Statements that will be sent to the database, in order
    pub fn executable(&self) -> impl Iterator<Item = &DdlStatement> {
        self.statements.iter().filter(|s| s.is_executable())
    }

    pub fn advisories(&self) -> impl Iterator<Item = &DdlStatement> {
        self.statements.iter().filter(|s| !s.is_executable())
    }

    /// The text shown to the user before execution
    pub fn preview(&self) -> String {
        self.statements
            .iter()
            .map(|s| s.sql.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for DdlPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.preview())
    }
}
