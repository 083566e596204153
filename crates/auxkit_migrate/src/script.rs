//! Migration file parsing.
//!
//! A migration file is SQL text where each statement ends with a `;` that is
//! the last non-blank character on its line. Spaces and tabs between the `;`
//! and the line break are ignored, so `;  \n` terminates a statement as well
//! as `;\n`. Carriage returns count as spaces, which makes `;\r\n` a
//! terminator too.
//!
//! ## Known limitation
//!
//! The splitter does not understand SQL. A line ending in `;` inside a string
//! literal or a procedure body ends the statement there.

use crate::error::{MigrationError, MigrationResult};
use crate::step::MigrationStep;
use std::fs;

/// Splits SQL text into trimmed statements.
///
/// The terminating `;` is dropped and blank statements are skipped. Text after
/// the last terminator becomes a final statement.
#[must_use]
pub fn split_statements(sql: &str) -> Vec<String> {
    let normalized = sql.replace('\r', " ");
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in normalized.split('\n') {
        let trimmed = line.trim_end();
        if let Some(body) = trimmed.strip_suffix(';') {
            current.push_str(body);
            push_statement(&mut statements, &current);
            current.clear();
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(statements: &mut Vec<String>, text: &str) {
    let statement = text.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
}

/// Reads a step's file and splits it into statements.
///
/// # Errors
///
/// Returns [`MigrationError::FileRead`] if the file is missing or unreadable.
pub fn load_statements(step: &MigrationStep) -> MigrationResult<Vec<String>> {
    let sql = fs::read_to_string(&step.file).map_err(|source| MigrationError::FileRead {
        version: step.version,
        path: step.file.clone(),
        source,
    })?;
    Ok(split_statements(&sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn splits_on_semicolon_newline() {
        let sql = "CREATE TABLE a (x INT);\nCREATE TABLE b (y INT);\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE a (x INT)", "CREATE TABLE b (y INT)"]
        );
    }

    #[test]
    fn multi_line_statement_stays_together() {
        let sql = "CREATE TABLE users (\n  id INT,\n  name TEXT\n);\nINSERT INTO users VALUES (1, 'a');";
        let statements = split_statements(sql);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], "CREATE TABLE users (\n  id INT,\n  name TEXT\n)");
        assert_eq!(statements[1], "INSERT INTO users VALUES (1, 'a')");
    }

    #[test]
    fn crlf_files_split_too() {
        let sql = "CREATE TABLE a (x INT);\r\nCREATE TABLE b (y INT);\r\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE a (x INT)", "CREATE TABLE b (y INT)"]
        );
    }

    #[test]
    fn blanks_after_terminator_are_ignored() {
        let sql = "CREATE TABLE a (x INT);  \nCREATE TABLE b (y INT);\t\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE a (x INT)", "CREATE TABLE b (y INT)"]
        );
    }

    #[test]
    fn inline_semicolon_does_not_split() {
        let sql = "INSERT INTO t VALUES ('a;b');\n";
        assert_eq!(split_statements(sql), vec!["INSERT INTO t VALUES ('a;b')"]);
    }

    #[test]
    fn trailing_text_without_terminator() {
        let sql = "SELECT 1;\nSELECT 2";
        assert_eq!(split_statements(sql), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn blank_statements_are_dropped() {
        assert!(split_statements("").is_empty());
        assert!(split_statements("\n\n  ;\n;\n").is_empty());
    }

    #[test]
    fn semicolon_newline_inside_literal_splits() {
        // Documented limitation.
        let sql = "INSERT INTO t VALUES ('line one;\nline two');\n";
        assert_eq!(split_statements(sql).len(), 2);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("001_init.sql");
        fs::write(&path, "CREATE TABLE a (x INT);\n").unwrap();

        let step = MigrationStep::new(1, "init", &path);
        assert_eq!(load_statements(&step).unwrap(), vec!["CREATE TABLE a (x INT)"]);
    }

    #[test]
    fn load_missing_file() {
        let step = MigrationStep::new(3, "gone", "/definitely/not/here/003_gone.sql");
        let err = load_statements(&step).unwrap_err();
        assert!(matches!(err, MigrationError::FileRead { version: 3, .. }));
    }
}
