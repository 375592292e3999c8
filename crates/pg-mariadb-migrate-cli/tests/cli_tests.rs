//! CLI integration tests for pg-mariadb-migrate.
//!
//! These tests verify command-line argument parsing, help output, exit codes
//! for error conditions, and the database-free `convert` pipeline.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the pg-mariadb-migrate binary.
fn cmd() -> Command {
    Command::cargo_bin("pg-mariadb-migrate").unwrap()
}

/// Write SQL content to a temp file.
fn sql_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("health-check"));
}

#[test]
fn test_apply_subcommand_help() {
    cmd()
        .args(["apply", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--database"))
        .stdout(predicate::str::contains("--user"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--sql-file"))
        .stdout(predicate::str::contains("[default: 3306]"));
}

#[test]
fn test_health_check_command_exists() {
    cmd()
        .args(["health-check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test the target database connection"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pg-mariadb-migrate"));
}

// =============================================================================
// Global Flags Tests
// =============================================================================

#[test]
fn test_output_json_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-json"));
}

#[test]
fn test_log_format_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"));
}

#[test]
fn test_verbosity_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: info]"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_convert_missing_file_exits_with_code_7() {
    cmd()
        .args(["convert", "--sql-file", "nonexistent_schema_file.sql"])
        .assert()
        .code(7); // EXIT_IO_ERROR - file not found
}

#[test]
fn test_apply_missing_file_exits_with_code_7() {
    // The source file is opened before any connection is made, so this
    // fails fast with an IO error even though the host is unreachable.
    cmd()
        .args([
            "apply",
            "--host",
            "localhost",
            "--database",
            "db",
            "--user",
            "root",
            "--password",
            "pw",
            "--sql-file",
            "nonexistent_schema_file.sql",
        ])
        .assert()
        .code(7); // EXIT_IO_ERROR
}

#[test]
fn test_apply_requires_connection_flags() {
    let file = sql_file("SELECT 1;\n");
    cmd()
        .args(["apply", "--sql-file", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--host"));
}

// =============================================================================
// Convert Pipeline Tests (segmenter + rewriter, no database)
// =============================================================================

#[test]
fn test_convert_rewrites_sequence_to_placeholder_table() {
    let file = sql_file("CREATE SEQUENCE foo_seq;\n");
    cmd()
        .args(["convert", "--sql-file", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CREATE TABLE IF NOT EXISTS foo_seq (sequence_value bigint NOT NULL);",
        ));
}

#[test]
fn test_convert_drops_row_level_security() {
    let file = sql_file("ALTER TABLE t ENABLE ROW LEVEL SECURITY;\n");
    cmd()
        .args(["convert", "--sql-file", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_convert_drops_session_directives_keeps_rest() {
    let file = sql_file("SET search_path = public;\nSELECT 1;\n");
    cmd()
        .args(["convert", "--sql-file", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT 1;"))
        .stdout(predicate::str::contains("search_path").not());
}

#[test]
fn test_convert_strips_comments() {
    let file = sql_file("-- header\n/*\nblock comment;\n*/\nSELECT 1;\n");
    cmd()
        .args(["convert", "--sql-file", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT 1;"))
        .stdout(predicate::str::contains("header").not())
        .stdout(predicate::str::contains("block comment").not());
}

#[test]
fn test_convert_maps_types() {
    let file = sql_file(
        "CREATE TABLE public.events (\n\
         payload jsonb,\n\
         score double precision,\n\
         label character varying(64),\n\
         created_at timestamptz\n\
         );\n",
    );
    cmd()
        .args(["convert", "--sql-file", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("payload JSON"))
        .stdout(predicate::str::contains("score DOUBLE"))
        .stdout(predicate::str::contains("label VARCHAR(64)"))
        .stdout(predicate::str::contains("created_at TIMESTAMP"));
}

// =============================================================================
// No Subcommand Tests
// =============================================================================

#[test]
fn test_no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}
