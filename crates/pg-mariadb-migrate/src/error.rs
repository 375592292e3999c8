//! Error types for the schema import library.

use thiserror::Error;

/// Process exit code for configuration errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Process exit code for connection failures.
pub const EXIT_CONNECTION_ERROR: u8 = 2;
/// Process exit code for a rejected statement.
pub const EXIT_STATEMENT_ERROR: u8 = 3;
/// Process exit code for other target database errors.
pub const EXIT_TARGET_ERROR: u8 = 4;
/// Process exit code for I/O errors (source file missing, unreadable).
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for schema import operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cannot establish or use the target connection.
    #[error("Connection error: {message}\n  Context: {context}")]
    Connection { message: String, context: String },

    /// Target rejected a rewritten statement. Carries the full statement
    /// text so the operator can see exactly what was sent.
    #[error("Statement execution failed: {message}\nStatement:\n{sql}")]
    Statement { sql: String, message: String },

    /// Target database error outside statement execution.
    #[error("Target database error: {0}")]
    Target(#[from] mysql_async::Error),

    /// IO error (source file missing or unreadable)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    /// Create a Connection error with context about where it occurred.
    pub fn connection(message: impl ToString, context: impl Into<String>) -> Self {
        MigrateError::Connection {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create a Statement error from the failing SQL and the driver error.
    pub fn statement(sql: impl Into<String>, message: impl ToString) -> Self {
        MigrateError::Statement {
            sql: sql.into(),
            message: message.to_string(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MigrateError::Config(_) | MigrateError::Yaml(_) | MigrateError::Json(_) => {
                EXIT_CONFIG_ERROR
            }
            MigrateError::Connection { .. } => EXIT_CONNECTION_ERROR,
            MigrateError::Statement { .. } => EXIT_STATEMENT_ERROR,
            MigrateError::Target(_) => EXIT_TARGET_ERROR,
            MigrateError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for schema import operations.
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(MigrateError::Config("bad".into()).exit_code(), 1);
        assert_eq!(MigrateError::connection("refused", "connecting").exit_code(), 2);
        assert_eq!(MigrateError::statement("SELECT 1;", "syntax").exit_code(), 3);
        assert_eq!(
            MigrateError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
                .exit_code(),
            7
        );
    }

    #[test]
    fn test_statement_error_carries_sql_text() {
        let err = MigrateError::statement("CREATE TABLE t (id int);", "table exists");
        let rendered = err.to_string();
        assert!(rendered.contains("CREATE TABLE t (id int);"));
        assert!(rendered.contains("table exists"));
    }
}
