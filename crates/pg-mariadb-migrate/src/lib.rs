//! # pg-mariadb-migrate
//!
//! PostgreSQL schema dump to MariaDB/MySQL import library.
//!
//! This library converts a schema definition written in PostgreSQL-flavored
//! SQL into a form executable against MariaDB/MySQL and applies it
//! transactionally:
//!
//! - **Segmenter**: line-oriented statement splitting with comment stripping
//! - **Dialect rewriter**: an ordered table of textual rules mapping
//!   PostgreSQL constructs to MariaDB equivalents (or dropping them)
//! - **Transactional applier**: all-or-nothing execution — the first
//!   rejected statement rolls back everything applied so far
//!
//! ## Example
//!
//! ```rust,no_run
//! use pg_mariadb_migrate::{Config, MariadbPool, SchemaApplier, Segmenter};
//!
//! #[tokio::main]
//! async fn main() -> pg_mariadb_migrate::Result<()> {
//!     let config = Config::load("target.yaml")?;
//!     let statements = Segmenter::from_path("schema.sql")?;
//!     let pool = MariadbPool::new(&config.target).await?;
//!     let report = SchemaApplier::new(pool).apply(statements).await?;
//!     println!("Executed {} statements", report.statements_executed);
//!     Ok(())
//! }
//! ```

pub mod apply;
pub mod config;
pub mod error;
pub mod rewrite;
pub mod segment;
pub mod target;

// Re-exports for convenient access
pub use apply::{ApplyReport, SchemaApplier, TxState};
pub use config::{Config, TargetConfig};
pub use error::{MigrateError, Result};
pub use rewrite::{rewrite_statement, RewriteRule, RULES};
pub use segment::Segmenter;
pub use target::MariadbPool;
