//! Transactional schema application.
//!
//! Consumes the segmenter → rewriter pipeline one statement at a time inside
//! a single transaction. The first rejected statement rolls back everything
//! applied so far and aborts the run; reaching the end of the stream commits.
//! There is no retry and no skip-and-continue: all errors are terminal for
//! the run.

use std::io::BufRead;
use std::time::Instant;

use chrono::{DateTime, Utc};
use mysql_async::prelude::*;
use mysql_async::{Transaction, TxOpts};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{MigrateError, Result};
use crate::rewrite::rewrite_statement;
use crate::segment::Segmenter;
use crate::target::MariadbPool;

/// Transaction state machine of one apply run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// Transaction started, statements executing.
    Open,
    /// Stream exhausted, transaction committed.
    Committed,
    /// A statement failed, transaction rolled back.
    Aborted,
}

impl TxState {
    /// Status label for reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TxState::Open => "open",
            TxState::Committed => "committed",
            TxState::Aborted => "aborted",
        }
    }
}

/// Result of one schema apply run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Unique run identifier.
    pub run_id: String,

    /// Final transaction state ("committed").
    pub status: String,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Statements executed against the target.
    pub statements_executed: usize,

    /// Candidate statements dropped by the rewriter.
    pub statements_dropped: usize,
}

impl ApplyReport {
    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Applies a rewritten statement stream to the target in one transaction.
pub struct SchemaApplier {
    pool: MariadbPool,
}

impl SchemaApplier {
    /// Create an applier over an established target pool.
    pub fn new(pool: MariadbPool) -> Self {
        Self { pool }
    }

    /// Run the full pipeline: segment, rewrite, execute, commit.
    ///
    /// On the first statement failure the transaction is rolled back, the
    /// remaining statements are never read, and the error carries the full
    /// failing SQL text.
    pub async fn apply<R: BufRead>(&self, statements: Segmenter<R>) -> Result<ApplyReport> {
        let started_at = Utc::now();
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        info!("Starting schema import run: {}", run_id);

        let mut conn = self.pool.get().await?;
        let mut tx = conn
            .start_transaction(TxOpts::default())
            .await
            .map_err(|e| MigrateError::connection(e, "starting MariaDB transaction"))?;

        let mut executed = 0usize;
        let mut dropped = 0usize;

        let state = match execute_all(&mut tx, statements, &mut executed, &mut dropped).await {
            Ok(()) => {
                tx.commit()
                    .await
                    .map_err(|e| MigrateError::connection(e, "committing MariaDB transaction"))?;
                TxState::Committed
            }
            Err(e) => {
                // The transaction must not survive a failed statement.
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback after failure also failed: {}", rollback_err);
                }
                error!(
                    "Schema import aborted after {} executed statements; all rolled back",
                    executed
                );
                return Err(e);
            }
        };

        let duration_seconds = start.elapsed().as_secs_f64();
        info!(
            "Schema import {}: {} statements executed, {} dropped by rewrite, {:.2}s",
            state.as_str(),
            executed,
            dropped,
            duration_seconds
        );

        Ok(ApplyReport {
            run_id,
            status: state.as_str().to_string(),
            started_at,
            completed_at: Utc::now(),
            duration_seconds,
            statements_executed: executed,
            statements_dropped: dropped,
        })
    }

    /// The underlying pool, for teardown.
    pub fn pool(&self) -> &MariadbPool {
        &self.pool
    }
}

/// Execute every surviving statement, stopping at the first failure.
async fn execute_all<R: BufRead>(
    tx: &mut Transaction<'_>,
    statements: Segmenter<R>,
    executed: &mut usize,
    dropped: &mut usize,
) -> Result<()> {
    for candidate in statements {
        let candidate = candidate?;

        let Some(sql) = rewrite_statement(&candidate) else {
            debug!("Dropped statement with no MariaDB counterpart");
            *dropped += 1;
            continue;
        };

        debug!("Executing:\n{}", sql);
        if let Err(e) = tx.query_drop(&sql).await {
            error!("Statement execution failed:\n{}\nError: {}", sql, e);
            return Err(MigrateError::statement(sql, e));
        }
        *executed += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_state_labels() {
        assert_eq!(TxState::Open.as_str(), "open");
        assert_eq!(TxState::Committed.as_str(), "committed");
        assert_eq!(TxState::Aborted.as_str(), "aborted");
    }

    #[test]
    fn test_report_round_trips_as_json() {
        let report = ApplyReport {
            run_id: "run-1".to_string(),
            status: TxState::Committed.as_str().to_string(),
            started_at: Utc::now(),
            completed_at: Utc::now(),
            duration_seconds: 0.5,
            statements_executed: 12,
            statements_dropped: 3,
        };
        let json = report.to_json().unwrap();
        let parsed: ApplyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, "committed");
        assert_eq!(parsed.statements_executed, 12);
        assert_eq!(parsed.statements_dropped, 3);
    }
}
