//! MariaDB/MySQL target connection handling.

use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, SslOpts};
use tracing::{info, warn};

use crate::config::TargetConfig;
use crate::error::{MigrateError, Result};

/// Connection pool for the target MariaDB/MySQL database.
///
/// The applier checks out a single connection for the whole run; the pool
/// exists because that is how mysql_async hands out connections, not for
/// concurrency.
pub struct MariadbPool {
    pool: Pool,
}

impl MariadbPool {
    /// Create a pool from configuration and verify the connection.
    pub async fn new(config: &TargetConfig) -> Result<Self> {
        let ssl_opts = match config.ssl_mode.to_lowercase().as_str() {
            "disable" => {
                warn!("MariaDB TLS is disabled. Credentials will be transmitted in plaintext.");
                None
            }
            "prefer" | "require" => Some(SslOpts::default().with_danger_accept_invalid_certs(true)),
            "verify-ca" | "verify_ca" | "verify-full" | "verify_identity" => {
                Some(SslOpts::default())
            }
            _ => {
                warn!(
                    "Unknown ssl_mode '{}', defaulting to Preferred",
                    config.ssl_mode
                );
                Some(SslOpts::default().with_danger_accept_invalid_certs(true))
            }
        };

        let mut builder = OptsBuilder::default()
            .ip_or_hostname(&config.host)
            .tcp_port(config.port)
            .db_name(Some(&config.database))
            .user(Some(&config.user))
            .pass(Some(&config.password))
            // Use utf8mb4 for full Unicode support
            .init(vec!["SET NAMES utf8mb4"]);

        if let Some(ssl) = ssl_opts {
            builder = builder.ssl_opts(ssl);
        }

        let pool_opts = PoolOpts::new().with_constraints(PoolConstraints::new(1, 2).unwrap());

        let opts: Opts = builder.pool_opts(pool_opts).into();
        let pool = Pool::new(opts);

        // Test connection
        let mut conn = pool
            .get_conn()
            .await
            .map_err(|e| MigrateError::connection(e, "creating MariaDB target pool"))?;

        conn.query_drop("SELECT 1")
            .await
            .map_err(|e| MigrateError::connection(e, "testing MariaDB target connection"))?;

        drop(conn);

        info!("Connected to MariaDB target: {}", config.display_target());

        Ok(Self { pool })
    }

    /// Check out a connection.
    pub async fn get(&self) -> Result<Conn> {
        self.pool
            .get_conn()
            .await
            .map_err(|e| MigrateError::connection(e, "getting MariaDB connection"))
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.get().await?;
        conn.query_drop("SELECT 1")
            .await
            .map_err(|e| MigrateError::connection(e, "testing MariaDB connection"))?;
        Ok(())
    }

    /// Close the pool and its connections.
    pub async fn close(&self) {
        self.pool.clone().disconnect().await.ok();
    }
}
