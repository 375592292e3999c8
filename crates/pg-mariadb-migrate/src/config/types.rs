//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target database configuration (MariaDB/MySQL).
    pub target: TargetConfig,
}

impl Config {
    /// Build a configuration directly from target connection parameters.
    pub fn from_target(target: TargetConfig) -> Self {
        Self { target }
    }
}

/// Target database (MariaDB/MySQL) configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Database type (always "mariadb" or "mysql").
    #[serde(default = "default_mariadb")]
    pub r#type: String,

    /// Database host.
    pub host: String,

    /// Database port (default: 3306).
    #[serde(default = "default_mariadb_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,

    /// SSL mode (default: "prefer").
    #[serde(default = "default_prefer")]
    pub ssl_mode: String,
}

impl TargetConfig {
    /// Human-readable connection target, safe to log.
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

// Passwords must never leak through Debug output or logs.
impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("type", &self.r#type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

// Default value functions for serde
fn default_mariadb() -> String {
    "mariadb".to_string()
}

fn default_mariadb_port() -> u16 {
    3306
}

fn default_prefer() -> String {
    "prefer".to_string()
}
