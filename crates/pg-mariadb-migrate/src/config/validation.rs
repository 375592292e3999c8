//! Configuration validation.

use super::Config;
use crate::error::{MigrateError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.target.host.is_empty() {
        return Err(MigrateError::Config("target.host is required".into()));
    }
    if config.target.database.is_empty() {
        return Err(MigrateError::Config("target.database is required".into()));
    }
    if config.target.user.is_empty() {
        return Err(MigrateError::Config("target.user is required".into()));
    }
    if config.target.port == 0 {
        return Err(MigrateError::Config("target.port must be nonzero".into()));
    }
    if config.target.r#type != "mariadb" && config.target.r#type != "mysql" {
        return Err(MigrateError::Config(format!(
            "target.type must be 'mariadb' or 'mysql', got '{}'",
            config.target.r#type
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;

    fn valid_config() -> Config {
        Config {
            target: TargetConfig {
                r#type: "mariadb".to_string(),
                host: "localhost".to_string(),
                port: 3306,
                database: "target_db".to_string(),
                user: "root".to_string(),
                password: "password".to_string(),
                ssl_mode: "disable".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_target_host() {
        let mut config = valid_config();
        config.target.host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_target_database() {
        let mut config = valid_config();
        config.target.database = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_wrong_target_type() {
        let mut config = valid_config();
        config.target.r#type = "postgres".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_port_defaults_to_3306() {
        let config = Config::from_yaml(
            "target:\n  host: localhost\n  database: db\n  user: root\n  password: pw\n",
        )
        .unwrap();
        assert_eq!(config.target.port, 3306);
        assert_eq!(config.target.ssl_mode, "prefer");
    }

    #[test]
    fn test_target_config_debug_redacts_password() {
        let mut config = valid_config();
        config.target.password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config.target);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
