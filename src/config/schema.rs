//! Configuration schema types
//!
//! This module defines the configuration structure for medreport.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL database
    Postgres,
    /// In-memory store with a seeded sample dataset (development and tests)
    Memory,
}

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main medreport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedreportConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Storage settings (backend selection, artifact root)
    pub storage: StorageConfig,

    /// Branding rendered into PDF headers and footers
    #[serde(default)]
    pub branding: BrandingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedreportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.branding.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend for report records and domain data (postgres or memory)
    pub backend: StorageBackend,

    /// Root directory for generated artifacts
    #[serde(default = "default_artifact_root")]
    pub artifact_root: String,

    /// PostgreSQL configuration (required if backend = postgres)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgres: Option<PostgresConfig>,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.artifact_root.trim().is_empty() {
            return Err("storage.artifact_root cannot be empty".to_string());
        }

        match self.backend {
            StorageBackend::Postgres => {
                if let Some(ref postgres) = self.postgres {
                    postgres.validate()?;
                } else {
                    return Err(
                        "storage.postgres configuration is required when backend = 'postgres'"
                            .to_string(),
                    );
                }
            }
            StorageBackend::Memory => {}
        }
        Ok(())
    }
}

/// PostgreSQL connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// Database host
    pub host: String,

    /// Database port
    #[serde(default = "default_postgres_port")]
    pub port: u16,

    /// Database name
    pub database: String,

    /// Database user
    pub username: String,

    /// Database password (kept out of logs and memory dumps)
    pub password: SecretString,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Timeout for acquiring and creating connections
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,

    /// Per-statement execution timeout
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_seconds: u64,
}

impl PostgresConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("storage.postgres.host cannot be empty".to_string());
        }
        if self.database.trim().is_empty() {
            return Err("storage.postgres.database cannot be empty".to_string());
        }
        if self.username.trim().is_empty() {
            return Err("storage.postgres.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("storage.postgres.password cannot be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("storage.postgres.max_connections must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Connection description safe for logging (no credentials)
    pub fn safe_description(&self) -> String {
        format!(
            "postgresql://{}@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }
}

/// Branding configuration for rendered reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    /// Clinic name shown in the PDF page header
    #[serde(default = "default_clinic_name")]
    pub clinic_name: String,

    /// Footer text shown on every PDF page
    #[serde(default = "default_footer_text")]
    pub footer_text: String,
}

impl BrandingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.clinic_name.trim().is_empty() {
            return Err("branding.clinic_name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            clinic_name: default_clinic_name(),
            footer_text: default_footer_text(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling file logging in addition to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation policy (daily, hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_artifact_root() -> String {
    "var/reports".to_string()
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_max_connections() -> usize {
    10
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_statement_timeout() -> u64 {
    60
}

fn default_clinic_name() -> String {
    "Healthcare Patient Management".to_string()
}

fn default_footer_text() -> String {
    "Healthcare Patient Management System".to_string()
}

fn default_log_path() -> String {
    "var/log".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn memory_config() -> MedreportConfig {
        MedreportConfig {
            application: ApplicationConfig::default(),
            environment: Environment::Development,
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                artifact_root: "var/reports".to_string(),
                postgres: None,
            },
            branding: BrandingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_memory_config_valid() {
        assert!(memory_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = memory_config();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn test_postgres_backend_requires_section() {
        let mut config = memory_config();
        config.storage.backend = StorageBackend::Postgres;
        let err = config.validate().unwrap_err();
        assert!(err.contains("storage.postgres"));
    }

    #[test]
    fn test_postgres_section_validated() {
        let mut config = memory_config();
        config.storage.backend = StorageBackend::Postgres;
        config.storage.postgres = Some(PostgresConfig {
            host: "localhost".to_string(),
            port: 5432,
            database: String::new(),
            username: "medreport".to_string(),
            password: secret_string("secret".to_string()),
            max_connections: 10,
            connection_timeout_seconds: 30,
            statement_timeout_seconds: 60,
        });
        let err = config.validate().unwrap_err();
        assert!(err.contains("database"));
    }

    #[test]
    fn test_safe_description_hides_password() {
        let postgres = PostgresConfig {
            host: "db.internal".to_string(),
            port: 5432,
            database: "medreport".to_string(),
            username: "svc".to_string(),
            password: secret_string("hunter2".to_string()),
            max_connections: 10,
            connection_timeout_seconds: 30,
            statement_timeout_seconds: 60,
        };
        let description = postgres.safe_description();
        assert!(!description.contains("hunter2"));
        assert!(description.contains("db.internal:5432/medreport"));
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut config = memory_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let toml_str = r#"
            [application]
            log_level = "debug"

            [storage]
            backend = "memory"
        "#;
        let config: MedreportConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.artifact_root, "var/reports");
        assert!(config.validate().is_ok());
    }
}
