//! Configuration management for medreport.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! medreport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MEDREPORT_*` environment variable overrides
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medreport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("medreport.toml")?;
//!
//! // Access configuration sections
//! println!("Backend: {:?}", config.storage.backend);
//! println!("Artifacts: {}", config.storage.artifact_root);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`StorageConfig`] - Backend selection, artifact root, PostgreSQL
//! - [`BrandingConfig`] - Clinic name and footer text for PDF output
//! - [`LoggingConfig`] - Console and rolling-file logging

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_str, sample_config};
pub use schema::{
    ApplicationConfig, BrandingConfig, Environment, LoggingConfig, MedreportConfig,
    PostgresConfig, StorageBackend, StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
