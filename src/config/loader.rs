//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{MedreportConfig, StorageBackend};
use crate::config::secret_string;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into MedreportConfig
/// 4. Applies environment variable overrides (MEDREPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use medreport::config::loader::load_config;
///
/// let config = load_config("medreport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedreportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from a TOML string
///
/// Applies the same substitution, override and validation steps as
/// [`load_config`].
pub fn load_config_str(contents: &str) -> Result<MedreportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MedreportConfig = toml::from_str(&contents)
        .map_err(|e| ReportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ReportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are skipped so documented placeholders stay intact.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ReportError::Configuration(format!(
            "Missing environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies `MEDREPORT_*` environment variable overrides
///
/// Supported overrides:
/// - `MEDREPORT_LOG_LEVEL` -> `application.log_level`
/// - `MEDREPORT_STORAGE_BACKEND` -> `storage.backend`
/// - `MEDREPORT_ARTIFACT_ROOT` -> `storage.artifact_root`
/// - `MEDREPORT_POSTGRES_PASSWORD` -> `storage.postgres.password`
fn apply_env_overrides(config: &mut MedreportConfig) {
    if let Ok(level) = std::env::var("MEDREPORT_LOG_LEVEL") {
        config.application.log_level = level;
    }

    if let Ok(backend) = std::env::var("MEDREPORT_STORAGE_BACKEND") {
        match backend.to_lowercase().as_str() {
            "postgres" => config.storage.backend = StorageBackend::Postgres,
            "memory" => config.storage.backend = StorageBackend::Memory,
            other => {
                tracing::warn!(backend = %other, "Ignoring unknown MEDREPORT_STORAGE_BACKEND");
            }
        }
    }

    if let Ok(root) = std::env::var("MEDREPORT_ARTIFACT_ROOT") {
        config.storage.artifact_root = root;
    }

    if let Ok(password) = std::env::var("MEDREPORT_POSTGRES_PASSWORD") {
        if let Some(ref mut postgres) = config.storage.postgres {
            postgres.password = secret_string(password);
        }
    }
}

/// Sample configuration written by `medreport init`
pub fn sample_config() -> &'static str {
    r#"# medreport configuration

# Runtime environment: development, staging, production
environment = "development"

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[storage]
# Backend for report records and domain data: "postgres" or "memory".
# The memory backend ships with a seeded sample dataset for evaluation.
backend = "memory"

# Root directory for generated report artifacts
artifact_root = "var/reports"

# Required when backend = "postgres".
# The password may reference an environment variable: "${MEDREPORT_DB_PASSWORD}"
#[storage.postgres]
#host = "localhost"
#port = 5432
#database = "medreport"
#username = "medreport"
#password = "${MEDREPORT_DB_PASSWORD}"
#max_connections = 10
#connection_timeout_seconds = 30
#statement_timeout_seconds = 60

[branding]
clinic_name = "Healthcare Patient Management"
footer_text = "Healthcare Patient Management System"

[logging]
# Enable rolling file logging in addition to console output
local_enabled = false
local_path = "var/log"
local_rotation = "daily"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_str_memory() {
        let config = load_config_str(
            r#"
            [application]
            log_level = "info"

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_missing_file_errors() {
        let err = load_config("definitely-not-here.toml").unwrap_err();
        assert!(matches!(err, ReportError::Configuration(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("MEDREPORT_TEST_SUBST", "var/custom");
        let result = substitute_env_vars("artifact_root = \"${MEDREPORT_TEST_SUBST}\"").unwrap();
        assert!(result.contains("var/custom"));
        std::env::remove_var("MEDREPORT_TEST_SUBST");
    }

    #[test]
    fn test_substitute_missing_var_errors() {
        let err = substitute_env_vars("password = \"${MEDREPORT_TEST_MISSING_VAR}\"").unwrap_err();
        assert!(err.to_string().contains("MEDREPORT_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let result =
            substitute_env_vars("# password = \"${MEDREPORT_TEST_COMMENTED}\"").unwrap();
        assert!(result.contains("${MEDREPORT_TEST_COMMENTED}"));
    }

    #[test]
    fn test_sample_config_parses_and_validates() {
        let config = load_config_str(sample_config()).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = load_config_str(
            r#"
            [application]
            log_level = "loud"

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }
}
