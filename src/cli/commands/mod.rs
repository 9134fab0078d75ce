//! CLI command implementations

pub mod delete;
pub mod download;
pub mod formats;
pub mod generate;
pub mod init;
pub mod list;
pub mod validate;

use crate::config::{load_config, MedreportConfig};
use crate::core::service::ReportService;

/// Loads configuration for a command, mapping failures to exit code 2
pub(crate) fn load_config_or_exit(config_path: &str) -> Result<MedreportConfig, i32> {
    match load_config(config_path) {
        Ok(config) => Ok(config),
        Err(e) => {
            println!("❌ Failed to load configuration: {e}");
            println!("   Run 'medreport init' to create a configuration file");
            Err(2)
        }
    }
}

/// Builds the report service, mapping backend failures to exit code 4
pub(crate) async fn build_service(config: &MedreportConfig) -> Result<ReportService, i32> {
    match ReportService::from_config(config).await {
        Ok(service) => Ok(service),
        Err(e) => {
            println!("❌ Failed to initialize storage backend: {e}");
            Err(4)
        }
    }
}
