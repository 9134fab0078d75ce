//! Validate-config command implementation

use crate::config::{load_config, StorageBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("🔍 Validating configuration: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("   Environment:    {:?}", config.environment);
        println!("   Log level:      {}", config.application.log_level);
        println!("   Artifact root:  {}", config.storage.artifact_root);
        match config.storage.backend {
            StorageBackend::Postgres => {
                let postgres = config
                    .storage
                    .postgres
                    .as_ref()
                    .expect("postgres config validated");
                println!("   Backend:        postgres ({})", postgres.safe_description());
            }
            StorageBackend::Memory => {
                println!("   Backend:        memory (sample dataset)");
            }
        }
        println!("   Clinic name:    {}", config.branding.clinic_name);

        Ok(0)
    }
}
