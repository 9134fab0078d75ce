//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::sample_config;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "medreport.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing medreport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. For PostgreSQL: uncomment [storage.postgres] and set");
                println!("     MEDREPORT_DB_PASSWORD in the environment or a .env file");
                println!("  3. Validate configuration: medreport validate-config");
                println!("  4. Generate a report: medreport generate -t patients -f pdf");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "medreport.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "medreport.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_sample_config_is_loadable() {
        let config = load_config_str(sample_config()).unwrap();
        assert_eq!(config.application.log_level, "info");
    }
}
