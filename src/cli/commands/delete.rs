//! Delete command implementation

use crate::cli::commands::{build_service, load_config_or_exit};
use crate::domain::errors::ReportError;
use crate::domain::ids::{OwnerId, ReportId};
use clap::Args;
use std::str::FromStr;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Report id
    pub id: String,

    /// Owner of the report
    #[arg(long, default_value = "cli", env = "MEDREPORT_OWNER")]
    pub owner: String,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_exit(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let id = match ReportId::from_str(&self.id) {
            Ok(id) => id,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let owner = match OwnerId::from_str(&self.owner) {
            Ok(owner) => owner,
            Err(e) => {
                println!("❌ Invalid owner: {e}");
                return Ok(2);
            }
        };

        let service = match build_service(&config).await {
            Ok(service) => service,
            Err(code) => return Ok(code),
        };

        match service.delete(&id, &owner).await {
            Ok(()) => {
                println!("✅ Deleted report {id}");
                Ok(0)
            }
            Err(e @ (ReportError::NotFound(_) | ReportError::Forbidden(_))) => {
                println!("❌ {e}");
                Ok(4)
            }
            Err(e) => Err(e.into()),
        }
    }
}
