//! Download command implementation

use crate::cli::commands::{build_service, load_config_or_exit};
use crate::domain::errors::ReportError;
use crate::domain::ids::{OwnerId, ReportId};
use clap::Args;
use std::str::FromStr;

/// Arguments for the download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Report id
    pub id: String,

    /// Owner of the report
    #[arg(long, default_value = "cli", env = "MEDREPORT_OWNER")]
    pub owner: String,

    /// Output path (defaults to the artifact's filename)
    #[arg(short, long)]
    pub output: Option<String>,
}

impl DownloadArgs {
    /// Execute the download command
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

        let download = match service.download(&id, &owner).await {
            Ok(download) => download,
            Err(e @ (ReportError::NotFound(_) | ReportError::Forbidden(_))) => {
                println!("❌ {e}");
                return Ok(4);
            }
            Err(e) => return Err(e.into()),
        };

        let output = self.output.clone().unwrap_or_else(|| download.filename.clone());
        std::fs::write(&output, &download.bytes)?;

        println!("✅ Downloaded {}", download.filename);
        println!("   Saved to:      {output}");
        println!("   Content type:  {}", download.content_type);
        println!("   Size:          {} bytes", download.bytes.len());
        Ok(0)
    }
}
