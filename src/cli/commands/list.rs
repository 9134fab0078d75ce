//! List command implementation

use crate::cli::commands::{build_service, load_config_or_exit};
use crate::domain::ids::OwnerId;
use crate::domain::report::{ReportQuery, ReportStatus};
use clap::Args;
use std::str::FromStr;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Owner whose reports to list
    #[arg(long, default_value = "cli", env = "MEDREPORT_OWNER")]
    pub owner: String,

    /// Filter by report type
    #[arg(short = 't', long)]
    pub report_type: Option<String>,

    /// Filter by format
    #[arg(short, long)]
    pub format: Option<String>,

    /// Filter by status (pending, processing, completed, failed)
    #[arg(short, long)]
    pub status: Option<String>,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_exit(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let owner = match OwnerId::from_str(&self.owner) {
            Ok(owner) => owner,
            Err(e) => {
                println!("❌ Invalid owner: {e}");
                return Ok(2);
            }
        };

        let status = match &self.status {
            Some(raw) => match ReportStatus::from_str(raw) {
                Ok(status) => Some(status),
                Err(e) => {
                    println!("❌ {e}");
                    return Ok(2);
                }
            },
            None => None,
        };

        let service = match build_service(&config).await {
            Ok(service) => service,
            Err(code) => return Ok(code),
        };

        let query = ReportQuery {
            report_type: self.report_type.clone(),
            format: self.format.clone(),
            status,
            ..Default::default()
        };

        let reports = service.list(&owner, &query).await?;

        if reports.is_empty() {
            println!("No reports found for owner '{owner}'");
            return Ok(0);
        }

        println!("Reports for owner '{owner}':");
        println!();
        println!(
            "{:<36}  {:<16}  {:<6}  {:<10}  {:>7}  {}",
            "ID", "TYPE", "FORMAT", "STATUS", "RECORDS", "CREATED"
        );
        for report in &reports {
            println!(
                "{:<36}  {:<16}  {:<6}  {:<10}  {:>7}  {}",
                report.id,
                report.report_type,
                report.format,
                report.status,
                report.record_count,
                report.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
        println!();
        println!("{} report(s)", reports.len());

        Ok(0)
    }
}
