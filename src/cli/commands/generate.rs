//! Generate command implementation

use crate::cli::commands::{build_service, load_config_or_exit};
use crate::core::service::GenerateRequest;
use crate::domain::filters::ReportFilters;
use crate::domain::ids::OwnerId;
use crate::domain::report::ReportStatus;
use clap::Args;
use serde_json::Value;
use std::str::FromStr;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Report type (patients, practitioners, appointments, prescriptions,
    /// invoices, clinical_records)
    #[arg(short = 't', long)]
    pub report_type: String,

    /// Output format (pdf, csv, txt, json)
    #[arg(short, long)]
    pub format: String,

    /// Filter as KEY=VALUE; may be repeated (e.g. --filter active=true)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Owner of the report
    #[arg(long, default_value = "cli", env = "MEDREPORT_OWNER")]
    pub owner: String,

    /// Report title (defaults to "<Type> Report")
    #[arg(long)]
    pub title: Option<String>,

    /// Report description
    #[arg(long, default_value = "")]
    pub description: String,
}

impl GenerateArgs {
    /// Execute the generate command
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

        let filters = match parse_filters(&self.filters) {
            Ok(filters) => filters,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let service = match build_service(&config).await {
            Ok(service) => service,
            Err(code) => return Ok(code),
        };

        println!(
            "📄 Generating {} report ({})...",
            self.report_type, self.format
        );

        let report = service
            .generate(GenerateRequest {
                report_type: self.report_type.clone(),
                format: self.format.clone(),
                filters,
                owner,
                title: self.title.clone(),
                description: self.description.clone(),
            })
            .await?;

        match report.status {
            ReportStatus::Completed => {
                println!("✅ Report completed");
                println!("   Id:        {}", report.id);
                println!("   Title:     {}", report.title);
                println!("   Records:   {}", report.record_count);
                println!(
                    "   Artifact:  {} ({} bytes)",
                    report.file_path.as_deref().unwrap_or("-"),
                    report.file_size.unwrap_or(0)
                );
                Ok(0)
            }
            _ => {
                println!("❌ Report failed");
                println!("   Id:     {}", report.id);
                println!(
                    "   Error:  {}",
                    report.error_message.as_deref().unwrap_or("unknown")
                );
                Ok(4)
            }
        }
    }
}

/// Parses repeated `KEY=VALUE` filter arguments
///
/// Values parse as JSON where possible (`true`, `3`, `null`) and fall back
/// to plain strings, so `--filter active=true` produces a boolean.
fn parse_filters(raw: &[String]) -> Result<ReportFilters, String> {
    let mut filters = ReportFilters::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| format!("Invalid filter '{entry}': expected KEY=VALUE"))?;
        if key.trim().is_empty() {
            return Err(format!("Invalid filter '{entry}': empty key"));
        }
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        filters.insert(key.trim(), value);
    }
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_json_and_string_values() {
        let filters = parse_filters(&[
            "active=true".to_string(),
            "gender=female".to_string(),
            "status=booked".to_string(),
        ])
        .unwrap();

        assert_eq!(filters.get_bool("active"), Some(true));
        assert_eq!(filters.get_str("gender"), Some("female".to_string()));
        assert_eq!(filters.get_str("status"), Some("booked".to_string()));
    }

    #[test]
    fn test_parse_filters_value_with_equals() {
        let filters = parse_filters(&["note=a=b".to_string()]).unwrap();
        assert_eq!(filters.get_str("note"), Some("a=b".to_string()));
    }

    #[test]
    fn test_parse_filters_rejects_missing_separator() {
        assert!(parse_filters(&["active".to_string()]).is_err());
    }

    #[test]
    fn test_parse_filters_rejects_empty_key() {
        assert!(parse_filters(&["=true".to_string()]).is_err());
    }
}
