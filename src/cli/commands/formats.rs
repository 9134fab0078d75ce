//! Formats command implementation

use crate::core::render::StrategyFactory;
use crate::domain::report::ReportType;
use clap::Args;

/// Arguments for the formats command
#[derive(Args, Debug)]
pub struct FormatsArgs {}

impl FormatsArgs {
    /// Execute the formats command
    ///
    /// Lists built-in formats and report types; needs no configuration or
    /// backend.
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let factory = StrategyFactory::with_builtins();

        println!("Supported output formats:");
        for format in factory.supported_formats() {
            let strategy = factory.create(&format)?;
            println!(
                "  {:<6} (.{}, {})",
                format,
                strategy.file_extension(),
                strategy.content_type()
            );
        }

        println!();
        println!("Report types:");
        for report_type in ReportType::ALL {
            println!(
                "  {:<18} columns: {}",
                report_type.as_str(),
                report_type.columns().join(", ")
            );
        }

        Ok(0)
    }
}
