//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for medreport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// medreport - healthcare report generation
#[derive(Parser, Debug)]
#[command(name = "medreport")]
#[command(version, about, long_about = None)]
#[command(author = "Medreport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medreport.toml", env = "MEDREPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDREPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a report
    Generate(commands::generate::GenerateArgs),

    /// List generated reports
    List(commands::list::ListArgs),

    /// Download a report's artifact
    Download(commands::download::DownloadArgs),

    /// Delete a report and its artifact
    Delete(commands::delete::DeleteArgs),

    /// Show supported report types and formats
    Formats(commands::formats::FormatsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
