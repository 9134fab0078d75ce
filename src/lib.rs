// medreport - Healthcare Report Generation
// Copyright (c) 2025 Medreport Contributors
// Licensed under the MIT License

//! # medreport - Healthcare Report Generation
//!
//! medreport is a report-generation service for healthcare patient-management
//! data. It reads domain records (patients, practitioners, appointments,
//! prescriptions, invoices, clinical records), renders them through pluggable
//! format strategies (PDF, CSV, TXT, JSON), and persists the resulting
//! artifact together with a tracked `Report` record.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** display-ready rows from a PostgreSQL or in-memory backend
//! - **Rendering** rows through format strategies resolved by a registry
//! - **Persisting** artifacts (with SHA-256 checksums) and report metadata
//! - **Managing** report lifecycle: list, download, delete, owner scoping
//!
//! ## Architecture
//!
//! medreport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (service orchestration, strategies, artifacts)
//! - [`adapters`] - Storage backends (PostgreSQL, in-memory, filesystem)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medreport::config::load_config;
//! use medreport::core::service::{GenerateRequest, ReportService};
//! use medreport::domain::{OwnerId, ReportFilters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("medreport.toml")?;
//!
//!     // Create the report service
//!     let service = ReportService::from_config(&config).await?;
//!
//!     // Generate a report
//!     let report = service
//!         .generate(GenerateRequest {
//!             report_type: "patients".to_string(),
//!             format: "csv".to_string(),
//!             filters: ReportFilters::new(),
//!             owner: OwnerId::new("front-desk")?,
//!             title: None,
//!             description: String::new(),
//!         })
//!         .await?;
//!
//!     println!("Report {} is {}", report.id, report.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Report Lifecycle
//!
//! A report is created in `pending`, moves to `processing` while the
//! pipeline runs, and ends `completed` (artifact, checksum, record count,
//! completion time) or `failed` (error message). Transitions are monotonic;
//! terminal reports are immutable except for deletion. Generation-time
//! errors never escape [`core::service::ReportService::generate`] - the
//! caller always receives the report, with failures recorded on it.
//!
//! ## Format Strategies
//!
//! Each output format implements [`core::render::RenderStrategy`]; the
//! [`core::render::StrategyFactory`] maps format identifiers to strategies
//! and accepts runtime registrations:
//!
//! ```rust
//! use medreport::core::render::StrategyFactory;
//!
//! let factory = StrategyFactory::with_builtins();
//! assert!(factory.supports("pdf"));
//! assert!(factory.create("xml").is_err());
//! ```
//!
//! ## Error Handling
//!
//! medreport uses the [`domain::ReportError`] type for all errors:
//!
//! ```rust,no_run
//! use medreport::domain::ReportError;
//!
//! fn example() -> Result<(), ReportError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = medreport::config::load_config("medreport.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! medreport uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting report generation");
//! warn!(report_type = "invoices", "No records matched the filters");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
