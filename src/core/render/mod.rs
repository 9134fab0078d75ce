//! Report rendering
//!
//! Format strategies convert row records plus report metadata into a byte
//! artifact. One strategy exists per output format; the [`StrategyFactory`]
//! maps format identifiers to strategy instances and supports runtime
//! registration of new formats.
//!
//! All strategies produce deterministic bytes for identical input, except
//! for the embedded generation timestamp.

pub mod csv;
pub mod factory;
pub mod json;
pub mod pdf;
pub mod txt;

pub use factory::StrategyFactory;

use crate::domain::errors::RenderError;
use crate::domain::filters::ReportFilters;
use crate::domain::row::RowRecord;
use chrono::{DateTime, Utc};

/// Metadata handed to every strategy alongside the rows
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// Report title
    pub title: String,

    /// Human-readable report type name ("Clinical Records")
    pub report_type: String,

    /// Optional description
    pub description: String,

    /// Generation timestamp embedded in the output
    pub generated_at: DateTime<Utc>,

    /// Filters the data provider applied
    pub filters: ReportFilters,

    /// Column schema of the rows
    ///
    /// Carried separately from the rows so header-only output is possible
    /// for empty result sets.
    pub columns: Vec<String>,
}

impl ReportMetadata {
    /// Titlecased column header (`full_name` -> `Full Name`)
    pub fn header_label(column: &str) -> String {
        column
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A format strategy
///
/// Implementations are stateless apart from construction-time settings and
/// are shared behind `Arc` by the factory.
pub trait RenderStrategy: Send + Sync {
    /// Renders rows and metadata into the artifact bytes
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when a value cannot be represented in the
    /// target format or document assembly fails.
    fn generate(&self, rows: &[RowRecord], metadata: &ReportMetadata)
        -> Result<Vec<u8>, RenderError>;

    /// File extension (without dot) for artifacts of this format
    fn file_extension(&self) -> &'static str;

    /// MIME content type for artifacts of this format
    fn content_type(&self) -> &'static str;
}
