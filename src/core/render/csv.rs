//! CSV format strategy

use crate::core::render::{RenderStrategy, ReportMetadata};
use crate::domain::errors::RenderError;
use crate::domain::row::RowRecord;

/// Renders reports as RFC 4180 CSV
///
/// The header row is always written, even for an empty result set, so a
/// zero-row report still yields a well-formed artifact. Quoting and
/// escaping are delegated to the csv crate's defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvStrategy;

impl RenderStrategy for CsvStrategy {
    fn generate(
        &self,
        rows: &[RowRecord],
        metadata: &ReportMetadata,
    ) -> Result<Vec<u8>, RenderError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(&metadata.columns)
            .map_err(|e| RenderError::Encoding(format!("CSV header write failed: {e}")))?;

        for row in rows {
            let record: Vec<&str> = metadata
                .columns
                .iter()
                .map(|column| row.get(column).unwrap_or(""))
                .collect();
            writer
                .write_record(&record)
                .map_err(|e| RenderError::Encoding(format!("CSV row write failed: {e}")))?;
        }

        writer
            .into_inner()
            .map_err(|e| RenderError::Encoding(format!("CSV flush failed: {e}")))
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }

    fn content_type(&self) -> &'static str {
        "text/csv"
    }
}
