//! Plain-text format strategy

use crate::core::render::{RenderStrategy, ReportMetadata};
use crate::domain::errors::RenderError;
use crate::domain::row::RowRecord;

const PAGE_WIDTH: usize = 80;
const MAX_COLUMN_WIDTH: usize = 30;

/// Renders reports as fixed-width ASCII text
///
/// Columns are sized to the widest value (capped at 30 characters, longer
/// values are truncated with an ellipsis). Output is pure ASCII: any other
/// character is replaced with `?`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TxtStrategy;

impl RenderStrategy for TxtStrategy {
    fn generate(
        &self,
        rows: &[RowRecord],
        metadata: &ReportMetadata,
    ) -> Result<Vec<u8>, RenderError> {
        let mut lines: Vec<String> = Vec::new();

        let banner = "=".repeat(PAGE_WIDTH);
        lines.push(banner.clone());
        lines.push(center(&sanitize(&metadata.title), PAGE_WIDTH));
        lines.push(banner);
        lines.push(String::new());

        lines.push(format!(
            "Generated: {}",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        lines.push(format!("Report Type: {}", sanitize(&metadata.report_type)));
        lines.push(format!("Total Records: {}", rows.len()));
        if !metadata.description.is_empty() {
            lines.push(format!("Description: {}", sanitize(&metadata.description)));
        }
        lines.push(format!("Filters: {}", sanitize(&metadata.filters.summary())));

        lines.push(String::new());
        lines.push("-".repeat(PAGE_WIDTH));
        lines.push(String::new());

        let headers: Vec<String> = metadata
            .columns
            .iter()
            .map(|c| sanitize(&ReportMetadata::header_label(c)))
            .collect();

        // Column widths: widest of header and values, capped
        let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
        for row in rows {
            for (i, column) in metadata.columns.iter().enumerate() {
                let len = sanitize(row.get(column).unwrap_or("")).len();
                if len > widths[i] {
                    widths[i] = len;
                }
            }
        }
        for width in &mut widths {
            *width = (*width).min(MAX_COLUMN_WIDTH);
        }

        let header_row = headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| pad(header, *width))
            .collect::<Vec<_>>()
            .join(" | ");
        let rule_len = header_row.len();
        lines.push(header_row);
        lines.push("-".repeat(rule_len));

        if rows.is_empty() {
            lines.push("No data available".to_string());
        } else {
            for row in rows {
                let rendered = metadata
                    .columns
                    .iter()
                    .zip(&widths)
                    .map(|(column, width)| {
                        pad(&truncate(&sanitize(row.get(column).unwrap_or("")), *width), *width)
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");
                lines.push(rendered);
            }
        }

        lines.push(String::new());
        lines.push("-".repeat(PAGE_WIDTH));
        lines.push(format!(
            "End of Report | Generated at {}",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        lines.push(String::new());

        Ok(lines.join("\n").into_bytes())
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn content_type(&self) -> &'static str {
        "text/plain"
    }
}

/// Replaces every non-ASCII or control character with `?`
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c
            } else {
                '?'
            }
        })
        .collect()
}

fn center(value: &str, width: usize) -> String {
    if value.len() >= width {
        return value.to_string();
    }
    let left = (width - value.len()) / 2;
    format!("{}{}", " ".repeat(left), value)
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn truncate(value: &str, width: usize) -> String {
    if value.len() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value[..width].to_string();
    }
    format!("{}...", &value[..width - 3])
}
