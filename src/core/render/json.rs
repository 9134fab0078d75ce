//! JSON format strategy

use crate::core::render::{RenderStrategy, ReportMetadata};
use crate::domain::errors::RenderError;
use crate::domain::row::RowRecord;
use serde_json::{json, Map, Value};

/// Renders reports as a pretty-printed JSON document
///
/// The document has a `metadata` section (title, report type, generation
/// timestamp, filters, record count) and a `data` array of row objects.
/// `metadata.record_count` always equals `data.len()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStrategy;

impl RenderStrategy for JsonStrategy {
    fn generate(
        &self,
        rows: &[RowRecord],
        metadata: &ReportMetadata,
    ) -> Result<Vec<u8>, RenderError> {
        let data: Vec<Value> = rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for column in &metadata.columns {
                    object.insert(
                        column.clone(),
                        Value::String(row.get(column).unwrap_or("").to_string()),
                    );
                }
                Value::Object(object)
            })
            .collect();

        let document = json!({
            "metadata": {
                "title": metadata.title,
                "report_type": metadata.report_type,
                "description": metadata.description,
                "generated_at": metadata.generated_at.to_rfc3339(),
                "filters": metadata.filters.to_value(),
                "record_count": data.len(),
            },
            "data": data,
        });

        let mut bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| RenderError::Serialization(e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::test_support::{metadata, sample_rows};

    fn parse(bytes: Vec<u8>) -> Value {
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_record_count_matches_data_len() {
        let strategy = JsonStrategy;
        let doc = parse(
            strategy
                .generate(&sample_rows(), &metadata(&["id", "full_name", "active"]))
                .unwrap(),
        );

        let count = doc["metadata"]["record_count"].as_u64().unwrap();
        let data = doc["data"].as_array().unwrap();
        assert_eq!(count, data.len() as u64);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_roundtrip_preserves_values() {
        let strategy = JsonStrategy;
        let doc = parse(
            strategy
                .generate(&sample_rows(), &metadata(&["id", "full_name", "active"]))
                .unwrap(),
        );

        assert_eq!(doc["data"][0]["full_name"], "Grace Hopper");
        assert_eq!(doc["data"][1]["active"], "Inactive");
    }

    #[test]
    fn test_empty_rows_produce_empty_data_array() {
        let strategy = JsonStrategy;
        let doc = parse(
            strategy
                .generate(&[], &metadata(&["id", "patient_name"]))
                .unwrap(),
        );

        assert_eq!(doc["metadata"]["record_count"], 0);
        assert!(doc["data"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_metadata_fields_present() {
        let strategy = JsonStrategy;
        let doc = parse(
            strategy
                .generate(&[], &metadata(&["id"]))
                .unwrap(),
        );

        assert_eq!(doc["metadata"]["title"], "Patients Report");
        assert_eq!(doc["metadata"]["report_type"], "Patients");
        assert_eq!(doc["metadata"]["generated_at"], "2025-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_deterministic_output() {
        let strategy = JsonStrategy;
        let meta = metadata(&["id", "full_name", "active"]);
        let first = strategy.generate(&sample_rows(), &meta).unwrap();
        let second = strategy.generate(&sample_rows(), &meta).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extension_and_content_type() {
        let strategy = JsonStrategy;
        assert_eq!(strategy.file_extension(), "json");
        assert_eq!(strategy.content_type(), "application/json");
    }
}
