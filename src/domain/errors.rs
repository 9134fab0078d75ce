//! Domain error types
//!
//! This module defines the error hierarchy for medreport. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main medreport error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Requested report type is not recognized
    #[error("Invalid report type: {0}")]
    InvalidReportType(String),

    /// Requested output format is not registered with the factory
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A format strategy could not render the given rows
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Artifact storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Caller does not own the requested report
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Report or resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Strategy rendering errors
///
/// Errors that occur while a format strategy converts row records into
/// bytes. These errors don't expose third-party rendering types.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A field value cannot be represented in the target format
    #[error("Value for field '{field}' cannot be rendered: {reason}")]
    UnrepresentableValue { field: String, reason: String },

    /// Document layout failed (e.g. PDF page assembly)
    #[error("Layout failed: {0}")]
    Layout(String),

    /// Output encoding failed
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Serialization of the report document failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Artifact storage errors
///
/// Errors that occur when writing, reading or deleting report artifacts.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to write an artifact
    #[error("Failed to write artifact {path}: {message}")]
    WriteFailed { path: String, message: String },

    /// Failed to read an artifact back
    #[error("Failed to read artifact {path}: {message}")]
    ReadFailed { path: String, message: String },

    /// Failed to delete an artifact
    #[error("Failed to delete artifact {path}: {message}")]
    DeleteFailed { path: String, message: String },

    /// Artifact is missing where one was expected
    #[error("Artifact not found: {0}")]
    ArtifactMissing(String),

    /// Stored checksum does not match the artifact bytes
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_display() {
        let err = ReportError::InvalidReportType("observations".to_string());
        assert_eq!(err.to_string(), "Invalid report type: observations");
    }

    #[test]
    fn test_unsupported_format_names_format() {
        let err = ReportError::UnsupportedFormat("xml".to_string());
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_render_error_conversion() {
        let render_err = RenderError::Layout("page overflow".to_string());
        let err: ReportError = render_err.into();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn test_storage_error_conversion() {
        let storage_err = StorageError::ArtifactMissing("reports/patients/a.csv".to_string());
        let err: ReportError = storage_err.into();
        assert!(matches!(err, ReportError::Storage(_)));
    }

    #[test]
    fn test_checksum_mismatch_display() {
        let err = StorageError::ChecksumMismatch {
            path: "reports/invoices/x.json".to_string(),
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected aa"));
        assert!(msg.contains("got bb"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ReportError = io_err.into();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ReportError = json_err.into();
        assert!(matches!(err, ReportError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ReportError = toml_err.into();
        assert!(matches!(err, ReportError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_report_error_implements_std_error() {
        let err = ReportError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
