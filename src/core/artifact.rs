//! Artifact naming and integrity
//!
//! Artifacts are stored under a path organized by report type and creation
//! date, and carry a SHA-256 checksum recorded at generation time and
//! verified on download.

use crate::domain::ids::ReportId;
use chrono::{DateTime, Datelike, Utc};
use sha2::{Digest, Sha256};

/// Builds the store-relative artifact path for a report
///
/// Layout: `reports/<report_type>/<YYYY>/<MM>/<DD>/` with a filename of
/// `<report_type>_<YYYYMMDD_HHMMSS>_<id8>.<ext>`. The short id suffix keeps
/// concurrent same-second generations from colliding.
///
/// # Examples
///
/// ```
/// use medreport::core::artifact::artifact_path;
/// use medreport::domain::ids::ReportId;
/// use chrono::{TimeZone, Utc};
///
/// let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
/// let path = artifact_path("patients", created, &ReportId::new(), "csv");
/// assert!(path.starts_with("reports/patients/2025/03/01/patients_20250301_093000_"));
/// assert!(path.ends_with(".csv"));
/// ```
pub fn artifact_path(
    report_type: &str,
    created_at: DateTime<Utc>,
    id: &ReportId,
    extension: &str,
) -> String {
    format!(
        "reports/{report_type}/{:04}/{:02}/{:02}/{report_type}_{}_{}.{extension}",
        created_at.year(),
        created_at.month(),
        created_at.day(),
        created_at.format("%Y%m%d_%H%M%S"),
        id.short(),
    )
}

/// SHA-256 checksum of artifact bytes
///
/// Returns a hex-encoded 64-character string.
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_artifact_path_layout() {
        let created = Utc.with_ymd_and_hms(2025, 12, 9, 23, 5, 41).unwrap();
        let id = ReportId::new();
        let path = artifact_path("clinical_records", created, &id, "pdf");

        assert!(path.starts_with("reports/clinical_records/2025/12/09/"));
        assert!(path.contains("clinical_records_20251209_230541_"));
        assert!(path.contains(&id.short()));
        assert!(path.ends_with(".pdf"));
    }

    #[test]
    fn test_artifact_path_distinct_for_same_second() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let a = artifact_path("patients", created, &ReportId::new(), "csv");
        let b = artifact_path("patients", created, &ReportId::new(), "csv");
        assert_ne!(a, b);
    }

    #[test]
    fn test_checksum_is_hex_sha256() {
        let checksum = checksum_bytes(b"hello");
        assert_eq!(checksum.len(), 64);
        assert_eq!(
            checksum,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_checksum_differs_for_different_bytes() {
        assert_ne!(checksum_bytes(b"a"), checksum_bytes(b"b"));
    }
}
