//! Integration tests for the service over the filesystem artifact store
//!
//! Uses a large generated dataset to exercise multi-page PDF output and
//! on-disk artifact layout.

use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use medreport::adapters::fs::FsArtifactStore;
use medreport::adapters::memory::{Dataset, MemoryDataProvider, MemoryReportStore};
use medreport::core::render::StrategyFactory;
use medreport::core::service::{GenerateRequest, ReportService};
use medreport::domain::records::Patient;
use medreport::domain::{OwnerId, ReportFilters, ReportStatus};
use std::sync::{Arc, RwLock};
use tempfile::TempDir;
use uuid::Uuid;

fn bulk_dataset(patient_count: usize) -> Dataset {
    let mut dataset = Dataset::new();
    for i in 0..patient_count {
        dataset.patients.push(Patient {
            id: Uuid::new_v4(),
            given_name: FirstName().fake(),
            family_name: LastName().fake(),
            gender: if i % 2 == 0 { "female" } else { "male" }.to_string(),
            birth_date: None,
            email: Some(SafeEmail().fake()),
            phone: None,
            active: i % 5 != 0,
            created_at: Utc::now(),
        });
    }
    dataset
}

fn service_with(dataset: Dataset, artifact_root: &TempDir) -> ReportService {
    let provider =
        MemoryDataProvider::new(Arc::new(RwLock::new(dataset)));
    ReportService::new(
        Arc::new(provider),
        Arc::new(MemoryReportStore::new()),
        Arc::new(FsArtifactStore::new(artifact_root.path())),
        StrategyFactory::with_builtins(),
    )
}

fn request(format: &str) -> GenerateRequest {
    GenerateRequest {
        report_type: "patients".to_string(),
        format: format.to_string(),
        filters: ReportFilters::new(),
        owner: OwnerId::new("batch").unwrap(),
        title: Some("Patient Census".to_string()),
        description: "Full census for audit".to_string(),
    }
}

#[tokio::test]
async fn test_artifact_lands_on_disk_under_dated_directory() {
    let dir = TempDir::new().unwrap();
    let service = service_with(bulk_dataset(10), &dir);

    let report = service.generate(request("csv")).await.unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert_eq!(report.record_count, 10);

    let path = dir.path().join(report.file_path.as_deref().unwrap());
    assert!(path.exists(), "{}", path.display());

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 11); // header + 10 rows
}

#[tokio::test]
async fn test_multi_page_pdf_for_bulk_dataset() {
    let dir = TempDir::new().unwrap();
    let service = service_with(bulk_dataset(150), &dir);

    let report = service.generate(request("pdf")).await.unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert_eq!(report.record_count, 150);

    let bytes = std::fs::read(dir.path().join(report.file_path.as_deref().unwrap())).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    // 150 rows cannot fit one page. A single-page document contains three
    // "/Page" occurrences (catalog, page tree, one page object); several
    // pages push the count well past that.
    let page_markers = bytes.windows(5).filter(|w| w == b"/Page").count();
    assert!(page_markers >= 6, "expected a multi-page PDF, got {page_markers} markers");
}

#[tokio::test]
async fn test_delete_removes_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let service = service_with(bulk_dataset(5), &dir);

    let report = service.generate(request("txt")).await.unwrap();
    let on_disk = dir.path().join(report.file_path.as_deref().unwrap());
    assert!(on_disk.exists());

    let owner = OwnerId::new("batch").unwrap();
    service.delete(&report.id, &owner).await.unwrap();
    assert!(!on_disk.exists());
}

#[tokio::test]
async fn test_title_and_description_flow_into_output() {
    let dir = TempDir::new().unwrap();
    let service = service_with(bulk_dataset(2), &dir);

    let report = service.generate(request("txt")).await.unwrap();
    assert_eq!(report.title, "Patient Census");

    let contents =
        std::fs::read_to_string(dir.path().join(report.file_path.as_deref().unwrap())).unwrap();
    assert!(contents.contains("Patient Census"));
    assert!(contents.contains("Full census for audit"));
}
