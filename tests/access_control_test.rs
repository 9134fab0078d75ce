//! Integration tests for owner scoping on list, download and delete

use medreport::adapters::backend::traits::ArtifactStore;
use medreport::adapters::memory::{MemoryArtifactStore, MemoryDataProvider, MemoryReportStore};
use medreport::core::render::StrategyFactory;
use medreport::core::service::{GenerateRequest, ReportService};
use medreport::domain::{OwnerId, ReportError, ReportFilters, ReportQuery, ReportStatus};
use std::sync::Arc;

struct Harness {
    service: ReportService,
    artifacts: Arc<MemoryArtifactStore>,
}

fn harness() -> Harness {
    let artifacts = Arc::new(MemoryArtifactStore::new());
    let service = ReportService::new(
        Arc::new(MemoryDataProvider::with_sample_data()),
        Arc::new(MemoryReportStore::new()),
        artifacts.clone(),
        StrategyFactory::with_builtins(),
    );
    Harness { service, artifacts }
}

fn request(owner: &str) -> GenerateRequest {
    GenerateRequest {
        report_type: "patients".to_string(),
        format: "csv".to_string(),
        filters: ReportFilters::new(),
        owner: OwnerId::new(owner).unwrap(),
        title: None,
        description: String::new(),
    }
}

#[tokio::test]
async fn test_delete_by_non_owner_is_forbidden_and_leaves_everything() {
    let harness = harness();
    let report = harness.service.generate(request("alice")).await.unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert_eq!(harness.artifacts.len(), 1);

    let mallory = OwnerId::new("mallory").unwrap();
    let err = harness
        .service
        .delete(&report.id, &mallory)
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Forbidden(_)));

    // Report record and artifact are untouched
    let alice = OwnerId::new("alice").unwrap();
    let still_there = harness.service.get(&report.id, &alice).await.unwrap();
    assert_eq!(still_there.status, ReportStatus::Completed);
    assert_eq!(harness.artifacts.len(), 1);
    assert!(harness
        .artifacts
        .read(report.file_path.as_deref().unwrap())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_delete_by_owner_removes_record_and_artifact() {
    let harness = harness();
    let report = harness.service.generate(request("alice")).await.unwrap();
    let alice = OwnerId::new("alice").unwrap();

    harness.service.delete(&report.id, &alice).await.unwrap();

    let err = harness.service.get(&report.id, &alice).await.unwrap_err();
    assert!(matches!(err, ReportError::NotFound(_)));
    assert!(harness.artifacts.is_empty());
}

#[tokio::test]
async fn test_download_by_non_owner_is_forbidden() {
    let harness = harness();
    let report = harness.service.generate(request("alice")).await.unwrap();

    let mallory = OwnerId::new("mallory").unwrap();
    let err = harness
        .service
        .download(&report.id, &mallory)
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Forbidden(_)));
}

#[tokio::test]
async fn test_delete_unknown_report_is_not_found() {
    let harness = harness();
    let owner = OwnerId::new("alice").unwrap();
    let unknown = medreport::domain::ReportId::new();

    let err = harness.service.delete(&unknown, &owner).await.unwrap_err();
    assert!(matches!(err, ReportError::NotFound(_)));
}

#[tokio::test]
async fn test_list_only_shows_own_reports() {
    let harness = harness();
    harness.service.generate(request("alice")).await.unwrap();
    harness.service.generate(request("alice")).await.unwrap();
    harness.service.generate(request("bob")).await.unwrap();

    let alice = OwnerId::new("alice").unwrap();
    let bob = OwnerId::new("bob").unwrap();
    let carol = OwnerId::new("carol").unwrap();

    let alice_reports = harness
        .service
        .list(&alice, &ReportQuery::default())
        .await
        .unwrap();
    assert_eq!(alice_reports.len(), 2);
    assert!(alice_reports.iter().all(|r| r.owner == alice));

    assert_eq!(
        harness
            .service
            .list(&bob, &ReportQuery::default())
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(harness
        .service
        .list(&carol, &ReportQuery::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_list_filters_by_status_and_format() {
    let harness = harness();
    harness.service.generate(request("alice")).await.unwrap();

    let mut failed_request = request("alice");
    failed_request.format = "xml".to_string();
    harness.service.generate(failed_request).await.unwrap();

    let alice = OwnerId::new("alice").unwrap();

    let completed = harness
        .service
        .list(
            &alice,
            &ReportQuery {
                status: Some(ReportStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].format, "csv");

    let failed = harness
        .service
        .list(
            &alice,
            &ReportQuery {
                status: Some(ReportStatus::Failed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].format, "xml");
}
