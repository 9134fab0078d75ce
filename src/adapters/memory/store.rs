//! In-memory report and artifact stores

use crate::adapters::backend::traits::{ArtifactStore, ReportStore};
use crate::domain::errors::{ReportError, StorageError};
use crate::domain::ids::{OwnerId, ReportId};
use crate::domain::report::{Report, ReportQuery};
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Report store backed by a `HashMap`
///
/// Per-record atomicity comes from the lock; there is no cross-report
/// coordination, matching the service's concurrency model.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<ReportId, Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err() -> ReportError {
        ReportError::Other("report store lock poisoned".to_string())
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn insert(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.write().map_err(|_| Self::lock_err())?;
        if reports.contains_key(&report.id) {
            return Err(ReportError::Database(format!(
                "Report {} already exists",
                report.id
            )));
        }
        reports.insert(report.id, report.clone());
        Ok(())
    }

    async fn update(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.write().map_err(|_| Self::lock_err())?;
        match reports.get_mut(&report.id) {
            Some(existing) => {
                *existing = report.clone();
                Ok(())
            }
            None => Err(ReportError::NotFound(format!("Report {}", report.id))),
        }
    }

    async fn get(&self, id: &ReportId) -> Result<Option<Report>> {
        let reports = self.reports.read().map_err(|_| Self::lock_err())?;
        Ok(reports.get(id).cloned())
    }

    async fn list(&self, owner: &OwnerId, query: &ReportQuery) -> Result<Vec<Report>> {
        let reports = self.reports.read().map_err(|_| Self::lock_err())?;
        let mut matching: Vec<Report> = reports
            .values()
            .filter(|report| &report.owner == owner && query.matches(report))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn delete(&self, id: &ReportId) -> Result<bool> {
        let mut reports = self.reports.write().map_err(|_| Self::lock_err())?;
        Ok(reports.remove(id).is_some())
    }
}

/// Artifact store backed by a `HashMap`, for tests and the memory backend
#[derive(Default)]
pub struct MemoryArtifactStore {
    artifacts: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts
    pub fn len(&self) -> usize {
        self.artifacts.read().map(|a| a.len()).unwrap_or(0)
    }

    /// True when no artifacts are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_err() -> ReportError {
        ReportError::Other("artifact store lock poisoned".to_string())
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let mut artifacts = self.artifacts.write().map_err(|_| Self::lock_err())?;
        artifacts.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let artifacts = self.artifacts.read().map_err(|_| Self::lock_err())?;
        artifacts
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::ArtifactMissing(path.to_string()).into())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let mut artifacts = self.artifacts.write().map_err(|_| Self::lock_err())?;
        artifacts.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::ReportFilters;
    use crate::domain::report::ReportStatus;

    fn sample_report(owner: &str) -> Report {
        Report::new(
            OwnerId::new(owner).unwrap(),
            "patients",
            "csv",
            ReportFilters::new(),
            None,
            "",
        )
    }

    #[tokio::test]
    async fn test_insert_get_roundtrip() {
        let store = MemoryReportStore::new();
        let report = sample_report("clerk");
        store.insert(&report).await.unwrap();

        let fetched = store.get(&report.id).await.unwrap().unwrap();
        assert_eq!(fetched, report);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = MemoryReportStore::new();
        let report = sample_report("clerk");
        store.insert(&report).await.unwrap();
        assert!(store.insert(&report).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryReportStore::new();
        let report = sample_report("clerk");
        let err = store.update(&report).await.unwrap_err();
        assert!(matches!(err, ReportError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_scoped_to_owner_and_sorted() {
        let store = MemoryReportStore::new();
        let first = sample_report("clerk");
        let mut second = sample_report("clerk");
        second.created_at = second.created_at + chrono::Duration::seconds(5);
        let other = sample_report("someone-else");

        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();
        store.insert(&other).await.unwrap();

        let listed = store
            .list(&OwnerId::new("clerk").unwrap(), &ReportQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
    }

    #[tokio::test]
    async fn test_list_applies_query() {
        let store = MemoryReportStore::new();
        let mut completed = sample_report("clerk");
        completed.mark_processing().unwrap();
        completed.mark_completed("reports/patients/a.csv", 1, "x", 1).unwrap();
        let pending = sample_report("clerk");

        store.insert(&completed).await.unwrap();
        store.insert(&pending).await.unwrap();

        let query = ReportQuery {
            status: Some(ReportStatus::Completed),
            ..Default::default()
        };
        let listed = store
            .list(&OwnerId::new("clerk").unwrap(), &query)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, completed.id);
    }

    #[tokio::test]
    async fn test_delete_returns_whether_removed() {
        let store = MemoryReportStore::new();
        let report = sample_report("clerk");
        store.insert(&report).await.unwrap();

        assert!(store.delete(&report.id).await.unwrap());
        assert!(!store.delete(&report.id).await.unwrap());
        assert!(store.get(&report.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_artifact_store_roundtrip() {
        let store = MemoryArtifactStore::new();
        store.write("reports/a.csv", b"id\n1\n").await.unwrap();
        assert_eq!(store.read("reports/a.csv").await.unwrap(), b"id\n1\n");

        store.delete("reports/a.csv").await.unwrap();
        let err = store.read("reports/a.csv").await.unwrap_err();
        assert!(matches!(
            err,
            ReportError::Storage(StorageError::ArtifactMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_artifact_delete_missing_is_ok() {
        let store = MemoryArtifactStore::new();
        assert!(store.delete("reports/never-existed.pdf").await.is_ok());
    }
}
