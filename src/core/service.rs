//! Report service - main orchestrator for report generation
//!
//! This module coordinates the generation workflow, managing the interaction
//! between the data provider, the strategy factory, the artifact store and
//! the report record store.

use crate::adapters::backend::traits::{ArtifactStore, DataProvider, ReportStore};
use crate::adapters::backend::{create_artifact_store, create_provider_and_store};
use crate::config::MedreportConfig;
use crate::core::artifact::{artifact_path, checksum_bytes};
use crate::core::render::pdf::PdfStrategy;
use crate::core::render::{RenderStrategy, ReportMetadata, StrategyFactory};
use crate::domain::errors::{ReportError, StorageError};
use crate::domain::filters::ReportFilters;
use crate::domain::ids::{OwnerId, ReportId};
use crate::domain::report::{Report, ReportQuery, ReportType};
use crate::domain::Result;
use chrono::Utc;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// One report generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Requested report type identifier
    pub report_type: String,

    /// Requested format identifier
    pub format: String,

    /// Caller-supplied filters, passed through to the data provider
    pub filters: ReportFilters,

    /// Owner of the resulting report
    pub owner: OwnerId,

    /// Optional title; defaults to `"<Type> Report"`
    pub title: Option<String>,

    /// Optional description
    pub description: String,
}

/// A downloaded artifact with its serving metadata
#[derive(Debug, Clone)]
pub struct ArtifactDownload {
    /// Suggested filename
    pub filename: String,

    /// MIME content type
    pub content_type: String,

    /// Artifact bytes
    pub bytes: Vec<u8>,
}

/// Report service
///
/// Generation runs synchronously within the calling task: fetch, render and
/// persist complete (or fail) before `generate` returns. Concurrent
/// generations are independent; the only shared state is the backing store,
/// which provides per-record atomicity.
pub struct ReportService {
    provider: Arc<dyn DataProvider>,
    reports: Arc<dyn ReportStore>,
    artifacts: Arc<dyn ArtifactStore>,
    factory: RwLock<StrategyFactory>,
}

impl ReportService {
    /// Create a service from explicit collaborators
    pub fn new(
        provider: Arc<dyn DataProvider>,
        reports: Arc<dyn ReportStore>,
        artifacts: Arc<dyn ArtifactStore>,
        factory: StrategyFactory,
    ) -> Self {
        Self {
            provider,
            reports,
            artifacts,
            factory: RwLock::new(factory),
        }
    }

    /// Create a service from configuration
    ///
    /// Builds the configured backend via the adapter factory and re-registers
    /// the PDF strategy with the deployment's branding.
    pub async fn from_config(config: &MedreportConfig) -> Result<Self> {
        let (provider, reports) = create_provider_and_store(config).await?;
        let artifacts = create_artifact_store(config);

        let mut factory = StrategyFactory::with_builtins();
        factory.register(
            "pdf",
            Arc::new(PdfStrategy::new(
                config.branding.clinic_name.clone(),
                config.branding.footer_text.clone(),
            )),
        );

        Ok(Self::new(provider, reports, artifacts, factory))
    }

    /// Generate a report
    ///
    /// Creates the report record in `pending`, then runs the pipeline:
    /// validate type, fetch rows, resolve strategy, render, persist the
    /// artifact, and mark the record `completed`.
    ///
    /// Every generation-time error (invalid type, unsupported format,
    /// render or storage failure) is recorded on the report, which is left
    /// in `failed` and returned as `Ok` - the caller always receives a
    /// `Report`. Only failures to create or persist the record itself
    /// surface as `Err`.
    pub async fn generate(&self, request: GenerateRequest) -> Result<Report> {
        let mut report = Report::new(
            request.owner,
            request.report_type,
            request.format,
            request.filters,
            request.title,
            request.description,
        );
        self.reports.insert(&report).await?;

        tracing::info!(
            report_id = %report.id,
            report_type = %report.report_type,
            format = %report.format,
            owner = %report.owner,
            "Report generation started"
        );

        match self.run_pipeline(&mut report).await {
            Ok(()) => {
                tracing::info!(
                    report_id = %report.id,
                    record_count = report.record_count,
                    file_size = report.file_size,
                    "Report generation completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    report_id = %report.id,
                    error = %e,
                    "Report generation failed"
                );
                report.mark_failed(e.to_string())?;
                self.reports.update(&report).await?;
            }
        }

        Ok(report)
    }

    /// The fallible stretch of the generation workflow
    async fn run_pipeline(&self, report: &mut Report) -> Result<()> {
        report.mark_processing()?;
        self.reports.update(report).await?;

        let report_type = ReportType::from_str(&report.report_type)?;
        let rows = self
            .provider
            .fetch_rows(report_type, &report.filters)
            .await?;
        let strategy = self.strategy_for(&report.format)?;

        let metadata = ReportMetadata {
            title: report.title.clone(),
            report_type: report_type.display_name().to_string(),
            description: report.description.clone(),
            generated_at: Utc::now(),
            filters: report.filters.clone(),
            columns: report_type
                .columns()
                .iter()
                .map(|c| c.to_string())
                .collect(),
        };

        let bytes = strategy.generate(&rows, &metadata)?;

        let path = artifact_path(
            report_type.as_str(),
            report.created_at,
            &report.id,
            strategy.file_extension(),
        );
        self.artifacts.write(&path, &bytes).await?;

        let checksum = checksum_bytes(&bytes);
        report.mark_completed(path, bytes.len() as u64, checksum, rows.len() as u64)?;
        self.reports.update(report).await?;
        Ok(())
    }

    /// Fetch one report, enforcing ownership
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is unknown, `Forbidden` when the report
    /// belongs to a different owner.
    pub async fn get(&self, id: &ReportId, owner: &OwnerId) -> Result<Report> {
        let report = self
            .reports
            .get(id)
            .await?
            .ok_or_else(|| ReportError::NotFound(format!("Report {id}")))?;

        if &report.owner != owner {
            return Err(ReportError::Forbidden(format!(
                "Report {id} belongs to another owner"
            )));
        }
        Ok(report)
    }

    /// List the owner's reports, newest first
    pub async fn list(&self, owner: &OwnerId, query: &ReportQuery) -> Result<Vec<Report>> {
        self.reports.list(owner, query).await
    }

    /// Download a report's artifact
    ///
    /// Verifies the stored checksum before returning the bytes. The content
    /// type comes from the currently registered strategy for the report's
    /// format, falling back to `application/octet-stream` when the format
    /// is no longer registered.
    pub async fn download(&self, id: &ReportId, owner: &OwnerId) -> Result<ArtifactDownload> {
        let report = self.get(id, owner).await?;

        let path = report.file_path.clone().ok_or_else(|| {
            ReportError::NotFound(format!("Report {id} has no artifact (status: {})", report.status))
        })?;

        let bytes = self.artifacts.read(&path).await?;

        if let Some(expected) = &report.checksum {
            let actual = checksum_bytes(&bytes);
            if &actual != expected {
                return Err(StorageError::ChecksumMismatch {
                    path,
                    expected: expected.clone(),
                    actual,
                }
                .into());
            }
        }

        let content_type = self
            .strategy_for(&report.format)
            .map(|s| s.content_type().to_string())
            .unwrap_or_else(|_| "application/octet-stream".to_string());

        Ok(ArtifactDownload {
            filename: report.filename(),
            content_type,
            bytes,
        })
    }

    /// Delete a report and its artifact
    ///
    /// # Errors
    ///
    /// `NotFound` when the id is unknown, `Forbidden` on owner mismatch (the
    /// report and artifact are left untouched).
    pub async fn delete(&self, id: &ReportId, owner: &OwnerId) -> Result<()> {
        let report = self.get(id, owner).await?;

        if let Some(path) = &report.file_path {
            self.artifacts.delete(path).await?;
        }
        self.reports.delete(id).await?;

        tracing::info!(report_id = %id, owner = %owner, "Report deleted");
        Ok(())
    }

    /// Register a render strategy, adding or replacing the format
    pub fn register_strategy(&self, format_id: &str, strategy: Arc<dyn RenderStrategy>) {
        if let Ok(mut factory) = self.factory.write() {
            factory.register(format_id, strategy);
        }
    }

    /// Registered format identifiers
    pub fn supported_formats(&self) -> Vec<String> {
        self.factory
            .read()
            .map(|f| f.supported_formats())
            .unwrap_or_default()
    }

    /// Known report type identifiers
    pub fn report_types(&self) -> Vec<&'static str> {
        ReportType::ALL.iter().map(|t| t.as_str()).collect()
    }

    fn strategy_for(&self, format_id: &str) -> Result<Arc<dyn RenderStrategy>> {
        self.factory
            .read()
            .map_err(|_| ReportError::Other("strategy factory lock poisoned".to_string()))?
            .create(format_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryArtifactStore, MemoryDataProvider, MemoryReportStore};
    use crate::domain::report::ReportStatus;
    use serde_json::json;

    fn service() -> ReportService {
        ReportService::new(
            Arc::new(MemoryDataProvider::with_sample_data()),
            Arc::new(MemoryReportStore::new()),
            Arc::new(MemoryArtifactStore::new()),
            StrategyFactory::with_builtins(),
        )
    }

    fn request(report_type: &str, format: &str) -> GenerateRequest {
        GenerateRequest {
            report_type: report_type.to_string(),
            format: format.to_string(),
            filters: ReportFilters::new(),
            owner: OwnerId::new("clerk").unwrap(),
            title: None,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_generate_completes() {
        let service = service();
        let report = service.generate(request("patients", "csv")).await.unwrap();

        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.record_count, 4);
        assert!(report.file_path.is_some());
        assert!(report.file_size.unwrap() > 0);
        assert!(report.checksum.is_some());
        assert!(report.completed_at.is_some());
        assert!(report.error_message.is_none());
    }

    #[tokio::test]
    async fn test_generate_invalid_type_fails_report() {
        let service = service();
        let report = service
            .generate(request("observations", "csv"))
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Failed);
        assert!(report
            .error_message
            .as_deref()
            .unwrap()
            .contains("observations"));
        assert!(report.file_path.is_none());
    }

    #[tokio::test]
    async fn test_generate_unsupported_format_fails_report() {
        let service = service();
        let report = service.generate(request("patients", "xml")).await.unwrap();

        assert_eq!(report.status, ReportStatus::Failed);
        assert!(report.error_message.as_deref().unwrap().contains("xml"));
    }

    #[tokio::test]
    async fn test_failed_report_is_persisted() {
        let service = service();
        let report = service.generate(request("patients", "xml")).await.unwrap();

        let owner = OwnerId::new("clerk").unwrap();
        let fetched = service.get(&report.id, &owner).await.unwrap();
        assert_eq!(fetched.status, ReportStatus::Failed);
    }

    #[tokio::test]
    async fn test_download_roundtrip_and_checksum() {
        let service = service();
        let report = service.generate(request("patients", "json")).await.unwrap();
        let owner = OwnerId::new("clerk").unwrap();

        let download = service.download(&report.id, &owner).await.unwrap();
        assert_eq!(download.content_type, "application/json");
        assert_eq!(
            checksum_bytes(&download.bytes),
            report.checksum.unwrap()
        );
        assert!(download.filename.ends_with(".json"));
    }

    #[tokio::test]
    async fn test_download_without_artifact_is_not_found() {
        let service = service();
        let report = service.generate(request("patients", "xml")).await.unwrap();
        let owner = OwnerId::new("clerk").unwrap();

        let err = service.download(&report.id, &owner).await.unwrap_err();
        assert!(matches!(err, ReportError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_enforces_owner() {
        let service = service();
        let report = service.generate(request("patients", "csv")).await.unwrap();

        let stranger = OwnerId::new("stranger").unwrap();
        let err = service.get(&report.id, &stranger).await.unwrap_err();
        assert!(matches!(err, ReportError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let service = service();
        let report = service.generate(request("invoices", "csv")).await.unwrap();
        let owner = OwnerId::new("clerk").unwrap();

        service.delete(&report.id, &owner).await.unwrap();
        let err = service.get(&report.id, &owner).await.unwrap_err();
        assert!(matches!(err, ReportError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_filters_reach_provider() {
        let service = service();
        let mut request = request("patients", "csv");
        request.filters = ReportFilters::new().with("active", json!(true));

        let report = service.generate(request).await.unwrap();
        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.record_count, 3);
    }

    #[tokio::test]
    async fn test_registered_strategy_is_used() {
        let service = service();
        assert!(!service.supported_formats().contains(&"xml".to_string()));

        struct XmlishStrategy;
        impl RenderStrategy for XmlishStrategy {
            fn generate(
                &self,
                rows: &[crate::domain::row::RowRecord],
                _metadata: &ReportMetadata,
            ) -> std::result::Result<Vec<u8>, crate::domain::errors::RenderError> {
                Ok(format!("<rows count=\"{}\"/>", rows.len()).into_bytes())
            }
            fn file_extension(&self) -> &'static str {
                "xml"
            }
            fn content_type(&self) -> &'static str {
                "application/xml"
            }
        }

        service.register_strategy("xml", Arc::new(XmlishStrategy));
        let report = service.generate(request("patients", "xml")).await.unwrap();
        assert_eq!(report.status, ReportStatus::Completed);
        assert!(report.file_path.as_deref().unwrap().ends_with(".xml"));
    }
}
