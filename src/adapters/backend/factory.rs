//! Storage backend factory
//!
//! This module provides factory functions to create the data provider,
//! report store and artifact store based on configuration.

use crate::adapters::backend::traits::{ArtifactStore, DataProvider, ReportStore};
use crate::adapters::fs::FsArtifactStore;
use crate::adapters::memory::{MemoryDataProvider, MemoryReportStore};
use crate::adapters::postgres::client::PostgresClient;
use crate::adapters::postgres::provider::PostgresDataProvider;
use crate::adapters::postgres::store::PostgresReportStore;
use crate::config::schema::{MedreportConfig, StorageBackend};
use crate::domain::errors::ReportError;
use crate::domain::Result;
use std::sync::Arc;

/// Create the data provider and report store for the configured backend
///
/// The PostgreSQL variants share one pooled client; the schema is
/// bootstrapped before the handles are returned.
///
/// # Errors
///
/// Returns an error if the backend cannot be initialized.
pub async fn create_provider_and_store(
    config: &MedreportConfig,
) -> Result<(Arc<dyn DataProvider>, Arc<dyn ReportStore>)> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_config = config.storage.postgres.as_ref().ok_or_else(|| {
                ReportError::Configuration(
                    "storage.postgres configuration is required when backend = 'postgres'"
                        .to_string(),
                )
            })?;

            tracing::info!(
                database = %pg_config.safe_description(),
                "Creating PostgreSQL backend"
            );
            let client = Arc::new(PostgresClient::new(pg_config.clone()).await?);
            client.ensure_schema().await?;

            Ok((
                Arc::new(PostgresDataProvider::new(client.clone())) as Arc<dyn DataProvider>,
                Arc::new(PostgresReportStore::new(client)) as Arc<dyn ReportStore>,
            ))
        }
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory backend with sample dataset");
            Ok((
                Arc::new(MemoryDataProvider::with_sample_data()) as Arc<dyn DataProvider>,
                Arc::new(MemoryReportStore::new()) as Arc<dyn ReportStore>,
            ))
        }
    }
}

/// Create the artifact store for the configured artifact root
pub fn create_artifact_store(config: &MedreportConfig) -> Arc<dyn ArtifactStore> {
    tracing::debug!(root = %config.storage.artifact_root, "Creating filesystem artifact store");
    Arc::new(FsArtifactStore::new(config.storage.artifact_root.clone()))
}
