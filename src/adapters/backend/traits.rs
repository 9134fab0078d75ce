//! Storage abstraction traits
//!
//! This module defines the traits that storage backends must implement to
//! work with the report service.

use crate::domain::filters::ReportFilters;
use crate::domain::ids::{OwnerId, ReportId};
use crate::domain::report::{Report, ReportQuery, ReportType};
use crate::domain::row::RowRecord;
use crate::domain::Result;
use async_trait::async_trait;

/// Read-only access to the domain records backing reports
///
/// Implementations project matching records into display-ready rows using
/// the column schema of the requested [`ReportType`]. Unknown filter keys
/// are ignored; an empty result is `Ok(vec![])`, never an error.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the rows for one report
    ///
    /// Rows are ordered by the record's creation (or start) timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures; no matches is not an
    /// error.
    async fn fetch_rows(
        &self,
        report_type: ReportType,
        filters: &ReportFilters,
    ) -> Result<Vec<RowRecord>>;
}

/// Persistence for report metadata records
///
/// Each report row is only ever written by the request that owns it, so
/// implementations need per-record atomicity but no cross-report
/// coordination.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Inserts a new report record
    ///
    /// # Errors
    ///
    /// Returns an error if a record with the same id already exists or the
    /// write fails.
    async fn insert(&self, report: &Report) -> Result<()>;

    /// Replaces an existing report record
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the record does not exist.
    async fn update(&self, report: &Report) -> Result<()>;

    /// Fetches a report by id
    ///
    /// Returns `Ok(None)` when the id is unknown.
    async fn get(&self, id: &ReportId) -> Result<Option<Report>>;

    /// Lists an owner's reports, newest first, applying the query constraints
    async fn list(&self, owner: &OwnerId, query: &ReportQuery) -> Result<Vec<Report>>;

    /// Deletes a report record
    ///
    /// Returns `true` when a record was removed, `false` when the id was
    /// unknown.
    async fn delete(&self, id: &ReportId) -> Result<bool>;
}

/// Storage for rendered report artifacts
///
/// Paths are store-relative (see [`artifact_path`]). Artifacts are written
/// once per report and removed when the report is deleted.
///
/// [`artifact_path`]: crate::core::artifact::artifact_path
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Writes an artifact
    ///
    /// # Errors
    ///
    /// Returns a `Storage` error if the write fails.
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Reads an artifact back
    ///
    /// # Errors
    ///
    /// Returns a `Storage` error if the artifact is missing or unreadable.
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Deletes an artifact
    ///
    /// Deleting a missing artifact is not an error: the report record is
    /// the source of truth and its removal must not be blocked by an
    /// already-absent file.
    async fn delete(&self, path: &str) -> Result<()>;
}
