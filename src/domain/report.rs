//! Report model and lifecycle
//!
//! A `Report` tracks one generation request from creation through its
//! terminal state. Status transitions are monotonic
//! (pending -> processing -> completed | failed) and enforced here; terminal
//! reports are immutable except for deletion.

use crate::domain::errors::ReportError;
use crate::domain::filters::ReportFilters;
use crate::domain::ids::{OwnerId, ReportId};
use crate::domain::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known report types
///
/// The closed set of domain record collections a report can be built from.
/// Requests carry the identifier as a string; parsing it into this enum is
/// the service's validation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Patients,
    Practitioners,
    Appointments,
    Prescriptions,
    Invoices,
    ClinicalRecords,
}

impl ReportType {
    /// All report types, in display order
    pub const ALL: [ReportType; 6] = [
        ReportType::Patients,
        ReportType::Practitioners,
        ReportType::Appointments,
        ReportType::Prescriptions,
        ReportType::Invoices,
        ReportType::ClinicalRecords,
    ];

    /// Stable identifier used in requests, filenames and persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Patients => "patients",
            ReportType::Practitioners => "practitioners",
            ReportType::Appointments => "appointments",
            ReportType::Prescriptions => "prescriptions",
            ReportType::Invoices => "invoices",
            ReportType::ClinicalRecords => "clinical_records",
        }
    }

    /// Human-readable name used in titles and headers
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportType::Patients => "Patients",
            ReportType::Practitioners => "Practitioners",
            ReportType::Appointments => "Appointments",
            ReportType::Prescriptions => "Prescriptions",
            ReportType::Invoices => "Invoices",
            ReportType::ClinicalRecords => "Clinical Records",
        }
    }

    /// Column schema of the rows this report type produces
    ///
    /// The data provider emits rows with exactly these fields in exactly
    /// this order; strategies use the schema to render headers even when
    /// the result set is empty.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportType::Patients => &[
                "id",
                "full_name",
                "gender",
                "birth_date",
                "email",
                "phone",
                "active",
                "created_at",
            ],
            ReportType::Practitioners => &[
                "id",
                "full_name",
                "specialization",
                "email",
                "phone",
                "active",
            ],
            ReportType::Appointments => &[
                "id",
                "patient_name",
                "practitioner_name",
                "start",
                "end",
                "duration",
                "status",
                "reason_code",
            ],
            ReportType::Prescriptions => &[
                "id",
                "medication",
                "patient_name",
                "prescriber_name",
                "status",
                "dosage",
                "authored_on",
            ],
            ReportType::Invoices => &["id", "patient_name", "total_amount", "status", "issue_date"],
            ReportType::ClinicalRecords => &[
                "id",
                "patient_name",
                "record_type",
                "recorded_date",
                "title",
                "status",
            ],
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "patients" => Ok(ReportType::Patients),
            "practitioners" => Ok(ReportType::Practitioners),
            "appointments" => Ok(ReportType::Appointments),
            "prescriptions" => Ok(ReportType::Prescriptions),
            "invoices" => Ok(ReportType::Invoices),
            "clinical_records" => Ok(ReportType::ClinicalRecords),
            other => Err(ReportError::InvalidReportType(other.to_string())),
        }
    }
}

/// Built-in output formats
///
/// The factory is seeded with one strategy per variant; additional format
/// identifiers can be registered at runtime, so `Report` rows store the
/// requested identifier as a string rather than this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Csv,
    Txt,
    Json,
}

impl ReportFormat {
    /// All built-in formats
    pub const ALL: [ReportFormat; 4] = [
        ReportFormat::Pdf,
        ReportFormat::Csv,
        ReportFormat::Txt,
        ReportFormat::Json,
    ];

    /// Stable identifier used in requests and persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Csv => "csv",
            ReportFormat::Txt => "txt",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ReportStatus {
    /// Stable identifier used in persistence and list filters
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Processing => "processing",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
        }
    }

    /// True for completed and failed
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Completed | ReportStatus::Failed)
    }

    /// Whether the monotonic lifecycle permits moving to `next`
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (ReportStatus::Pending, ReportStatus::Processing)
                | (ReportStatus::Pending, ReportStatus::Failed)
                | (ReportStatus::Processing, ReportStatus::Completed)
                | (ReportStatus::Processing, ReportStatus::Failed)
        )
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "processing" => Ok(ReportStatus::Processing),
            "completed" => Ok(ReportStatus::Completed),
            "failed" => Ok(ReportStatus::Failed),
            other => Err(ReportError::Validation(format!(
                "Unknown report status: {other}"
            ))),
        }
    }
}

/// Persisted metadata about one generated report
///
/// Created in `pending` at request time, owned exclusively by the service
/// during generation, immutable once terminal except for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report identity
    pub id: ReportId,

    /// Owner of the report; list/download/delete are scoped to this owner
    pub owner: OwnerId,

    /// Requested report type identifier (may name an unknown type when the
    /// request failed validation)
    pub report_type: String,

    /// Requested format identifier
    pub format: String,

    /// Lifecycle state
    pub status: ReportStatus,

    /// Caller-supplied filters, stored verbatim
    pub filters: ReportFilters,

    /// Report title
    pub title: String,

    /// Optional description
    pub description: String,

    /// Artifact path relative to the artifact store root; present iff completed
    pub file_path: Option<String>,

    /// Artifact size in bytes; present iff completed
    pub file_size: Option<u64>,

    /// SHA-256 checksum of the artifact bytes; present iff completed
    pub checksum: Option<String>,

    /// Number of rows in the rendered report
    pub record_count: u64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,

    /// Completion timestamp; set only on success
    pub completed_at: Option<DateTime<Utc>>,

    /// Failure detail; set only on failure
    pub error_message: Option<String>,
}

impl Report {
    /// Creates a new pending report for a generation request
    ///
    /// When `title` is `None` a default of `"<Type> Report"` is derived from
    /// the requested type identifier.
    pub fn new(
        owner: OwnerId,
        report_type: impl Into<String>,
        format: impl Into<String>,
        filters: ReportFilters,
        title: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        let report_type = report_type.into();
        let title = title.unwrap_or_else(|| default_title(&report_type));
        let now = Utc::now();

        Self {
            id: ReportId::new(),
            owner,
            report_type,
            format: format.into().to_lowercase(),
            status: ReportStatus::Pending,
            filters,
            title,
            description: description.into(),
            file_path: None,
            file_size: None,
            checksum: None,
            record_count: 0,
            created_at: now,
            updated_at: now,
            completed_at: None,
            error_message: None,
        }
    }

    /// Marks the report as processing
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the report is not pending.
    pub fn mark_processing(&mut self) -> Result<()> {
        self.transition(ReportStatus::Processing)
    }

    /// Marks the report as completed with its artifact details
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the report is not processing.
    pub fn mark_completed(
        &mut self,
        file_path: impl Into<String>,
        file_size: u64,
        checksum: impl Into<String>,
        record_count: u64,
    ) -> Result<()> {
        self.transition(ReportStatus::Completed)?;
        self.file_path = Some(file_path.into());
        self.file_size = Some(file_size);
        self.checksum = Some(checksum.into());
        self.record_count = record_count;
        self.completed_at = Some(self.updated_at);
        Ok(())
    }

    /// Marks the report as failed with a human-readable error message
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the report is already terminal.
    pub fn mark_failed(&mut self, error_message: impl Into<String>) -> Result<()> {
        self.transition(ReportStatus::Failed)?;
        self.error_message = Some(error_message.into());
        Ok(())
    }

    /// True once the report reached completed or failed
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Filename of the artifact
    ///
    /// Derived from the stored path when present, otherwise from the
    /// creation timestamp and requested type/format.
    pub fn filename(&self) -> String {
        if let Some(path) = &self.file_path {
            if let Some(name) = path.rsplit('/').next() {
                return name.to_string();
            }
        }
        format!(
            "{}_{}.{}",
            self.report_type,
            self.created_at.format("%Y%m%d_%H%M%S"),
            self.format
        )
    }

    fn transition(&mut self, next: ReportStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(ReportError::Validation(format!(
                "Invalid status transition: {} -> {next}",
                self.status
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Derives the default report title from a type identifier
/// (`clinical_records` -> `Clinical Records Report`)
fn default_title(report_type: &str) -> String {
    let name = report_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{name} Report")
}

/// Optional constraints for listing reports
///
/// All fields are conjunctive; `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    /// Restrict to one report type identifier
    pub report_type: Option<String>,

    /// Restrict to one format identifier
    pub format: Option<String>,

    /// Restrict to one lifecycle state
    pub status: Option<ReportStatus>,

    /// Restrict to reports created at or after this instant
    pub created_from: Option<DateTime<Utc>>,

    /// Restrict to reports created at or before this instant
    pub created_to: Option<DateTime<Utc>>,
}

impl ReportQuery {
    /// Whether a report satisfies every set constraint
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(report_type) = &self.report_type {
            if &report.report_type != report_type {
                return false;
            }
        }
        if let Some(format) = &self.format {
            if &report.format != format {
                return false;
            }
        }
        if let Some(status) = self.status {
            if report.status != status {
                return false;
            }
        }
        if let Some(from) = self.created_from {
            if report.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if report.created_at > to {
                return false;
            }
        }
        true
    }
}
