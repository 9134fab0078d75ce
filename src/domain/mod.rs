//! Domain models and types for medreport.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ReportId`], [`OwnerId`])
//! - **The report model** ([`Report`], [`ReportStatus`], [`ReportType`],
//!   [`ReportFormat`], [`ReportQuery`])
//! - **Row projections** ([`RowRecord`] and the domain records that produce
//!   them)
//! - **Error types** ([`ReportError`], [`RenderError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern to prevent mixing different id kinds:
//!
//! ```rust
//! use medreport::domain::{OwnerId, ReportId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let report_id = ReportId::new();
//! let owner = OwnerId::new("front-desk")?;
//!
//! // This won't compile - type safety prevents mixing ids
//! // let wrong: ReportId = owner;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Lifecycle invariants
//!
//! `Report` status transitions are monotonic
//! (pending -> processing -> completed | failed) and enforced by the
//! `mark_*` methods; a terminal report is immutable except for deletion.

pub mod errors;
pub mod filters;
pub mod ids;
pub mod records;
pub mod report;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use errors::{RenderError, ReportError, StorageError};
pub use filters::ReportFilters;
pub use ids::{OwnerId, ReportId};
pub use records::{Appointment, ClinicalRecord, Invoice, Patient, Practitioner, Prescription};
pub use report::{Report, ReportFormat, ReportQuery, ReportStatus, ReportType};
pub use result::Result;
pub use row::RowRecord;
