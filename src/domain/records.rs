//! Domain records backing the reports
//!
//! These are the flat entity shapes the data providers read from the
//! patient-management store and project into [`RowRecord`]s. Each projection
//! emits exactly the fields of the matching [`ReportType::columns`] schema,
//! in schema order.
//!
//! Display conventions (shared by every backend): optional fields render as
//! an empty string, unresolved foreign-key names render as `"Unknown"`,
//! booleans render as `Active`/`Inactive`, dates as ISO-8601.
//!
//! [`ReportType::columns`]: crate::domain::report::ReportType::columns

use crate::domain::row::{RowRecord, MISSING_VALUE};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Renders an optional string field
fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Renders an optional date as ISO-8601
fn opt_date(value: &Option<NaiveDate>) -> String {
    value
        .map(|d| d.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Renders an optional timestamp as RFC 3339
fn opt_datetime(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Renders an active flag as a status label
fn active_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

/// A patient demographic record
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// Full display name (`given family`)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
            .trim()
            .to_string()
    }

    /// Projects the patient into a report row
    pub fn to_row(&self) -> RowRecord {
        RowRecord::new()
            .with_field("id", self.id.to_string())
            .with_field("full_name", self.full_name())
            .with_field("gender", self.gender.clone())
            .with_field("birth_date", opt_date(&self.birth_date))
            .with_field("email", opt(&self.email))
            .with_field("phone", opt(&self.phone))
            .with_field("active", active_label(self.active))
            .with_field("created_at", self.created_at.to_rfc3339())
    }
}

/// A practitioner record
#[derive(Debug, Clone, PartialEq)]
pub struct Practitioner {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Practitioner {
    /// Full display name (`given family`)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
            .trim()
            .to_string()
    }

    /// Projects the practitioner into a report row
    pub fn to_row(&self) -> RowRecord {
        RowRecord::new()
            .with_field("id", self.id.to_string())
            .with_field("full_name", self.full_name())
            .with_field("specialization", opt(&self.specialization))
            .with_field("email", opt(&self.email))
            .with_field("phone", opt(&self.phone))
            .with_field("active", active_label(self.active))
    }
}

/// An appointment record
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub practitioner_id: Uuid,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub minutes_duration: Option<i32>,
    pub status: String,
    pub reason_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Projects the appointment into a report row
    ///
    /// Patient and practitioner display names are resolved by the caller;
    /// pass `None` for dangling references.
    pub fn to_row(&self, patient_name: Option<&str>, practitioner_name: Option<&str>) -> RowRecord {
        let duration = self
            .minutes_duration
            .map(|m| format!("{m} min"))
            .unwrap_or_else(|| MISSING_VALUE.to_string());

        RowRecord::new()
            .with_field("id", self.id.to_string())
            .with_field("patient_name", resolved(patient_name))
            .with_field("practitioner_name", resolved(practitioner_name))
            .with_field("start", opt_datetime(&self.start))
            .with_field("end", opt_datetime(&self.end))
            .with_field("duration", duration)
            .with_field("status", self.status.clone())
            .with_field("reason_code", opt(&self.reason_code))
    }
}

/// A medication prescription record
#[derive(Debug, Clone, PartialEq)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub prescriber_id: Uuid,
    pub medication_name: Option<String>,
    pub status: String,
    pub dosage_text: Option<String>,
    pub authored_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    /// Projects the prescription into a report row
    pub fn to_row(&self, patient_name: Option<&str>, prescriber_name: Option<&str>) -> RowRecord {
        RowRecord::new()
            .with_field("id", self.id.to_string())
            .with_field("medication", opt(&self.medication_name))
            .with_field("patient_name", resolved(patient_name))
            .with_field("prescriber_name", resolved(prescriber_name))
            .with_field("status", self.status.clone())
            .with_field("dosage", opt(&self.dosage_text))
            .with_field("authored_on", opt_datetime(&self.authored_on))
    }
}

/// A billing invoice record
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Gross total, pre-formatted as a decimal string ("120.50")
    pub total_gross: Option<String>,
    pub status: String,
    pub issue_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Projects the invoice into a report row
    pub fn to_row(&self, patient_name: Option<&str>) -> RowRecord {
        let total = self
            .total_gross
            .clone()
            .unwrap_or_else(|| "0".to_string());

        RowRecord::new()
            .with_field("id", self.id.to_string())
            .with_field("patient_name", resolved(patient_name))
            .with_field("total_amount", total)
            .with_field("status", self.status.clone())
            .with_field("issue_date", opt_date(&self.issue_date))
    }
}

/// A clinical history record
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub record_type: Option<String>,
    pub recorded_date: Option<NaiveDate>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClinicalRecord {
    /// Projects the clinical record into a report row
    pub fn to_row(&self, patient_name: Option<&str>) -> RowRecord {
        RowRecord::new()
            .with_field("id", self.id.to_string())
            .with_field("patient_name", resolved(patient_name))
            .with_field("record_type", opt(&self.record_type))
            .with_field("recorded_date", opt_date(&self.recorded_date))
            .with_field("title", opt(&self.title))
            .with_field("status", opt(&self.status))
    }
}

fn resolved(name: Option<&str>) -> String {
    name.map(str::to_string)
        .unwrap_or_else(|| crate::domain::row::UNKNOWN_REFERENCE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ReportType;

    fn sample_patient() -> Patient {
        Patient {
            id: Uuid::new_v4(),
            given_name: "Grace".to_string(),
            family_name: "Hopper".to_string(),
            gender: "female".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1906, 12, 9),
            email: Some("grace@example.org".to_string()),
            phone: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_patient_row_matches_schema() {
        let row = sample_patient().to_row();
        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, ReportType::Patients.columns());
    }

    #[test]
    fn test_patient_row_values() {
        let row = sample_patient().to_row();
        assert_eq!(row.get("full_name"), Some("Grace Hopper"));
        assert_eq!(row.get("birth_date"), Some("1906-12-09"));
        assert_eq!(row.get("phone"), Some(""));
        assert_eq!(row.get("active"), Some("Active"));
    }

    #[test]
    fn test_appointment_row_matches_schema() {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            practitioner_id: Uuid::new_v4(),
            start: Some(Utc::now()),
            end: None,
            minutes_duration: Some(30),
            status: "booked".to_string(),
            reason_code: None,
            created_at: Utc::now(),
        };
        let row = appointment.to_row(Some("Grace Hopper"), None);
        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, ReportType::Appointments.columns());
        assert_eq!(row.get("duration"), Some("30 min"));
        assert_eq!(row.get("practitioner_name"), Some("Unknown"));
        assert_eq!(row.get("end"), Some(""));
    }

    #[test]
    fn test_invoice_row_defaults_total() {
        let invoice = Invoice {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            total_gross: None,
            status: "draft".to_string(),
            issue_date: None,
            created_at: Utc::now(),
        };
        let row = invoice.to_row(None);
        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, ReportType::Invoices.columns());
        assert_eq!(row.get("total_amount"), Some("0"));
        assert_eq!(row.get("patient_name"), Some("Unknown"));
    }

    #[test]
    fn test_prescription_and_clinical_rows_match_schema() {
        let prescription = Prescription {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            prescriber_id: Uuid::new_v4(),
            medication_name: Some("Lisinopril 10mg".to_string()),
            status: "active".to_string(),
            dosage_text: Some("Once daily".to_string()),
            authored_on: Some(Utc::now()),
            created_at: Utc::now(),
        };
        let prescription_row = prescription.to_row(Some("A"), Some("B"));
        let names: Vec<&str> = prescription_row.names().collect();
        assert_eq!(names, ReportType::Prescriptions.columns());

        let record = ClinicalRecord {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            record_type: Some("allergy".to_string()),
            recorded_date: None,
            title: Some("Penicillin allergy".to_string()),
            status: Some("final".to_string()),
            created_at: Utc::now(),
        };
        let record_row = record.to_row(Some("A"));
        let names: Vec<&str> = record_row.names().collect();
        assert_eq!(names, ReportType::ClinicalRecords.columns());
    }
}
