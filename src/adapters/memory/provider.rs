//! In-memory data provider

use crate::adapters::backend::traits::DataProvider;
use crate::adapters::memory::dataset::Dataset;
use crate::domain::errors::ReportError;
use crate::domain::filters::ReportFilters;
use crate::domain::report::ReportType;
use crate::domain::row::RowRecord;
use crate::domain::Result;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Data provider over an in-memory [`Dataset`]
///
/// Filter semantics match the PostgreSQL provider: unknown keys are
/// ignored, string matches are exact except `specialization` which is a
/// case-insensitive substring match.
pub struct MemoryDataProvider {
    dataset: Arc<RwLock<Dataset>>,
}

impl MemoryDataProvider {
    /// Provider over the given dataset
    pub fn new(dataset: Arc<RwLock<Dataset>>) -> Self {
        Self { dataset }
    }

    /// Provider over the seeded sample dataset
    pub fn with_sample_data() -> Self {
        Self::new(Arc::new(RwLock::new(Dataset::sample())))
    }

    /// Shared handle to the underlying dataset
    pub fn dataset(&self) -> Arc<RwLock<Dataset>> {
        self.dataset.clone()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Dataset>> {
        self.dataset
            .read()
            .map_err(|_| ReportError::Other("dataset lock poisoned".to_string()))
    }
}

#[async_trait]
impl DataProvider for MemoryDataProvider {
    async fn fetch_rows(
        &self,
        report_type: ReportType,
        filters: &ReportFilters,
    ) -> Result<Vec<RowRecord>> {
        let dataset = self.read()?;

        let rows = match report_type {
            ReportType::Patients => patients_rows(&dataset, filters),
            ReportType::Practitioners => practitioners_rows(&dataset, filters),
            ReportType::Appointments => appointments_rows(&dataset, filters),
            ReportType::Prescriptions => prescriptions_rows(&dataset, filters),
            ReportType::Invoices => invoices_rows(&dataset, filters),
            ReportType::ClinicalRecords => clinical_records_rows(&dataset, filters),
        };

        tracing::debug!(
            report_type = %report_type,
            rows = rows.len(),
            "Fetched rows from memory dataset"
        );

        Ok(rows)
    }
}

fn patients_rows(dataset: &Dataset, filters: &ReportFilters) -> Vec<RowRecord> {
    let mut matching: Vec<_> = dataset
        .patients
        .iter()
        .filter(|p| {
            if let Some(active) = filters.get_bool("active") {
                if p.active != active {
                    return false;
                }
            }
            if let Some(gender) = filters.get_str("gender") {
                if p.gender != gender {
                    return false;
                }
            }
            if let Some(from) = filters.get_datetime("created_from") {
                if p.created_at < from {
                    return false;
                }
            }
            if let Some(to) = filters.get_datetime("created_to") {
                if p.created_at > to {
                    return false;
                }
            }
            true
        })
        .collect();

    matching.sort_by_key(|p| p.created_at);
    matching.iter().map(|p| p.to_row()).collect()
}

fn practitioners_rows(dataset: &Dataset, filters: &ReportFilters) -> Vec<RowRecord> {
    let mut matching: Vec<_> = dataset
        .practitioners
        .iter()
        .filter(|p| {
            if let Some(active) = filters.get_bool("active") {
                if p.active != active {
                    return false;
                }
            }
            if let Some(specialization) = filters.get_str("specialization") {
                let needle = specialization.to_lowercase();
                let matches = p
                    .specialization
                    .as_ref()
                    .map(|s| s.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if !matches {
                    return false;
                }
            }
            true
        })
        .collect();

    matching.sort_by_key(|p| p.created_at);
    matching.iter().map(|p| p.to_row()).collect()
}

fn appointments_rows(dataset: &Dataset, filters: &ReportFilters) -> Vec<RowRecord> {
    let mut matching: Vec<_> = dataset
        .appointments
        .iter()
        .filter(|a| {
            if let Some(status) = filters.get_str("status") {
                if a.status != status {
                    return false;
                }
            }
            if let Some(from) = filters.get_datetime("start_date") {
                match a.start {
                    Some(start) if start >= from => {}
                    _ => return false,
                }
            }
            if let Some(to) = filters.get_datetime("end_date") {
                match a.start {
                    Some(start) if start <= to => {}
                    _ => return false,
                }
            }
            if let Some(patient_id) = filters.get_uuid("patient_id") {
                if a.patient_id != patient_id {
                    return false;
                }
            }
            if let Some(practitioner_id) = filters.get_uuid("practitioner_id") {
                if a.practitioner_id != practitioner_id {
                    return false;
                }
            }
            true
        })
        .collect();

    matching.sort_by_key(|a| (a.start, a.created_at));
    matching
        .iter()
        .map(|a| {
            a.to_row(
                dataset.patient_name(&a.patient_id).as_deref(),
                dataset.practitioner_name(&a.practitioner_id).as_deref(),
            )
        })
        .collect()
}

fn prescriptions_rows(dataset: &Dataset, filters: &ReportFilters) -> Vec<RowRecord> {
    let mut matching: Vec<_> = dataset
        .prescriptions
        .iter()
        .filter(|p| {
            if let Some(status) = filters.get_str("status") {
                if p.status != status {
                    return false;
                }
            }
            if let Some(patient_id) = filters.get_uuid("patient_id") {
                if p.patient_id != patient_id {
                    return false;
                }
            }
            if let Some(practitioner_id) = filters.get_uuid("practitioner_id") {
                if p.prescriber_id != practitioner_id {
                    return false;
                }
            }
            true
        })
        .collect();

    matching.sort_by_key(|p| p.created_at);
    matching
        .iter()
        .map(|p| {
            p.to_row(
                dataset.patient_name(&p.patient_id).as_deref(),
                dataset.practitioner_name(&p.prescriber_id).as_deref(),
            )
        })
        .collect()
}

fn invoices_rows(dataset: &Dataset, filters: &ReportFilters) -> Vec<RowRecord> {
    let mut matching: Vec<_> = dataset
        .invoices
        .iter()
        .filter(|i| {
            if let Some(status) = filters.get_str("status") {
                if i.status != status {
                    return false;
                }
            }
            if let Some(patient_id) = filters.get_uuid("patient_id") {
                if i.patient_id != patient_id {
                    return false;
                }
            }
            true
        })
        .collect();

    matching.sort_by_key(|i| i.created_at);
    matching
        .iter()
        .map(|i| i.to_row(dataset.patient_name(&i.patient_id).as_deref()))
        .collect()
}

fn clinical_records_rows(dataset: &Dataset, filters: &ReportFilters) -> Vec<RowRecord> {
    let mut matching: Vec<_> = dataset
        .clinical_records
        .iter()
        .filter(|r| {
            if let Some(patient_id) = filters.get_uuid("patient_id") {
                if r.patient_id != patient_id {
                    return false;
                }
            }
            if let Some(record_type) = filters.get_str("record_type") {
                if r.record_type.as_deref() != Some(record_type.as_str()) {
                    return false;
                }
            }
            true
        })
        .collect();

    matching.sort_by_key(|r| r.created_at);
    matching
        .iter()
        .map(|r| r.to_row(dataset.patient_name(&r.patient_id).as_deref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_patients_active_filter() {
        let provider = MemoryDataProvider::with_sample_data();

        let all = provider
            .fetch_rows(ReportType::Patients, &ReportFilters::new())
            .await
            .unwrap();
        assert_eq!(all.len(), 4);

        let active = provider
            .fetch_rows(
                ReportType::Patients,
                &ReportFilters::new().with("active", json!(true)),
            )
            .await
            .unwrap();
        assert_eq!(active.len(), 3);
        assert!(active.iter().all(|row| row.get("active") == Some("Active")));
    }

    #[tokio::test]
    async fn test_unknown_filter_keys_ignored() {
        let provider = MemoryDataProvider::with_sample_data();
        let rows = provider
            .fetch_rows(
                ReportType::Patients,
                &ReportFilters::new().with("favorite_color", json!("teal")),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_not_error() {
        let provider = MemoryDataProvider::with_sample_data();
        let rows = provider
            .fetch_rows(
                ReportType::Invoices,
                &ReportFilters::new().with("status", json!("void")),
            )
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_appointments_resolve_names() {
        let provider = MemoryDataProvider::with_sample_data();
        let rows = provider
            .fetch_rows(ReportType::Appointments, &ReportFilters::new())
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_ne!(row.get("patient_name"), Some("Unknown"));
            assert_ne!(row.get("practitioner_name"), Some("Unknown"));
        }
    }

    #[tokio::test]
    async fn test_appointments_status_filter() {
        let provider = MemoryDataProvider::with_sample_data();
        let rows = provider
            .fetch_rows(
                ReportType::Appointments,
                &ReportFilters::new().with("status", json!("booked")),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("status"), Some("booked"));
    }

    #[tokio::test]
    async fn test_practitioner_specialization_substring() {
        let provider = MemoryDataProvider::with_sample_data();
        let rows = provider
            .fetch_rows(
                ReportType::Practitioners,
                &ReportFilters::new().with("specialization", json!("cardio")),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("specialization"), Some("Cardiology"));
    }

    #[tokio::test]
    async fn test_rows_match_type_schema() {
        let provider = MemoryDataProvider::with_sample_data();
        for report_type in ReportType::ALL {
            let rows = provider
                .fetch_rows(report_type, &ReportFilters::new())
                .await
                .unwrap();
            for row in rows {
                let names: Vec<&str> = row.names().collect();
                assert_eq!(names, report_type.columns(), "{report_type}");
            }
        }
    }
}
