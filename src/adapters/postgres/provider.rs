//! PostgreSQL data provider
//!
//! Translates report filters into parameterized SQL per report type and
//! projects the result rows through the shared domain-record projections,
//! so display formatting is identical across backends.

use crate::adapters::backend::traits::DataProvider;
use crate::adapters::postgres::client::PostgresClient;
use crate::domain::filters::ReportFilters;
use crate::domain::records::{
    Appointment, ClinicalRecord, Invoice, Patient, Practitioner, Prescription,
};
use crate::domain::report::ReportType;
use crate::domain::row::RowRecord;
use crate::domain::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

type SqlParam = Box<dyn ToSql + Sync + Send>;

/// Data provider reading from the PostgreSQL domain tables
pub struct PostgresDataProvider {
    client: Arc<PostgresClient>,
}

impl PostgresDataProvider {
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }

    async fn run(&self, sql: String, params: Vec<SqlParam>) -> Result<Vec<tokio_postgres::Row>> {
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();
        self.client.query(&sql, &param_refs).await
    }
}

#[async_trait]
impl DataProvider for PostgresDataProvider {
    async fn fetch_rows(
        &self,
        report_type: ReportType,
        filters: &ReportFilters,
    ) -> Result<Vec<RowRecord>> {
        let rows = match report_type {
            ReportType::Patients => self.fetch_patients(filters).await?,
            ReportType::Practitioners => self.fetch_practitioners(filters).await?,
            ReportType::Appointments => self.fetch_appointments(filters).await?,
            ReportType::Prescriptions => self.fetch_prescriptions(filters).await?,
            ReportType::Invoices => self.fetch_invoices(filters).await?,
            ReportType::ClinicalRecords => self.fetch_clinical_records(filters).await?,
        };

        tracing::debug!(
            report_type = %report_type,
            rows = rows.len(),
            "Fetched rows from PostgreSQL"
        );

        Ok(rows)
    }
}

impl PostgresDataProvider {
    async fn fetch_patients(&self, filters: &ReportFilters) -> Result<Vec<RowRecord>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(active) = filters.get_bool("active") {
            params.push(Box::new(active));
            conditions.push(format!("active = ${}", params.len()));
        }
        if let Some(gender) = filters.get_str("gender") {
            params.push(Box::new(gender));
            conditions.push(format!("gender = ${}", params.len()));
        }
        if let Some(from) = filters.get_datetime("created_from") {
            params.push(Box::new(from));
            conditions.push(format!("created_at >= ${}", params.len()));
        }
        if let Some(to) = filters.get_datetime("created_to") {
            params.push(Box::new(to));
            conditions.push(format!("created_at <= ${}", params.len()));
        }

        let sql = format!(
            "SELECT id, given_name, family_name, gender, birth_date, email, phone, active, \
             created_at FROM patients{} ORDER BY created_at",
            where_clause(&conditions)
        );

        let rows = self.run(sql, params).await?;
        Ok(rows
            .iter()
            .map(|row| {
                Patient {
                    id: row.get("id"),
                    given_name: row.get("given_name"),
                    family_name: row.get("family_name"),
                    gender: row.get("gender"),
                    birth_date: row.get("birth_date"),
                    email: row.get("email"),
                    phone: row.get("phone"),
                    active: row.get("active"),
                    created_at: row.get("created_at"),
                }
                .to_row()
            })
            .collect())
    }

    async fn fetch_practitioners(&self, filters: &ReportFilters) -> Result<Vec<RowRecord>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(active) = filters.get_bool("active") {
            params.push(Box::new(active));
            conditions.push(format!("active = ${}", params.len()));
        }
        if let Some(specialization) = filters.get_str("specialization") {
            params.push(Box::new(format!("%{specialization}%")));
            conditions.push(format!("specialization ILIKE ${}", params.len()));
        }

        let sql = format!(
            "SELECT id, given_name, family_name, specialization, email, phone, active, \
             created_at FROM practitioners{} ORDER BY created_at",
            where_clause(&conditions)
        );

        let rows = self.run(sql, params).await?;
        Ok(rows
            .iter()
            .map(|row| {
                Practitioner {
                    id: row.get("id"),
                    given_name: row.get("given_name"),
                    family_name: row.get("family_name"),
                    specialization: row.get("specialization"),
                    email: row.get("email"),
                    phone: row.get("phone"),
                    active: row.get("active"),
                    created_at: row.get("created_at"),
                }
                .to_row()
            })
            .collect())
    }

    async fn fetch_appointments(&self, filters: &ReportFilters) -> Result<Vec<RowRecord>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(status) = filters.get_str("status") {
            params.push(Box::new(status));
            conditions.push(format!("a.status = ${}", params.len()));
        }
        if let Some(from) = filters.get_datetime("start_date") {
            params.push(Box::new(from));
            conditions.push(format!("a.start_time >= ${}", params.len()));
        }
        if let Some(to) = filters.get_datetime("end_date") {
            params.push(Box::new(to));
            conditions.push(format!("a.start_time <= ${}", params.len()));
        }
        if let Some(patient_id) = filters.get_uuid("patient_id") {
            params.push(Box::new(patient_id));
            conditions.push(format!("a.patient_id = ${}", params.len()));
        }
        if let Some(practitioner_id) = filters.get_uuid("practitioner_id") {
            params.push(Box::new(practitioner_id));
            conditions.push(format!("a.practitioner_id = ${}", params.len()));
        }

        let sql = format!(
            "SELECT a.id, a.patient_id, a.practitioner_id, a.start_time, a.end_time, \
             a.minutes_duration, a.status, a.reason_code, a.created_at, \
             p.given_name AS patient_given, p.family_name AS patient_family, \
             pr.given_name AS practitioner_given, pr.family_name AS practitioner_family \
             FROM appointments a \
             LEFT JOIN patients p ON p.id = a.patient_id \
             LEFT JOIN practitioners pr ON pr.id = a.practitioner_id{} \
             ORDER BY a.start_time, a.created_at",
            where_clause(&conditions)
        );

        let rows = self.run(sql, params).await?;
        Ok(rows
            .iter()
            .map(|row| {
                let appointment = Appointment {
                    id: row.get("id"),
                    patient_id: row.get("patient_id"),
                    practitioner_id: row.get("practitioner_id"),
                    start: row.get("start_time"),
                    end: row.get("end_time"),
                    minutes_duration: row.get("minutes_duration"),
                    status: row.get("status"),
                    reason_code: row.get("reason_code"),
                    created_at: row.get("created_at"),
                };
                let patient_name = joined_name(
                    row.get::<_, Option<String>>("patient_given"),
                    row.get::<_, Option<String>>("patient_family"),
                );
                let practitioner_name = joined_name(
                    row.get::<_, Option<String>>("practitioner_given"),
                    row.get::<_, Option<String>>("practitioner_family"),
                );
                appointment.to_row(patient_name.as_deref(), practitioner_name.as_deref())
            })
            .collect())
    }

    async fn fetch_prescriptions(&self, filters: &ReportFilters) -> Result<Vec<RowRecord>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(status) = filters.get_str("status") {
            params.push(Box::new(status));
            conditions.push(format!("rx.status = ${}", params.len()));
        }
        if let Some(patient_id) = filters.get_uuid("patient_id") {
            params.push(Box::new(patient_id));
            conditions.push(format!("rx.patient_id = ${}", params.len()));
        }
        if let Some(practitioner_id) = filters.get_uuid("practitioner_id") {
            params.push(Box::new(practitioner_id));
            conditions.push(format!("rx.prescriber_id = ${}", params.len()));
        }

        let sql = format!(
            "SELECT rx.id, rx.patient_id, rx.prescriber_id, rx.medication_name, rx.status, \
             rx.dosage_text, rx.authored_on, rx.created_at, \
             p.given_name AS patient_given, p.family_name AS patient_family, \
             pr.given_name AS prescriber_given, pr.family_name AS prescriber_family \
             FROM prescriptions rx \
             LEFT JOIN patients p ON p.id = rx.patient_id \
             LEFT JOIN practitioners pr ON pr.id = rx.prescriber_id{} \
             ORDER BY rx.created_at",
            where_clause(&conditions)
        );

        let rows = self.run(sql, params).await?;
        Ok(rows
            .iter()
            .map(|row| {
                let prescription = Prescription {
                    id: row.get("id"),
                    patient_id: row.get("patient_id"),
                    prescriber_id: row.get("prescriber_id"),
                    medication_name: row.get("medication_name"),
                    status: row.get("status"),
                    dosage_text: row.get("dosage_text"),
                    authored_on: row.get("authored_on"),
                    created_at: row.get("created_at"),
                };
                let patient_name = joined_name(
                    row.get::<_, Option<String>>("patient_given"),
                    row.get::<_, Option<String>>("patient_family"),
                );
                let prescriber_name = joined_name(
                    row.get::<_, Option<String>>("prescriber_given"),
                    row.get::<_, Option<String>>("prescriber_family"),
                );
                prescription.to_row(patient_name.as_deref(), prescriber_name.as_deref())
            })
            .collect())
    }

    async fn fetch_invoices(&self, filters: &ReportFilters) -> Result<Vec<RowRecord>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(status) = filters.get_str("status") {
            params.push(Box::new(status));
            conditions.push(format!("i.status = ${}", params.len()));
        }
        if let Some(patient_id) = filters.get_uuid("patient_id") {
            params.push(Box::new(patient_id));
            conditions.push(format!("i.patient_id = ${}", params.len()));
        }

        let sql = format!(
            "SELECT i.id, i.patient_id, i.total_gross::TEXT AS total_gross, i.status, \
             i.issue_date, i.created_at, \
             p.given_name AS patient_given, p.family_name AS patient_family \
             FROM invoices i \
             LEFT JOIN patients p ON p.id = i.patient_id{} \
             ORDER BY i.created_at",
            where_clause(&conditions)
        );

        let rows = self.run(sql, params).await?;
        Ok(rows
            .iter()
            .map(|row| {
                let invoice = Invoice {
                    id: row.get("id"),
                    patient_id: row.get("patient_id"),
                    total_gross: row.get("total_gross"),
                    status: row.get("status"),
                    issue_date: row.get("issue_date"),
                    created_at: row.get("created_at"),
                };
                let patient_name = joined_name(
                    row.get::<_, Option<String>>("patient_given"),
                    row.get::<_, Option<String>>("patient_family"),
                );
                invoice.to_row(patient_name.as_deref())
            })
            .collect())
    }

    async fn fetch_clinical_records(&self, filters: &ReportFilters) -> Result<Vec<RowRecord>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(patient_id) = filters.get_uuid("patient_id") {
            params.push(Box::new(patient_id));
            conditions.push(format!("c.patient_id = ${}", params.len()));
        }
        if let Some(record_type) = filters.get_str("record_type") {
            params.push(Box::new(record_type));
            conditions.push(format!("c.record_type = ${}", params.len()));
        }

        let sql = format!(
            "SELECT c.id, c.patient_id, c.record_type, c.recorded_date, c.title, c.status, \
             c.created_at, \
             p.given_name AS patient_given, p.family_name AS patient_family \
             FROM clinical_records c \
             LEFT JOIN patients p ON p.id = c.patient_id{} \
             ORDER BY c.created_at",
            where_clause(&conditions)
        );

        let rows = self.run(sql, params).await?;
        Ok(rows
            .iter()
            .map(|row| {
                let record = ClinicalRecord {
                    id: row.get("id"),
                    patient_id: row.get("patient_id"),
                    record_type: row.get("record_type"),
                    recorded_date: row.get("recorded_date"),
                    title: row.get("title"),
                    status: row.get("status"),
                    created_at: row.get("created_at"),
                };
                let patient_name = joined_name(
                    row.get::<_, Option<String>>("patient_given"),
                    row.get::<_, Option<String>>("patient_family"),
                );
                record.to_row(patient_name.as_deref())
            })
            .collect())
    }
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

fn joined_name(given: Option<String>, family: Option<String>) -> Option<String> {
    match (given, family) {
        (None, None) => None,
        (given, family) => Some(
            format!(
                "{} {}",
                given.unwrap_or_default(),
                family.unwrap_or_default()
            )
            .trim()
            .to_string(),
        ),
    }
}
