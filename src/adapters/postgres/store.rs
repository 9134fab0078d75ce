//! PostgreSQL report store

use crate::adapters::backend::traits::ReportStore;
use crate::adapters::postgres::client::PostgresClient;
use crate::domain::errors::ReportError;
use crate::domain::filters::ReportFilters;
use crate::domain::ids::{OwnerId, ReportId};
use crate::domain::report::{Report, ReportQuery, ReportStatus};
use crate::domain::Result;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;
use uuid::Uuid;

type SqlParam = Box<dyn ToSql + Sync + Send>;

const REPORT_COLUMNS: &str = "id, owner, report_type, format, status, filters, title, \
    description, file_path, file_size, checksum, record_count, created_at, updated_at, \
    completed_at, error_message";

/// Report store backed by the `reports` table
pub struct PostgresReportStore {
    client: Arc<PostgresClient>,
}

impl PostgresReportStore {
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportStore for PostgresReportStore {
    async fn insert(&self, report: &Report) -> Result<()> {
        let statement = format!(
            "INSERT INTO reports ({REPORT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        );

        self.client
            .execute(
                &statement,
                &[
                    report.id.as_uuid(),
                    &report.owner.as_str(),
                    &report.report_type,
                    &report.format,
                    &report.status.as_str(),
                    &report.filters.to_value(),
                    &report.title,
                    &report.description,
                    &report.file_path,
                    &report.file_size.map(|s| s as i64),
                    &report.checksum,
                    &(report.record_count as i64),
                    &report.created_at,
                    &report.updated_at,
                    &report.completed_at,
                    &report.error_message,
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, report: &Report) -> Result<()> {
        let affected = self
            .client
            .execute(
                "UPDATE reports SET status = $2, filters = $3, title = $4, description = $5, \
                 file_path = $6, file_size = $7, checksum = $8, record_count = $9, \
                 updated_at = $10, completed_at = $11, error_message = $12 WHERE id = $1",
                &[
                    report.id.as_uuid(),
                    &report.status.as_str(),
                    &report.filters.to_value(),
                    &report.title,
                    &report.description,
                    &report.file_path,
                    &report.file_size.map(|s| s as i64),
                    &report.checksum,
                    &(report.record_count as i64),
                    &report.updated_at,
                    &report.completed_at,
                    &report.error_message,
                ],
            )
            .await?;

        if affected == 0 {
            return Err(ReportError::NotFound(format!("Report {}", report.id)));
        }
        Ok(())
    }

    async fn get(&self, id: &ReportId) -> Result<Option<Report>> {
        let query = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1");
        let rows = self.client.query(&query, &[id.as_uuid()]).await?;
        rows.first().map(report_from_row).transpose()
    }

    async fn list(&self, owner: &OwnerId, query: &ReportQuery) -> Result<Vec<Report>> {
        let mut conditions = vec!["owner = $1".to_string()];
        let mut params: Vec<SqlParam> = vec![Box::new(owner.as_str().to_string())];

        if let Some(report_type) = &query.report_type {
            params.push(Box::new(report_type.clone()));
            conditions.push(format!("report_type = ${}", params.len()));
        }
        if let Some(format) = &query.format {
            params.push(Box::new(format.clone()));
            conditions.push(format!("format = ${}", params.len()));
        }
        if let Some(status) = query.status {
            params.push(Box::new(status.as_str().to_string()));
            conditions.push(format!("status = ${}", params.len()));
        }
        if let Some(from) = query.created_from {
            params.push(Box::new(from));
            conditions.push(format!("created_at >= ${}", params.len()));
        }
        if let Some(to) = query.created_to {
            params.push(Box::new(to));
            conditions.push(format!("created_at <= ${}", params.len()));
        }

        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();
        let rows = self.client.query(&sql, &param_refs).await?;
        rows.iter().map(report_from_row).collect()
    }

    async fn delete(&self, id: &ReportId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM reports WHERE id = $1", &[id.as_uuid()])
            .await?;
        Ok(affected > 0)
    }
}

/// Maps a `reports` row back into the domain model
fn report_from_row(row: &Row) -> Result<Report> {
    let id: Uuid = row.get("id");
    let owner: String = row.get("owner");
    let status: String = row.get("status");
    let filters: serde_json::Value = row.get("filters");
    let file_size: Option<i64> = row.get("file_size");
    let record_count: i64 = row.get("record_count");

    Ok(Report {
        id: ReportId::from_uuid(id),
        owner: OwnerId::new(owner)
            .map_err(|e| ReportError::Database(format!("Corrupt owner column: {e}")))?,
        report_type: row.get("report_type"),
        format: row.get("format"),
        status: ReportStatus::from_str(&status)?,
        filters: ReportFilters::from_value(filters),
        title: row.get("title"),
        description: row.get("description"),
        file_path: row.get("file_path"),
        file_size: file_size.map(|s| s as u64),
        checksum: row.get("checksum"),
        record_count: record_count.max(0) as u64,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        completed_at: row.get("completed_at"),
        error_message: row.get("error_message"),
    })
}
