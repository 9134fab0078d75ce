//! PostgreSQL backend
//!
//! Pooled client, data provider over the domain tables, and the report
//! store over the `reports` table. The schema migration in `migrations/`
//! is applied by [`client::PostgresClient::ensure_schema`].

pub mod client;
pub mod provider;
pub mod store;

pub use client::PostgresClient;
pub use provider::PostgresDataProvider;
pub use store::PostgresReportStore;
