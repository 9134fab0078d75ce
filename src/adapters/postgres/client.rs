//! PostgreSQL client implementation
//!
//! This module provides the pooled client for interacting with PostgreSQL.

use crate::config::schema::PostgresConfig;
use crate::domain::errors::ReportError;
use crate::domain::Result;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::{NoTls, Row};

/// PostgreSQL client for medreport
///
/// Provides methods for connecting to PostgreSQL, bootstrapping the schema,
/// and running queries using connection pooling.
pub struct PostgresClient {
    /// Connection pool
    pool: Pool,

    /// Configuration
    config: PostgresConfig,
}

impl PostgresClient {
    /// Create a new PostgreSQL client
    ///
    /// # Arguments
    ///
    /// * `config` - PostgreSQL configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be created.
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .dbname(&config.database)
            .user(&config.username)
            .password(config.password.expose_secret().as_ref());

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .build()
            .map_err(|e| {
                ReportError::Database(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    ///
    /// Attempts to get a connection from the pool and execute a simple query.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.pool.get().await.map_err(|e| {
            ReportError::Database(format!("Failed to get connection from pool: {e}"))
        })?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| ReportError::Database(format!("Connection test failed: {e}")))?;

        tracing::info!(
            database = %self.config.safe_description(),
            "PostgreSQL connection test successful"
        );
        Ok(())
    }

    /// Ensure the database schema exists
    ///
    /// This runs the migration SQL to create tables and indexes if they
    /// don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.pool.get().await.map_err(|e| {
            ReportError::Database(format!("Failed to get connection from pool: {e}"))
        })?;

        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");

        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| ReportError::Database(format!("Failed to execute migration: {e}")))?;

        tracing::info!("PostgreSQL schema initialized successfully");
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            ReportError::Database(format!("Failed to get connection from pool: {e}"))
        })
    }

    /// Execute a query and return rows
    ///
    /// # Arguments
    ///
    /// * `query` - SQL query
    /// * `params` - Query parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<Row>> {
        let client = self.get_connection().await?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .execute(&timeout_query, &[])
            .await
            .map_err(|e| ReportError::Database(format!("Failed to set statement timeout: {e}")))?;

        client
            .query(query, params)
            .await
            .map_err(|e| ReportError::Database(format!("Query failed: {e}")))
    }

    /// Execute a statement and return the number of affected rows
    ///
    /// # Arguments
    ///
    /// * `statement` - SQL statement
    /// * `params` - Statement parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn execute(
        &self,
        statement: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<u64> {
        let client = self.get_connection().await?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .execute(&timeout_query, &[])
            .await
            .map_err(|e| ReportError::Database(format!("Failed to set statement timeout: {e}")))?;

        client
            .execute(statement, params)
            .await
            .map_err(|e| ReportError::Database(format!("Statement execution failed: {e}")))
    }

    /// Connection description safe for logging (no credentials)
    pub fn safe_description(&self) -> String {
        self.config.safe_description()
    }
}
