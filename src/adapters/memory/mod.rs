//! In-memory backend
//!
//! Serves domain records from a seeded [`Dataset`] and keeps report records
//! and artifacts in process memory. Used for development, demos and tests;
//! production deployments use the PostgreSQL backend.
//!
//! [`Dataset`]: dataset::Dataset

pub mod dataset;
pub mod provider;
pub mod store;

pub use dataset::Dataset;
pub use provider::MemoryDataProvider;
pub use store::{MemoryArtifactStore, MemoryReportStore};
