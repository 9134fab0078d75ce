//! Storage abstraction
//!
//! Traits for the data provider, report store and artifact store, plus the
//! factory that builds the configured implementations.

pub mod factory;
pub mod traits;

pub use factory::{create_artifact_store, create_provider_and_store};
pub use traits::{ArtifactStore, DataProvider, ReportStore};
