//! Strategy factory
//!
//! Maps format identifiers to strategy instances. The registry is seeded
//! with the built-in formats at construction and supports runtime
//! registration; registering an existing identifier (including a built-in)
//! replaces the previous strategy, which is how deployments customize the
//! PDF branding and how tests plug in extension formats.

use crate::core::render::csv::CsvStrategy;
use crate::core::render::json::JsonStrategy;
use crate::core::render::pdf::PdfStrategy;
use crate::core::render::txt::TxtStrategy;
use crate::core::render::RenderStrategy;
use crate::domain::errors::ReportError;
use crate::domain::report::ReportFormat;
use crate::domain::result::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of render strategies keyed by lowercase format identifier
pub struct StrategyFactory {
    strategies: BTreeMap<String, Arc<dyn RenderStrategy>>,
}

impl StrategyFactory {
    /// Empty registry with no formats
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Registry seeded with the built-in strategies (pdf, csv, txt, json)
    pub fn with_builtins() -> Self {
        let mut factory = Self::empty();
        factory.register(ReportFormat::Pdf.as_str(), Arc::new(PdfStrategy::default()));
        factory.register(ReportFormat::Csv.as_str(), Arc::new(CsvStrategy));
        factory.register(ReportFormat::Txt.as_str(), Arc::new(TxtStrategy));
        factory.register(ReportFormat::Json.as_str(), Arc::new(JsonStrategy));
        factory
    }

    /// Registers a strategy under the given identifier
    ///
    /// Identifiers are case-insensitive; an existing registration for the
    /// same identifier is replaced.
    pub fn register(&mut self, format_id: impl AsRef<str>, strategy: Arc<dyn RenderStrategy>) {
        self.strategies
            .insert(format_id.as_ref().to_lowercase(), strategy);
    }

    /// Resolves a strategy for a format identifier
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnsupportedFormat`] naming the identifier and
    /// the registered formats when the identifier is unknown.
    pub fn create(&self, format_id: &str) -> Result<Arc<dyn RenderStrategy>> {
        let key = format_id.to_lowercase();
        self.strategies.get(&key).cloned().ok_or_else(|| {
            ReportError::UnsupportedFormat(format!(
                "{key}. Supported formats: {}",
                self.supported_formats().join(", ")
            ))
        })
    }

    /// Registered format identifiers, sorted
    pub fn supported_formats(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }

    /// Whether a format identifier is registered
    pub fn supports(&self, format_id: &str) -> bool {
        self.strategies.contains_key(&format_id.to_lowercase())
    }
}

impl Default for StrategyFactory {
    fn default() -> Self {
        Self::with_builtins()
    }
}
