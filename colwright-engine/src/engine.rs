//! Configured engine facade

use crate::catalog::ColumnCatalog;
use crate::hints::ReconcileHints;
use crate::merge::{merge_columns, MergedColumns};
use crate::reconcile::reconcile_order;
use colwright_core::{
    ColumnDescriptor, ColumnOrder, ColwrightResult, EngineConfig, Row, ToggleConfig,
};

/// A validated config paired with the catalog it produced.
#[derive(Debug, Clone)]
pub struct ColumnEngine {
    config: EngineConfig,
    catalog: ColumnCatalog,
}

impl ColumnEngine {
    /// Engine over the standard catalog.
    pub fn new(config: EngineConfig) -> ColwrightResult<Self> {
        config.validate()?;
        let catalog = ColumnCatalog::standard_with(&config);
        catalog.validate()?;
        Ok(Self { config, catalog })
    }

    /// Engine over a caller-supplied catalog.
    pub fn with_catalog(config: EngineConfig, catalog: ColumnCatalog) -> ColwrightResult<Self> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self { config, catalog })
    }

    /// Engine configured from `COLWRIGHT_*` environment variables.
    pub fn from_env() -> ColwrightResult<Self> {
        Self::new(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    pub fn merge(
        &self,
        caller: &[ColumnDescriptor],
        toggles: &ToggleConfig,
        sample: &[Row],
    ) -> MergedColumns {
        merge_columns(&self.catalog, &self.config, caller, toggles, sample)
    }

    pub fn reconcile_order(
        &self,
        persisted: &ColumnOrder,
        toggles: &ToggleConfig,
        hints: &ReconcileHints,
    ) -> ColumnOrder {
        reconcile_order(&self.catalog, &self.config, persisted, toggles, hints)
    }

    /// Hints for reconciling without a preceding merge.
    pub fn hints_for(&self, caller: &[ColumnDescriptor], sample: &[Row]) -> ReconcileHints {
        ReconcileHints::from_rows(&self.catalog, &self.config, sample)
            .with_providers(&self.catalog, caller)
    }
}

impl Default for ColumnEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            catalog: ColumnCatalog::standard(),
        }
    }
}
