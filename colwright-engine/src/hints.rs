//! Decisions the reconciler cannot make from ids alone
//!
//! The order reconciler sees only column ids. Two facts come from the merge
//! side: which conditional columns had row evidence, and which caller column
//! (matched by accessor key, so invisible in an id list) already provides a
//! synthetic column.

use crate::catalog::ColumnCatalog;
use colwright_core::{ColumnDescriptor, EngineConfig, Row, SyntheticColumn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Merge-side facts handed to the reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileHints {
    /// Conditional columns whose evidence check passed.
    #[serde(default)]
    pub materialized: BTreeSet<SyntheticColumn>,
    /// Caller column id providing each synthetic column.
    #[serde(default)]
    pub providers: BTreeMap<SyntheticColumn, String>,
}

impl ReconcileHints {
    /// Evaluate conditional entries against a row sample.
    pub fn from_rows(catalog: &ColumnCatalog, config: &EngineConfig, rows: &[Row]) -> Self {
        let sample = config.sample_window(rows);
        let materialized = catalog
            .entries()
            .iter()
            .filter(|entry| entry.is_conditional() && entry.has_evidence(sample))
            .map(|entry| entry.column)
            .collect();
        Self {
            materialized,
            providers: BTreeMap::new(),
        }
    }

    /// Record which caller columns already provide catalog entries.
    pub fn with_providers(mut self, catalog: &ColumnCatalog, columns: &[ColumnDescriptor]) -> Self {
        for entry in catalog.entries() {
            if let Some(column) = columns.iter().find(|c| entry.is_provided_by(c)) {
                self.providers.insert(entry.column, column.id.clone());
            }
        }
        self
    }

    /// Mark a conditional column as materialized.
    pub fn include(mut self, column: SyntheticColumn) -> Self {
        self.materialized.insert(column);
        self
    }

    /// Whether a conditional column had evidence.
    pub fn includes(&self, column: SyntheticColumn) -> bool {
        self.materialized.contains(&column)
    }

    /// The caller id providing a synthetic column, if any.
    pub fn provider(&self, column: SyntheticColumn) -> Option<&str> {
        self.providers.get(&column).map(String::as_str)
    }
}
