//! Persisted column orders

use crate::column::{column_ids, ColumnDescriptor};
use crate::error::{ColwrightResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of unique column ids, in rendering order.
///
/// Orders are created by the caller (usually from its default column list) or
/// restored from caller-owned state; the engine only updates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnOrder(Vec<String>);

impl ColumnOrder {
    /// Build an order, rejecting repeated or empty ids.
    pub fn new<I, S>(ids: I) -> ColwrightResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(ids.len());
        for (position, id) in ids.iter().enumerate() {
            if id.is_empty() {
                return Err(ValidationError::EmptyColumnId { position }.into());
            }
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::DuplicateOrderId { id: id.clone() }.into());
            }
        }
        Ok(Self(ids))
    }

    /// Default order of a column list.
    pub fn of(columns: &[ColumnDescriptor]) -> ColwrightResult<Self> {
        Self::new(column_ids(columns))
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|existing| existing == id)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Wraps ids the caller already guarantees are unique.
    pub fn from_unique(ids: Vec<String>) -> Self {
        debug_assert!(
            ids.iter().collect::<HashSet<_>>().len() == ids.len(),
            "column order ids must be unique"
        );
        Self(ids)
    }
}

impl<'de> Deserialize<'de> for ColumnOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ids = Vec::<String>::deserialize(deserializer)?;
        ColumnOrder::new(ids).map_err(serde::de::Error::custom)
    }
}

impl AsRef<[String]> for ColumnOrder {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}
