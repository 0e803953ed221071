//! Synthetic column toggles

use crate::synthetic::SyntheticColumn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Disables synthetic columns, globally or one by one.
///
/// `true` means *disabled*. A missing map entry leaves the column enabled.
/// Deserializes from either a JSON boolean or an object:
///
/// ```
/// use colwright_core::{SyntheticColumn, ToggleConfig};
///
/// let all: ToggleConfig = serde_json::from_str("true").unwrap();
/// assert!(all.is_disabled(SyntheticColumn::Dnc));
///
/// let some: ToggleConfig = serde_json::from_str(r#"{"dncSource": true}"#).unwrap();
/// assert!(some.is_disabled(SyntheticColumn::DncSource));
/// assert!(!some.is_disabled(SyntheticColumn::Dnc));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToggleConfig {
    All(bool),
    PerColumn(BTreeMap<String, bool>),
}

impl Default for ToggleConfig {
    fn default() -> Self {
        ToggleConfig::All(false)
    }
}

impl ToggleConfig {
    /// Every synthetic column enabled.
    pub fn enabled() -> Self {
        ToggleConfig::All(false)
    }

    /// Every synthetic column disabled.
    pub fn disabled() -> Self {
        ToggleConfig::All(true)
    }

    /// Disable only the given columns.
    pub fn disabling(columns: impl IntoIterator<Item = SyntheticColumn>) -> Self {
        ToggleConfig::PerColumn(
            columns
                .into_iter()
                .map(|c| (c.toggle_name().to_string(), true))
                .collect(),
        )
    }

    /// Whether the column is switched off. Map keys may be toggle names or ids.
    pub fn is_disabled(&self, column: SyntheticColumn) -> bool {
        match self {
            ToggleConfig::All(disabled) => *disabled,
            ToggleConfig::PerColumn(map) => {
                map.get(column.toggle_name()).copied().unwrap_or(false)
                    || map.get(column.id()).copied().unwrap_or(false)
            }
        }
    }

    pub fn is_enabled(&self, column: SyntheticColumn) -> bool {
        !self.is_disabled(column)
    }
}
