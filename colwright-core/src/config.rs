//! Configuration types

use crate::error::{ColwrightError, ColwrightResult, ConfigError};
use crate::{CONTROLS_COLUMN_ID, SELECT_COLUMN_ID};
use serde::{Deserialize, Serialize};

/// Character budget applied to the campaign goal column.
pub const DEFAULT_GOAL_MAX_CHARS: usize = 60;

/// Engine configuration shared by the catalog, merge and reconcile steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum characters rendered by the goal column, ellipsis included.
    pub goal_max_chars: usize,
    /// Structural column ids after which synthetic columns are placed,
    /// in order of preference.
    pub anchor_ids: Vec<String>,
    /// Rows inspected when looking for transfer evidence (0 = whole sample).
    pub transfer_sample_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            goal_max_chars: DEFAULT_GOAL_MAX_CHARS,
            anchor_ids: vec![CONTROLS_COLUMN_ID.to_string(), SELECT_COLUMN_ID.to_string()],
            transfer_sample_limit: 0,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `COLWRIGHT_GOAL_MAX_CHARS`: goal column character budget (default: 60)
    /// - `COLWRIGHT_TRANSFER_SAMPLE_LIMIT`: rows scanned for transfer evidence (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            goal_max_chars: std::env::var("COLWRIGHT_GOAL_MAX_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.goal_max_chars),
            transfer_sample_limit: std::env::var("COLWRIGHT_TRANSFER_SAMPLE_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.transfer_sample_limit),
            anchor_ids: defaults.anchor_ids,
        }
    }

    /// Set the goal column budget.
    pub fn with_goal_max_chars(mut self, goal_max_chars: usize) -> Self {
        self.goal_max_chars = goal_max_chars;
        self
    }

    /// Set the transfer evidence sample limit.
    pub fn with_transfer_sample_limit(mut self, limit: usize) -> Self {
        self.transfer_sample_limit = limit;
        self
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - goal_max_chars > 0
    /// - anchor_ids is non-empty, without blank or repeated ids
    pub fn validate(&self) -> ColwrightResult<()> {
        if self.goal_max_chars == 0 {
            return Err(ColwrightError::Config(ConfigError::InvalidValue {
                field: "goal_max_chars".to_string(),
                value: self.goal_max_chars.to_string(),
                reason: "goal_max_chars must be greater than 0".to_string(),
            }));
        }

        if self.anchor_ids.is_empty() {
            return Err(ColwrightError::Config(ConfigError::MissingRequired {
                field: "anchor_ids".to_string(),
            }));
        }

        for (i, id) in self.anchor_ids.iter().enumerate() {
            if id.trim().is_empty() {
                return Err(ColwrightError::Config(ConfigError::InvalidValue {
                    field: "anchor_ids".to_string(),
                    value: format!("{:?}", self.anchor_ids),
                    reason: format!("anchor id at position {} is blank", i),
                }));
            }
            if self.anchor_ids[..i].contains(id) {
                return Err(ColwrightError::Config(ConfigError::InvalidValue {
                    field: "anchor_ids".to_string(),
                    value: format!("{:?}", self.anchor_ids),
                    reason: format!("anchor id {} is repeated", id),
                }));
            }
        }

        Ok(())
    }

    /// Returns the row sample window used for evidence checks.
    pub fn sample_window<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        if self.transfer_sample_limit == 0 || self.transfer_sample_limit >= rows.len() {
            rows
        } else {
            &rows[..self.transfer_sample_limit]
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
