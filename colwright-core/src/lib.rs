//! colwright Core - Column Types
//!
//! Pure data structures shared by the inference, catalog, merge and reconcile
//! layers. This crate contains ONLY data types and their validation - no
//! placement logic.

pub mod column;
pub mod config;
pub mod error;
pub mod order;
pub mod row;
pub mod synthetic;
pub mod toggle;

pub use column::{
    column_ids, render_plain, validate_unique_ids, Accessor, AccessorFn, CellFn, CellRenderer,
    ColumnDescriptor, ColumnLayout, FilterOption, FilterSpec, FilterVariant, Header, HeaderFn,
};
pub use config::{EngineConfig, DEFAULT_GOAL_MAX_CHARS};
pub use error::{CatalogError, ColwrightError, ColwrightResult, ConfigError, ValidationError};
pub use order::ColumnOrder;
pub use row::{value_text, value_truthy, Row};
pub use synthetic::SyntheticColumn;
pub use toggle::ToggleConfig;

// ============================================================================
// ANCHOR IDS
// ============================================================================

/// Row-actions column kept at the far left.
pub const CONTROLS_COLUMN_ID: &str = "controls";

/// Row-selection checkbox column.
pub const SELECT_COLUMN_ID: &str = "select";

/// Placeholder shown by text columns with nothing to display.
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Label shown when no agent is assigned.
pub const UNASSIGNED_LABEL: &str = "Unassigned";
