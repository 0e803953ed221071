//! colwright Engine - Global Column Merge
//!
//! Splices a fixed catalog of derived "global" columns into a caller's table
//! column list and keeps persisted column orders in step with it.
//!
//! # Key Components
//!
//! - [`ColumnCatalog`]: ordered registry of synthetic columns with aliases,
//!   placement and materialization rules
//! - [`merge_columns`]: idempotent merge of the catalog into a caller list,
//!   with a per-column decision trail
//! - [`reconcile_order`]: the same placement applied to a persisted id list
//! - [`ColumnEngine`]: a validated config plus its catalog

pub mod catalog;
pub mod engine;
pub mod hints;
pub mod merge;
mod placement;
pub mod reconcile;

pub use catalog::{
    global_agent_column, global_campaign_goal_column, global_campaign_goal_column_with_budget,
    global_dnc_column, global_dnc_source_column, global_sales_script_column,
    global_timing_prefs_column, global_transfer_agent_column, CatalogEntry, ColumnBuilder,
    ColumnCatalog, EvidenceFn, Materialization, Placement,
};
pub use engine::ColumnEngine;
pub use hints::ReconcileHints;
pub use merge::{merge_columns, MergeAction, MergeDecision, MergedColumns};
pub use reconcile::reconcile_order;

pub use colwright_core::{
    ColumnDescriptor, ColumnOrder, ColwrightError, ColwrightResult, EngineConfig, Row,
    SyntheticColumn, ToggleConfig,
};

/// Merge the standard catalog into `caller` with default settings.
pub fn merge_global_columns(
    caller: &[ColumnDescriptor],
    toggles: &ToggleConfig,
    sample: &[Row],
) -> Vec<ColumnDescriptor> {
    ColumnEngine::default()
        .merge(caller, toggles, sample)
        .into_columns()
}

/// Reconcile a persisted order against the standard catalog with default
/// settings.
pub fn reconcile_column_order(
    persisted: &ColumnOrder,
    toggles: &ToggleConfig,
    hints: &ReconcileHints,
) -> ColumnOrder {
    ColumnEngine::default().reconcile_order(persisted, toggles, hints)
}
