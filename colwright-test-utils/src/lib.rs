//! colwright Test Utilities
//!
//! Centralized test infrastructure for the colwright workspace:
//! - Proptest generators for rows, caller column lists, toggles and orders
//! - Test fixtures for common table scenarios
//! - Custom assertions for merge and order invariants

pub use colwright_core::{
    ColumnDescriptor, ColumnOrder, ColwrightError, ColwrightResult, EngineConfig, Row,
    SyntheticColumn, ToggleConfig,
};
pub use colwright_engine::{ColumnCatalog, ColumnEngine, MergedColumns, ReconcileHints};

use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once per process.
///
/// Honors `RUST_LOG`; output goes through the libtest capture.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for engine inputs.

    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    /// Ids a caller table might use, including anchors, catalog aliases and
    /// a synthetic id left over from an earlier merge.
    pub const CALLER_ID_POOL: &[&str] = &[
        "select",
        "controls",
        "name",
        "phone",
        "email",
        "status",
        "dnc",
        "agentName",
        "goal",
        "timing",
        "notes",
        "globalDncSource",
    ];

    /// Accessor keys a caller column might read.
    pub const ACCESSOR_KEY_POOL: &[&str] = &["dnc", "doNotContact", "scriptTitle", "email", "city"];

    /// Raw suppression sources a record might carry.
    pub const DNC_SOURCE_POOL: &[&str] = &["sms", "email", "call", "manual", "scrub"];

    /// Generate any synthetic column.
    pub fn arb_synthetic_column() -> impl Strategy<Value = SyntheticColumn> {
        prop::sample::select(SyntheticColumn::ALL.to_vec())
    }

    /// Generate a toggle config in either form.
    pub fn arb_toggles() -> impl Strategy<Value = ToggleConfig> {
        let all = SyntheticColumn::ALL.to_vec();
        let count = all.len();
        prop_oneof![
            any::<bool>().prop_map(ToggleConfig::All),
            prop::sample::subsequence(all, 0..=count)
                .prop_map(ToggleConfig::disabling),
        ]
    }

    /// Generate an optional accessor key, absent most of the time.
    pub fn arb_accessor_key() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::weighted(0.2, prop::sample::select(ACCESSOR_KEY_POOL))
    }

    /// Generate a caller column list with unique ids in arbitrary order.
    pub fn arb_caller_columns() -> impl Strategy<Value = Vec<ColumnDescriptor>> {
        prop::sample::subsequence(CALLER_ID_POOL.to_vec(), 0..=CALLER_ID_POOL.len())
            .prop_shuffle()
            .prop_flat_map(|ids| {
                let len = ids.len();
                (
                    Just(ids),
                    prop::collection::vec(arb_accessor_key(), len),
                )
            })
            .prop_map(|(ids, keys)| {
                ids.into_iter()
                    .zip(keys)
                    .map(|(id, key)| match key {
                        Some(key) => ColumnDescriptor::keyed(id).with_accessor_key(key),
                        None => ColumnDescriptor::keyed(id),
                    })
                    .collect()
            })
    }

    /// Generate a persisted order of unique ids.
    pub fn arb_order() -> impl Strategy<Value = ColumnOrder> {
        prop::sample::subsequence(CALLER_ID_POOL.to_vec(), 0..=CALLER_ID_POOL.len())
            .prop_shuffle()
            .prop_map(|ids| {
                ColumnOrder::from_unique(ids.into_iter().map(str::to_string).collect())
            })
    }

    fn arb_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ]{0,80}"
    }

    /// Generate an outreach record with a mix of known fields.
    pub fn arb_row() -> impl Strategy<Value = Row> {
        (
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of(prop::sample::select(DNC_SOURCE_POOL)),
            prop::option::of(arb_text()),
            prop::option::of(arb_text()),
            prop::option::of(arb_text()),
            prop::option::of(arb_text()),
            prop::option::of(0u64..20),
            prop::option::of(0u64..60),
        )
            .prop_map(
                |(dnc, sms_opt_out, source, agent, transfer, goal, script, attempts, retry)| {
                    let mut fields = Map::new();
                    let mut put = |key: &str, value: Value| {
                        fields.insert(key.to_string(), value);
                    };
                    if let Some(dnc) = dnc {
                        put("dncList", json!(dnc));
                    }
                    if let Some(opt_out) = sms_opt_out {
                        put("smsOptOut", json!(opt_out));
                    }
                    if let Some(source) = source {
                        put("dncSource", json!(source));
                    }
                    if let Some(agent) = agent {
                        put("agentName", json!(agent));
                    }
                    if let Some(transfer) = transfer {
                        put("transfer", json!({ "agentId": transfer }));
                    }
                    if let Some(goal) = goal {
                        put("campaignGoal", json!(goal));
                    }
                    if let Some(script) = script {
                        put("scriptTitle", json!(script));
                    }
                    if let Some(attempts) = attempts {
                        put("maxDailyAttempts", json!(attempts));
                    }
                    if let Some(retry) = retry {
                        put("cooldownMinutes", json!(retry));
                    }
                    Row::from(fields)
                },
            )
    }

    /// Generate a small row sample.
    pub fn arb_sample() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(arb_row(), 0..5)
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common table scenarios.

    use super::*;
    use serde_json::json;

    /// A lead table with a selection column.
    pub fn select_name_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::keyed("select"),
            ColumnDescriptor::keyed("name"),
        ]
    }

    /// A lead table with row actions and a few data columns.
    pub fn controls_table_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::keyed("controls"),
            ColumnDescriptor::keyed("name"),
            ColumnDescriptor::keyed("phone"),
            ColumnDescriptor::keyed("email"),
        ]
    }

    /// Row flagged DNC by a text opt-out.
    pub fn sms_opt_out_row() -> Row {
        Row::from_value(json!({ "dncList": true, "smsOptOut": true }))
    }

    /// Row with a transfer recorded in a nested object.
    pub fn transfer_row() -> Row {
        Row::from_value(json!({ "transfer": { "agentId": "A1" } }))
    }

    /// Row whose campaign goal implies the aggressive timing preset.
    pub fn aggressive_goal_row() -> Row {
        let goal = "aggressive speed to lead outreach";
        Row::new().set("campaignGoal", goal)
    }

    /// Row with nothing the heuristics can use.
    pub fn empty_row() -> Row {
        Row::new()
    }

    /// Toggles that leave only the given columns enabled.
    pub fn only(columns: &[SyntheticColumn]) -> ToggleConfig {
        ToggleConfig::disabling(
            SyntheticColumn::ALL
                .into_iter()
                .filter(|c| !columns.contains(c)),
        )
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for merge and order invariants.

    use super::*;
    use std::collections::HashSet;

    /// Assert no two columns share an id.
    pub fn assert_unique_ids(columns: &[ColumnDescriptor]) {
        let mut seen = HashSet::new();
        for column in columns {
            assert!(
                seen.insert(column.id.as_str()),
                "duplicate column id {}",
                column.id
            );
        }
    }

    /// Assert `original` appears in `merged` as a subsequence.
    pub fn assert_preserves_order(original: &[ColumnDescriptor], merged: &[ColumnDescriptor]) {
        let mut merged_ids = merged.iter().map(|c| c.id.as_str());
        for column in original {
            assert!(
                merged_ids.any(|id| id == column.id),
                "caller column {} lost or reordered",
                column.id
            );
        }
    }

    /// Assert the merge inserted one run in catalog order.
    ///
    /// Columns the caller already had may sit inside the run only when they
    /// provide a catalog entry themselves.
    pub fn assert_inserted_block(catalog: &ColumnCatalog, merged: &MergedColumns) {
        let ids = merged.ids();
        let positions: Vec<usize> = merged
            .inserted()
            .into_iter()
            .filter_map(|column| ids.iter().position(|id| *id == column.id()))
            .collect();
        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "inserted columns are out of catalog order"
        );
        let (Some(first), Some(last)) = (positions.first(), positions.last()) else {
            return;
        };
        for (offset, column) in merged.columns[*first..=*last].iter().enumerate() {
            let inside = positions.contains(&(first + offset))
                || catalog.entries().iter().any(|e| e.is_provided_by(column));
            assert!(
                inside,
                "caller column {} splits the inserted block",
                column.id
            );
        }
    }

    pub fn assert_config_error<T: std::fmt::Debug>(result: &ColwrightResult<T>) {
        match result {
            Err(ColwrightError::Config(_)) => {}
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    pub fn assert_catalog_error<T: std::fmt::Debug>(result: &ColwrightResult<T>) {
        match result {
            Err(ColwrightError::Catalog(_)) => {}
            other => panic!("Expected CatalogError, got {:?}", other),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_only_fixture() {
        let toggles = fixtures::only(&[SyntheticColumn::Dnc]);
        assert!(toggles.is_enabled(SyntheticColumn::Dnc));
        assert!(toggles.is_disabled(SyntheticColumn::TimingPrefs));
    }

    #[test]
    fn test_assert_config_error() {
        let result = ColumnEngine::new(EngineConfig::default().with_goal_max_chars(0));
        assertions::assert_config_error(&result);
    }

    #[test]
    fn test_assert_catalog_error() {
        assertions::assert_catalog_error(&ColumnCatalog::new(vec![]));
    }

    #[test]
    fn test_inserted_block_accepts_alias_outside_run() {
        let engine = ColumnEngine::default();
        let caller = vec![
            ColumnDescriptor::keyed("select"),
            ColumnDescriptor::keyed("agentName"),
            ColumnDescriptor::keyed("name"),
        ];
        let merged = engine.merge(&caller, &ToggleConfig::default(), &[]);
        assertions::assert_inserted_block(engine.catalog(), &merged);
    }

    #[test]
    #[should_panic(expected = "splits the inserted block")]
    fn test_inserted_block_rejects_split_run() {
        let engine = ColumnEngine::default();
        let toggles = fixtures::only(&[SyntheticColumn::Dnc, SyntheticColumn::TimingPrefs]);
        let mut merged = engine.merge(&fixtures::select_name_columns(), &toggles, &[]);
        let name = merged.columns.remove(3);
        merged.columns.insert(2, name);
        assertions::assert_inserted_block(engine.catalog(), &merged);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_caller_columns_have_unique_ids(columns in generators::arb_caller_columns()) {
            assertions::assert_unique_ids(&columns);
        }

        #[test]
        fn prop_orders_are_valid(order in generators::arb_order()) {
            prop_assert!(ColumnOrder::new(order.ids().iter().cloned()).is_ok());
        }
    }
}
