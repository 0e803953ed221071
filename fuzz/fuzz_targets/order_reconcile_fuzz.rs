//! Fuzz test for persisted order reconciliation
//!
//! Parses arbitrary bytes as a persisted order and checks that reconciling
//! never drops an id and settles after one pass.
//!
//! Run with: cargo +nightly fuzz run order_reconcile_fuzz -- -max_total_time=60

#![no_main]

use colwright_engine::{ColumnEngine, ColumnOrder, ReconcileHints, ToggleConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid orders (duplicates, empty ids) are rejected at parse time
    let Ok(order) = serde_json::from_slice::<ColumnOrder>(data) else {
        return;
    };
    let engine = ColumnEngine::default();
    let hints = ReconcileHints::default();
    let toggles = ToggleConfig::default();

    let once = engine.reconcile_order(&order, &toggles, &hints);
    for id in order.ids() {
        assert!(once.contains(id), "reconcile dropped {}", id);
    }
    let twice = engine.reconcile_order(&once, &toggles, &hints);
    assert_eq!(once, twice, "reconcile is not idempotent");
});
