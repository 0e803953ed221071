//! Fuzz test for synthetic column accessors
//!
//! Feeds arbitrary JSON records through every catalog column to find panics
//! in the inference heuristics. Accessors must be total: any row renders.
//!
//! Run with: cargo +nightly fuzz run row_accessor_fuzz -- -max_total_time=60

#![no_main]

use colwright_engine::{ColumnCatalog, Row};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let row = Row::from_value(value);
    let catalog = ColumnCatalog::standard();

    for entry in catalog.entries() {
        let column = entry.build();
        let _ = column.value(&row);
        let _ = column.render(&row);
        let _ = entry.has_evidence(std::slice::from_ref(&row));
    }
});
