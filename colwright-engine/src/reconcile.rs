//! Reconcile a persisted column order with the catalog

use crate::catalog::ColumnCatalog;
use crate::hints::ReconcileHints;
use crate::placement::{place, Step};
use colwright_core::{ColumnOrder, EngineConfig, ToggleConfig};

/// Insert missing synthetic column ids into a persisted order.
///
/// Uses the same placement rules as [`merge_columns`](crate::merge_columns),
/// so reconciling the ids of a caller list yields the ids of its merge when
/// both see the same toggles and hints. Existing ids are never moved or
/// removed, including ids of disabled columns.
pub fn reconcile_order(
    catalog: &ColumnCatalog,
    config: &EngineConfig,
    persisted: &ColumnOrder,
    toggles: &ToggleConfig,
    hints: &ReconcileHints,
) -> ColumnOrder {
    let mut ids = persisted.ids().to_vec();
    let steps = place(
        &mut ids,
        catalog,
        &config.anchor_ids,
        toggles,
        hints,
        |id, entry| entry.matches_id(id) || hints.provider(entry.column) == Some(id.as_str()),
        |entry| entry.id().to_string(),
    );

    for (column, step) in &steps {
        if *step == Step::Inserted {
            let index = ids.iter().position(|id| id == column.id());
            tracing::debug!(column = column.id(), index = ?index, "reconciled missing column");
        }
    }

    ColumnOrder::from_unique(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use colwright_core::{ColumnDescriptor, SyntheticColumn};

    fn order(ids: &[&str]) -> ColumnOrder {
        ColumnOrder::new(ids.iter().map(|s| s.to_string())).expect("valid order")
    }

    fn reconcile(
        persisted: &ColumnOrder,
        toggles: &ToggleConfig,
        hints: &ReconcileHints,
    ) -> ColumnOrder {
        reconcile_order(
            &ColumnCatalog::standard(),
            &EngineConfig::default(),
            persisted,
            toggles,
            hints,
        )
    }

    fn reconcile_unhinted(persisted: &ColumnOrder, toggles: &ToggleConfig) -> ColumnOrder {
        reconcile(persisted, toggles, &ReconcileHints::default())
    }

    #[test]
    fn test_fills_missing_ids_after_anchor() {
        let persisted = order(&["select", "name", "phone"]);
        let out = reconcile_unhinted(&persisted, &ToggleConfig::default());
        assert_eq!(
            out.ids(),
            &[
                "select",
                "globalDnc",
                "globalDncSource",
                "globalSalesScriptTitle",
                "globalAgentTitle",
                "globalCampaignGoal",
                "globalTimingPrefs",
                "name",
                "phone",
            ]
        );
    }

    #[test]
    fn test_user_moved_columns_stay_put() {
        let persisted = order(&[
            "select",
            "name",
            "globalAgentTitle",
            "globalDnc",
            "globalDncSource",
            "globalSalesScriptTitle",
            "globalCampaignGoal",
            "globalTimingPrefs",
        ]);
        let out = reconcile_unhinted(&persisted, &ToggleConfig::default());
        assert_eq!(out, persisted);
    }

    #[test]
    fn test_disabled_ids_are_kept() {
        let persisted = order(&["controls", "globalDnc", "name"]);
        let out = reconcile_unhinted(&persisted, &ToggleConfig::disabled());
        assert_eq!(out, persisted);
    }

    #[test]
    fn test_transfer_follows_hints() {
        let persisted = order(&["controls", "name"]);
        let toggles = ToggleConfig::disabling([
            SyntheticColumn::Dnc,
            SyntheticColumn::DncSource,
            SyntheticColumn::SalesScriptTitle,
            SyntheticColumn::AgentTitle,
            SyntheticColumn::CampaignGoal,
            SyntheticColumn::TimingPrefs,
        ]);

        let without = reconcile_unhinted(&persisted, &toggles);
        assert_eq!(without, persisted);

        let hints = ReconcileHints::default().include(SyntheticColumn::TransferAgentTitle);
        let with = reconcile(&persisted, &toggles, &hints);
        assert_eq!(
            with.ids(),
            &["controls", "globalTransferAgentTitle", "name"]
        );
    }

    #[test]
    fn test_provider_hint_blocks_duplicate() {
        let catalog = ColumnCatalog::standard();
        let caller = vec![
            ColumnDescriptor::keyed("select"),
            ColumnDescriptor::keyed("status").with_accessor_key("dnc"),
        ];
        let hints = ReconcileHints::default().with_providers(&catalog, &caller);
        let persisted = ColumnOrder::of(&caller).expect("unique ids");
        let out = reconcile(&persisted, &ToggleConfig::default(), &hints);
        assert!(!out.contains("globalDnc"));
        assert_eq!(out.position("globalDncSource"), Some(2));
    }

    #[test]
    fn test_dnc_inserted_next_to_dragged_source() {
        let persisted = order(&["select", "name", "phone", "globalDncSource"]);
        let out = reconcile_unhinted(&persisted, &ToggleConfig::default());
        let dnc = out.position("globalDnc").expect("dnc inserted");
        assert_eq!(out.position("globalDncSource"), Some(dnc + 1));
        assert_eq!(&out.ids()[..3], &["select", "name", "phone"]);
        assert_eq!(out.position("globalTimingPrefs"), Some(out.len() - 1));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let hints = ReconcileHints::default().include(SyntheticColumn::TransferAgentTitle);
        let persisted = order(&["a", "select", "b"]);
        let once = reconcile(&persisted, &ToggleConfig::default(), &hints);
        let twice = reconcile(&once, &ToggleConfig::default(), &hints);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_order() {
        let out = reconcile_unhinted(&ColumnOrder::default(), &ToggleConfig::default());
        assert_eq!(out.ids()[0], "globalDnc");
        assert_eq!(out.len(), 6);
    }
}
