//! Merge synthetic columns into a caller column list

use crate::catalog::ColumnCatalog;
use crate::hints::ReconcileHints;
use crate::placement::{place, Step};
use colwright_core::{
    validate_unique_ids, ColumnDescriptor, EngineConfig, Row, SyntheticColumn, ToggleConfig,
};
use serde::{Deserialize, Serialize};

/// Action taken for one synthetic column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeAction {
    /// Column was inserted.
    Insert,
    /// Caller already provides the column (by id or alias).
    SkipPresent,
    /// Column is switched off.
    SkipDisabled,
    /// Conditional column without supporting rows.
    SkipNoEvidence,
}

/// Decision made during merge, for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDecision {
    pub column: SyntheticColumn,
    pub action: MergeAction,
    /// Output index of the inserted or pre-existing column.
    pub index: Option<usize>,
    pub reason: String,
}

/// Result of a merge.
#[derive(Debug, Clone)]
pub struct MergedColumns {
    /// Caller columns with synthetic columns spliced in.
    pub columns: Vec<ColumnDescriptor>,
    /// One decision per catalog entry, in catalog order.
    pub decisions: Vec<MergeDecision>,
    hints: ReconcileHints,
}

impl MergedColumns {
    /// Facts the order reconciler needs to agree with this merge.
    pub fn hints(&self) -> &ReconcileHints {
        &self.hints
    }

    /// Ids of the merged columns, in order.
    pub fn ids(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.id.as_str()).collect()
    }

    /// Synthetic columns inserted by this merge.
    pub fn inserted(&self) -> Vec<SyntheticColumn> {
        self.decisions
            .iter()
            .filter(|d| d.action == MergeAction::Insert)
            .map(|d| d.column)
            .collect()
    }

    pub fn into_columns(self) -> Vec<ColumnDescriptor> {
        self.columns
    }
}

/// Merge the catalog into a caller column list.
///
/// Caller columns keep their relative order. Applicable synthetic columns are
/// inserted as one block right after the anchor column (or at position 0),
/// in catalog order. Caller lists are expected to carry unique ids; a
/// duplicate is logged and otherwise passed through.
pub fn merge_columns(
    catalog: &ColumnCatalog,
    config: &EngineConfig,
    caller: &[ColumnDescriptor],
    toggles: &ToggleConfig,
    sample: &[Row],
) -> MergedColumns {
    if let Err(err) = validate_unique_ids(caller) {
        tracing::warn!(error = %err, "caller column list violates id uniqueness");
    }

    let hints = ReconcileHints::from_rows(catalog, config, sample)
        .with_providers(catalog, caller);

    let mut columns = caller.to_vec();
    let steps = place(
        &mut columns,
        catalog,
        &config.anchor_ids,
        toggles,
        &hints,
        |column, entry| entry.is_provided_by(column),
        |entry| entry.build(),
    );

    let decisions: Vec<MergeDecision> = steps
        .into_iter()
        .map(|(column, step)| decision_for(column, step, &columns))
        .collect();

    for decision in &decisions {
        tracing::debug!(
            column = decision.column.id(),
            action = ?decision.action,
            index = ?decision.index,
            reason = %decision.reason,
            "merge decision"
        );
    }

    MergedColumns {
        columns,
        decisions,
        hints,
    }
}

fn decision_for(
    column: SyntheticColumn,
    step: Step,
    columns: &[ColumnDescriptor],
) -> MergeDecision {
    let index_of = |id: &str| columns.iter().position(|c| c.id == id);
    match step {
        Step::Inserted => MergeDecision {
            column,
            action: MergeAction::Insert,
            index: index_of(column.id()),
            reason: "Inserted after anchor".to_string(),
        },
        Step::Present { provider } => MergeDecision {
            column,
            action: MergeAction::SkipPresent,
            index: index_of(&provider),
            reason: format!("Already provided by caller column {}", provider),
        },
        Step::Disabled => MergeDecision {
            column,
            action: MergeAction::SkipDisabled,
            index: None,
            reason: "Disabled by toggle config".to_string(),
        },
        Step::NoEvidence => MergeDecision {
            column,
            action: MergeAction::SkipNoEvidence,
            index: None,
            reason: "No sampled row supports this column".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cols(ids: &[&str]) -> Vec<ColumnDescriptor> {
        ids.iter().map(|id| ColumnDescriptor::keyed(*id)).collect()
    }

    fn merge(
        caller: &[ColumnDescriptor],
        toggles: &ToggleConfig,
        sample: &[Row],
    ) -> MergedColumns {
        merge_columns(
            &ColumnCatalog::standard(),
            &EngineConfig::default(),
            caller,
            toggles,
            sample,
        )
    }

    #[test]
    fn test_select_scenario() {
        let sample = vec![Row::from_value(json!({"dncList": true, "smsOptOut": true}))];
        let caller = cols(&["select", "name"]);
        let merged = merge(&caller, &ToggleConfig::default(), &sample);

        assert_eq!(
            merged.ids(),
            vec![
                "select",
                "globalDnc",
                "globalDncSource",
                "globalSalesScriptTitle",
                "globalAgentTitle",
                "globalCampaignGoal",
                "globalTimingPrefs",
                "name",
            ]
        );
        assert_eq!(merged.columns[1].value(&sample[0]), json!(true));
        assert_eq!(merged.columns[2].value(&sample[0]), json!("Text Opt-out"));
    }

    #[test]
    fn test_controls_preferred_over_select() {
        let merged = merge(
            &cols(&["select", "controls", "name"]),
            &ToggleConfig::disabling([
                SyntheticColumn::SalesScriptTitle,
                SyntheticColumn::AgentTitle,
                SyntheticColumn::CampaignGoal,
                SyntheticColumn::TimingPrefs,
            ]),
            &[],
        );
        assert_eq!(
            merged.ids(),
            vec!["select", "controls", "globalDnc", "globalDncSource", "name"]
        );
    }

    #[test]
    fn test_no_anchor_inserts_at_front() {
        let merged = merge(&cols(&["name"]), &ToggleConfig::default(), &[]);
        assert_eq!(merged.ids()[0], "globalDnc");
        assert_eq!(merged.ids().last(), Some(&"name"));
    }

    #[test]
    fn test_disable_all() {
        let caller = cols(&["select", "name"]);
        let merged = merge(&caller, &ToggleConfig::disabled(), &[]);
        assert_eq!(merged.ids(), vec!["select", "name"]);
        assert!(merged
            .decisions
            .iter()
            .all(|d| d.action == MergeAction::SkipDisabled));
    }

    #[test]
    fn test_dnc_accessor_key_short_circuits() {
        let caller = vec![
            ColumnDescriptor::keyed("select"),
            ColumnDescriptor::keyed("status").with_accessor_key("dnc"),
            ColumnDescriptor::keyed("name"),
        ];
        let merged = merge(&caller, &ToggleConfig::default(), &[]);
        assert!(!merged.ids().contains(&"globalDnc"));
        assert_eq!(merged.decisions[0].action, MergeAction::SkipPresent);
        assert_eq!(merged.decisions[0].index, Some(1));
        assert_eq!(merged.ids()[2], "globalDncSource");
    }

    #[test]
    fn test_existing_dnc_reanchors_source() {
        let caller = cols(&["select", "name", "dnc", "phone"]);
        let merged = merge(&caller, &ToggleConfig::default(), &[]);
        assert_eq!(
            merged.ids(),
            vec![
                "select",
                "name",
                "dnc",
                "globalDncSource",
                "globalSalesScriptTitle",
                "globalAgentTitle",
                "globalCampaignGoal",
                "globalTimingPrefs",
                "phone",
            ]
        );
    }

    #[test]
    fn test_transfer_requires_evidence() {
        let caller = cols(&["select", "name"]);

        let without = merge(&caller, &ToggleConfig::default(), &[Row::new()]);
        assert!(!without.ids().contains(&"globalTransferAgentTitle"));
        assert_eq!(without.decisions[4].action, MergeAction::SkipNoEvidence);

        let transfer = Row::from_value(json!({"transfer": {"agentId": "A1"}}));
        let sample = vec![Row::new(), transfer];
        let with = merge(&caller, &ToggleConfig::default(), &sample);
        assert_eq!(with.ids()[5], "globalTransferAgentTitle");
        assert_eq!(with.columns[5].value(&sample[1]), json!("A1"));
        assert!(with.hints().includes(SyntheticColumn::TransferAgentTitle));
    }

    #[test]
    fn test_disabled_transfer_stays_out_with_evidence() {
        let sample = vec![Row::from_value(json!({"transferAgentTitle": "Closer"}))];
        let merged = merge(
            &cols(&["select"]),
            &ToggleConfig::disabling([SyntheticColumn::TransferAgentTitle]),
            &sample,
        );
        assert!(!merged.ids().contains(&"globalTransferAgentTitle"));
    }

    #[test]
    fn test_remerge_is_stable() {
        let sample = vec![Row::from_value(json!({"transfer": {"agentId": "A1"}}))];
        let caller = cols(&["controls", "name", "email"]);
        let first = merge(&caller, &ToggleConfig::default(), &sample);
        let second = merge(&first.columns, &ToggleConfig::default(), &sample);
        assert_eq!(first.ids(), second.ids());
        assert!(second.inserted().is_empty());
    }
}
