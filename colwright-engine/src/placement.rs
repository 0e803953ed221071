//! Anchor-relative placement shared by merge and reconcile
//!
//! Both operations walk the catalog in order over a sequence of slots (full
//! descriptors for merge, bare ids for reconcile) and insert missing entries
//! at a moving anchor. Sharing the walk keeps the two outputs in agreement.

use crate::catalog::{CatalogEntry, ColumnCatalog, Placement};
use crate::hints::ReconcileHints;
use colwright_core::{ColumnDescriptor, SyntheticColumn, ToggleConfig};

/// Anything that occupies a position in a column sequence.
pub(crate) trait Slot {
    fn slot_id(&self) -> &str;
}

impl Slot for ColumnDescriptor {
    fn slot_id(&self) -> &str {
        &self.id
    }
}

impl Slot for String {
    fn slot_id(&self) -> &str {
        self
    }
}

/// What happened to one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Inserted,
    /// Already provided by the slot with this id.
    Present { provider: String },
    Disabled,
    NoEvidence,
}

fn position_of<T: Slot>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.slot_id() == id)
}

fn provider_index<T, P>(items: &[T], entry: &CatalogEntry, provides: &P) -> Option<usize>
where
    P: Fn(&T, &CatalogEntry) -> bool,
{
    items.iter().position(|item| provides(item, entry))
}

/// Position right after the first anchor id present, else 0.
pub(crate) fn anchor_index<T: Slot>(items: &[T], anchor_ids: &[String]) -> usize {
    anchor_ids
        .iter()
        .find_map(|anchor| position_of(items, anchor))
        .map_or(0, |pos| pos + 1)
}

/// Insert every applicable catalog entry into `items`.
///
/// - A pre-existing entry is never moved. With [`Placement::Anchor`] or
///   [`Placement::Paired`] the insertion point moves right after it. With
///   [`Placement::Follow`] it moves only when the slot carries the entry's
///   own id and sits at the insertion point.
/// - Disabled entries and conditional entries without evidence are skipped.
/// - An entry followed by a pre-existing [`Placement::Paired`] entry is
///   inserted right before that entry.
/// - Everything else is inserted at the insertion point, which then advances.
///
/// Inserted slots therefore form one run, interrupted only by pre-existing
/// catalog columns.
pub(crate) fn place<T, P, M>(
    items: &mut Vec<T>,
    catalog: &ColumnCatalog,
    anchor_ids: &[String],
    toggles: &ToggleConfig,
    hints: &ReconcileHints,
    provides: P,
    mut make: M,
) -> Vec<(SyntheticColumn, Step)>
where
    T: Slot,
    P: Fn(&T, &CatalogEntry) -> bool,
    M: FnMut(&CatalogEntry) -> T,
{
    let entries = catalog.entries();
    let mut anchor = anchor_index(items, anchor_ids);
    let mut steps = Vec::with_capacity(entries.len());

    for (position, entry) in entries.iter().enumerate() {
        if let Some(index) = provider_index(items, entry, &provides) {
            let extends_block = match entry.placement {
                Placement::Anchor | Placement::Paired => true,
                Placement::Follow => index == anchor && items[index].slot_id() == entry.id(),
            };
            if extends_block {
                anchor = index + 1;
            }
            let provider = items[index].slot_id().to_string();
            steps.push((entry.column, Step::Present { provider }));
            continue;
        }

        if toggles.is_disabled(entry.column) {
            steps.push((entry.column, Step::Disabled));
            continue;
        }

        if entry.is_conditional() && !hints.includes(entry.column) {
            steps.push((entry.column, Step::NoEvidence));
            continue;
        }

        let target = entries
            .get(position + 1)
            .filter(|next| next.placement == Placement::Paired)
            .and_then(|next| provider_index(items, next, &provides))
            .unwrap_or(anchor);
        items.insert(target, make(entry));
        steps.push((entry.column, Step::Inserted));
        anchor = target + 1;
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn anchors() -> Vec<String> {
        ids(&["controls", "select"])
    }

    fn place_ids(items: &mut Vec<String>, toggles: &ToggleConfig) -> Vec<(SyntheticColumn, Step)> {
        place(
            items,
            &ColumnCatalog::standard(),
            &anchors(),
            toggles,
            &ReconcileHints::default(),
            |id, entry| entry.matches_id(id),
            |entry| entry.id().to_string(),
        )
    }

    fn dnc_pair_only() -> ToggleConfig {
        ToggleConfig::disabling([
            SyntheticColumn::SalesScriptTitle,
            SyntheticColumn::AgentTitle,
            SyntheticColumn::CampaignGoal,
            SyntheticColumn::TimingPrefs,
        ])
    }

    #[test]
    fn test_anchor_prefers_controls() {
        let both = ids(&["select", "controls", "name"]);
        assert_eq!(anchor_index(&both, &anchors()), 2);
        let select_only = ids(&["a", "select", "name"]);
        assert_eq!(anchor_index(&select_only, &anchors()), 2);
        let neither = ids(&["name", "phone"]);
        assert_eq!(anchor_index(&neither, &anchors()), 0);
        assert_eq!(anchor_index::<String>(&[], &anchors()), 0);
    }

    #[test]
    fn test_place_ids_in_catalog_order() {
        let mut items = ids(&["select", "name"]);
        let steps = place_ids(&mut items, &ToggleConfig::default());
        assert_eq!(
            items,
            ids(&[
                "select",
                "globalDnc",
                "globalDncSource",
                "globalSalesScriptTitle",
                "globalAgentTitle",
                "globalCampaignGoal",
                "globalTimingPrefs",
                "name",
            ])
        );
        assert_eq!(steps[0], (SyntheticColumn::Dnc, Step::Inserted));
        assert_eq!(steps[4].0, SyntheticColumn::TransferAgentTitle);
        assert_eq!(steps[4].1, Step::NoEvidence);
    }

    #[test]
    fn test_present_anchor_entry_moves_insertion_point() {
        let mut items = ids(&["select", "name", "dnc", "phone"]);
        place_ids(&mut items, &dnc_pair_only());
        let expected = ids(&["select", "name", "dnc", "globalDncSource", "phone"]);
        assert_eq!(items, expected);
    }

    #[test]
    fn test_missing_dnc_goes_before_present_source() {
        let mut items = ids(&["select", "name", "globalDncSource", "phone"]);
        let steps = place_ids(&mut items, &ToggleConfig::default());
        assert_eq!(
            items,
            ids(&[
                "select",
                "name",
                "globalDnc",
                "globalDncSource",
                "globalSalesScriptTitle",
                "globalAgentTitle",
                "globalCampaignGoal",
                "globalTimingPrefs",
                "phone",
            ])
        );
        assert_eq!(
            steps[1],
            (
                SyntheticColumn::DncSource,
                Step::Present {
                    provider: "globalDncSource".to_string()
                }
            )
        );
    }

    #[test]
    fn test_alias_at_anchor_stays_outside_block() {
        let mut items = ids(&["select", "agentName", "name"]);
        place_ids(&mut items, &ToggleConfig::default());
        assert_eq!(
            items,
            ids(&[
                "select",
                "globalDnc",
                "globalDncSource",
                "globalSalesScriptTitle",
                "globalCampaignGoal",
                "globalTimingPrefs",
                "agentName",
                "name",
            ])
        );
    }

    #[test]
    fn test_own_id_at_anchor_extends_block() {
        let mut items = ids(&["select", "globalDnc", "globalDncSource", "name"]);
        place_ids(&mut items, &ToggleConfig::default());
        assert_eq!(items[3], "globalSalesScriptTitle");
        assert_eq!(items.last().map(String::as_str), Some("name"));
    }
}
