//! Synthetic column catalog
//!
//! The catalog is an explicit, ordered registry of builders. Order matters:
//! merge and reconcile place enabled entries contiguously in catalog order.
//! Each entry also carries the alias table used for presence detection, how
//! it reacts to a pre-existing copy ([`Placement`]) and whether it needs row
//! evidence before it materializes ([`Materialization`]).

use colwright_core::{
    CatalogError, ColumnDescriptor, ColumnLayout, ColwrightResult, EngineConfig, FilterOption,
    FilterSpec, Row, SyntheticColumn, DEFAULT_GOAL_MAX_CHARS, EMPTY_PLACEHOLDER, UNASSIGNED_LABEL,
};
use colwright_infer::{
    agent_title, campaign_goal, has_transfer_signal, is_dnc, resolve_dnc_source, script_title,
    timing_label, transfer_agent_title, truncate_with_ellipsis, DncSource,
};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds one synthetic column.
pub type ColumnBuilder = Arc<dyn Fn() -> ColumnDescriptor + Send + Sync>;

/// Row-level evidence check for conditional columns.
pub type EvidenceFn = fn(&Row) -> bool;

/// How an entry moves the insertion point when the caller already has it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A pre-existing copy becomes the new anchor, wherever it sits.
    Anchor,
    /// As `Anchor`; a missing preceding entry is also inserted right before
    /// the pre-existing copy so the pair stays adjacent.
    Paired,
    /// A pre-existing copy extends the block only when it carries the
    /// synthetic id itself and sits at the anchor. Alias providers stay
    /// outside the block.
    Follow,
}

/// Whether an entry materializes on configuration alone.
#[derive(Debug, Clone, Copy)]
pub enum Materialization {
    Always,
    /// Only when at least one sampled row passes the check.
    OnEvidence(EvidenceFn),
}

// ============================================================================
// ALIAS TABLES
// ============================================================================

pub const DNC_ALIASES: &[&str] = &["dnc", "dncStatus", "isDnc", "dncList", "doNotContact"];
pub const DNC_SOURCE_ALIASES: &[&str] = &["dncSource", "dncReason", "suppressionSource"];
pub const SALES_SCRIPT_ALIASES: &[&str] =
    &["salesScript", "salesScriptTitle", "scriptTitle", "script"];
pub const AGENT_ALIASES: &[&str] = &["agent", "agentTitle", "agentName", "assignedAgent"];
pub const TRANSFER_AGENT_ALIASES: &[&str] =
    &["transferAgent", "transferAgentTitle", "transferAgentName"];
pub const CAMPAIGN_GOAL_ALIASES: &[&str] = &["campaignGoal", "goal"];
pub const TIMING_PREFS_ALIASES: &[&str] = &["timingPrefs", "timing", "timingPreferences"];

// ============================================================================
// CATALOG ENTRY
// ============================================================================

/// One registered synthetic column.
#[derive(Clone)]
pub struct CatalogEntry {
    pub column: SyntheticColumn,
    pub aliases: Vec<String>,
    pub placement: Placement,
    pub materialization: Materialization,
    builder: ColumnBuilder,
}

impl CatalogEntry {
    /// New unconditional entry with follow placement and no aliases.
    pub fn new<F>(column: SyntheticColumn, builder: F) -> Self
    where
        F: Fn() -> ColumnDescriptor + Send + Sync + 'static,
    {
        Self {
            column,
            aliases: Vec::new(),
            placement: Placement::Follow,
            materialization: Materialization::Always,
            builder: Arc::new(builder),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn on_evidence(mut self, check: EvidenceFn) -> Self {
        self.materialization = Materialization::OnEvidence(check);
        self
    }

    pub fn id(&self) -> &'static str {
        self.column.id()
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self.materialization, Materialization::OnEvidence(_))
    }

    /// Build the column descriptor.
    pub fn build(&self) -> ColumnDescriptor {
        (self.builder)()
    }

    /// Id equality or an alias hit.
    pub fn matches_id(&self, id: &str) -> bool {
        id == self.id() || self.aliases.iter().any(|alias| alias == id)
    }

    /// Whether a caller column already provides this entry, by id or by
    /// accessor key.
    pub fn is_provided_by(&self, column: &ColumnDescriptor) -> bool {
        match column.accessor_key() {
            Some(key) => self.matches_id(&column.id) || self.matches_id(key),
            None => self.matches_id(&column.id),
        }
    }

    /// Whether any row in the sample supports materializing this entry.
    pub fn has_evidence(&self, rows: &[Row]) -> bool {
        match self.materialization {
            Materialization::Always => true,
            Materialization::OnEvidence(check) => rows.iter().any(check),
        }
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("column", &self.column)
            .field("aliases", &self.aliases)
            .field("placement", &self.placement)
            .field("conditional", &self.is_conditional())
            .finish()
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Ordered registry of synthetic columns.
#[derive(Debug, Clone)]
pub struct ColumnCatalog {
    entries: Vec<CatalogEntry>,
}

impl ColumnCatalog {
    /// Build a catalog, validating ids, aliases and builders.
    pub fn new(entries: Vec<CatalogEntry>) -> ColwrightResult<Self> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The seven global columns, with the default goal budget.
    pub fn standard() -> Self {
        Self::standard_with(&EngineConfig::default())
    }

    /// The seven global columns, configured.
    pub fn standard_with(config: &EngineConfig) -> Self {
        let goal_budget = config.goal_max_chars;
        Self {
            entries: vec![
                CatalogEntry::new(SyntheticColumn::Dnc, global_dnc_column)
                    .with_aliases(DNC_ALIASES.iter().copied())
                    .with_placement(Placement::Anchor),
                CatalogEntry::new(SyntheticColumn::DncSource, global_dnc_source_column)
                    .with_aliases(DNC_SOURCE_ALIASES.iter().copied())
                    .with_placement(Placement::Paired),
                CatalogEntry::new(
                    SyntheticColumn::SalesScriptTitle,
                    global_sales_script_column,
                )
                .with_aliases(SALES_SCRIPT_ALIASES.iter().copied()),
                CatalogEntry::new(SyntheticColumn::AgentTitle, global_agent_column)
                    .with_aliases(AGENT_ALIASES.iter().copied()),
                CatalogEntry::new(
                    SyntheticColumn::TransferAgentTitle,
                    global_transfer_agent_column,
                )
                .with_aliases(TRANSFER_AGENT_ALIASES.iter().copied())
                .on_evidence(has_transfer_signal),
                CatalogEntry::new(SyntheticColumn::CampaignGoal, move || {
                    global_campaign_goal_column_with_budget(goal_budget)
                })
                .with_aliases(CAMPAIGN_GOAL_ALIASES.iter().copied()),
                CatalogEntry::new(SyntheticColumn::TimingPrefs, global_timing_prefs_column)
                    .with_aliases(TIMING_PREFS_ALIASES.iter().copied()),
            ],
        }
    }

    /// Check structural invariants.
    ///
    /// Validates:
    /// - at least one entry
    /// - each synthetic column registered once
    /// - no alias claimed by two entries (or equal to another entry's id)
    /// - each builder produces a column with the entry's id
    pub fn validate(&self) -> ColwrightResult<()> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty.into());
        }

        let mut claimed: HashMap<&str, &'static str> = HashMap::new();
        for entry in &self.entries {
            if claimed.get(entry.id()) == Some(&entry.id()) {
                return Err(CatalogError::DuplicateEntry {
                    id: entry.id().to_string(),
                }
                .into());
            }
            let names = std::iter::once(entry.id())
                .chain(entry.aliases.iter().map(String::as_str));
            for name in names {
                match claimed.get(name) {
                    Some(owner) if *owner != entry.id() => {
                        return Err(CatalogError::AliasConflict {
                            alias: name.to_string(),
                            first: owner.to_string(),
                            second: entry.id().to_string(),
                        }
                        .into());
                    }
                    _ => {
                        claimed.insert(name, entry.id());
                    }
                }
            }

            let built = entry.build();
            if built.id != entry.id() {
                return Err(CatalogError::BuilderIdMismatch {
                    expected: entry.id().to_string(),
                    actual: built.id,
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, column: SyntheticColumn) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ColumnCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

pub const DNC_HEADER: &str = "DNC";
pub const DNC_SOURCE_HEADER: &str = "DNC Source";
pub const SALES_SCRIPT_HEADER: &str = "Sales Script";
pub const AGENT_HEADER: &str = "Agent";
pub const TRANSFER_AGENT_HEADER: &str = "Transfer Agent";
pub const CAMPAIGN_GOAL_HEADER: &str = "Campaign Goal";
pub const TIMING_PREFS_HEADER: &str = "Timing Prefs";

fn text_or(value: Option<String>, fallback: &str) -> Value {
    Value::String(value.unwrap_or_else(|| fallback.to_string()))
}

/// Contact-suppression status (boolean).
pub fn global_dnc_column() -> ColumnDescriptor {
    ColumnDescriptor::computed(SyntheticColumn::Dnc.id(), |row| Value::Bool(is_dnc(row)))
        .with_header(DNC_HEADER)
        .with_filter(FilterSpec::select(vec![
            FilterOption::new("Yes", true),
            FilterOption::new("No", false),
        ]))
        .with_layout(ColumnLayout::sized(80))
}

/// Where the suppression came from.
pub fn global_dnc_source_column() -> ColumnDescriptor {
    let options = DncSource::ALL
        .into_iter()
        .map(|source| FilterOption::new(source.label(), source.label()))
        .collect();
    ColumnDescriptor::computed(SyntheticColumn::DncSource.id(), |row| {
        Value::String(resolve_dnc_source(row))
    })
    .with_header(DNC_SOURCE_HEADER)
    .with_filter(FilterSpec::select(options))
    .with_layout(ColumnLayout::sized(140))
}

/// Assigned sales script.
pub fn global_sales_script_column() -> ColumnDescriptor {
    ColumnDescriptor::computed(SyntheticColumn::SalesScriptTitle.id(), |row| {
        text_or(script_title(row), EMPTY_PLACEHOLDER)
    })
    .with_header(SALES_SCRIPT_HEADER)
    .with_filter(FilterSpec::text("Filter scripts..."))
    .with_layout(ColumnLayout::sized(180))
}

/// Assigned agent.
pub fn global_agent_column() -> ColumnDescriptor {
    ColumnDescriptor::computed(SyntheticColumn::AgentTitle.id(), |row| {
        text_or(agent_title(row), UNASSIGNED_LABEL)
    })
    .with_header(AGENT_HEADER)
    .with_filter(FilterSpec::text("Filter agents..."))
    .with_layout(ColumnLayout::sized(160))
}

/// Agent the record was transferred to.
pub fn global_transfer_agent_column() -> ColumnDescriptor {
    ColumnDescriptor::computed(SyntheticColumn::TransferAgentTitle.id(), |row| {
        text_or(transfer_agent_title(row), EMPTY_PLACEHOLDER)
    })
    .with_header(TRANSFER_AGENT_HEADER)
    .with_filter(FilterSpec::text("Filter transfer agents..."))
    .with_layout(ColumnLayout::sized(160))
}

/// Campaign goal, truncated to the default budget.
pub fn global_campaign_goal_column() -> ColumnDescriptor {
    global_campaign_goal_column_with_budget(DEFAULT_GOAL_MAX_CHARS)
}

/// Campaign goal, truncated to `budget` characters.
pub fn global_campaign_goal_column_with_budget(budget: usize) -> ColumnDescriptor {
    ColumnDescriptor::computed(SyntheticColumn::CampaignGoal.id(), move |row| {
        let goal = campaign_goal(row).map(|g| truncate_with_ellipsis(&g, budget));
        text_or(goal, EMPTY_PLACEHOLDER)
    })
    .with_header(CAMPAIGN_GOAL_HEADER)
    .with_filter(FilterSpec::text("Filter goals..."))
    .with_layout(ColumnLayout::sized(240))
}

/// Timing preference summary; empty when nothing is known.
pub fn global_timing_prefs_column() -> ColumnDescriptor {
    ColumnDescriptor::computed(SyntheticColumn::TimingPrefs.id(), |row| {
        Value::String(timing_label(row))
    })
    .with_header(TIMING_PREFS_HEADER)
    .with_layout(ColumnLayout::sized(220).without_sorting().without_filter())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use colwright_core::ColwrightError;
    use serde_json::json;

    const GOAL: &str = "Increase appointment bookings for Q3.";

    fn row(value: Value) -> Row {
        Row::from_value(value)
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = ColumnCatalog::standard();
        assert!(catalog.validate().is_ok());
        let ids: Vec<_> = catalog.entries().iter().map(|e| e.id()).collect();
        assert_eq!(
            ids,
            vec![
                "globalDnc",
                "globalDncSource",
                "globalSalesScriptTitle",
                "globalAgentTitle",
                "globalTransferAgentTitle",
                "globalCampaignGoal",
                "globalTimingPrefs",
            ]
        );
    }

    #[test]
    fn test_only_transfer_is_conditional() {
        let catalog = ColumnCatalog::standard();
        for entry in catalog.entries() {
            assert_eq!(
                entry.is_conditional(),
                entry.column == SyntheticColumn::TransferAgentTitle,
                "{}",
                entry.id()
            );
        }
    }

    #[test]
    fn test_presence_by_alias_and_accessor_key() {
        let catalog = ColumnCatalog::standard();
        let dnc = catalog.get(SyntheticColumn::Dnc).expect("dnc entry");
        assert!(dnc.is_provided_by(&ColumnDescriptor::keyed("dnc")));
        let keyed_status = ColumnDescriptor::keyed("status").with_accessor_key("dnc");
        assert!(dnc.is_provided_by(&keyed_status));
        assert!(dnc.is_provided_by(&ColumnDescriptor::keyed("globalDnc")));
        assert!(!dnc.is_provided_by(&ColumnDescriptor::keyed("name")));
    }

    #[test]
    fn test_rejects_duplicate_entry() {
        let result = ColumnCatalog::new(vec![
            CatalogEntry::new(SyntheticColumn::Dnc, global_dnc_column),
            CatalogEntry::new(SyntheticColumn::Dnc, global_dnc_column),
        ]);
        assert!(matches!(
            result,
            Err(ColwrightError::Catalog(CatalogError::DuplicateEntry { .. }))
        ));
    }

    #[test]
    fn test_rejects_alias_conflict() {
        let result = ColumnCatalog::new(vec![
            CatalogEntry::new(SyntheticColumn::AgentTitle, global_agent_column)
                .with_aliases(["agent"]),
            CatalogEntry::new(
                SyntheticColumn::TransferAgentTitle,
                global_transfer_agent_column,
            )
            .with_aliases(["agent"]),
        ]);
        assert!(matches!(
            result,
            Err(ColwrightError::Catalog(CatalogError::AliasConflict { .. }))
        ));
    }

    #[test]
    fn test_rejects_builder_id_mismatch() {
        let result = ColumnCatalog::new(vec![CatalogEntry::new(
            SyntheticColumn::Dnc,
            global_agent_column,
        )]);
        assert!(matches!(
            result,
            Err(ColwrightError::Catalog(
                CatalogError::BuilderIdMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(matches!(
            ColumnCatalog::new(vec![]),
            Err(ColwrightError::Catalog(CatalogError::Empty))
        ));
    }

    #[test]
    fn test_builder_values() {
        let r = row(json!({"dncList": true, "smsOptOut": true}));
        assert_eq!(global_dnc_column().value(&r), json!(true));
        assert_eq!(global_dnc_source_column().value(&r), json!("Text Opt-out"));
        assert_eq!(global_sales_script_column().value(&r), json!("—"));
        assert_eq!(global_agent_column().value(&r), json!("Unassigned"));
        assert_eq!(global_transfer_agent_column().value(&r), json!("—"));
        assert_eq!(global_campaign_goal_column().value(&r), json!("—"));
        assert_eq!(global_timing_prefs_column().value(&r), json!(""));
    }

    #[test]
    fn test_accessors_tolerate_empty_rows() {
        let empty = Row::new();
        for entry in ColumnCatalog::standard().entries() {
            let column = entry.build();
            let _ = column.value(&empty);
            let _ = column.render(&empty);
        }
    }

    #[test]
    fn test_goal_budget_is_configurable() {
        let r = Row::new().set("campaignGoal", GOAL);
        assert_eq!(
            global_campaign_goal_column_with_budget(10).value(&r),
            json!("Increase …")
        );
        assert_eq!(global_campaign_goal_column().value(&r), json!(GOAL));

        let config = EngineConfig::default().with_goal_max_chars(10);
        let catalog = ColumnCatalog::standard_with(&config);
        let goal = catalog
            .get(SyntheticColumn::CampaignGoal)
            .expect("goal entry")
            .build();
        assert_eq!(goal.value(&r), json!("Increase …"));
    }

    #[test]
    fn test_transfer_evidence() {
        let catalog = ColumnCatalog::standard();
        let transfer = catalog
            .get(SyntheticColumn::TransferAgentTitle)
            .expect("transfer entry");
        assert!(!transfer.has_evidence(&[row(json!({"name": "Ava"}))]));
        assert!(transfer.has_evidence(&[
            row(json!({"name": "Ava"})),
            row(json!({"transfer": {"agentId": "A1"}})),
        ]));
        assert!(!transfer.has_evidence(&[]));
    }
}
