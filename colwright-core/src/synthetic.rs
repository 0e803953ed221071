//! Well-known synthetic column identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The global columns the engine can inject into a caller list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntheticColumn {
    Dnc,
    DncSource,
    SalesScriptTitle,
    AgentTitle,
    TransferAgentTitle,
    CampaignGoal,
    TimingPrefs,
}

impl SyntheticColumn {
    /// All synthetic columns in their canonical placement order.
    pub const ALL: [SyntheticColumn; 7] = [
        SyntheticColumn::Dnc,
        SyntheticColumn::DncSource,
        SyntheticColumn::SalesScriptTitle,
        SyntheticColumn::AgentTitle,
        SyntheticColumn::TransferAgentTitle,
        SyntheticColumn::CampaignGoal,
        SyntheticColumn::TimingPrefs,
    ];

    /// Column id used in merged lists and column orders.
    pub const fn id(self) -> &'static str {
        match self {
            SyntheticColumn::Dnc => "globalDnc",
            SyntheticColumn::DncSource => "globalDncSource",
            SyntheticColumn::SalesScriptTitle => "globalSalesScriptTitle",
            SyntheticColumn::AgentTitle => "globalAgentTitle",
            SyntheticColumn::TransferAgentTitle => "globalTransferAgentTitle",
            SyntheticColumn::CampaignGoal => "globalCampaignGoal",
            SyntheticColumn::TimingPrefs => "globalTimingPrefs",
        }
    }

    /// Key used in a per-column toggle map.
    pub const fn toggle_name(self) -> &'static str {
        match self {
            SyntheticColumn::Dnc => "dnc",
            SyntheticColumn::DncSource => "dncSource",
            SyntheticColumn::SalesScriptTitle => "salesScriptTitle",
            SyntheticColumn::AgentTitle => "agentTitle",
            SyntheticColumn::TransferAgentTitle => "transferAgentTitle",
            SyntheticColumn::CampaignGoal => "campaignGoal",
            SyntheticColumn::TimingPrefs => "timingPrefs",
        }
    }

    /// Look up a synthetic column by id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for SyntheticColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for SyntheticColumn {
    type Err = String;

    /// Accepts either the column id or the toggle name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.id() == trimmed || c.toggle_name() == trimmed)
            .ok_or_else(|| format!("Unknown synthetic column: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_names_round_trip() {
        for column in SyntheticColumn::ALL {
            assert_eq!(column.id().parse::<SyntheticColumn>(), Ok(column));
            assert_eq!(column.toggle_name().parse::<SyntheticColumn>(), Ok(column));
            assert_eq!(SyntheticColumn::from_id(column.id()), Some(column));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!("globalNothing".parse::<SyntheticColumn>().is_err());
        assert_eq!(SyntheticColumn::from_id("dnc"), None);
    }
}
