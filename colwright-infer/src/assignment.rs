//! Script, agent, transfer-agent and goal lookups
//!
//! Each lookup walks a small ordered alias list; the first non-blank value
//! wins.

use crate::channel::{infer_channel, Channel};
use colwright_core::{value_text, Row};

pub const SCRIPT_TITLE_FIELDS: &[&str] = &[
    "salesScriptTitle",
    "scriptTitle",
    "salesScript.title",
    "script.title",
    "salesScript",
    "script",
];

pub const AGENT_TITLE_FIELDS: &[&str] = &[
    "agentTitle",
    "agentName",
    "assignedAgent",
    "agent.title",
    "agent.name",
    "agent",
];

/// Channel-specific agent fields consulted before the generic ones.
pub const CHANNEL_AGENT_FIELDS: &[(Channel, &[&str])] = &[
    (Channel::Call, &["callAgentTitle", "voiceAgent"]),
    (Channel::Text, &["textAgentTitle", "smsAgent"]),
    (Channel::DirectMail, &["dmAgentTitle"]),
    (Channel::Social, &["socialAgentTitle"]),
];

pub const TRANSFER_AGENT_FIELDS: &[&str] = &[
    "transferAgentTitle",
    "transferAgentName",
    "transfer.agentName",
    "transfer.agentTitle",
    "transfer.agentId",
    "transferAgent",
];

/// Flat fields that on their own prove a transfer happened.
pub const TRANSFER_TITLE_FIELDS: &[&str] = &[
    "transferAgentTitle",
    "transferAgentName",
    "transferAgent",
];

/// Agent identifiers looked for inside a nested `transfer` object.
pub const TRANSFER_OBJECT_FIELDS: &[&str] = &["agentId", "agentName", "agentTitle"];

pub const GOAL_FIELDS: &[&str] = &["campaignGoal", "goal", "goalDescription", "campaign.goal"];

/// Assigned sales script title.
pub fn script_title(row: &Row) -> Option<String> {
    row.first_text(SCRIPT_TITLE_FIELDS)
}

/// Assigned agent title, preferring the field for the record's channel.
pub fn agent_title(row: &Row) -> Option<String> {
    let channel_specific = infer_channel(row).and_then(|channel| {
        CHANNEL_AGENT_FIELDS
            .iter()
            .find(|(c, _)| *c == channel)
            .and_then(|(_, fields)| row.first_text(fields))
    });
    channel_specific.or_else(|| row.first_text(AGENT_TITLE_FIELDS))
}

/// Agent a call or conversation was transferred to.
pub fn transfer_agent_title(row: &Row) -> Option<String> {
    row.first_text(TRANSFER_AGENT_FIELDS)
}

/// Whether the record shows a transfer happened.
pub fn has_transfer_signal(row: &Row) -> bool {
    if row.first_text(TRANSFER_TITLE_FIELDS).is_some() {
        return true;
    }
    row.object("transfer").is_some_and(|transfer| {
        TRANSFER_OBJECT_FIELDS
            .iter()
            .any(|f| transfer.get(*f).and_then(value_text).is_some())
    })
}

/// Free-text campaign goal.
pub fn campaign_goal(row: &Row) -> Option<String> {
    row.first_text(GOAL_FIELDS)
}
