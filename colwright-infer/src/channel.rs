//! Channel-type inference
//!
//! Records from different outreach channels share no schema. The channel is
//! read off the key set: each channel owns a disjoint list of signal keys,
//! checked in a fixed order with first-match semantics. Records with no
//! signal keys fall back to a canonical free-text type field.

use colwright_core::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outreach channel a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Call,
    Text,
    DirectMail,
    Social,
}

impl Channel {
    pub fn label(self) -> &'static str {
        match self {
            Channel::Call => "Call",
            Channel::Text => "Text",
            Channel::DirectMail => "Direct Mail",
            Channel::Social => "Social",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A channel and the keys whose presence identifies it.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSignals {
    pub channel: Channel,
    pub keys: &'static [&'static str],
}

pub const VOICE_SIGNALS: &[&str] = &[
    "callInformation",
    "callType",
    "callerNumber",
    "phoneCallProvider",
    "phoneCallTransport",
];

pub const TEXT_SIGNALS: &[&str] = &["messages", "message", "smsOptOut", "smsOptIn", "textOptOut"];

pub const DIRECT_MAIL_SIGNALS: &[&str] = &["mailType", "mailSize", "template", "dm", "directMail"];

pub const SOCIAL_SIGNALS: &[&str] = &["platform", "actions", "social"];

/// Key-presence rules in evaluation order.
pub const CHANNEL_SIGNALS: &[ChannelSignals] = &[
    ChannelSignals {
        channel: Channel::Call,
        keys: VOICE_SIGNALS,
    },
    ChannelSignals {
        channel: Channel::Text,
        keys: TEXT_SIGNALS,
    },
    ChannelSignals {
        channel: Channel::DirectMail,
        keys: DIRECT_MAIL_SIGNALS,
    },
    ChannelSignals {
        channel: Channel::Social,
        keys: SOCIAL_SIGNALS,
    },
];

/// Free-text fields naming the record's type.
pub const CANONICAL_TYPE_FIELDS: &[&str] = &["campaignType", "channel", "primaryType"];

/// Substrings recognised in the canonical type field, in evaluation order.
pub const CHANNEL_KEYWORDS: &[(Channel, &[&str])] = &[
    (Channel::Call, &["call", "voice", "phone"]),
    (Channel::Text, &["text", "sms"]),
    (Channel::DirectMail, &["direct", "mail", "dm"]),
    (Channel::Social, &["social"]),
];

/// Classify a record by channel.
///
/// Order is fixed: voice, text, direct mail, social, then the canonical
/// free-text field. Returns `None` when nothing matches.
pub fn infer_channel(row: &Row) -> Option<Channel> {
    infer_channel_from_keys(row).or_else(|| infer_channel_from_type(row))
}

/// Key-presence classification only.
pub fn infer_channel_from_keys(row: &Row) -> Option<Channel> {
    CHANNEL_SIGNALS
        .iter()
        .find(|signals| row.has_any(signals.keys))
        .map(|signals| signals.channel)
}

/// Canonical free-text field classification only.
pub fn infer_channel_from_type(row: &Row) -> Option<Channel> {
    let kind = row.first_text(CANONICAL_TYPE_FIELDS)?.to_lowercase();
    CHANNEL_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| kind.contains(w)))
        .map(|(channel, _)| *channel)
}
