//! Contact-suppression (DNC) status and source resolution
//!
//! Suppression data arrives in many shapes: an explicit source string, a type
//! keyword, per-channel opt-out booleans, a bare suppression count, or a
//! per-source breakdown object. Resolution walks [`RESOLUTION_STEPS`] in order
//! and stops at the first step that produces a result.

use crate::channel::{DIRECT_MAIL_SIGNALS, SOCIAL_SIGNALS, TEXT_SIGNALS, VOICE_SIGNALS};
use colwright_core::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a suppression came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DncSource {
    Text,
    Email,
    Call,
    Dm,
    ManualPopIn,
    ScrubList,
}

impl DncSource {
    /// Display priority, also used to order breakdown summaries.
    pub const ALL: [DncSource; 6] = [
        DncSource::Text,
        DncSource::Email,
        DncSource::Call,
        DncSource::Dm,
        DncSource::ManualPopIn,
        DncSource::ScrubList,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DncSource::Text => "Text Opt-out",
            DncSource::Email => "Email Opt-out",
            DncSource::Call => "Call Opt-out",
            DncSource::Dm => "DM Opt-out",
            DncSource::ManualPopIn => "Manual Pop-in",
            DncSource::ScrubList => "Scrub List",
        }
    }

    /// Label used inside breakdown summaries.
    pub fn short_label(self) -> &'static str {
        match self {
            DncSource::Text => "Text",
            DncSource::Email => "Email",
            DncSource::Call => "Call",
            DncSource::Dm => "DM",
            DncSource::ManualPopIn => "Manual",
            DncSource::ScrubList => "Scrub",
        }
    }

    /// Map a free-text keyword (type field or breakdown key) to a source.
    pub fn from_keyword(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        SOURCE_KEYWORDS
            .iter()
            .chain(BREAKDOWN_EXTRA_KEYWORDS)
            .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
            .map(|(source, _)| *source)
    }
}

impl fmt::Display for DncSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// FIELD TABLES
// ============================================================================

/// Fields whose truthiness marks a record as suppressed.
pub const DNC_FLAG_FIELDS: &[&str] = &[
    "dnc",
    "isDnc",
    "dncList",
    "doNotCall",
    "doNotContact",
    "optedOut",
    "smsOptOut",
    "textOptOut",
    "emailOptOut",
    "callOptOut",
];

pub const EXPLICIT_SOURCE_FIELDS: &[&str] = &[
    "dncSource",
    "dncReason",
    "suppressionSource",
    "optOutSource",
];

pub const SOURCE_TYPE_FIELDS: &[&str] = &["dncType", "suppressionType", "optOutType", "dncChannel"];

/// Canonical type keywords, in priority order.
pub const SOURCE_KEYWORDS: &[(DncSource, &[&str])] = &[
    (DncSource::Text, &["text", "sms"]),
    (DncSource::Email, &["email"]),
    (DncSource::Call, &["call", "voice"]),
    (DncSource::Dm, &["dm", "social"]),
];

const BREAKDOWN_EXTRA_KEYWORDS: &[(DncSource, &[&str])] = &[
    (DncSource::ManualPopIn, &["manual", "popin", "pop-in"]),
    (DncSource::ScrubList, &["scrub"]),
];

/// Explicit opt-out booleans, in priority order.
pub const OPT_OUT_FLAGS: &[(DncSource, &[&str])] = &[
    (DncSource::Text, &["smsOptOut", "textOptOut"]),
    (DncSource::Email, &["emailOptOut"]),
    (DncSource::Call, &["callOptOut", "doNotCall"]),
    (DncSource::ManualPopIn, &["manualPopIn", "manualDnc"]),
    (DncSource::ScrubList, &["scrubList", "dncScrub", "scrubbed"]),
];

pub const SUPPRESSION_COUNT_FIELDS: &[&str] = &["dncCount", "suppressionCount", "suppressedCount"];

pub const EMAIL_SIGNALS: &[&str] = &["email", "emailAddress", "emailSubject", "emailOptOut"];

/// Key-presence sniffing used alongside a suppression count.
pub const SUPPRESSION_SIGNALS: &[(DncSource, &[&[&str]])] = &[
    (DncSource::Text, &[TEXT_SIGNALS]),
    (DncSource::Email, &[EMAIL_SIGNALS]),
    (DncSource::Dm, &[DIRECT_MAIL_SIGNALS, SOCIAL_SIGNALS]),
    (DncSource::Call, &[VOICE_SIGNALS]),
];

pub const GENERIC_OPT_OUT_FIELDS: &[&str] = &["optedOut", "optOut", "isOptedOut"];

pub const BREAKDOWN_FIELDS: &[&str] = &["dncBreakdown", "dncSources", "suppressionBreakdown"];

// ============================================================================
// DNC STATUS
// ============================================================================

/// Whether the record is suppressed from contact.
pub fn is_dnc(row: &Row) -> bool {
    row.any_flag(DNC_FLAG_FIELDS) || suppression_count(row).is_some()
}

fn suppression_count(row: &Row) -> Option<f64> {
    row.first_number(SUPPRESSION_COUNT_FIELDS)
        .filter(|count| *count > 0.0)
}

// ============================================================================
// SOURCE RESOLUTION
// ============================================================================

/// Outcome of source resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DncResolution {
    /// Per-source counts, in display order.
    Breakdown(Vec<(String, u64)>),
    /// Free-text source recorded on the row.
    Explicit(String),
    /// A recognised source.
    Source(DncSource),
    /// Nothing to report.
    Unknown,
}

impl DncResolution {
    /// Render as the column value.
    pub fn label(&self) -> String {
        match self {
            DncResolution::Breakdown(counts) => counts
                .iter()
                .map(|(label, count)| format!("{}:{}", label, count))
                .collect::<Vec<_>>()
                .join(", "),
            DncResolution::Explicit(text) => text.clone(),
            DncResolution::Source(source) => source.label().to_string(),
            DncResolution::Unknown => String::new(),
        }
    }
}

/// A named resolution step.
pub type ResolutionStep = (&'static str, fn(&Row) -> Option<DncResolution>);

/// Resolution chain; the first step returning `Some` wins.
pub const RESOLUTION_STEPS: &[ResolutionStep] = &[
    ("breakdown", from_breakdown),
    ("explicit_source", from_explicit_source),
    ("type_keyword", from_type_keyword),
    ("opt_out_flag", from_opt_out_flags),
    ("suppression_count", from_suppression_count),
    ("generic_opt_out", from_generic_opt_out),
];

/// Resolve the suppression source of a record.
pub fn classify_dnc_source(row: &Row) -> DncResolution {
    for (name, step) in RESOLUTION_STEPS {
        if let Some(resolution) = step(row) {
            tracing::trace!(step = name, "resolved dnc source");
            return resolution;
        }
    }
    DncResolution::Unknown
}

/// Resolve the suppression source label; empty when unknown.
pub fn resolve_dnc_source(row: &Row) -> String {
    classify_dnc_source(row).label()
}

fn from_breakdown(row: &Row) -> Option<DncResolution> {
    let breakdown = BREAKDOWN_FIELDS.iter().find_map(|f| row.object(f))?;

    let mut known: Vec<(DncSource, u64)> = Vec::new();
    let mut unknown: Vec<(String, u64)> = Vec::new();
    for (key, value) in breakdown {
        let count = match value.as_f64().map(f64::round) {
            Some(n) if n >= 1.0 => n as u64,
            _ => continue,
        };
        match DncSource::from_keyword(key) {
            Some(source) => match known.iter_mut().find(|(s, _)| *s == source) {
                Some((_, total)) => *total += count,
                None => known.push((source, count)),
            },
            None => unknown.push((key.clone(), count)),
        }
    }

    if known.is_empty() && unknown.is_empty() {
        return None;
    }

    known.sort_by_key(|(source, _)| *source);
    let counts = known
        .into_iter()
        .map(|(source, count)| (source.short_label().to_string(), count))
        .chain(unknown)
        .collect();
    Some(DncResolution::Breakdown(counts))
}

fn from_explicit_source(row: &Row) -> Option<DncResolution> {
    row.first_text(EXPLICIT_SOURCE_FIELDS)
        .map(DncResolution::Explicit)
}

fn from_type_keyword(row: &Row) -> Option<DncResolution> {
    let kind = row.first_text(SOURCE_TYPE_FIELDS)?.to_lowercase();
    SOURCE_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| kind.contains(w)))
        .map(|(source, _)| DncResolution::Source(*source))
}

fn from_opt_out_flags(row: &Row) -> Option<DncResolution> {
    OPT_OUT_FLAGS
        .iter()
        .find(|(_, fields)| row.any_flag(fields))
        .map(|(source, _)| DncResolution::Source(*source))
}

fn from_suppression_count(row: &Row) -> Option<DncResolution> {
    suppression_count(row)?;
    SUPPRESSION_SIGNALS
        .iter()
        .find(|(_, groups)| groups.iter().any(|keys| row.has_any(keys)))
        .map(|(source, _)| DncResolution::Source(*source))
}

fn from_generic_opt_out(row: &Row) -> Option<DncResolution> {
    row.any_flag(GENERIC_OPT_OUT_FIELDS)
        .then_some(DncResolution::Source(DncSource::Text))
}
