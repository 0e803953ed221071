//! Timing-preference summarization
//!
//! Three sources, first present wins:
//! 1. planned fields (attempt range, reach windows, timezone, date range),
//! 2. legacy dialing limits,
//! 3. a preset inferred from the free-text campaign goal.

use crate::assignment::campaign_goal;
use colwright_core::Row;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Nested objects that may hold planned timing fields.
pub const TIMING_OBJECT_FIELDS: &[&str] = &["timingPrefs", "timing"];

pub const MIN_DAILY_ATTEMPTS: &str = "minDailyAttempts";
pub const MAX_DAILY_ATTEMPTS: &str = "maxDailyAttempts";
pub const REACH_BEFORE_BUSINESS: &str = "reachBeforeBusinessHours";
pub const REACH_AFTER_BUSINESS: &str = "reachAfterBusinessHours";
pub const REACH_ON_WEEKEND: &str = "reachOnWeekend";
pub const REACH_ON_HOLIDAYS: &str = "reachOnHolidays";
pub const TIMEZONE_SOURCE: &str = "timezoneSource";
pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";

/// Fields whose presence selects the planned summary.
pub const PLANNED_FIELDS: &[&str] = &[
    MIN_DAILY_ATTEMPTS,
    MAX_DAILY_ATTEMPTS,
    REACH_BEFORE_BUSINESS,
    REACH_AFTER_BUSINESS,
    REACH_ON_WEEKEND,
    REACH_ON_HOLIDAYS,
    TIMEZONE_SOURCE,
    START_DATE,
    END_DATE,
];

pub const TOTAL_ATTEMPTS_FIELDS: &[&str] = &["totalDialAttempts", "totalAttempts"];
pub const DAILY_CAP_FIELDS: &[&str] = &["dailyDialCap", "maxAttemptsPerDay", "dailyCap"];
pub const COOLDOWN_FIELDS: &[&str] = &["cooldownMinutes", "retryCooldownMinutes"];
pub const VOICEMAIL_FIELDS: &[&str] = &["countVoicemailAsAnswered", "voicemailAsAnswered"];

// ============================================================================
// SUMMARY TYPES
// ============================================================================

/// Planned timing, as recorded on the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedTiming {
    pub min_daily_attempts: Option<f64>,
    pub max_daily_attempts: Option<f64>,
    pub reach_before_business: Option<bool>,
    pub reach_after_business: Option<bool>,
    pub reach_on_weekend: Option<bool>,
    pub reach_on_holidays: Option<bool>,
    pub timezone_source: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Legacy dialing limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialingLimits {
    pub total_attempts: Option<f64>,
    pub daily_cap: Option<f64>,
    pub cooldown_minutes: Option<f64>,
    pub voicemail_as_answered: Option<bool>,
}

/// Named cadence preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingPreset {
    Aggressive,
    Balanced,
    Nurture,
}

impl TimingPreset {
    pub fn name(self) -> &'static str {
        match self {
            TimingPreset::Aggressive => "Aggressive",
            TimingPreset::Balanced => "Balanced",
            TimingPreset::Nurture => "Nurture",
        }
    }

    /// The fixed limits each preset stands for.
    pub fn limits(self) -> DialingLimits {
        let (total, daily, cooldown, voicemail) = match self {
            TimingPreset::Aggressive => (12.0, 4.0, 30.0, false),
            TimingPreset::Balanced => (8.0, 2.0, 120.0, true),
            TimingPreset::Nurture => (5.0, 1.0, 1440.0, true),
        };
        DialingLimits {
            total_attempts: Some(total),
            daily_cap: Some(daily),
            cooldown_minutes: Some(cooldown),
            voicemail_as_answered: Some(voicemail),
        }
    }
}

/// Goal-text patterns, in match order.
static PRESET_PATTERNS: Lazy<Vec<(TimingPreset, Regex)>> = Lazy::new(|| {
    [
        (
            TimingPreset::Aggressive,
            r"(?i)\b(aggressive|speed[\s-]*to[\s-]*lead|blitz|urgent|hot\s+leads?)\b",
        ),
        (
            TimingPreset::Nurture,
            r"(?i)\b(nurture|nurturing|drip|long[\s-]*term|re-?engage(ment)?|warm\s+up)\b",
        ),
        (
            TimingPreset::Balanced,
            r"(?i)\b(balanced|steady|standard|appointments?|bookings?|follow[\s-]*ups?)\b",
        ),
    ]
    .into_iter()
    .filter_map(|(preset, p)| Some((preset, Regex::new(p).ok()?)))
    .collect()
});

/// Derive a preset from goal text.
pub fn preset_for_goal(goal: &str) -> Option<TimingPreset> {
    PRESET_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(goal))
        .map(|(preset, _)| *preset)
}

/// Resolved timing summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimingSummary {
    Planned(PlannedTiming),
    Legacy(DialingLimits),
    Preset(TimingPreset),
    Empty,
}

impl TimingSummary {
    pub fn is_empty(&self) -> bool {
        matches!(self, TimingSummary::Empty)
    }
}

/// Summarize a record's timing preferences.
pub fn summarize_timing(row: &Row) -> TimingSummary {
    if let Some(planned) = planned_timing(row) {
        return TimingSummary::Planned(planned);
    }
    if let Some(limits) = legacy_limits(row) {
        return TimingSummary::Legacy(limits);
    }
    match campaign_goal(row).as_deref().and_then(preset_for_goal) {
        Some(preset) => {
            tracing::trace!(preset = preset.name(), "timing preset inferred from goal");
            TimingSummary::Preset(preset)
        }
        None => TimingSummary::Empty,
    }
}

/// Rendered timing summary; empty when nothing is known.
pub fn timing_label(row: &Row) -> String {
    summarize_timing(row).to_string()
}

fn has_planned_fields(fields: &Map<String, Value>) -> bool {
    PLANNED_FIELDS.iter().any(|f| fields.contains_key(*f))
}

/// Planned fields come from the first nested timing object that carries any,
/// else from the record itself.
fn planned_timing(row: &Row) -> Option<PlannedTiming> {
    let source = TIMING_OBJECT_FIELDS
        .iter()
        .filter_map(|f| row.object(f))
        .chain(std::iter::once(row.fields()))
        .find(|fields| has_planned_fields(fields))?;

    let number = |f: &str| match source.get(f) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    let flag = |f: &str| source.get(f).map(colwright_core::value_truthy);
    let text = |f: &str| source.get(f).and_then(colwright_core::value_text);

    Some(PlannedTiming {
        min_daily_attempts: number(MIN_DAILY_ATTEMPTS),
        max_daily_attempts: number(MAX_DAILY_ATTEMPTS),
        reach_before_business: flag(REACH_BEFORE_BUSINESS),
        reach_after_business: flag(REACH_AFTER_BUSINESS),
        reach_on_weekend: flag(REACH_ON_WEEKEND),
        reach_on_holidays: flag(REACH_ON_HOLIDAYS),
        timezone_source: text(TIMEZONE_SOURCE),
        start_date: text(START_DATE),
        end_date: text(END_DATE),
    })
}

fn legacy_limits(row: &Row) -> Option<DialingLimits> {
    let limits = DialingLimits {
        total_attempts: row.first_number(TOTAL_ATTEMPTS_FIELDS),
        daily_cap: row.first_number(DAILY_CAP_FIELDS),
        cooldown_minutes: row.first_number(COOLDOWN_FIELDS),
        voicemail_as_answered: VOICEMAIL_FIELDS.iter().find_map(|f| row.explicit_flag(f)),
    };
    (limits != DialingLimits::default()).then_some(limits)
}

// ============================================================================
// RENDERING
// ============================================================================

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for PlannedTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        match (self.min_daily_attempts, self.max_daily_attempts) {
            (Some(min), Some(max)) => {
                lines.push(format!("Daily attempts: {}-{}", count(min), count(max)))
            }
            (Some(min), None) => lines.push(format!("Daily attempts: {}+", count(min))),
            (None, Some(max)) => lines.push(format!("Daily attempts: up to {}", count(max))),
            (None, None) => {}
        }
        if let Some(v) = self.reach_before_business {
            lines.push(format!("Before hours: {}", yes_no(v)));
        }
        if let Some(v) = self.reach_after_business {
            lines.push(format!("After hours: {}", yes_no(v)));
        }
        if let Some(v) = self.reach_on_weekend {
            lines.push(format!("Weekends: {}", yes_no(v)));
        }
        if let Some(v) = self.reach_on_holidays {
            lines.push(format!("Holidays: {}", yes_no(v)));
        }
        if let Some(tz) = &self.timezone_source {
            lines.push(format!("Timezone: {}", tz));
        }
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => lines.push(format!("Dates: {} to {}", start, end)),
            (Some(start), None) => lines.push(format!("Starts: {}", start)),
            (None, Some(end)) => lines.push(format!("Ends: {}", end)),
            (None, None) => {}
        }
        write!(f, "{}", lines.join("\n"))
    }
}

impl fmt::Display for DialingLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if let Some(total) = self.total_attempts {
            lines.push(format!("Total attempts: {}", count(total)));
        }
        if let Some(daily) = self.daily_cap {
            lines.push(format!("Daily cap: {}", count(daily)));
        }
        if let Some(cooldown) = self.cooldown_minutes {
            lines.push(format!("Cooldown: {}m", count(cooldown)));
        }
        if let Some(vm) = self.voicemail_as_answered {
            lines.push(format!("Voicemail counts as answered: {}", yes_no(vm)));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

impl fmt::Display for TimingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingSummary::Planned(planned) => write!(f, "{}", planned),
            TimingSummary::Legacy(limits) => write!(f, "{}", limits),
            TimingSummary::Preset(preset) => write!(f, "{}\n{}", preset.name(), preset.limits()),
            TimingSummary::Empty => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        Row::from_value(value)
    }

    #[test]
    fn test_planned_fields_render() {
        let r = row(json!({
            "minDailyAttempts": 1,
            "maxDailyAttempts": 3,
            "reachOnWeekend": false,
            "timezoneSource": "lead",
        }));
        assert_eq!(
            timing_label(&r),
            "Daily attempts: 1-3\nWeekends: No\nTimezone: lead"
        );
    }

    #[test]
    fn test_planned_fields_in_nested_object() {
        let r = row(json!({
            "timingPrefs": {"startDate": "2024-01-01", "endDate": "2024-02-01"},
            "totalAttempts": 9,
        }));
        assert_eq!(timing_label(&r), "Dates: 2024-01-01 to 2024-02-01");
    }

    #[test]
    fn test_empty_timing_object_falls_back_to_root() {
        let r = row(json!({"timing": {}, "minDailyAttempts": 2}));
        assert_eq!(timing_label(&r), "Daily attempts: 2+");

        let r = row(json!({
            "timingPrefs": {"note": "x"},
            "timing": {"reachOnWeekend": true}
        }));
        assert_eq!(timing_label(&r), "Weekends: Yes");
    }

    #[test]
    fn test_legacy_limits() {
        let r = row(json!({
            "totalAttempts": 10,
            "dailyCap": 3,
            "cooldownMinutes": 45,
            "voicemailAsAnswered": true,
        }));
        assert_eq!(
            summarize_timing(&r),
            TimingSummary::Legacy(DialingLimits {
                total_attempts: Some(10.0),
                daily_cap: Some(3.0),
                cooldown_minutes: Some(45.0),
                voicemail_as_answered: Some(true),
            })
        );
        assert_eq!(
            timing_label(&r),
            "Total attempts: 10\nDaily cap: 3\nCooldown: 45m\nVoicemail counts as answered: Yes"
        );
    }

    #[test]
    fn test_aggressive_preset_from_goal() {
        let r = row(json!({"campaignGoal": "aggressive speed to lead outreach"}));
        let summary = summarize_timing(&r);
        assert_eq!(summary, TimingSummary::Preset(TimingPreset::Aggressive));
        assert_eq!(
            TimingPreset::Aggressive.limits(),
            DialingLimits {
                total_attempts: Some(12.0),
                daily_cap: Some(4.0),
                cooldown_minutes: Some(30.0),
                voicemail_as_answered: Some(false),
            }
        );
        let label = timing_label(&r);
        assert!(label.starts_with("Aggressive\nTotal attempts: 12"));
    }

    #[test]
    fn test_other_presets() {
        assert_eq!(
            preset_for_goal("Long-term drip campaign"),
            Some(TimingPreset::Nurture)
        );
        assert_eq!(
            preset_for_goal("Increase appointment bookings for Q3."),
            Some(TimingPreset::Balanced)
        );
        assert_eq!(preset_for_goal("Say hello"), None);
    }

    #[test]
    fn test_nothing_known_is_empty() {
        assert!(summarize_timing(&Row::new()).is_empty());
        assert_eq!(timing_label(&row(json!({"goal": "Say hello"}))), "");
    }
}
