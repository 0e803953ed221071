//! colwright Infer - Field Inference Heuristics
//!
//! Pure, total classifiers over heterogeneous outreach records. Every
//! function returns a best-effort answer for any row, including an empty one.
//! Rule priorities live in the `pub const` tables next to each classifier so
//! a priority change is a table edit.

pub mod assignment;
pub mod channel;
pub mod dnc;
pub mod timing;
pub mod truncate;

pub use assignment::{
    agent_title, campaign_goal, has_transfer_signal, script_title, transfer_agent_title,
};
pub use channel::{infer_channel, Channel};
pub use dnc::{classify_dnc_source, is_dnc, resolve_dnc_source, DncResolution, DncSource};
pub use timing::{
    preset_for_goal, summarize_timing, timing_label, DialingLimits, PlannedTiming, TimingPreset,
    TimingSummary,
};
pub use truncate::{truncate_with_ellipsis, ELLIPSIS};
