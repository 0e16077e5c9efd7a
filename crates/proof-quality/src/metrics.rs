//! Message statistics and component scores
//!
//! Stats come from one ordered scan over the messages; component scores are
//! derived from the stats alone.

use crate::profile::QualityProfile;
use chrono::{NaiveDateTime, Timelike};
use proof_core::{clamp_unit, round3, Message};
use serde::{Deserialize, Serialize};

/// Counts gathered from a message sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityStats {
    pub total_messages: u64,
    /// Messages with no text
    pub empty_messages: u64,
    /// Dates that failed to parse
    pub invalid_dates: u64,
    /// Gaps above the profile threshold between consecutive parsed dates
    pub large_gaps: u64,
    pub replies: u64,
}

impl QualityStats {
    pub fn collect(messages: &[Message], profile: &QualityProfile) -> Self {
        let mut stats = Self {
            total_messages: messages.len() as u64,
            ..Self::default()
        };
        let mut prev_date: Option<NaiveDateTime> = None;

        for msg in messages {
            if msg.is_empty() {
                stats.empty_messages += 1;
            }

            if msg.is_reply() {
                stats.replies += 1;
            }

            let parsed = msg
                .date_str()
                .and_then(|d| parse_date(d, &profile.date_format));
            match parsed {
                Some(current) => {
                    if let Some(prev) = prev_date {
                        if (current - prev).num_seconds() > profile.max_gap_seconds {
                            stats.large_gaps += 1;
                        }
                    }
                    prev_date = Some(current);
                }
                // Cursor stays on the last good date.
                None => stats.invalid_dates += 1,
            }
        }

        stats
    }
}

/// Strict parse: no surrounding whitespace, no leap second.
fn parse_date(raw: &str, format: &str) -> Option<NaiveDateTime> {
    if raw.trim() != raw {
        return None;
    }
    let parsed = NaiveDateTime::parse_from_str(raw, format).ok()?;
    // chrono encodes `:60` as nanosecond >= 1e9
    if parsed.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(parsed)
}

/// Per-dimension quality, each in [0,1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub content: f64,
    pub time: f64,
    pub interaction: f64,
}

impl ComponentScores {
    /// All zero for an empty transcript.
    pub fn from_stats(stats: &QualityStats, profile: &QualityProfile) -> Self {
        if stats.total_messages == 0 {
            return Self::default();
        }

        let total = stats.total_messages as f64;
        let content = 1.0 - stats.empty_messages as f64 / total;
        let time = 1.0
            - f64::min(
                1.0,
                stats.large_gaps as f64 * profile.gap_penalty + stats.invalid_dates as f64 / total,
            );
        let interaction = f64::min(1.0, stats.replies as f64 / (total * profile.full_reply_ratio));

        Self {
            content: clamp_unit(content),
            time: clamp_unit(time),
            interaction: clamp_unit(interaction),
        }
    }

    pub fn weighted(&self, profile: &QualityProfile) -> f64 {
        self.content * profile.content_weight
            + self.time * profile.time_weight
            + self.interaction * profile.interaction_weight
    }

    pub fn rounded(&self) -> Self {
        Self {
            content: round3(self.content),
            time: round3(self.time),
            interaction: round3(self.interaction),
        }
    }
}
