//! Quality scoring for chat transcripts
//!
//! Scores a record's messages against a quality profile and produces the
//! rounded overall score alongside the stats and components behind it.

use crate::metrics::{ComponentScores, QualityStats};
use crate::profile::QualityProfile;
use proof_core::{clamp_unit, round3, InputRecord, Message};
use serde::{Deserialize, Serialize};

/// Overall quality result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Weighted score, rounded to 3 decimals
    pub quality_score: f64,

    /// Component scores, rounded to 3 decimals
    pub component_scores: ComponentScores,

    pub stats: QualityStats,

    /// Profile used for evaluation
    pub profile: String,
}

/// Scorer over the `messages` sequence of a record
pub struct QualityScorer {
    profile: QualityProfile,
}

impl QualityScorer {
    pub fn new(profile: QualityProfile) -> Self {
        Self { profile }
    }

    pub fn evaluate(&self, record: &InputRecord) -> QualityReport {
        self.evaluate_messages(&record.messages())
    }

    /// The weighted sum uses unrounded components; only the outputs are rounded.
    pub fn evaluate_messages(&self, messages: &[Message]) -> QualityReport {
        let stats = QualityStats::collect(messages, &self.profile);
        let scores = ComponentScores::from_stats(&stats, &self.profile);
        let quality_score = round3(clamp_unit(scores.weighted(&self.profile)));

        tracing::debug!(
            total = stats.total_messages,
            empty = stats.empty_messages,
            invalid_dates = stats.invalid_dates,
            large_gaps = stats.large_gaps,
            replies = stats.replies,
            quality_score,
            "quality evaluated"
        );

        QualityReport {
            quality_score,
            component_scores: scores.rounded(),
            stats,
            profile: self.profile.name.clone(),
        }
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(QualityProfile::standard())
    }
}
