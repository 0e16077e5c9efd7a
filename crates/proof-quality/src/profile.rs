//! Quality Profile: weights and thresholds for transcript scoring

use serde::{Deserialize, Serialize};

/// Weights and thresholds used by the quality scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    // === Weights (sum to 1.0) ===

    /// Weight of the non-empty message ratio
    pub content_weight: f64,

    /// Weight of temporal regularity
    pub time_weight: f64,

    /// Weight of reply density
    pub interaction_weight: f64,

    // === Time ===

    /// `strftime` layout of message dates
    pub date_format: String,

    /// Gap between consecutive parsed dates counted as large (seconds)
    pub max_gap_seconds: i64,

    /// Time penalty per large gap
    pub gap_penalty: f64,

    // === Interaction ===

    /// Reply ratio that earns a full interaction score
    pub full_reply_ratio: f64,
}

impl QualityProfile {
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            content_weight: 0.8,
            time_weight: 0.1,
            interaction_weight: 0.1,
            date_format: "%Y-%m-%dT%H:%M:%S".to_string(),
            max_gap_seconds: 86_400,
            gap_penalty: 0.1,
            full_reply_ratio: 0.3,
        }
    }
}

impl Default for QualityProfile {
    fn default() -> Self {
        Self::standard()
    }
}
