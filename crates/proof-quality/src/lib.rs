//! Proof Quality: transcript quality scoring
//!
//! Scores the `messages` of a chat export on three dimensions and combines
//! them with the weights of a [`QualityProfile`]:
//!
//! - **content**: share of messages that carry text
//! - **time**: penalised by day-long gaps and unparseable dates
//! - **interaction**: reply density
//!
//! # Example
//!
//! ```
//! use proof_core::InputRecord;
//! use proof_quality::QualityScorer;
//! use serde_json::json;
//!
//! let record = InputRecord::from_value(json!({
//!     "messages": [
//!         {"text": "hi", "date": "2024-01-01T00:00:00"},
//!         {"text": "", "date": "2024-01-03T00:00:00"}
//!     ]
//! }));
//!
//! let report = QualityScorer::default().evaluate(&record);
//! assert_eq!(report.quality_score, 0.49);
//! ```

pub mod metrics;
pub mod profile;
pub mod scorer;

pub use metrics::{ComponentScores, QualityStats};
pub use profile::QualityProfile;
pub use scorer::{QualityReport, QualityScorer};

use proof_core::InputRecord;

/// Quick evaluation with the standard profile
pub fn evaluate(record: &InputRecord) -> QualityReport {
    QualityScorer::default().evaluate(record)
}
