//! Authenticity: trusted export types
use proof_core::{InputRecord, ProofError, Scorer};

/// Export types produced by the supported exporters.
pub const TRUSTED_TYPES: [&str; 2] = ["personal_chat", "ai_chat"];

pub fn classify(record_type: Option<&str>) -> f64 {
    match record_type {
        Some(t) if TRUSTED_TYPES.contains(&t) => 1.0,
        _ => 0.0,
    }
}

pub struct AuthenticityClassifier;

impl Scorer for AuthenticityClassifier {
    fn id(&self) -> &'static str {
        "authenticity.type.v1"
    }

    fn score(&self, record: &InputRecord) -> Result<f64, ProofError> {
        Ok(classify(record.record_type()))
    }
}
