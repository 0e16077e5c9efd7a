//! Scorer Runner: times a scorer, clamps its output and records a trace
use crate::data_model::InputRecord;
use crate::error::ProofError;
use crate::scorer::{clamp_unit, Scorer};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub id: String,
    pub value: f64,
    pub deterministic: bool,
    pub latency_ms: u64,
}

pub fn run_scorer(scorer: &dyn Scorer, record: &InputRecord) -> Result<ScoreTrace, ProofError> {
    let start = Instant::now();
    let raw = scorer.score(record)?;
    let value = clamp_unit(raw);
    let latency_ms = start.elapsed().as_millis() as u64;

    if value != raw {
        tracing::warn!(scorer = scorer.id(), raw, value, "score clamped into [0,1]");
    }
    tracing::info!(
        scorer = scorer.id(),
        value,
        deterministic = scorer.deterministic(),
        latency_ms,
        "scorer finished"
    );

    Ok(ScoreTrace {
        id: scorer.id().to_string(),
        value,
        deterministic: scorer.deterministic(),
        latency_ms,
    })
}
