//! Scorer Trait: one contract for every proof component
use crate::data_model::InputRecord;
use crate::error::ProofError;

/// A component of the proof that maps a record to a score in [0,1].
pub trait Scorer {
    /// Stable identifier (ex: "uniqueness.registry.v1")
    fn id(&self) -> &'static str;

    /// Whether scoring the same record twice yields the same value.
    /// Scorers backed by shared external state return false.
    fn deterministic(&self) -> bool {
        true
    }

    /// Score the record. Errors are fatal to the run; soft failures must
    /// be expressed as a low score instead.
    fn score(&self, record: &InputRecord) -> Result<f64, ProofError>;
}

/// Clamp into the unit interval. NaN maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Round to three decimals on the exact binary value, ties to even.
///
/// Scaling by 1000 first is not equivalent: `0.9275` is stored just below
/// the tie, but `0.9275 * 1000.0` lands exactly on `927.5`.
pub fn round3(value: f64) -> f64 {
    format!("{:.3}", value).parse().unwrap_or(value)
}
