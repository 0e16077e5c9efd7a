//! Unified Error Model
//!
//! Only fatal conditions live here. Ownership problems degrade to a 0.0 score
//! and unparseable message dates are tallied by the quality scorer; neither
//! ever becomes a `ProofError`.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProofError {
    /// Input directory missing, empty, or a candidate file could not be read.
    #[error("INPUT/{0}")]
    InputError(String),

    /// Every candidate input file failed to parse as JSON.
    #[error("INPUT/NO_VALID_JSON: {0}")]
    NoValidInputError(String),

    /// Fingerprint registry could not be fetched or updated.
    #[error("REGISTRY/{0}")]
    RegistryError(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("SERIALIZE/{0}")]
    SerializeError(String),

    /// Result could not be written by the caller.
    #[error("OUTPUT/{0}")]
    OutputError(String),
}

impl ProofError {
    /// Whether the error originated from the remote fingerprint registry.
    pub fn is_registry(&self) -> bool {
        matches!(self, Self::RegistryError(_))
    }
}
