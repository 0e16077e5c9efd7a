//! Proof Core: data model, errors, run configuration and the scorer contract
//!
//! Every proof component (uniqueness, ownership, authenticity, quality)
//! implements [`Scorer`] over an [`InputRecord`]; the runner crate combines
//! their outputs into a [`ProofResult`].

pub mod config;
pub mod data_model;
pub mod error;
pub mod fingerprint;
pub mod runner;
pub mod scorer;

pub use config::{RegistryConfig, RunConfig, DLP_ID};
pub use data_model::{is_truthy, InputRecord, Message, ProofResult};
pub use error::ProofError;
pub use fingerprint::{canonical_json, fingerprint, hex_sha256};
pub use runner::{run_scorer, ScoreTrace};
pub use scorer::{clamp_unit, round3, Scorer};

/// Engine version stamped into logs.
pub const PROOF_VERSION: &str = "1.0.0";
