//! Proof Runner: turns one submitted chat export into a proof result
//!
//! # Pipeline Flow
//!
//! ```text
//! input dir → InputRecord → uniqueness → ownership → authenticity → quality
//!                               ↓            ↓             ↓            ↓
//!                           registry     HMAC check     type tag     messages
//!                               └────────────┴─────────────┴────────────┘
//!                                                  ↓
//!                                             ProofResult
//! ```
pub mod input;
pub mod orchestrator;
pub mod output;

pub use input::load_input;
pub use orchestrator::{aggregate_score, ProofOrchestrator, OWNERSHIP_WEIGHT, QUALITY_WEIGHT};
pub use output::{write_result, RESULTS_FILE};
