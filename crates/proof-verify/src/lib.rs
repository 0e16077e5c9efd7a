//! Proof Verify: who submitted the export and what kind of export it is
pub mod authenticity;
pub mod init_data;
pub mod ownership;

pub use authenticity::{classify, AuthenticityClassifier, TRUSTED_TYPES};
pub use init_data::InitData;
pub use ownership::OwnershipVerifier;
