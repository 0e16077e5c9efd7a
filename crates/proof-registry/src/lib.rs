//! Proof Registry: fingerprint list storage and duplicate detection
pub mod hash_registry;
pub mod s3;
pub mod store;
pub mod uniqueness;

pub use hash_registry::{HashListDocument, HashRegistryClient};
pub use s3::S3BlobStore;
pub use store::{BlobStore, MemoryStore};
pub use uniqueness::UniquenessChecker;
