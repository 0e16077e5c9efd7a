//! Uniqueness: content-addressed duplicate detection
use crate::hash_registry::HashRegistryClient;
use crate::store::BlobStore;
use proof_core::{fingerprint, InputRecord, ProofError, Scorer};

/// 1.0 for a first submission (which is then recorded), 0.0 for a repeat.
pub struct UniquenessChecker<'a, S: BlobStore> {
    registry: &'a HashRegistryClient<S>,
}

impl<'a, S: BlobStore> UniquenessChecker<'a, S> {
    pub fn new(registry: &'a HashRegistryClient<S>) -> Self {
        Self { registry }
    }
}

impl<S: BlobStore> Scorer for UniquenessChecker<'_, S> {
    fn id(&self) -> &'static str {
        "uniqueness.registry.v1"
    }

    fn deterministic(&self) -> bool {
        false
    }

    fn score(&self, record: &InputRecord) -> Result<f64, ProofError> {
        let generated = fingerprint(record);
        let existing = self.registry.fetch()?;

        if existing.iter().any(|h| *h == generated) {
            tracing::info!(fingerprint = %generated, "duplicate submission");
            return Ok(0.0);
        }

        self.registry.append(&existing, &generated)?;
        tracing::info!(fingerprint = %generated, "new submission recorded");
        Ok(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    const KEY: &str = "hash_list.json";

    #[test]
    fn test_first_submission_is_unique() {
        let registry = HashRegistryClient::new(MemoryStore::new(), KEY);
        let record = InputRecord::from_value(json!({"type": "ai_chat", "messages": []}));

        let score = UniquenessChecker::new(&registry).score(&record).unwrap();
        assert_eq!(score, 1.0);
        assert_eq!(registry.fetch().unwrap(), vec![fingerprint(&record)]);
    }

    #[test]
    fn test_resubmission_is_duplicate_and_registry_unchanged() {
        let registry = HashRegistryClient::new(MemoryStore::new(), KEY);
        let record = InputRecord::from_value(json!({"type": "ai_chat", "messages": [{"text": "hi"}]}));
        let checker = UniquenessChecker::new(&registry);

        assert_eq!(checker.score(&record).unwrap(), 1.0);
        assert_eq!(checker.score(&record).unwrap(), 0.0);
        assert_eq!(registry.fetch().unwrap().len(), 1);
        assert_eq!(registry.store().put_count(), 1);
    }

    #[test]
    fn test_distinct_records_both_recorded() {
        let registry = HashRegistryClient::new(MemoryStore::new(), KEY);
        let checker = UniquenessChecker::new(&registry);

        let a = InputRecord::from_value(json!({"messages": [{"text": "a"}]}));
        let b = InputRecord::from_value(json!({"messages": [{"text": "b"}]}));
        assert_eq!(checker.score(&a).unwrap(), 1.0);
        assert_eq!(checker.score(&b).unwrap(), 1.0);
        assert_eq!(registry.fetch().unwrap().len(), 2);
    }
}
