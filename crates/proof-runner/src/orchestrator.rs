//! Proof Orchestrator: runs every scorer and aggregates the proof result
use crate::input::load_input;
use proof_core::{
    clamp_unit, round3, run_scorer, InputRecord, ProofError, ProofResult, RunConfig,
};
use proof_quality::{QualityReport, QualityScorer};
use proof_registry::{BlobStore, HashRegistryClient, UniquenessChecker};
use proof_verify::{AuthenticityClassifier, OwnershipVerifier};
use serde_json::{json, Map, Value};

pub const QUALITY_WEIGHT: f64 = 0.6;
pub const OWNERSHIP_WEIGHT: f64 = 0.4;

/// Overall trust score. Depends on quality and ownership only.
pub fn aggregate_score(quality: f64, ownership: f64) -> f64 {
    round3(clamp_unit(QUALITY_WEIGHT * quality + OWNERSHIP_WEIGHT * ownership))
}

pub struct ProofOrchestrator<'a, S: BlobStore> {
    config: &'a RunConfig,
    registry: HashRegistryClient<S>,
    quality: QualityScorer,
}

impl<'a, S: BlobStore> ProofOrchestrator<'a, S> {
    pub fn new(config: &'a RunConfig, store: S) -> Self {
        Self {
            config,
            registry: HashRegistryClient::new(store, config.registry.key.clone()),
            quality: QualityScorer::default(),
        }
    }

    pub fn registry(&self) -> &HashRegistryClient<S> {
        &self.registry
    }

    /// Load the record from the configured input directory and prove it.
    pub fn generate(&self) -> Result<ProofResult, ProofError> {
        tracing::info!(input_dir = %self.config.input_dir.display(), "starting proof generation");
        let record = load_input(&self.config.input_dir)?;
        self.prove(&record)
    }

    /// Scorers run in a fixed order: uniqueness, ownership, authenticity,
    /// quality. Only uniqueness touches shared state, so configuration is
    /// checked before it runs.
    pub fn prove(&self, record: &InputRecord) -> Result<ProofResult, ProofError> {
        let ownership = OwnershipVerifier::new(self.config);
        ownership.bot_secret()?;

        let mut result = ProofResult::new(self.config.dlp_id);

        result.uniqueness = run_scorer(&UniquenessChecker::new(&self.registry), record)?.value;
        result.ownership = run_scorer(&ownership, record)?.value;
        result.authenticity = run_scorer(&AuthenticityClassifier, record)?.value;

        let report = self.quality.evaluate(record);
        result.quality = clamp_unit(report.quality_score);

        result.score = aggregate_score(result.quality, result.ownership);
        result.valid = result.uniqueness == 1.0;

        result.attributes = self.attributes(record, &report)?;
        result.metadata = self.metadata(record);

        tracing::info!(
            uniqueness = result.uniqueness,
            ownership = result.ownership,
            authenticity = result.authenticity,
            quality = result.quality,
            score = result.score,
            valid = result.valid,
            "proof aggregated"
        );
        Ok(result)
    }

    fn attributes(
        &self,
        record: &InputRecord,
        report: &QualityReport,
    ) -> Result<Map<String, Value>, ProofError> {
        let to_value = |v: serde_json::Result<Value>| {
            v.map_err(|e| ProofError::SerializeError(e.to_string()))
        };

        let mut attributes = Map::new();
        attributes.insert("stats".to_string(), to_value(serde_json::to_value(report.stats))?);
        attributes.insert("messages_count".to_string(), json!(report.stats.total_messages));
        attributes.insert(
            "component_scores".to_string(),
            to_value(serde_json::to_value(report.component_scores))?,
        );
        attributes.insert("character_slug".to_string(), record.passthrough("character_slug"));
        attributes.insert("character_level".to_string(), record.passthrough("character_level"));
        Ok(attributes)
    }

    fn metadata(&self, record: &InputRecord) -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert("dlp_id".to_string(), json!(self.config.dlp_id));
        metadata.insert("type".to_string(), record.passthrough("type"));
        metadata.insert("allow_reuse".to_string(), json!(self.config.allow_reuse));
        metadata
    }
}
