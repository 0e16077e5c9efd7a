//! Integration tests for the proof pipeline with real chat fixtures.
//!
//! Every test runs the full orchestrator against an in-memory registry, so
//! uniqueness, ownership, authenticity and quality are all exercised together.

use proof_core::{ProofError, RunConfig};
use proof_registry::{BlobStore, MemoryStore};
use proof_runner::{write_result, ProofOrchestrator};
use proof_verify::InitData;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixture directory relative to the workspace root
const FIXTURES_PATH: &str = "testing/fixtures/chats";

const BOT_SECRET: &str = "7000000000:AAHfixturesecret";

fn fixture(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join(FIXTURES_PATH).join(name)
}

/// Input directory holding a copy of the named fixture
fn input_dir_with(name: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture(name), dir.path().join(name)).unwrap();
    dir
}

fn signed_init_data(user_id: u64) -> String {
    let fields = format!(
        "auth_date=1709283600&query_id=AAHdF6IQAAAAAN0XohDhrOrc&user=%7B%22id%22%3A{}%2C%22first_name%22%3A%22Ada%22%7D",
        user_id
    );
    let hash = InitData::parse(&fields).expected_hash(BOT_SECRET);
    format!("{}&hash={}", fields, hash)
}

fn config(input: &Path, init_data: Option<String>) -> RunConfig {
    RunConfig {
        input_dir: input.to_path_buf(),
        bot_access_key: Some(BOT_SECRET.to_string()),
        init_data,
        ..RunConfig::default()
    }
}

/// Store whose every call fails, standing in for an unreachable registry
struct UnreachableStore;

impl BlobStore for UnreachableStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProofError> {
        Err(ProofError::RegistryError(format!("GET {}: connection refused", key)))
    }

    fn put(&self, key: &str, _body: Vec<u8>, _content_type: &str) -> Result<(), ProofError> {
        Err(ProofError::RegistryError(format!("PUT {}: connection refused", key)))
    }
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn test_personal_chat_with_verified_owner() {
    let input = input_dir_with("personal_chat.json");
    let cfg = config(input.path(), Some(signed_init_data(123456)));
    let orchestrator = ProofOrchestrator::new(&cfg, MemoryStore::new());

    let result = orchestrator.generate().unwrap();

    assert_eq!(result.dlp_id, 8);
    assert_eq!(result.uniqueness, 1.0);
    assert_eq!(result.ownership, 1.0);
    assert_eq!(result.authenticity, 1.0);
    assert_eq!(result.quality, 0.83);
    assert_eq!(result.score, 0.898);
    assert!(result.valid);

    let stats = &result.attributes["stats"];
    assert_eq!(stats["total_messages"], 5);
    assert_eq!(stats["empty_messages"], 1);
    assert_eq!(stats["invalid_dates"], 0);
    assert_eq!(stats["large_gaps"], 1);
    assert_eq!(stats["replies"], 2);
    assert_eq!(result.attributes["messages_count"], 5);
    assert_eq!(result.attributes["component_scores"]["content"], 0.8);
    assert_eq!(result.attributes["component_scores"]["time"], 0.9);
    assert_eq!(result.attributes["component_scores"]["interaction"], 1.0);
    assert_eq!(result.attributes["character_slug"], "luna-the-navigator");
    assert_eq!(result.attributes["character_level"], "3");

    assert_eq!(result.metadata["dlp_id"], 8);
    assert_eq!(result.metadata["type"], "personal_chat");
    assert_eq!(result.metadata["allow_reuse"], false);
}

#[test]
fn test_resubmission_is_not_valid() {
    let input = input_dir_with("personal_chat.json");
    let cfg = config(input.path(), Some(signed_init_data(123456)));
    let orchestrator = ProofOrchestrator::new(&cfg, MemoryStore::new());

    let first = orchestrator.generate().unwrap();
    let second = orchestrator.generate().unwrap();

    assert!(first.valid);
    assert_eq!(second.uniqueness, 0.0);
    assert!(!second.valid);
    // score ignores uniqueness
    assert_eq!(second.score, first.score);
    assert_eq!(orchestrator.registry().fetch().unwrap().len(), 1);
    assert_eq!(orchestrator.registry().store().put_count(), 1);
}

#[test]
fn test_foreign_user_scores_no_ownership() {
    let input = input_dir_with("personal_chat.json");
    let cfg = config(input.path(), Some(signed_init_data(987654321)));
    let result = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap();

    assert_eq!(result.ownership, 0.0);
    assert_eq!(result.score, 0.498);
    assert!(result.valid);
}

#[test]
fn test_tampered_init_data() {
    let input = input_dir_with("personal_chat.json");
    let mut init_data = signed_init_data(123456);
    let last = init_data.pop().unwrap();
    init_data.push(if last == 'a' { 'b' } else { 'a' });

    let cfg = config(input.path(), Some(init_data));
    let result = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap();
    assert_eq!(result.ownership, 0.0);
}

#[test]
fn test_bad_dates_fixture() {
    let input = input_dir_with("ai_chat_bad_dates.json");
    let cfg = config(input.path(), None);
    let result = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap();

    assert_eq!(result.authenticity, 1.0);
    assert_eq!(result.attributes["stats"]["invalid_dates"], 3);
    assert_eq!(result.attributes["component_scores"]["time"], 0.0);
    assert_eq!(result.quality, 0.8);
    assert_eq!(result.score, 0.48);
    assert_eq!(result.attributes["character_slug"], "");
}

#[test]
fn test_empty_group_chat() {
    let input = input_dir_with("group_chat_empty.json");
    let cfg = config(input.path(), Some(signed_init_data(123456)));
    let result = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap();

    assert_eq!(result.authenticity, 0.0);
    assert_eq!(result.quality, 0.0);
    assert_eq!(result.ownership, 0.0);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.metadata["type"], "group_chat");
}

#[test]
fn test_allow_reuse_recorded() {
    let input = input_dir_with("group_chat_empty.json");
    let mut cfg = config(input.path(), None);
    cfg.allow_reuse = true;
    let result = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap();
    assert_eq!(result.metadata["allow_reuse"], true);
}

// =============================================================================
// Input selection
// =============================================================================

#[test]
fn test_invalid_files_skipped() {
    let input = input_dir_with("personal_chat.json");
    fs::write(input.path().join("000_notes.txt"), "definitely not json").unwrap();

    let cfg = config(input.path(), None);
    let result = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap();
    assert_eq!(result.metadata["type"], "personal_chat");
}

#[test]
fn test_no_valid_input() {
    let input = tempfile::tempdir().unwrap();
    fs::write(input.path().join("chat.json"), "{\"type\": ").unwrap();

    let cfg = config(input.path(), None);
    let store = MemoryStore::new();
    let err = ProofOrchestrator::new(&cfg, &store).generate().unwrap_err();

    assert!(matches!(err, ProofError::NoValidInputError(_)));
    assert_eq!(store.put_count(), 0);
}

#[test]
fn test_no_input_files() {
    let input = tempfile::tempdir().unwrap();
    let cfg = config(input.path(), None);
    let err = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap_err();
    assert!(matches!(err, ProofError::InputError(_)));
}

// =============================================================================
// Fatal errors
// =============================================================================

#[test]
fn test_registry_failure_aborts() {
    let input = input_dir_with("personal_chat.json");
    let cfg = config(input.path(), Some(signed_init_data(123456)));
    let err = ProofOrchestrator::new(&cfg, UnreachableStore).generate().unwrap_err();
    assert!(err.is_registry());
}

#[test]
fn test_missing_bot_secret_aborts() {
    let input = input_dir_with("personal_chat.json");
    let mut cfg = config(input.path(), Some(signed_init_data(123456)));
    cfg.bot_access_key = None;

    let store = MemoryStore::new();
    let err = ProofOrchestrator::new(&cfg, &store).generate().unwrap_err();
    assert!(matches!(err, ProofError::ConfigError(_)));
    // nothing recorded, so a retry with the secret is still unique
    assert_eq!(store.put_count(), 0);

    cfg.bot_access_key = Some(BOT_SECRET.to_string());
    let retry = ProofOrchestrator::new(&cfg, &store).generate().unwrap();
    assert_eq!(retry.uniqueness, 1.0);
    assert!(retry.valid);
}

// =============================================================================
// Output contract
// =============================================================================

#[test]
fn test_results_file_contract() {
    let input = input_dir_with("personal_chat.json");
    let output = tempfile::tempdir().unwrap();
    let cfg = config(input.path(), Some(signed_init_data(123456)));
    let result = ProofOrchestrator::new(&cfg, MemoryStore::new()).generate().unwrap();

    let path = write_result(output.path(), &result).unwrap();
    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    let keys: Vec<&str> = written.as_object().unwrap().keys().map(String::as_str).collect();
    for key in [
        "dlp_id",
        "uniqueness",
        "ownership",
        "authenticity",
        "quality",
        "score",
        "valid",
        "attributes",
        "metadata",
    ] {
        assert!(keys.contains(&key), "missing {}", key);
    }
    assert_eq!(keys.len(), 9);
    assert_eq!(written["valid"], true);
}
