//! Result persistence
use proof_core::{ProofError, ProofResult};
use std::fs;
use std::path::{Path, PathBuf};

pub const RESULTS_FILE: &str = "results.json";

/// Write `results.json` under `dir`, pretty-printed.
pub fn write_result(dir: &Path, result: &ProofResult) -> Result<PathBuf, ProofError> {
    fs::create_dir_all(dir)
        .map_err(|e| ProofError::OutputError(format!("{}: {}", dir.display(), e)))?;

    let body = serde_json::to_string_pretty(result)
        .map_err(|e| ProofError::SerializeError(e.to_string()))?;
    let path = dir.join(RESULTS_FILE);
    fs::write(&path, body)
        .map_err(|e| ProofError::OutputError(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}
