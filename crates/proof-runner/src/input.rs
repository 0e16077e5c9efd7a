//! Input selection: the first candidate file that parses as JSON
use proof_core::{InputRecord, ProofError};
use std::fs;
use std::path::{Path, PathBuf};

/// Load the submitted record from `dir`.
///
/// Candidates are tried in file-name order so the choice does not depend on
/// filesystem listing order. Files that are not valid JSON are skipped;
/// files that cannot be read abort the run.
pub fn load_input(dir: &Path) -> Result<InputRecord, ProofError> {
    let candidates = list_candidates(dir)?;
    if candidates.is_empty() {
        return Err(ProofError::InputError(format!(
            "No input files found in {}",
            dir.display()
        )));
    }

    for path in candidates {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }

        let bytes = fs::read(&path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "error reading input file");
            ProofError::InputError(format!("{}: {}", path.display(), e))
        })?;

        match InputRecord::from_slice(&bytes) {
            Ok(record) => {
                tracing::info!(path = %path.display(), "loaded input record");
                return Ok(record);
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "file is not a valid JSON file, skipping"
                );
            }
        }
    }

    Err(ProofError::NoValidInputError(format!(
        "No valid JSON files found in {}",
        dir.display()
    )))
}

fn list_candidates(dir: &Path) -> Result<Vec<PathBuf>, ProofError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ProofError::InputError(format!("{}: {}", dir.display(), e)))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ProofError::InputError(format!("{}: {}", dir.display(), e)))?;
        paths.push(entry.path());
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
