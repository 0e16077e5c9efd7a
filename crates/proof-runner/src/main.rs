//! Binary entrypoint: one proof per process.
//!
//! Reads config from env vars (a `.env` file is honoured):
//!   TELEGRAM_BOT_ACCESS_KEY - identity provider bot secret (required)
//!   TELEGRAM_INIT_DATA      - signed launch payload
//!   FILEBASE_ACCESS_KEY_ID / FILEBASE_SECRET_ACCESS_KEY - registry credentials
//!   ALLOW_REUSE             - recorded in the proof metadata
//!   INPUT_DIR / OUTPUT_DIR  - default /input and /output
use anyhow::Context;
use proof_core::{RunConfig, PROOF_VERSION};
use proof_registry::S3BlobStore;
use proof_runner::{write_result, ProofOrchestrator};
use uuid::Uuid;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!("Error during proof generation: {:#}", e);
        tracing::error!("{:?}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = RunConfig::from_env();
    let span = tracing::info_span!("proof", run_id = %Uuid::new_v4(), dlp_id = config.dlp_id);
    let _guard = span.enter();
    tracing::info!(version = PROOF_VERSION, ?config, "configuration loaded");

    let store = S3BlobStore::new(&config.registry).context("configuring hash registry")?;
    let result = ProofOrchestrator::new(&config, store)
        .generate()
        .context("generating proof")?;

    let path = write_result(&config.output_dir, &result).context("writing proof result")?;
    tracing::info!(
        path = %path.display(),
        score = result.score,
        valid = result.valid,
        "Proof generation complete"
    );
    Ok(())
}
