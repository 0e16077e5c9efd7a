//! Ownership: the submitter controls the account the export came from
use crate::init_data::InitData;
use proof_core::{InputRecord, ProofError, RunConfig, Scorer};
use serde_json::Value;

/// Scores 1.0 when the launch payload is genuinely signed for the configured
/// bot and the signed user id occurs somewhere in the record text.
///
/// The id check is plain substring containment over the canonical record,
/// not a lookup of a specific field. Anything malformed or missing scores
/// 0.0; only a missing bot secret is an error.
pub struct OwnershipVerifier<'a> {
    bot_access_key: Option<&'a str>,
    init_data: Option<&'a str>,
}

impl<'a> OwnershipVerifier<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            bot_access_key: config.bot_access_key.as_deref(),
            init_data: config.init_data.as_deref(),
        }
    }

    /// The bot secret, required before any scoring happens.
    pub fn bot_secret(&self) -> Result<&'a str, ProofError> {
        self.bot_access_key
            .ok_or_else(|| ProofError::ConfigError("TELEGRAM_BOT_ACCESS_KEY is not set".to_string()))
    }

    /// Signed user id from the payload, if the signature holds.
    pub fn verified_user_id(&self, bot_secret: &str) -> Option<String> {
        let payload = match self.init_data {
            Some(p) => p,
            None => {
                tracing::warn!("no init data supplied; ownership unverified");
                return None;
            }
        };

        let data = InitData::parse(payload);
        if !data.is_signed_by(bot_secret) {
            tracing::warn!("init data signature mismatch");
            return None;
        }

        let user = match data.get("user").map(serde_json::from_str::<Value>) {
            Some(Ok(user)) => user,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "init data user field is not JSON");
                return None;
            }
            None => {
                tracing::warn!("init data carries no user");
                return None;
            }
        };

        match user.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

impl Scorer for OwnershipVerifier<'_> {
    fn id(&self) -> &'static str {
        "ownership.webapp-hmac.v1"
    }

    fn score(&self, record: &InputRecord) -> Result<f64, ProofError> {
        let bot_secret = self.bot_secret()?;

        let user_id = match self.verified_user_id(bot_secret) {
            Some(id) => id,
            None => return Ok(0.0),
        };

        if record.canonical_string().contains(&user_id) {
            Ok(1.0)
        } else {
            tracing::warn!(user_id = %user_id, "signed user id not found in record");
            Ok(0.0)
        }
    }
}
