//! Run Configuration: built once at startup, passed by reference
use std::fmt;
use std::path::PathBuf;

/// Data liquidity pool identifier recorded in every proof.
pub const DLP_ID: u64 = 8;

pub const DEFAULT_INPUT_DIR: &str = "/input";
pub const DEFAULT_OUTPUT_DIR: &str = "/output";

pub const DEFAULT_REGISTRY_ENDPOINT: &str = "https://s3.filebase.com";
pub const DEFAULT_REGISTRY_BUCKET: &str = "vchars";
pub const DEFAULT_REGISTRY_KEY: &str = "hash_list.json";
pub const DEFAULT_REGISTRY_REGION: &str = "us-east-1";

/// Where the fingerprint list lives and how to authenticate against it.
#[derive(Clone, PartialEq)]
pub struct RegistryConfig {
    pub endpoint: String,
    pub bucket: String,
    pub key: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_REGISTRY_ENDPOINT.to_string(),
            bucket: DEFAULT_REGISTRY_BUCKET.to_string(),
            key: DEFAULT_REGISTRY_KEY.to_string(),
            region: DEFAULT_REGISTRY_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redact(&self.secret_access_key))
            .finish()
    }
}

/// Immutable per-run configuration.
#[derive(Clone, PartialEq)]
pub struct RunConfig {
    pub dlp_id: u64,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Identity provider bot secret. Required once ownership is scored.
    pub bot_access_key: Option<String>,
    /// Signed launch payload, query-string encoded.
    pub init_data: Option<String>,
    pub allow_reuse: bool,
    pub registry: RegistryConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dlp_id: DLP_ID,
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            bot_access_key: None,
            init_data: None,
            allow_reuse: false,
            registry: RegistryConfig::default(),
        }
    }
}

impl RunConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = RegistryConfig::default();

        Self {
            dlp_id: DLP_ID,
            input_dir: get("INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            bot_access_key: get("TELEGRAM_BOT_ACCESS_KEY"),
            init_data: get("TELEGRAM_INIT_DATA")
                .map(|v| strip_quotes(&v).to_string())
                .filter(|v| !v.is_empty()),
            allow_reuse: get("ALLOW_REUSE").map(|v| parse_flag(&v)).unwrap_or(false),
            registry: RegistryConfig {
                endpoint: get("FILEBASE_ENDPOINT").unwrap_or(defaults.endpoint),
                bucket: get("FILEBASE_BUCKET").unwrap_or(defaults.bucket),
                key: defaults.key,
                region: get("FILEBASE_REGION").unwrap_or(defaults.region),
                access_key_id: get("FILEBASE_ACCESS_KEY_ID"),
                secret_access_key: get("FILEBASE_SECRET_ACCESS_KEY"),
            },
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("dlp_id", &self.dlp_id)
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("bot_access_key", &redact(&self.bot_access_key))
            .field("init_data", &self.init_data.as_ref().map(|_| "<set>"))
            .field("allow_reuse", &self.allow_reuse)
            .field("registry", &self.registry)
            .finish()
    }
}

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

/// Shell-quoted env values arrive with their quotes attached.
fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'')
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
