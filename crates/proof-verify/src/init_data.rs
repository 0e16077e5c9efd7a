//! Signed web-app launch payload
//!
//! The identity provider hands the client a query string whose `hash` field
//! is an HMAC over every other field. Verification recomputes that HMAC from
//! the bot secret.
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::BTreeMap;

type HmacSha256 = Hmac<Sha256>;

/// Key of the first HMAC round, fixed by the provider.
const WEB_APP_KEY: &[u8] = b"WebAppData";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitData {
    /// Decoded pairs without `hash`, sorted by key.
    fields: BTreeMap<String, String>,
    hash: Option<String>,
}

impl InitData {
    /// Decode `key=value&...`. Pairs with an empty value are dropped and a
    /// repeated key keeps its last value.
    pub fn parse(payload: &str) -> Self {
        let mut fields = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(payload.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            fields.insert(key.into_owned(), value.into_owned());
        }
        let hash = fields.remove("hash");
        Self { fields, hash }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// `key=value` lines in key order, no trailing newline.
    pub fn check_string(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Hex HMAC the provider would have attached for this payload.
    pub fn expected_hash(&self, bot_secret: &str) -> String {
        hex::encode(self.payload_mac(bot_secret).finalize().into_bytes())
    }

    /// Whether `hash` is present, lowercase hex, and matches the recomputed
    /// HMAC. The comparison runs in constant time.
    pub fn is_signed_by(&self, bot_secret: &str) -> bool {
        let tag = match self.hash() {
            Some(hash) if !hash.bytes().any(|b| b.is_ascii_uppercase()) => hex::decode(hash),
            _ => return false,
        };
        let tag = match tag {
            Ok(tag) => tag,
            Err(_) => return false,
        };
        self.payload_mac(bot_secret).verify_slice(&tag).is_ok()
    }

    fn payload_mac(&self, bot_secret: &str) -> HmacSha256 {
        let secret = hmac_sha256(WEB_APP_KEY, bot_secret.as_bytes());
        let mut mac = new_mac(&secret);
        mac.update(self.check_string().as_bytes());
        mac
    }
}

fn new_mac(key: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(key).expect("HMAC key should be valid")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = new_mac(key);
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
