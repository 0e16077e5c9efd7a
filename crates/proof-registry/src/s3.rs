//! S3-compatible blob store (Filebase by default).
//!
//! Each request carries an AWS Signature Version 4 presigned URL, so the
//! HTTP client never handles credentials directly. Calls are blocking and
//! have no timeout or retry: a stalled store stalls the run.
use crate::store::BlobStore;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use proof_core::{hex_sha256, ProofError, RegistryConfig};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::collections::BTreeMap;

/// Lifetime of each presigned URL; requests are issued immediately.
const PRESIGN_EXPIRES_SECONDS: u64 = 300;

const SERVICE: &str = "s3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Put,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
        }
    }
}

pub struct S3BlobStore {
    endpoint: String,
    bucket: String,
    region: String,
    access_key: String,
    secret_key: String,
    client: Client,
}

impl S3BlobStore {
    /// Fails with `RegistryError` when credentials are missing.
    pub fn new(config: &RegistryConfig) -> Result<Self, ProofError> {
        let access_key = config
            .access_key_id
            .clone()
            .ok_or_else(|| ProofError::RegistryError("missing access key id".to_string()))?;
        let secret_key = config
            .secret_access_key
            .clone()
            .ok_or_else(|| ProofError::RegistryError("missing secret access key".to_string()))?;
        if config.bucket.is_empty() {
            return Err(ProofError::RegistryError("bucket name is empty".to_string()));
        }
        extract_host(&config.endpoint)?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            access_key,
            secret_key,
            client: Client::new(),
        })
    }

    fn presign(&self, method: Method, key: &str, now: DateTime<Utc>) -> Result<String, ProofError> {
        let key = key.trim_start_matches('/');
        if key.is_empty() {
            return Err(ProofError::RegistryError("object key is empty".to_string()));
        }

        let date = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let scope = format!("{}/{}/{}/aws4_request", date, self.region, SERVICE);

        let canonical_uri = uri_encode(&format!("/{}/{}", self.bucket, key), true);

        let mut params = BTreeMap::new();
        params.insert("X-Amz-Algorithm", "AWS4-HMAC-SHA256".to_string());
        params.insert("X-Amz-Credential", format!("{}/{}", self.access_key, scope));
        params.insert("X-Amz-Date", amz_date.clone());
        params.insert("X-Amz-Expires", PRESIGN_EXPIRES_SECONDS.to_string());
        params.insert("X-Amz-SignedHeaders", "host".to_string());
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", uri_encode(k, false), uri_encode(v, false)))
            .collect::<Vec<_>>()
            .join("&");

        let host = extract_host(&self.endpoint)?;
        let canonical_request = format!(
            "{}\n{}\n{}\nhost:{}\n\nhost\nUNSIGNED-PAYLOAD",
            method.as_str(),
            canonical_uri,
            query,
            host
        );
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            scope,
            hex_sha256(canonical_request.as_bytes())
        );

        let k_date = hmac_sha256(format!("AWS4{}", self.secret_key).as_bytes(), date.as_bytes());
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
        let k_signing = hmac_sha256(&k_service, b"aws4_request");
        let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

        Ok(format!(
            "{}{}?{}&X-Amz-Signature={}",
            self.endpoint, canonical_uri, query, signature
        ))
    }
}

impl BlobStore for S3BlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProofError> {
        let url = self.presign(Method::Get, key, Utc::now())?;
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProofError::RegistryError(format!("GET {}: {}", key, e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(key, "registry object not found");
                Ok(None)
            }
            status if status.is_success() => {
                let body = response
                    .bytes()
                    .map_err(|e| ProofError::RegistryError(format!("GET {}: {}", key, e)))?;
                Ok(Some(body.to_vec()))
            }
            status => Err(ProofError::RegistryError(format!("GET {}: HTTP {}", key, status))),
        }
    }

    fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), ProofError> {
        let url = self.presign(Method::Put, key, Utc::now())?;
        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .map_err(|e| ProofError::RegistryError(format!("PUT {}: {}", key, e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProofError::RegistryError(format!("PUT {}: HTTP {}", key, status)))
        }
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<sha2::Sha256>::new_from_slice(key).expect("HMAC key should be valid");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// RFC 3986 unreserved characters pass through; `/` too when encoding a path.
fn uri_encode(value: &str, keep_slash: bool) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(value.len() * 3);
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b'/' if keep_slash => out.push('/'),
            _ => {
                let _ = write!(out, "%{:02X}", b);
            }
        }
    }
    out
}

fn extract_host(endpoint: &str) -> Result<String, ProofError> {
    let host = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);
    let host = host.split('/').next().unwrap_or(host);

    if host.is_empty() {
        return Err(ProofError::RegistryError(format!("invalid endpoint: {:?}", endpoint)));
    }
    Ok(host.to_string())
}
