//! Remote manifest client
//!
//! Downloads the manifest, then the park data and category files it points
//! to. Every request carries a short timeout and every file is checked against
//! the SHA-256 listed in the manifest before it is decoded.

use crate::app::storage::CachedSnapshot;
use park_data_lib::{CategoryCatalog, FileReference, Manifest, ParkDataset};
use reqwest::Url;
use sha2::{Digest, Sha256};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("park-guide/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Manifest has no entry for {platform}/{location}")]
    NoEntry { platform: String, location: String },

    #[error("Hash mismatch for {url}: expected {expected}, got {actual}")]
    HashMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("Failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },
}

/// A downloaded, verified and decoded set of park files
#[derive(Debug)]
pub struct RemoteSnapshot {
    pub dataset: ParkDataset,
    pub catalog: CategoryCatalog,
    /// Raw file contents, kept for the snapshot cache
    pub raw: CachedSnapshot,
}

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Decode cached or downloaded file contents
pub fn decode_snapshot(
    raw: &CachedSnapshot,
) -> Result<(ParkDataset, CategoryCatalog), FetchError> {
    let dataset = ParkDataset::from_geojson_str(&raw.data).map_err(|e| FetchError::Decode {
        what: "park data".to_string(),
        reason: e.to_string(),
    })?;
    let catalog =
        CategoryCatalog::from_json_str(&raw.categories).map_err(|e| FetchError::Decode {
            what: "categories".to_string(),
            reason: e.to_string(),
        })?;
    Ok((dataset, catalog))
}

/// HTTP client for the manifest and the files it references
pub struct ManifestClient {
    http: reqwest::Client,
    manifest_url: Url,
}

impl ManifestClient {
    pub fn new(manifest_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let manifest_url = Url::parse(manifest_url)
            .map_err(|e| FetchError::Client(format!("manifest URL {}: {}", manifest_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { http, manifest_url })
    }

    pub fn manifest_url(&self) -> &Url {
        &self.manifest_url
    }

    /// Resolve a file URL from the manifest against the manifest's own URL
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        self.manifest_url.join(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("GET {}", url);
        let network_error = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let response = self.http.get(url.clone()).send().await.map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(network_error)?;
        Ok(body.to_vec())
    }

    /// Download one referenced file and check its hash
    async fn fetch_verified(
        &self,
        reference: &FileReference,
    ) -> Result<(String, String), FetchError> {
        let url = self.resolve(&reference.url)?;
        let body = self.get_bytes(&url).await?;

        let actual = sha256_hex(&body);
        if !actual.eq_ignore_ascii_case(&reference.sha256) {
            return Err(FetchError::HashMismatch {
                url: url.to_string(),
                expected: reference.sha256.clone(),
                actual,
            });
        }

        let text = String::from_utf8(body).map_err(|e| FetchError::Decode {
            what: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok((text, actual))
    }

    pub async fn fetch_manifest(&self) -> Result<Manifest, FetchError> {
        let body = self.get_bytes(&self.manifest_url).await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            what: "manifest".to_string(),
            reason: e.to_string(),
        })
    }

    /// Fetch the manifest and both files for a platform/location pair
    pub async fn fetch_snapshot(
        &self,
        platform: &str,
        location: &str,
    ) -> Result<RemoteSnapshot, FetchError> {
        let manifest = self.fetch_manifest().await?;
        let entry = manifest
            .entry(platform, location)
            .ok_or_else(|| FetchError::NoEntry {
                platform: platform.to_string(),
                location: location.to_string(),
            })?;

        let (data, data_sha256) = self.fetch_verified(&entry.data).await?;
        let (categories, categories_sha256) = self.fetch_verified(&entry.categories).await?;

        let raw = CachedSnapshot {
            data,
            categories,
            data_sha256,
            categories_sha256,
        };
        let (dataset, catalog) = decode_snapshot(&raw)?;
        tracing::info!(
            "Fetched remote snapshot for {}/{} ({} exhibits)",
            platform,
            location,
            dataset.markers().len()
        );
        Ok(RemoteSnapshot {
            dataset,
            catalog,
            raw,
        })
    }
}
