//! Block engine JSON-RPC client.
//!
//! # Responsibilities
//! - Resolve the bundles endpoint from the configured relay URL
//! - Submit bundles with `sendBundle` (base64 wire encoding)
//! - Surface relay rejections verbatim, separate from transport failures

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config::RelayConfig;
use crate::observability::metrics;
use crate::relay::types::{Bundle, BundleId, RelayError};

/// Path of the bundles JSON-RPC endpoint on a block engine.
pub const BUNDLES_PATH: &str = "api/v1/bundles";

/// Accepts bundles for priority inclusion.
#[async_trait]
pub trait BundleRelay: Send + Sync {
    /// Submit `bundle` and return the relay-assigned id.
    async fn submit_bundle(&self, bundle: &Bundle) -> Result<BundleId, RelayError>;
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Relay client for a Jito block engine.
#[derive(Debug, Clone)]
pub struct JitoRelayClient {
    http: Client,
    endpoint: Url,
    timeout_secs: u64,
}

impl JitoRelayClient {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let endpoint = bundles_endpoint(&config.url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RelayError::Transport(format!("failed to create HTTP client: {}", e)))?;

        tracing::info!(endpoint = %endpoint, "Relay client initialized");

        Ok(Self {
            http,
            endpoint,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl BundleRelay for JitoRelayClient {
    async fn submit_bundle(&self, bundle: &Bundle) -> Result<BundleId, RelayError> {
        let result = self.send_bundle(bundle).await;
        metrics::record_bundle_submission(submission_result(&result));
        result
    }
}

impl JitoRelayClient {
    async fn send_bundle(&self, bundle: &Bundle) -> Result<BundleId, RelayError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "sendBundle",
            "params": [bundle.encode_base64()?, { "encoding": "base64" }],
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RelayError::Timeout(self.timeout_secs)
                } else {
                    RelayError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let reply: JsonRpcResponse = serde_json::from_str(&body).map_err(|_| {
            RelayError::InvalidResponse(format!("status {}: {}", status, truncate(&body, 256)))
        })?;

        if let Some(error) = reply.error {
            tracing::warn!(code = error.code, message = %error.message, "Relay rejected bundle");
            return Err(RelayError::Rejected(error.message));
        }

        match reply.result {
            Some(serde_json::Value::String(id)) if !id.is_empty() => Ok(BundleId(id)),
            other => Err(RelayError::InvalidResponse(format!(
                "status {}: missing bundle id in result {:?}",
                status, other
            ))),
        }
    }
}

/// Metric label for a submission: `accepted`, `rejected` by the relay, or
/// `error` when no verdict came back.
fn submission_result(result: &Result<BundleId, RelayError>) -> &'static str {
    match result {
        Ok(_) => "accepted",
        Err(RelayError::Rejected(_)) => "rejected",
        Err(_) => "error",
    }
}

/// Resolve the bundles endpoint from a base URL or a full endpoint URL.
pub fn bundles_endpoint(raw: &str) -> Result<Url, RelayError> {
    let mut url = Url::parse(raw)
        .map_err(|e| RelayError::Transport(format!("invalid relay URL '{}': {}", raw, e)))?;

    let path = url.path().trim_end_matches('/').to_string();
    if !path.ends_with("/bundles") {
        url.set_path(&format!("{}/{}", path, BUNDLES_PATH));
    }
    Ok(url)
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
