use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// One transfer target. `amount` is denominated in SOL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,
    pub amount: f64,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub sender_private_key: String, // base58 encoded 64-byte keypair
    pub recipients: Vec<Recipient>,
}

impl std::fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferRequest")
            .field("sender_private_key", &"<redacted>")
            .field("recipients", &self.recipients)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub success: bool,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// A response paired with the HTTP status it arrived with.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub status: StatusCode,
    pub response: TransferResponse,
}

pub struct TransferClient {
    client: Client,
    service_url: String,
}

impl TransferClient {
    pub fn new(service_url: &str) -> Self {
        Self {
            client: Client::new(),
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a bundled transfer.
    ///
    /// Failures reported by the service come back as `Ok` with
    /// `success == false`; `Err` is reserved for transport problems and
    /// bodies that are not a transfer response.
    pub async fn transfer(&self, req: &TransferRequest) -> Result<TransferOutcome, Box<dyn std::error::Error>> {
        let resp = self.client
            .post(format!("{}/transfer", self.service_url))
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        match serde_json::from_str::<TransferResponse>(&text) {
            Ok(response) => Ok(TransferOutcome { status, response }),
            Err(_) => Err(format!("Service returned status {}: {}", status, text).into()),
        }
    }

    /// Query the service health endpoint.
    pub async fn health(&self) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(format!("{}/health", self.service_url))
            .send()
            .await?
            .json()
            .await
    }
}
