//! Request and response payloads of the transfer endpoint.

use serde::{Deserialize, Serialize};
use solana_sdk::signature::Signature;

use crate::relay::BundleId;
use crate::transfer::error::TransferError;

/// One recipient as submitted by the caller. `amount` is in SOL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientRequest {
    pub address: String,
    pub amount: f64,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Base58 encoded 64-byte keypair of the paying account.
    pub sender_private_key: String,
    pub recipients: Vec<RecipientRequest>,
}

impl std::fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferRequest")
            .field("sender_private_key", &"<redacted>")
            .field("recipients", &self.recipients)
            .finish()
    }
}

/// What a successful transfer produced.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub bundle_id: BundleId,
    /// Transaction signatures in recipient order.
    pub signatures: Vec<Signature>,
}

/// Body returned by `POST /transfer`.
///
/// `signature` is present only when `success` is true, `error` only when false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl TransferResponse {
    pub fn success(receipt: &TransferReceipt) -> Self {
        let signatures: Vec<String> = receipt.signatures.iter().map(ToString::to_string).collect();
        Self {
            success: true,
            signature: signatures.first().cloned(),
            bundle_id: Some(receipt.bundle_id.to_string()),
            signatures,
            error: None,
            code: None,
        }
    }

    pub fn failure(err: &TransferError) -> Self {
        Self {
            success: false,
            signature: None,
            bundle_id: None,
            signatures: Vec::new(),
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
        }
    }
}
