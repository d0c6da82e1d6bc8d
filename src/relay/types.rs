//! Bundle and relay error types.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use thiserror::Error;

/// Largest bundle the block engine accepts.
pub const MAX_BUNDLE_SIZE: usize = 5;

/// Identifier the relay assigns to an accepted bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(pub String);

impl std::fmt::Display for BundleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors returned by the bundle relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay answered and declined the bundle. Message is the relay's own.
    #[error("{0}")]
    Rejected(String),

    /// The relay could not be reached or the request failed in transit.
    #[error("Relay request failed: {0}")]
    Transport(String),

    #[error("Relay request timed out after {0} seconds")]
    Timeout(u64),

    /// The relay answered with something that is not a JSON-RPC reply.
    #[error("Invalid relay response: {0}")]
    InvalidResponse(String),

    /// The bundle itself is unusable (size or encoding).
    #[error("Invalid bundle: {0}")]
    InvalidBundle(String),
}

/// An ordered group of signed transactions landed all-or-nothing.
#[derive(Debug, Clone)]
pub struct Bundle {
    transactions: Vec<VersionedTransaction>,
}

impl Bundle {
    /// Wrap transactions into a bundle, enforcing 1..=MAX_BUNDLE_SIZE.
    pub fn new(transactions: Vec<VersionedTransaction>) -> Result<Self, RelayError> {
        if transactions.is_empty() {
            return Err(RelayError::InvalidBundle("bundle is empty".to_string()));
        }
        if transactions.len() > MAX_BUNDLE_SIZE {
            return Err(RelayError::InvalidBundle(format!(
                "bundle holds {} transactions, limit is {}",
                transactions.len(),
                MAX_BUNDLE_SIZE
            )));
        }
        Ok(Self { transactions })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[VersionedTransaction] {
        &self.transactions
    }

    /// First signature of every transaction, in bundle order.
    pub fn signatures(&self) -> Vec<Signature> {
        self.transactions
            .iter()
            .filter_map(|tx| tx.signatures.first().copied())
            .collect()
    }

    /// Wire form: each transaction bincode-serialized then base64-encoded.
    pub fn encode_base64(&self) -> Result<Vec<String>, RelayError> {
        self.transactions
            .iter()
            .map(|tx| {
                bincode::serialize(tx)
                    .map(|bytes| STANDARD.encode(bytes))
                    .map_err(|e| RelayError::InvalidBundle(format!("failed to serialize transaction: {}", e)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::transaction::build_transfer_transactions;
    use crate::blockchain::types::Transfer;
    use solana_sdk::hash::Hash;
    use solana_sdk::signature::{Keypair, Signer};

    fn signed(n: usize) -> Vec<VersionedTransaction> {
        let payer = Keypair::new();
        let transfers: Vec<Transfer> = (0..n)
            .map(|_| Transfer { to: Keypair::new().pubkey(), lamports: 5_000 })
            .collect();
        build_transfer_transactions(&payer, &transfers, Hash::new_from_array([2u8; 32])).unwrap()
    }

    #[test]
    fn test_bundle_size_limits() {
        assert!(matches!(Bundle::new(Vec::new()), Err(RelayError::InvalidBundle(_))));
        assert!(matches!(Bundle::new(signed(6)), Err(RelayError::InvalidBundle(_))));
        assert_eq!(Bundle::new(signed(5)).unwrap().len(), 5);
    }

    #[test]
    fn test_signatures_follow_transaction_order() {
        let txs = signed(3);
        let expected: Vec<Signature> = txs.iter().map(|tx| tx.signatures[0]).collect();
        let bundle = Bundle::new(txs).unwrap();
        assert_eq!(bundle.signatures(), expected);
    }

    #[test]
    fn test_encoded_transactions_decode_back() {
        let bundle = Bundle::new(signed(2)).unwrap();
        let encoded = bundle.encode_base64().unwrap();
        assert_eq!(encoded.len(), 2);

        let bytes = STANDARD.decode(&encoded[1]).unwrap();
        let decoded: VersionedTransaction = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded.signatures, bundle.transactions()[1].signatures);
    }

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err = RelayError::Rejected("bundle contains an already-processed transaction".to_string());
        assert_eq!(err.to_string(), "bundle contains an already-processed transaction");
    }
}
