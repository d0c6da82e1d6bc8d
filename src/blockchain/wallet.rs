//! Sender key decoding.
//!
//! # Security
//! - Keys arrive per request and live only for that request
//! - Keys are never logged or serialized
//! - Decode errors never echo any part of the input

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Signing keypair of the account paying for a transfer.
pub struct SenderKeypair {
    keypair: Keypair,
}

impl SenderKeypair {
    /// Decode a base58 string holding the 64-byte keypair (secret + public half).
    pub fn from_base58(encoded: &str) -> BlockchainResult<Self> {
        let bytes = bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|_| BlockchainError::Wallet("sender private key is not valid base58".to_string()))?;

        let keypair = Keypair::try_from(bytes.as_slice()).map_err(|_| {
            BlockchainError::Wallet(format!(
                "sender private key must be a 64-byte keypair, got {} bytes",
                bytes.len()
            ))
        })?;

        Ok(Self { keypair })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl std::fmt::Debug for SenderKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderKeypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}
