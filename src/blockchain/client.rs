//! Ledger RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the Solana JSON-RPC endpoint
//! - Query chain state (balances, recent blockhash, signature statuses)
//! - Request test-network airdrops
//! - Handle timeouts and network errors gracefully
//! - Provide health check for ledger connectivity

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, LedgerConfig, SignatureState};
use crate::observability::metrics;

/// Read and write access to the ledger needed by a transfer.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Balance of `pubkey` in lamports.
    async fn get_balance(&self, pubkey: &Pubkey) -> BlockchainResult<u64>;

    /// A recent blockhash to anchor new transactions.
    async fn get_latest_blockhash(&self) -> BlockchainResult<Hash>;

    /// Ask the network faucet for `lamports`. Test networks only.
    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> BlockchainResult<Signature>;

    /// Current status of each signature, in input order.
    /// `None` means the ledger has not seen the signature yet.
    async fn signature_statuses(
        &self,
        signatures: &[Signature],
    ) -> BlockchainResult<Vec<Option<SignatureState>>>;

    /// Returns true if the RPC node reports itself healthy.
    async fn is_healthy(&self) -> bool;
}

/// Ledger client backed by the Solana nonblocking RPC client.
#[derive(Clone)]
pub struct LedgerClient {
    rpc: Arc<RpcClient>,
    config: LedgerConfig,
    commitment: CommitmentConfig,
    timeout_duration: Duration,
}

impl LedgerClient {
    /// Create a new ledger client.
    ///
    /// No network call is made; the endpoint is only contacted on first use.
    pub fn new(config: LedgerConfig) -> Self {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let commitment = parse_commitment(&config.commitment);
        let rpc = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            timeout_duration,
            commitment,
        );

        tracing::info!(
            rpc_url = %config.rpc_url,
            commitment = %config.commitment,
            test_network = config.test_network,
            "Ledger client initialized"
        );

        Self {
            rpc: Arc::new(rpc),
            config,
            commitment,
            timeout_duration,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Run one RPC call under the client deadline.
    async fn call<T, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                metrics::record_rpc_error(method);
                Err(BlockchainError::Rpc {
                    method,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                metrics::record_rpc_error(method);
                Err(BlockchainError::Timeout {
                    method,
                    secs: self.timeout_duration.as_secs(),
                })
            }
        }
    }
}

#[async_trait]
impl Ledger for LedgerClient {
    async fn get_balance(&self, pubkey: &Pubkey) -> BlockchainResult<u64> {
        self.call("getBalance", self.rpc.get_balance(pubkey)).await
    }

    async fn get_latest_blockhash(&self) -> BlockchainResult<Hash> {
        self.call("getLatestBlockhash", self.rpc.get_latest_blockhash())
            .await
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> BlockchainResult<Signature> {
        self.call("requestAirdrop", self.rpc.request_airdrop(pubkey, lamports))
            .await
    }

    async fn signature_statuses(
        &self,
        signatures: &[Signature],
    ) -> BlockchainResult<Vec<Option<SignatureState>>> {
        let response = self
            .call("getSignatureStatuses", self.rpc.get_signature_statuses(signatures))
            .await?;

        Ok(response
            .value
            .into_iter()
            .map(|status| {
                status.map(|status| SignatureState {
                    err: status.err.as_ref().map(ToString::to_string),
                    reached_commitment: status.satisfies_commitment(self.commitment),
                })
            })
            .collect())
    }

    async fn is_healthy(&self) -> bool {
        self.call("getHealth", self.rpc.get_health()).await.is_ok()
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("commitment", &self.config.commitment)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

/// Map a commitment name to its config. Unknown names fall back to `confirmed`.
pub fn parse_commitment(name: &str) -> CommitmentConfig {
    match name {
        "processed" => CommitmentConfig::processed(),
        "finalized" => CommitmentConfig::finalized(),
        _ => CommitmentConfig::confirmed(),
    }
}
