//! Chain-specific types and error definitions.

use std::time::Duration;

use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub use crate::config::schema::LedgerConfig;
use crate::config::schema::TransferConfig;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error in {method}: {message}")]
    Rpc { method: &'static str, message: String },

    /// RPC request timed out.
    #[error("RPC {method} timed out after {secs} seconds")]
    Timeout { method: &'static str, secs: u64 },

    /// Signatures did not reach the required commitment in time.
    #[error("not confirmed after {0} seconds")]
    ConfirmationTimeout(u64),

    /// Invalid private key format.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Message compilation or signing failed.
    #[error("Transaction build error: {0}")]
    Build(String),
}

/// Result type for ledger operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A single native transfer to one recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub to: Pubkey,
    pub lamports: u64,
}

/// Status of one signature as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureState {
    /// On-chain execution error, if the transaction failed.
    pub err: Option<String>,
    /// The transaction reached the configured commitment level.
    pub reached_commitment: bool,
}

/// Outcome of waiting on a set of signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Every signature reached the required commitment.
    Confirmed,
    /// At least one transaction landed with an error.
    Failed(String),
}

/// How long and how often to poll for confirmations.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationPolicy {
    pub timeout: Duration,
    pub poll_base_ms: u64,
    pub poll_max_ms: u64,
}

impl From<&TransferConfig> for ConfirmationPolicy {
    fn from(config: &TransferConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.confirm_timeout_secs),
            poll_base_ms: config.confirm_poll_base_ms,
            poll_max_ms: config.confirm_poll_max_ms.max(config.confirm_poll_base_ms),
        }
    }
}

/// Convert a decimal SOL amount to lamports, rounding to the nearest lamport.
///
/// Returns `None` for non-finite, non-positive or out-of-range amounts.
pub fn sol_to_lamports(sol: f64) -> Option<u64> {
    if !sol.is_finite() || sol <= 0.0 {
        return None;
    }
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    if lamports >= u64::MAX as f64 {
        return None;
    }
    Some(lamports as u64)
}

/// Lamports as decimal SOL, for display only.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sol_to_lamports() {
        assert_eq!(sol_to_lamports(0.1), Some(100_000_000));
        assert_eq!(sol_to_lamports(1.0), Some(LAMPORTS_PER_SOL));
        assert_eq!(sol_to_lamports(0.000000001), Some(1));
        assert_eq!(sol_to_lamports(0.0000000001), Some(0));
        assert_eq!(sol_to_lamports(0.0), None);
        assert_eq!(sol_to_lamports(-1.0), None);
        assert_eq!(sol_to_lamports(f64::NAN), None);
        assert_eq!(sol_to_lamports(f64::INFINITY), None);
        assert_eq!(sol_to_lamports(1e30), None);
    }

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(10_000_000), 0.01);
        assert_eq!(lamports_to_sol(0), 0.0);
    }

    #[test]
    fn test_confirmation_policy_clamps_max() {
        let config = TransferConfig {
            confirm_poll_base_ms: 800,
            confirm_poll_max_ms: 100,
            ..TransferConfig::default()
        };
        let policy = ConfirmationPolicy::from(&config);
        assert_eq!(policy.poll_max_ms, 800);
        assert_eq!(policy.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout { method: "getBalance", secs: 10 };
        assert_eq!(err.to_string(), "RPC getBalance timed out after 10 seconds");

        let err = BlockchainError::ConfirmationTimeout(60);
        assert_eq!(err.to_string(), "not confirmed after 60 seconds");
    }
}
