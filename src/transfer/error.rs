//! Transfer error taxonomy.

use thiserror::Error;

use crate::blockchain::types::{lamports_to_sol, BlockchainError};
use crate::relay::RelayError;

/// Every way a transfer request can fail.
///
/// Each variant has a stable [`code`](TransferError::code) so callers can
/// tell the kinds apart without parsing messages.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The body is not a well-formed transfer request.
    #[error("Invalid request format: {0}")]
    RequestMalformed(String),

    /// A business rule rejected the request (recipient count, address, amount, key).
    #[error("{0}")]
    ValidationFailed(String),

    #[error(
        "Insufficient balance. Required: {} SOL, Available: {} SOL",
        lamports_to_sol(*.required),
        lamports_to_sol(*.available)
    )]
    InsufficientFunds { required: u64, available: u64 },

    /// The test-network airdrop failed or did not confirm.
    #[error("Airdrop failed: {0}")]
    FundingFailed(String),

    /// The ledger RPC was unreachable or timed out.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The relay declined the bundle. Message is the relay's own.
    #[error("{0}")]
    SubmissionRejected(String),

    /// The bundle was accepted but failed on-chain or never confirmed.
    #[error("Transaction failed to confirm: {0}")]
    ConfirmationFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TransferError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::RequestMalformed(_) => "request_malformed",
            TransferError::ValidationFailed(_) => "validation_failed",
            TransferError::InsufficientFunds { .. } => "insufficient_funds",
            TransferError::FundingFailed(_) => "funding_failed",
            TransferError::NetworkFailure(_) => "network_failure",
            TransferError::SubmissionRejected(_) => "submission_rejected",
            TransferError::ConfirmationFailed(_) => "confirmation_failed",
            TransferError::Internal(_) => "internal",
        }
    }
}

impl From<BlockchainError> for TransferError {
    fn from(err: BlockchainError) -> Self {
        match err {
            BlockchainError::Rpc { .. } | BlockchainError::Timeout { .. } => {
                TransferError::NetworkFailure(err.to_string())
            }
            BlockchainError::ConfirmationTimeout(_) => {
                TransferError::ConfirmationFailed(err.to_string())
            }
            BlockchainError::Wallet(msg) => {
                TransferError::ValidationFailed(format!("Invalid sender private key: {}", msg))
            }
            BlockchainError::Build(msg) => TransferError::Internal(msg),
        }
    }
}

impl From<RelayError> for TransferError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Rejected(msg) => TransferError::SubmissionRejected(msg),
            RelayError::Transport(_) | RelayError::Timeout(_) | RelayError::InvalidResponse(_) => {
                TransferError::NetworkFailure(err.to_string())
            }
            RelayError::InvalidBundle(msg) => TransferError::Internal(msg),
        }
    }
}
