//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! Request body (base58 sender key)
//!     → wallet.rs (key decoding)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (build, sign, confirm)
//! ```
//!
//! # Security Constraints
//! - Sender keys live only for the duration of one request
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{Ledger, LedgerClient};
pub use types::{BlockchainError, BlockchainResult, ConfirmationPolicy, ConfirmationStatus, SignatureState, Transfer};
pub use wallet::SenderKeypair;
