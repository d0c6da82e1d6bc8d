//! Bundled transfer workflow.
//!
//! # Data Flow
//! ```text
//! TransferRequest
//!     → validation.rs (count, amounts, addresses)
//!     → balance.rs (balance + reserve, test-network airdrop)
//!     → blockchain::transaction (N signed transactions, one blockhash)
//!     → submitter.rs (relay submit + confirmation)
//!     → TransferReceipt | TransferError
//! ```

pub mod balance;
pub mod error;
pub mod service;
pub mod submitter;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::TransferError;
pub use service::TransferService;
pub use types::{RecipientRequest, TransferReceipt, TransferRequest, TransferResponse};
pub use validation::MAX_RECIPIENTS;
