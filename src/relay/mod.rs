//! Bundle relay subsystem.
//!
//! # Data Flow
//! ```text
//! signed transactions
//!     → types.rs (Bundle: ordered, 1..=5, base64 wire form)
//!     → client.rs (sendBundle over JSON-RPC)
//!     → BundleId or RelayError
//! ```
//!
//! # Design Decisions
//! - The relay sits behind the `BundleRelay` trait so the transfer flow
//!   never depends on a concrete block engine
//! - Rejections carry the relay's message unchanged

pub mod client;
pub mod types;

pub use client::{BundleRelay, JitoRelayClient};
pub use types::{Bundle, BundleId, RelayError, MAX_BUNDLE_SIZE};
