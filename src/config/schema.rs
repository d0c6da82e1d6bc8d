//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the transfer service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Ledger RPC settings.
    pub ledger: LedgerConfig,

    /// Bundle relay settings.
    pub relay: RelayConfig,

    /// Transfer policy (reserve, confirmation).
    pub transfer: TransferConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Ledger (Solana JSON-RPC) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint URL. Required.
    pub rpc_url: String,

    /// Commitment level used for reads and confirmation
    /// ("processed", "confirmed" or "finalized").
    pub commitment: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// The ledger is a test network (devnet/testnet/localnet).
    pub test_network: bool,

    /// Request an airdrop when the sender is short on a test network.
    pub auto_fund: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            commitment: "confirmed".to_string(),
            rpc_timeout_secs: 10,
            test_network: false,
            auto_fund: true,
        }
    }
}

/// Bundle relay (block engine) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Block engine URL. Either the base URL or the full bundles endpoint.
    pub url: String,

    /// Relay request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Transfer policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Lamports the sender must keep after all transfers (0.01 SOL).
    pub reserve_lamports: u64,

    /// Maximum time to wait for bundle confirmation in seconds.
    pub confirm_timeout_secs: u64,

    /// Initial delay between confirmation polls in milliseconds.
    pub confirm_poll_base_ms: u64,

    /// Upper bound for the delay between confirmation polls in milliseconds.
    pub confirm_poll_max_ms: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            reserve_lamports: 10_000_000,
            confirm_timeout_secs: 60,
            confirm_poll_base_ms: 500,
            confirm_poll_max_ms: 4_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Must exceed the worst-case transfer time (two confirmation waits plus
    /// the ledger and relay call deadlines).
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 180 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub log_json: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
