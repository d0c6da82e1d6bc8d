//! Startup orchestration.
//!
//! Builds the process-wide clients once, in dependency order, and fails
//! fast on anything that cannot be constructed.

use std::sync::Arc;

use thiserror::Error;

use crate::blockchain::LedgerClient;
use crate::config::ServiceConfig;
use crate::http::AppState;
use crate::relay::{JitoRelayClient, RelayError};
use crate::transfer::TransferService;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize relay client: {0}")]
    Relay(#[from] RelayError),
}

/// Build the shared handler state from a validated configuration.
pub fn build_state(config: &ServiceConfig) -> Result<AppState, StartupError> {
    let ledger = Arc::new(LedgerClient::new(config.ledger.clone()));
    let relay = Arc::new(JitoRelayClient::new(&config.relay)?);

    tracing::info!(
        relay_endpoint = %relay.endpoint(),
        test_network = config.ledger.test_network,
        auto_fund = config.ledger.test_network && config.ledger.auto_fund,
        "Transfer service initialized"
    );

    let service = TransferService::new(ledger, relay, &config.ledger, &config.transfer);
    Ok(AppState::new(service))
}
