//! Transfer orchestration.
//!
//! # Flow
//! ```text
//! validate recipients → decode sender key → balance guard
//!     → one blockhash → build N signed transactions → bundle
//!     → relay submit → confirmation
//! ```
//!
//! Nothing touches the network until the request has passed validation.

use std::sync::Arc;

use crate::blockchain::client::Ledger;
use crate::blockchain::transaction::build_transfer_transactions;
use crate::blockchain::types::ConfirmationPolicy;
use crate::blockchain::wallet::SenderKeypair;
use crate::config::{LedgerConfig, TransferConfig};
use crate::relay::{Bundle, BundleRelay};
use crate::transfer::balance::BalanceGuard;
use crate::transfer::error::TransferError;
use crate::transfer::submitter::BundleSubmitter;
use crate::transfer::types::{TransferReceipt, TransferRequest};
use crate::transfer::validation::{total_lamports, validate_recipients};

pub struct TransferService {
    ledger: Arc<dyn Ledger>,
    guard: BalanceGuard,
    submitter: BundleSubmitter,
}

impl TransferService {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        relay: Arc<dyn BundleRelay>,
        ledger_config: &LedgerConfig,
        transfer_config: &TransferConfig,
    ) -> Self {
        let policy = ConfirmationPolicy::from(transfer_config);
        let auto_fund = ledger_config.test_network && ledger_config.auto_fund;

        Self {
            guard: BalanceGuard::new(
                ledger.clone(),
                transfer_config.reserve_lamports,
                auto_fund,
                policy,
            ),
            submitter: BundleSubmitter::new(relay, ledger.clone(), policy),
            ledger,
        }
    }

    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    /// Run one transfer request end to end.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        if request.sender_private_key.trim().is_empty() {
            return Err(TransferError::RequestMalformed(
                "senderPrivateKey must not be empty".to_string(),
            ));
        }

        let transfers = validate_recipients(&request.recipients)?;
        let total = total_lamports(&transfers)?;
        let sender = SenderKeypair::from_base58(&request.sender_private_key)?;

        tracing::info!(
            sender = %sender.pubkey(),
            recipients = transfers.len(),
            total_lamports = total,
            "Starting transfer"
        );

        self.guard.ensure_funds(&sender.pubkey(), total).await?;

        // One blockhash for the whole bundle.
        let blockhash = self.ledger.get_latest_blockhash().await?;
        tracing::debug!(blockhash = %blockhash, "Fetched recent blockhash");

        let transactions = build_transfer_transactions(sender.keypair(), &transfers, blockhash)?;
        let bundle = Bundle::new(transactions)?;

        self.submitter.submit(bundle).await
    }
}
