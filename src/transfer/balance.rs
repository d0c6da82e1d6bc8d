//! Balance guard.
//!
//! Verifies the sender can cover every transfer and still keep the reserve.
//! On test networks a shortfall triggers a single airdrop instead of an error.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::blockchain::client::Ledger;
use crate::blockchain::transaction::wait_for_confirmation;
use crate::blockchain::types::{ConfirmationPolicy, ConfirmationStatus};
use crate::transfer::error::TransferError;

/// How the guard satisfied the balance requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingOutcome {
    Sufficient { balance: u64 },
    Airdropped { signature: Signature, lamports: u64 },
}

pub struct BalanceGuard {
    ledger: Arc<dyn Ledger>,
    reserve_lamports: u64,
    auto_fund: bool,
    policy: ConfirmationPolicy,
}

impl BalanceGuard {
    /// `auto_fund` must only be true on a test network.
    pub fn new(
        ledger: Arc<dyn Ledger>,
        reserve_lamports: u64,
        auto_fund: bool,
        policy: ConfirmationPolicy,
    ) -> Self {
        Self {
            ledger,
            reserve_lamports,
            auto_fund,
            policy,
        }
    }

    /// Make sure `payer` holds `total_lamports` plus the reserve.
    ///
    /// After a confirmed airdrop the balance is not re-read.
    pub async fn ensure_funds(
        &self,
        payer: &Pubkey,
        total_lamports: u64,
    ) -> Result<FundingOutcome, TransferError> {
        let required = total_lamports.saturating_add(self.reserve_lamports);
        let balance = self.ledger.get_balance(payer).await?;

        if balance >= required {
            return Ok(FundingOutcome::Sufficient { balance });
        }

        if !self.auto_fund {
            return Err(TransferError::InsufficientFunds {
                required,
                available: balance,
            });
        }

        tracing::info!(
            payer = %payer,
            balance,
            required,
            "Insufficient balance, requesting test-network airdrop"
        );

        let signature = self
            .ledger
            .request_airdrop(payer, required)
            .await
            .map_err(|e| TransferError::FundingFailed(e.to_string()))?;

        match wait_for_confirmation(self.ledger.as_ref(), &[signature], self.policy).await {
            Ok(ConfirmationStatus::Confirmed) => {
                tracing::info!(signature = %signature, lamports = required, "Airdrop confirmed");
                Ok(FundingOutcome::Airdropped {
                    signature,
                    lamports: required,
                })
            }
            Ok(ConfirmationStatus::Failed(err)) => Err(TransferError::FundingFailed(format!(
                "airdrop {} failed: {}",
                signature, err
            ))),
            Err(e) => Err(TransferError::FundingFailed(format!("airdrop {} {}", signature, e))),
        }
    }
}
