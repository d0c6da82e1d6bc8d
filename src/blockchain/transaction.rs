//! Transaction building, signing, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build one signed v0 transfer transaction per recipient
//! - Anchor every transaction of a request to the same blockhash
//! - Poll signature statuses until confirmed, failed or timed out

use solana_sdk::hash::Hash;
use solana_sdk::message::{v0, VersionedMessage};
use solana_sdk::signature::{Keypair, Signature, Signer};
#[allow(deprecated)]
use solana_sdk::system_instruction;
use solana_sdk::transaction::VersionedTransaction;
use tokio::time::{sleep, timeout};

use crate::blockchain::client::Ledger;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ConfirmationPolicy, ConfirmationStatus, Transfer,
};
use crate::resilience::backoff::poll_delay;

/// Build and sign one transaction per transfer, preserving input order.
///
/// The payer signs every transaction and pays its fee. Each transaction
/// depends only on the shared inputs, so order of construction is irrelevant.
pub fn build_transfer_transactions(
    payer: &Keypair,
    transfers: &[Transfer],
    recent_blockhash: Hash,
) -> BlockchainResult<Vec<VersionedTransaction>> {
    transfers
        .iter()
        .map(|transfer| build_transfer_transaction(payer, transfer, recent_blockhash))
        .collect()
}

#[allow(deprecated)]
fn build_transfer_transaction(
    payer: &Keypair,
    transfer: &Transfer,
    recent_blockhash: Hash,
) -> BlockchainResult<VersionedTransaction> {
    let payer_key = payer.pubkey();
    let instruction = system_instruction::transfer(&payer_key, &transfer.to, transfer.lamports);

    let message = v0::Message::try_compile(&payer_key, &[instruction], &[], recent_blockhash)
        .map_err(|e| BlockchainError::Build(format!("failed to compile message: {}", e)))?;

    VersionedTransaction::try_new(VersionedMessage::V0(message), &[payer])
        .map_err(|e| BlockchainError::Build(format!("failed to sign transaction: {}", e)))
}

/// Wait until every signature reaches the ledger's commitment level.
///
/// Returns `Failed` as soon as any transaction reports an execution error.
/// Status lookups that error are logged and polled again until the deadline.
pub async fn wait_for_confirmation(
    ledger: &dyn Ledger,
    signatures: &[Signature],
    policy: ConfirmationPolicy,
) -> BlockchainResult<ConfirmationStatus> {
    let result = timeout(policy.timeout, async {
        let mut attempt = 0u32;

        loop {
            attempt = attempt.saturating_add(1);

            match ledger.signature_statuses(signatures).await {
                Ok(states) => {
                    if let Some(err) = states.iter().flatten().find_map(|s| s.err.clone()) {
                        return ConfirmationStatus::Failed(err);
                    }

                    let confirmed = states
                        .iter()
                        .filter(|s| matches!(s, Some(state) if state.reached_commitment))
                        .count();
                    if confirmed == signatures.len() {
                        return ConfirmationStatus::Confirmed;
                    }

                    tracing::debug!(
                        confirmed,
                        required = signatures.len(),
                        attempt,
                        "Waiting for confirmations"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, attempt, "Signature status lookup failed");
                }
            }

            sleep(poll_delay(attempt, policy.poll_base_ms, policy.poll_max_ms)).await;
        }
    })
    .await;

    result.map_err(|_| BlockchainError::ConfirmationTimeout(policy.timeout.as_secs()))
}
