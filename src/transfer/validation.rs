//! Recipient validation.
//!
//! Pure checks with no network access; a request that fails here never
//! reaches the ledger or the relay.

use std::collections::HashSet;
use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::blockchain::types::{sol_to_lamports, Transfer};
use crate::relay::MAX_BUNDLE_SIZE;
use crate::transfer::error::TransferError;
use crate::transfer::types::RecipientRequest;

/// One transaction per recipient, so the bundle limit is the recipient limit.
pub const MAX_RECIPIENTS: usize = MAX_BUNDLE_SIZE;

/// Check count, amounts and addresses; return the transfers in input order.
pub fn validate_recipients(recipients: &[RecipientRequest]) -> Result<Vec<Transfer>, TransferError> {
    if recipients.is_empty() {
        return Err(TransferError::RequestMalformed(
            "recipients must not be empty".to_string(),
        ));
    }
    if recipients.len() > MAX_RECIPIENTS {
        return Err(TransferError::ValidationFailed(format!(
            "Maximum {} recipients allowed, got {}",
            MAX_RECIPIENTS,
            recipients.len()
        )));
    }

    let transfers = recipients
        .iter()
        .map(validate_recipient)
        .collect::<Result<Vec<_>, _>>()?;

    // Identical transfers sign to identical transactions and would collapse
    // into one landing.
    let mut seen = HashSet::new();
    for (transfer, recipient) in transfers.iter().zip(recipients) {
        if !seen.insert((transfer.to, transfer.lamports)) {
            return Err(TransferError::ValidationFailed(format!(
                "Duplicate recipient {} with amount {} SOL",
                recipient.address, recipient.amount
            )));
        }
    }

    Ok(transfers)
}

fn validate_recipient(recipient: &RecipientRequest) -> Result<Transfer, TransferError> {
    let lamports = sol_to_lamports(recipient.amount)
        .filter(|lamports| *lamports > 0)
        .ok_or_else(|| {
            TransferError::ValidationFailed(format!(
                "Invalid amount for recipient {}: {} SOL",
                recipient.address, recipient.amount
            ))
        })?;

    let to = Pubkey::from_str(recipient.address.trim()).map_err(|_| {
        TransferError::ValidationFailed(format!("Invalid recipient address: {}", recipient.address))
    })?;

    Ok(Transfer { to, lamports })
}

/// Sum of all transfer amounts in lamports.
pub fn total_lamports(transfers: &[Transfer]) -> Result<u64, TransferError> {
    transfers
        .iter()
        .try_fold(0u64, |total, t| total.checked_add(t.lamports))
        .ok_or_else(|| TransferError::ValidationFailed("Total transfer amount is too large".to_string()))
}
