//! Bundle submission and confirmation.

use std::sync::Arc;

use crate::blockchain::client::Ledger;
use crate::blockchain::transaction::wait_for_confirmation;
use crate::blockchain::types::{ConfirmationPolicy, ConfirmationStatus};
use crate::relay::{Bundle, BundleRelay};
use crate::transfer::error::TransferError;
use crate::transfer::types::TransferReceipt;

/// Submits a bundle to the relay, then waits for every transaction in it
/// to confirm on the ledger.
pub struct BundleSubmitter {
    relay: Arc<dyn BundleRelay>,
    ledger: Arc<dyn Ledger>,
    policy: ConfirmationPolicy,
}

impl BundleSubmitter {
    pub fn new(relay: Arc<dyn BundleRelay>, ledger: Arc<dyn Ledger>, policy: ConfirmationPolicy) -> Self {
        Self { relay, ledger, policy }
    }

    /// Submission errors map to `SubmissionRejected` (or `NetworkFailure` when
    /// the relay is unreachable); anything after acceptance maps to
    /// `ConfirmationFailed`.
    pub async fn submit(&self, bundle: Bundle) -> Result<TransferReceipt, TransferError> {
        let signatures = bundle.signatures();

        let bundle_id = self.relay.submit_bundle(&bundle).await.map_err(|e| {
            tracing::error!(error = %e, "Bundle submission failed");
            TransferError::from(e)
        })?;

        tracing::info!(
            bundle_id = %bundle_id,
            transactions = bundle.len(),
            "Bundle submitted, awaiting confirmation"
        );

        match wait_for_confirmation(self.ledger.as_ref(), &signatures, self.policy).await {
            Ok(ConfirmationStatus::Confirmed) => {
                tracing::info!(bundle_id = %bundle_id, "Bundle confirmed");
                Ok(TransferReceipt { bundle_id, signatures })
            }
            Ok(ConfirmationStatus::Failed(err)) => {
                tracing::error!(bundle_id = %bundle_id, error = %err, "Bundle landed with an error");
                Err(TransferError::ConfirmationFailed(err))
            }
            Err(e) => {
                tracing::error!(bundle_id = %bundle_id, error = %e, "Bundle confirmation timed out");
                Err(TransferError::from(e))
            }
        }
    }
}
