//! In-memory ledger and relay used by the transfer unit tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::blockchain::client::Ledger;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationPolicy, SignatureState};
use crate::relay::{Bundle, BundleId, BundleRelay, RelayError};

pub const BLOCKHASH: [u8; 32] = [42u8; 32];

pub fn fast_policy() -> ConfirmationPolicy {
    ConfirmationPolicy {
        timeout: Duration::from_millis(200),
        poll_base_ms: 5,
        poll_max_ms: 20,
    }
}

#[derive(Debug, Clone)]
pub enum ConfirmMode {
    Confirm,
    Fail(String),
    Never,
}

pub struct FakeLedger {
    balance: AtomicU64,
    confirm: ConfirmMode,
    airdrop_fails: bool,
    pub balance_calls: AtomicUsize,
    pub blockhash_calls: AtomicUsize,
    pub airdrop_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
}

impl FakeLedger {
    pub fn with_balance(lamports: u64) -> Self {
        Self {
            balance: AtomicU64::new(lamports),
            confirm: ConfirmMode::Confirm,
            airdrop_fails: false,
            balance_calls: AtomicUsize::new(0),
            blockhash_calls: AtomicUsize::new(0),
            airdrop_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    pub fn confirm_mode(mut self, mode: ConfirmMode) -> Self {
        self.confirm = mode;
        self
    }

    pub fn airdrop_fails(mut self) -> Self {
        self.airdrop_fails = true;
        self
    }

    pub fn network_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
            + self.blockhash_calls.load(Ordering::SeqCst)
            + self.airdrop_calls.load(Ordering::SeqCst)
            + self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for FakeLedger {
    async fn get_balance(&self, _pubkey: &Pubkey) -> BlockchainResult<u64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balance.load(Ordering::SeqCst))
    }

    async fn get_latest_blockhash(&self) -> BlockchainResult<Hash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_from_array(BLOCKHASH))
    }

    async fn request_airdrop(&self, _pubkey: &Pubkey, lamports: u64) -> BlockchainResult<Signature> {
        self.airdrop_calls.fetch_add(1, Ordering::SeqCst);
        if self.airdrop_fails {
            return Err(BlockchainError::Rpc {
                method: "requestAirdrop",
                message: "airdrop limit reached".to_string(),
            });
        }
        self.balance.fetch_add(lamports, Ordering::SeqCst);
        Ok(Signature::from([9u8; 64]))
    }

    async fn signature_statuses(
        &self,
        signatures: &[Signature],
    ) -> BlockchainResult<Vec<Option<SignatureState>>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(signatures
            .iter()
            .map(|_| match &self.confirm {
                ConfirmMode::Confirm => Some(SignatureState {
                    err: None,
                    reached_commitment: true,
                }),
                ConfirmMode::Fail(err) => Some(SignatureState {
                    err: Some(err.clone()),
                    reached_commitment: true,
                }),
                ConfirmMode::Never => None,
            })
            .collect())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct FakeRelay {
    reject_with: Option<String>,
    pub submitted: Mutex<Vec<Bundle>>,
}

impl FakeRelay {
    pub fn rejecting(message: &str) -> Self {
        Self {
            reject_with: Some(message.to_string()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn submissions(&self) -> Vec<Bundle> {
        self.submitted.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl BundleRelay for FakeRelay {
    async fn submit_bundle(&self, bundle: &Bundle) -> Result<BundleId, RelayError> {
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(bundle.clone());
        }
        match &self.reject_with {
            Some(message) => Err(RelayError::Rejected(message.clone())),
            None => Ok(BundleId("bundle-1".to_string())),
        }
    }
}
