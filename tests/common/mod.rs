//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use tokio::net::TcpListener;

use bundle_transfer::blockchain::{BlockchainResult, Ledger, SignatureState};
use bundle_transfer::config::ServiceConfig;
use bundle_transfer::http::{AppState, HttpServer};
use bundle_transfer::lifecycle::Shutdown;
use bundle_transfer::relay::{Bundle, BundleId, BundleRelay, RelayError};
use bundle_transfer::transfer::TransferService;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// In-memory ledger. Every submitted signature is reported as confirmed
/// unless `landing_error` is set.
pub struct MockLedger {
    pub balance: AtomicU64,
    pub landing_error: Option<String>,
    pub healthy: bool,
    pub calls: AtomicUsize,
    pub airdrops: AtomicUsize,
}

impl MockLedger {
    pub fn funded(lamports: u64) -> Self {
        Self {
            balance: AtomicU64::new(lamports),
            landing_error: None,
            healthy: true,
            calls: AtomicUsize::new(0),
            airdrops: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn get_balance(&self, _pubkey: &Pubkey) -> BlockchainResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balance.load(Ordering::SeqCst))
    }

    async fn get_latest_blockhash(&self) -> BlockchainResult<Hash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_from_array([7u8; 32]))
    }

    async fn request_airdrop(&self, _pubkey: &Pubkey, lamports: u64) -> BlockchainResult<Signature> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.airdrops.fetch_add(1, Ordering::SeqCst);
        self.balance.fetch_add(lamports, Ordering::SeqCst);
        Ok(Signature::from([3u8; 64]))
    }

    async fn signature_statuses(
        &self,
        signatures: &[Signature],
    ) -> BlockchainResult<Vec<Option<SignatureState>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(signatures
            .iter()
            .map(|_| {
                Some(SignatureState {
                    err: self.landing_error.clone(),
                    reached_commitment: true,
                })
            })
            .collect())
    }

    async fn is_healthy(&self) -> bool {
        self.healthy
    }
}

#[derive(Default)]
pub struct MockRelay {
    pub reject_with: Option<String>,
    pub bundles: Mutex<Vec<Bundle>>,
}

impl MockRelay {
    pub fn bundle_sizes(&self) -> Vec<usize> {
        self.bundles
            .lock()
            .map(|b| b.iter().map(Bundle::len).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BundleRelay for MockRelay {
    async fn submit_bundle(&self, bundle: &Bundle) -> Result<BundleId, RelayError> {
        self.bundles.lock().unwrap().push(bundle.clone());
        match &self.reject_with {
            Some(message) => Err(RelayError::Rejected(message.clone())),
            None => Ok(BundleId("e2e-bundle".to_string())),
        }
    }
}

pub fn test_config(test_network: bool) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.ledger.rpc_url = "http://127.0.0.1:8899".to_string();
    config.ledger.test_network = test_network;
    config.relay.url = "http://127.0.0.1:9999".to_string();
    config.transfer.confirm_timeout_secs = 2;
    config.transfer.confirm_poll_base_ms = 5;
    config.transfer.confirm_poll_max_ms = 20;
    config
}

/// A running service bound to an ephemeral port.
pub struct TestService {
    pub url: String,
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

pub async fn spawn_service(
    config: ServiceConfig,
    ledger: Arc<MockLedger>,
    relay: Arc<MockRelay>,
) -> TestService {
    let service = TransferService::new(ledger, relay, &config.ledger, &config.transfer);
    let state = AppState::new(service);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = HttpServer::new(config, state).run(listener, rx).await;
    });

    TestService {
        url: format!("http://{}", addr),
        addr,
        shutdown,
    }
}

pub fn random_address() -> String {
    Keypair::new().pubkey().to_string()
}

pub fn sender_key() -> String {
    Keypair::new().to_base58_string()
}
