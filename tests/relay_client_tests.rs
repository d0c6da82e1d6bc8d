//! Relay client tests against a mocked block-engine JSON-RPC endpoint.

use serde_json::json;
use solana_sdk::hash::Hash;
use solana_sdk::message::{v0, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::VersionedTransaction;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bundle_transfer::config::RelayConfig;
use bundle_transfer::relay::{Bundle, BundleRelay, JitoRelayClient, RelayError};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

#[allow(deprecated)]
fn one_transaction_bundle() -> Bundle {
    let payer = Keypair::new();
    let ix = solana_sdk::system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1_000);
    let message = v0::Message::try_compile(&payer.pubkey(), &[ix], &[], Hash::new_unique()).unwrap();
    let tx = VersionedTransaction::try_new(VersionedMessage::V0(message), &[&payer]).unwrap();
    Bundle::new(vec![tx]).unwrap()
}

fn client_for(server: &MockServer) -> JitoRelayClient {
    JitoRelayClient::new(&RelayConfig {
        url: server.uri(),
        timeout_secs: 5,
    })
    .unwrap()
}

// ============================================================================
// TESTS
// ============================================================================

#[tokio::test]
async fn test_accepted_bundle_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bundles"))
        .and(body_partial_json(json!({ "method": "sendBundle" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": "2id3YC2jK9G5Wo2phDx4gJVAew8DcY5NAojnVuao8rkxwPYPe8cSwE5GzhEgJA2y8fVjDEo6iR6ykBvDxrTQrtpb"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = client_for(&server)
        .submit_bundle(&one_transaction_bundle())
        .await
        .unwrap();
    assert!(id.0.starts_with("2id3YC"));
}

#[tokio::test]
async fn test_rejection_message_is_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "bundle must tip at least 1000 lamports" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_bundle(&one_transaction_bundle())
        .await
        .unwrap_err();
    match err {
        RelayError::Rejected(message) => {
            assert_eq!(message, "bundle must tip at least 1000 lamports")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_reply_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_bundle(&one_transaction_bundle())
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::InvalidResponse(ref m) if m.contains("502")));
}

#[tokio::test]
async fn test_unreachable_relay_is_transport_error() {
    let client = JitoRelayClient::new(&RelayConfig {
        url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
    })
    .unwrap();

    let err = client.submit_bundle(&one_transaction_bundle()).await.unwrap_err();
    assert!(matches!(err, RelayError::Transport(_) | RelayError::Timeout(_)));
}
