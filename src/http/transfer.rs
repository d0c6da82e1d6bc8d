//! `POST /transfer` handler.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::transfer::{TransferError, TransferRequest};

/// Body rejections are answered in the same `{success, error, code}` shape
/// as every other failure.
pub async fn transfer_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();

    let result = match payload {
        Ok(Json(request)) => {
            tracing::debug!(
                request_id = %request_id,
                recipients = request.recipients.len(),
                "Transfer request received"
            );
            state.service.transfer(&request).await
        }
        Err(rejection) => Err(TransferError::RequestMalformed(rejection.body_text())),
    };

    match result {
        Ok(receipt) => {
            tracing::info!(
                request_id = %request_id,
                bundle_id = %receipt.bundle_id,
                transactions = receipt.signatures.len(),
                "Transfer completed"
            );
            metrics::record_transfer("success", start);
            receipt.into_response()
        }
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                code = err.code(),
                error = %err,
                "Transfer failed"
            );
            metrics::record_transfer(err.code(), start);
            err.into_response()
        }
    }
}
