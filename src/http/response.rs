//! Mapping of transfer outcomes to HTTP responses.
//!
//! | kind                                         | status |
//! |----------------------------------------------|--------|
//! | malformed request, validation                | 400    |
//! | funds, funding, rejected, confirmation       | 200    |
//! | network, internal                            | 500    |
//!
//! Business failures are reported with 200 and `success: false`; every
//! failure body carries a machine-readable `code`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::transfer::{TransferError, TransferReceipt, TransferResponse};

pub fn status_for(err: &TransferError) -> StatusCode {
    match err {
        TransferError::RequestMalformed(_) | TransferError::ValidationFailed(_) => {
            StatusCode::BAD_REQUEST
        }
        TransferError::InsufficientFunds { .. }
        | TransferError::FundingFailed(_)
        | TransferError::SubmissionRejected(_)
        | TransferError::ConfirmationFailed(_) => StatusCode::OK,
        TransferError::NetworkFailure(_) | TransferError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for TransferError {
    fn into_response(self) -> Response {
        (status_for(&self), Json(TransferResponse::failure(&self))).into_response()
    }
}

/// Replace the empty 408 produced by the request deadline with a structured
/// `network_failure` body. Other responses pass through untouched.
pub fn structure_timeout(response: Response, request_secs: u64) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!(request_secs, "Transfer request hit the request deadline");
    TransferError::NetworkFailure(format!(
        "request timed out after {} seconds; bundle outcome unknown",
        request_secs
    ))
    .into_response()
}

impl IntoResponse for TransferReceipt {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(TransferResponse::success(&self))).into_response()
    }
}
