//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout, body limit, request id, trace)
//!     → transfer.rs / health.rs (handlers)
//!     → transfer::TransferService
//!     → response.rs (error kind → status + JSON body)
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod server;
pub mod transfer;

pub use request::{request_id, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
