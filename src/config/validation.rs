//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required endpoints are present and parse as http(s) URLs
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is not a valid http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("ledger.commitment must be processed, confirmed or finalized, got {0}")]
    InvalidCommitment(String),

    #[error("timeouts.request_secs ({request_secs}) must exceed the worst-case transfer time of {required} seconds")]
    RequestBudget { request_secs: u64, required: u64 },
}

/// Longest a transfer can legitimately run: two confirmation waits (airdrop
/// and bundle), three plain ledger calls and one relay call.
pub fn transfer_budget_secs(config: &ServiceConfig) -> u64 {
    config
        .transfer
        .confirm_timeout_secs
        .saturating_mul(2)
        .saturating_add(config.ledger.rpc_timeout_secs.saturating_mul(3))
        .saturating_add(config.relay.timeout_secs)
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("ledger.rpc_url", &config.ledger.rpc_url, &mut errors);
    check_url("relay.url", &config.relay.url, &mut errors);

    if !matches!(
        config.ledger.commitment.as_str(),
        "processed" | "confirmed" | "finalized"
    ) {
        errors.push(ValidationError::InvalidCommitment(
            config.ledger.commitment.clone(),
        ));
    }

    let non_zero = [
        ("ledger.rpc_timeout_secs", config.ledger.rpc_timeout_secs),
        ("relay.timeout_secs", config.relay.timeout_secs),
        ("transfer.confirm_timeout_secs", config.transfer.confirm_timeout_secs),
        ("transfer.confirm_poll_base_ms", config.transfer.confirm_poll_base_ms),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, value) in non_zero {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }
    let required = transfer_budget_secs(config);
    if config.timeouts.request_secs != 0 && config.timeouts.request_secs <= required {
        errors.push(ValidationError::RequestBudget {
            request_secs: config.timeouts.request_secs,
            required,
        });
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::Zero { field: "listener.max_body_bytes" });
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Missing { field });
        return;
    }
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.ledger.rpc_url = "http://127.0.0.1:8899".to_string();
        config.relay.url = "https://mainnet.block-engine.jito.wtf".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_endpoints_reported_together() {
        let errors = validate_config(&ServiceConfig::default()).unwrap_err();
        assert!(errors.contains(&ValidationError::Missing { field: "ledger.rpc_url" }));
        assert!(errors.contains(&ValidationError::Missing { field: "relay.url" }));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = valid_config();
        config.relay.url = "grpc://block-engine:1003".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("relay.url"));
    }

    #[test]
    fn test_rejects_zero_timeouts_and_bad_commitment() {
        let mut config = valid_config();
        config.ledger.rpc_timeout_secs = 0;
        config.ledger.commitment = "max".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::Zero { field: "ledger.rpc_timeout_secs" }));
        assert!(errors.contains(&ValidationError::InvalidCommitment("max".to_string())));
    }

    #[test]
    fn test_default_request_timeout_covers_transfer() {
        let config = valid_config();
        assert!(config.timeouts.request_secs > transfer_budget_secs(&config));
    }

    #[test]
    fn test_request_timeout_shorter_than_confirmation_rejected() {
        let mut config = valid_config();
        config.timeouts.request_secs = 1;
        config.transfer.confirm_timeout_secs = 3;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::RequestBudget { request_secs: 1, .. }
        )));
    }
}
