//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Ledger RPC endpoint.
pub const ENV_SOLANA_RPC_URL: &str = "SOLANA_RPC_URL";
/// Bundle relay endpoint.
pub const ENV_JITO_RPC_URL: &str = "JITO_RPC_URL";
/// `true` marks the ledger as a test network.
pub const ENV_USE_DEVNET: &str = "USE_DEVNET";
/// `development` also marks the ledger as a test network.
pub const ENV_NODE_ENV: &str = "NODE_ENV";
/// Enables or disables airdrop funding on test networks.
pub const ENV_AUTO_FUND: &str = "AUTO_FUND";
/// Listener bind address.
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then environment overrides,
/// then validation.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay recognized environment variables onto `config`.
///
/// `lookup` abstracts the environment so callers can supply their own source.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_SOLANA_RPC_URL) {
        config.ledger.rpc_url = url;
    }
    if let Some(url) = lookup(ENV_JITO_RPC_URL) {
        config.relay.url = url;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }

    let devnet = lookup(ENV_USE_DEVNET).map(|v| parse_flag(&v));
    let development = lookup(ENV_NODE_ENV).map(|v| v.eq_ignore_ascii_case("development"));
    if devnet == Some(true) || development == Some(true) {
        config.ledger.test_network = true;
    } else if devnet == Some(false) {
        config.ledger.test_network = false;
    }

    if let Some(flag) = lookup(ENV_AUTO_FUND) {
        config.ledger.auto_fund = parse_flag(&flag);
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
