use bundle_transfer_sdk::{Recipient, TransferClient, TransferRequest};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "transfer-cli")]
#[command(about = "Command-line driver for the bundled transfer service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a bundled transfer
    Transfer {
        /// Base58 keypair of the paying account
        #[arg(short, long, env = "SENDER_PRIVATE_KEY", hide_env_values = true)]
        key: String,

        /// Recipient as ADDRESS:AMOUNT_SOL, repeatable (at most 5)
        #[arg(short, long = "to", value_parser = parse_recipient)]
        to: Vec<Recipient>,
    },
    /// Check service and ledger health
    Health,
}

fn parse_recipient(raw: &str) -> Result<Recipient, String> {
    let (address, amount) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected ADDRESS:AMOUNT, got '{}'", raw))?;
    let amount: f64 = amount
        .parse()
        .map_err(|_| format!("invalid amount '{}'", amount))?;
    Ok(Recipient {
        address: address.to_string(),
        amount,
    })
}

/// Recipients from `RECIPIENT_ADDRESS_1` / `RECIPIENT_ADDRESS_2`, 0.1 SOL each.
fn default_recipients() -> Vec<Recipient> {
    ["RECIPIENT_ADDRESS_1", "RECIPIENT_ADDRESS_2"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|address| Recipient { address, amount: 0.1 })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TransferClient::new(&cli.url);

    match cli.command {
        Commands::Transfer { key, to } => {
            let recipients = if to.is_empty() { default_recipients() } else { to };
            if recipients.is_empty() {
                eprintln!("Error: no recipients given (use --to or RECIPIENT_ADDRESS_1/2)");
                std::process::exit(2);
            }

            let request = TransferRequest {
                sender_private_key: key,
                recipients,
            };
            let outcome = client.transfer(&request).await?;

            println!("{}", serde_json::to_string_pretty(&outcome.response)?);
            if !outcome.response.success {
                eprintln!("Transfer failed with status {}", outcome.status);
                std::process::exit(1);
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipient() {
        let r = parse_recipient("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin:0.25").unwrap();
        assert_eq!(r.address, "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin");
        assert_eq!(r.amount, 0.25);
    }

    #[test]
    fn test_parse_recipient_rejects_garbage() {
        assert!(parse_recipient("no-amount").is_err());
        assert!(parse_recipient("addr:lots").is_err());
    }
}
