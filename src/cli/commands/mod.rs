use super::parsers::*;
use crate::router::Method;
use clap::Subcommand;
use eyre::{Context, Result};
use serde_json::{json, Value};
use std::io::Read;

// https://docs.rs/clap/latest/clap/_derive/index.html#arg-attributes
#[derive(Subcommand)]
pub enum Commands {
    /// Handle a raw event, given as an argument or read from stdin.
    Invoke {
        #[arg(help = "The event JSON, e.g. '{\"method\":\"balance\",\"body\":\"...\"}'.", value_parser = parse_event)]
        event: Option<Value>,
    },
    /// See the balance of an address.
    Balance {
        #[arg(help = "The address to look up.", required = true)]
        address: String,
    },
    /// Create a random test wallet.
    CreateWallet,
    /// Transfer from a wallet to the house.
    SendToHouse {
        #[arg(long, env = "FROM_MNEMONIC", hide_env_values = true, help = "Mnemonic of the sender.")]
        from_mnemonic: String,
        #[arg(help = "Amount to transfer, in whole units.", required = true)]
        amount: String,
    },
    /// Transfer from the house to a wallet.
    SendToUser {
        #[arg(help = "The address to transfer to.", required = true)]
        to_address: String,
        #[arg(help = "Amount to transfer, in whole units.", required = true)]
        amount: String,
    },
}

impl Commands {
    /// Returns the event for this command, reading it from stdin for `invoke` without an argument.
    pub fn into_event(self) -> Result<Value> {
        let event = match self {
            Commands::Invoke { event: Some(event) } => event,
            Commands::Invoke { event: None } => {
                let mut input = String::new();
                std::io::stdin()
                    .read_to_string(&mut input)
                    .wrap_err("could not read event from stdin")?;
                parse_event(&input)?
            }
            Commands::Balance { address } => json!({
                "method": Method::Balance.as_str(),
                "body": json!({ "address": address }).to_string(),
            }),
            Commands::CreateWallet => json!({
                "method": Method::CreateWallet.as_str(),
                "body": "{}",
            }),
            Commands::SendToHouse {
                from_mnemonic,
                amount,
            } => json!({
                "method": Method::SendToHouse.as_str(),
                "body": json!({ "fromMnemonic": from_mnemonic, "amount": amount }).to_string(),
            }),
            Commands::SendToUser { to_address, amount } => json!({
                "method": Method::SendToUser.as_str(),
                "body": json!({ "toAddress": to_address, "amount": amount }).to_string(),
            }),
        };

        Ok(event)
    }
}
