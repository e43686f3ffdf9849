mod commands;
use commands::Commands;

mod parsers;
use parsers::*;

use crate::{EvmLedger, Router, RouterConfig};
use clap::Parser;
use eyre::{Context, Result};
use reqwest::Url;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC URL of the node.
    #[arg(short, long, env = "RPC_URL", value_parser = parse_url)]
    rpc_url: Url,

    /// Address that `send_to_house` transfers to.
    #[arg(long, env = "HOUSE_ADDRESS")]
    house_address: String,

    /// Mnemonic of the account that `send_to_user` transfers from.
    #[arg(long, env = "HOUSE_MNEMONIC", hide_env_values = true)]
    house_mnemonic: String,
}

/// Main CLI entry point.
pub async fn cli() -> Result<()> {
    // default commands such as version and help exit at this point,
    // so we can do the router setup after this line
    let cli = Cli::parse();

    let config = RouterConfig::new(cli.rpc_url, &cli.house_address, &cli.house_mnemonic)
        .wrap_err("could not create router configuration")?;

    // read the event before connecting to the node
    let event = cli.command.into_event()?;

    let ledger = EvmLedger::new(config.rpc_url.clone())
        .await
        .wrap_err("could not connect to the node")?;
    log::info!("{}", ledger);

    let router = Router::new(config.house, ledger);
    let response = router.handle(&event).await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
