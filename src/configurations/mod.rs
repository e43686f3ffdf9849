use alloy::{primitives::Address, transports::http::reqwest::Url};
use eyre::{Context, Result};
use std::str::FromStr;

use crate::ledger::signer_from_mnemonic;

/// The fixed house account, used as the counterparty of house-bound and house-originated transfers.
#[derive(Clone)]
pub struct HouseAccounts {
    /// Destination of `send_to_house` transfers.
    pub address: String,
    /// Source of `send_to_user` transfers.
    pub mnemonic: String,
}

impl HouseAccounts {
    pub fn new(address: impl Into<String>, mnemonic: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            mnemonic: mnemonic.into(),
        }
    }
}

impl std::fmt::Debug for HouseAccounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HouseAccounts")
            .field("address", &self.address)
            .field("mnemonic", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// RPC URL of the node that transactions are broadcast to.
    pub rpc_url: Url,
    pub house: HouseAccounts,
}

impl RouterConfig {
    /// Creates a new configuration, validating the house address and mnemonic.
    pub fn new(rpc_url: Url, house_address: &str, house_mnemonic: &str) -> Result<Self> {
        let address = Address::from_str(house_address.trim())
            .wrap_err("Could not parse house address")?;
        signer_from_mnemonic(house_mnemonic).wrap_err("Could not parse house mnemonic")?;

        Ok(Self {
            rpc_url,
            house: HouseAccounts::new(address.to_string(), house_mnemonic.trim()),
        })
    }
}
