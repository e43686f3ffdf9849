use super::{Ledger, TransferRequest, TransferResult, WalletRecord};
use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{
        utils::{format_ether, parse_ether},
        Address, TxHash, U256,
    },
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
    signers::local::{
        coins_bip39::{English, Mnemonic},
        MnemonicBuilder, PrivateKeySigner,
    },
    transports::http::{reqwest::Url, Client, Http},
};
use alloy_chains::Chain;
use async_trait::async_trait;
use eyre::{eyre, Context, Result};
use std::{str::FromStr, time::Duration};

/// Number of words in a generated mnemonic.
const MNEMONIC_WORD_COUNT: usize = 12;

/// Derives the first account (`m/44'/60'/0'/0/0`) of a BIP-39 mnemonic.
pub fn signer_from_mnemonic(mnemonic: &str) -> Result<PrivateKeySigner> {
    MnemonicBuilder::<English>::default()
        .phrase(mnemonic.trim())
        .build()
        .wrap_err("Invalid mnemonic")
}

/// Generates a random mnemonic along with the address of its first account.
pub fn generate_wallet() -> Result<WalletRecord> {
    let mut rng = rand::thread_rng();
    let mnemonic = Mnemonic::<English>::new_with_count(&mut rng, MNEMONIC_WORD_COUNT)
        .wrap_err("Could not generate mnemonic")?
        .to_phrase();
    let signer = signer_from_mnemonic(&mnemonic)?;

    Ok(WalletRecord {
        address: signer.address().to_string(),
        mnemonic,
    })
}

/// Converts an amount in whole units to base units (wei).
fn to_base_units(amount: f64) -> Result<U256> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(eyre!("Invalid amount: {}", amount));
    }

    let value = parse_ether(&amount.to_string()).wrap_err("Could not convert amount to wei")?;
    if value.is_zero() && amount > 0.0 {
        return Err(eyre!("Amount {} is below the smallest unit", amount));
    }

    Ok(value)
}

fn parse_address(address: &str) -> Result<Address> {
    Address::from_str(address.trim()).wrap_err_with(|| format!("Invalid address: {}", address))
}

/// Ledger backed by an EVM node over HTTP.
pub struct EvmLedger {
    rpc_url: Url,
    chain: Chain,
    /// Read-only provider, transfers build their own provider with the sender's wallet.
    provider: RootProvider<Http<Client>>,
}

impl EvmLedger {
    /// Number of blocks to wait for a transaction to be included before giving up.
    pub const CONFIRMATION_ROUNDS: u64 = 4;
    /// Delay between receipt polls.
    const POLL_INTERVAL: Duration = Duration::from_secs(1);

    /// Connects to the node at the given RPC URL.
    pub async fn new(rpc_url: Url) -> Result<Self> {
        let provider = ProviderBuilder::new().on_http(rpc_url.clone());

        let chain_id_u64 = provider
            .get_chain_id()
            .await
            .wrap_err("Could not get chain id")?;

        Ok(Self {
            rpc_url,
            chain: Chain::from_id(chain_id_u64),
            provider,
        })
    }

    /// Returns the connected chain.
    pub fn chain(&self) -> Chain {
        self.chain
    }
}

/// Chain queries needed to follow a broadcast transaction.
#[async_trait]
trait ConfirmationSource: Send + Sync {
    async fn block_number(&self) -> Result<u64>;

    /// Returns the block that `tx_hash` was included in, `None` while it is pending.
    async fn included_round(&self, tx_hash: TxHash) -> Result<Option<u64>>;
}

#[async_trait]
impl ConfirmationSource for RootProvider<Http<Client>> {
    async fn block_number(&self) -> Result<u64> {
        self.get_block_number()
            .await
            .wrap_err("Could not get block number")
    }

    async fn included_round(&self, tx_hash: TxHash) -> Result<Option<u64>> {
        let Some(receipt) = self
            .get_transaction_receipt(tx_hash)
            .await
            .wrap_err("Could not get transaction receipt")?
        else {
            return Ok(None);
        };

        if !receipt.status() {
            return Err(eyre!("Transaction {} reverted", tx_hash));
        }

        receipt
            .block_number
            .map(Some)
            .ok_or_else(|| eyre!("Receipt of {} has no block number", tx_hash))
    }
}

/// Polls for the receipt of `tx_hash` until it is included, for at most
/// [`EvmLedger::CONFIRMATION_ROUNDS`] blocks after `start_block`.
///
/// The receipt is checked once more after the last block is seen, so a transaction
/// included in that block still counts. Returns the block it was included in.
async fn wait_for_confirmation<S: ConfirmationSource + ?Sized>(
    source: &S,
    tx_hash: TxHash,
    start_block: u64,
    poll_interval: Duration,
) -> Result<u64> {
    let last_block = start_block + EvmLedger::CONFIRMATION_ROUNDS;
    let mut current_block = start_block;

    loop {
        if let Some(round) = source.included_round(tx_hash).await? {
            log::info!("Transaction confirmed in round {}", round);
            return Ok(round);
        }

        if current_block > last_block {
            return Err(eyre!(
                "Transaction not confirmed after {} rounds",
                EvmLedger::CONFIRMATION_ROUNDS
            ));
        }

        log::debug!("Waiting for {} at block {}", tx_hash, current_block);
        tokio::time::sleep(poll_interval).await;
        current_block = source.block_number().await?;
    }
}

#[async_trait]
impl Ledger for EvmLedger {
    async fn balance(&self, address: &str) -> Result<f64> {
        let address = parse_address(address)?;
        let balance = self
            .provider
            .get_balance(address)
            .await
            .wrap_err("Could not fetch balance")?;

        format_ether(balance)
            .parse::<f64>()
            .wrap_err("Could not convert balance")
    }

    async fn create_wallet(&self) -> Result<WalletRecord> {
        generate_wallet()
    }

    async fn transfer(&self, request: TransferRequest) -> Result<TransferResult> {
        let signer = signer_from_mnemonic(&request.from_mnemonic)?;
        let sender = signer.address();
        let receiver = parse_address(&request.to_address)?;
        let value = to_base_units(request.amount)?;

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_http(self.rpc_url.clone());

        let tx = TransactionRequest::default()
            .with_from(sender)
            .with_to(receiver)
            .with_value(value);

        let start_block = self.provider.block_number().await?;
        let pending = provider
            .send_transaction(tx)
            .await
            .wrap_err("Could not send transaction")?;
        let tx_hash = *pending.tx_hash();
        log::info!("Hash: {:?}", tx_hash);

        let round =
            wait_for_confirmation(&self.provider, tx_hash, start_block, Self::POLL_INTERVAL)
                .await?;

        Ok(TransferResult {
            tx_id: tx_hash.to_string(),
            round,
        })
    }
}

impl std::fmt::Display for EvmLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "House Router v{}\nChain: {}\nRPC URL: {}",
            env!("CARGO_PKG_VERSION"),
            self.chain,
            self.rpc_url,
        )
    }
}
