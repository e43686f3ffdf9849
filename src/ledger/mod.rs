use async_trait::async_trait;
use eyre::Result;
use serde::Serialize;

mod evm;
pub use evm::{generate_wallet, signer_from_mnemonic, EvmLedger};

/// A freshly generated wallet, returned to the caller and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletRecord {
    pub address: String,
    pub mnemonic: String,
}

/// A value transfer from the account behind `from_mnemonic` to `to_address`.
#[derive(Clone, PartialEq)]
pub struct TransferRequest {
    pub from_mnemonic: String,
    pub to_address: String,
    /// Amount in whole units of the native token.
    pub amount: f64,
}

impl std::fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferRequest")
            .field("from_mnemonic", &"<redacted>")
            .field("to_address", &self.to_address)
            .field("amount", &self.amount)
            .finish()
    }
}

/// A confirmed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    /// Hash of the broadcast transaction.
    pub tx_id: String,
    /// Block in which the transaction was confirmed.
    pub round: u64,
}

/// Operations delegated to the blockchain client.
///
/// Every method may perform network I/O, and `transfer` broadcasts a signed transaction,
/// which cannot be rolled back once accepted.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Returns the native balance of `address` in whole units.
    async fn balance(&self, address: &str) -> Result<f64>;

    /// Generates a random wallet.
    async fn create_wallet(&self) -> Result<WalletRecord>;

    /// Signs, broadcasts and waits for the confirmation of a transfer.
    async fn transfer(&self, request: TransferRequest) -> Result<TransferResult>;
}
