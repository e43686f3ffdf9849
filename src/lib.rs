mod cli;
pub use cli::cli;

mod configurations;
pub use configurations::{HouseAccounts, RouterConfig};

pub mod ledger;
pub use ledger::{EvmLedger, Ledger, TransferRequest, TransferResult, WalletRecord};

pub mod router;
pub use router::{ResponseEnvelope, RouteError, Router};
