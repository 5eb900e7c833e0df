//! Account access. The app never signs anything; a wallet only has to
//! hand over the address of the account the user authorizes.
use {
    crate::libs::{config::Config, error::AppError},
    alloy::primitives::Address,
    thiserror::Error,
};

pub mod local;
pub mod rpc;

pub use local::LocalKeyWallet;
pub use rpc::RpcWallet;

/// EIP-1193 "user rejected request".
pub const USER_REJECTED_CODE: i64 = 4001;

pub const NO_WALLET_HINT: &str = "no wallet provider configured; set WALLET_RPC or PRIVATE_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Rejected(String),
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Unavailable(reason) => AppError::WalletUnavailable(reason),
            WalletError::Rejected(_) => AppError::UserRejected,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Short description for the title bar and logs.
    fn label(&self) -> String;

    /// Ask for account access. Interactive wallets may prompt the user here.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// The account the wallet would sign with once access is granted.
    async fn signer_address(&self) -> Result<Address, WalletError>;
}

/// The provider picked from configuration: `WALLET_RPC` first, then
/// `PRIVATE_KEY`, otherwise none.
#[derive(Clone, Debug)]
pub enum Wallet {
    Rpc(RpcWallet),
    Local(LocalKeyWallet),
    Absent,
}

impl Wallet {
    pub fn from_config(cfg: &Config) -> Result<Self, WalletError> {
        if let Some(url) = cfg.wallet_rpc.as_deref() {
            return Ok(Wallet::Rpc(RpcWallet::new(url)?));
        }
        if let Some(pk) = cfg.private_key.as_deref() {
            return Ok(Wallet::Local(LocalKeyWallet::new(pk)?));
        }
        Ok(Wallet::Absent)
    }
}

impl WalletProvider for Wallet {
    fn label(&self) -> String {
        match self {
            Wallet::Rpc(w) => w.label(),
            Wallet::Local(w) => w.label(),
            Wallet::Absent => "no wallet".to_string(),
        }
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        match self {
            Wallet::Rpc(w) => w.request_accounts().await,
            Wallet::Local(w) => w.request_accounts().await,
            Wallet::Absent => Err(WalletError::Unavailable(NO_WALLET_HINT.to_string())),
        }
    }

    async fn signer_address(&self) -> Result<Address, WalletError> {
        match self {
            Wallet::Rpc(w) => w.signer_address().await,
            Wallet::Local(w) => w.signer_address().await,
            Wallet::Absent => Err(WalletError::Unavailable(NO_WALLET_HINT.to_string())),
        }
    }
}
