use {
    crate::libs::{error::AppError, wallet::WalletProvider},
    alloy::primitives::Address,
};

/// Connected/disconnected toggle. The address is present exactly when
/// the session is connected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    address: Option<Address>,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn connect_to(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Client-side only; the wallet is not told.
    pub fn clear(&mut self) {
        self.address = None;
    }
}

/// Ask the wallet for access and return the account it signs with.
pub async fn request_wallet_address<W: WalletProvider>(wallet: &W) -> Result<Address, AppError> {
    let accounts = wallet.request_accounts().await?;
    if accounts.is_empty() {
        return Err(AppError::UserRejected);
    }
    Ok(wallet.signer_address().await?)
}
