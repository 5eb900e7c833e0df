use {
    super::{WalletError, WalletProvider},
    alloy::{primitives::Address, signers::local::PrivateKeySigner},
    std::fmt,
};

/// Wallet backed by a private key from the environment. Access is
/// implicitly granted: whoever set the key owns the account.
#[derive(Clone)]
pub struct LocalKeyWallet {
    signer: PrivateKeySigner,
}

impl fmt::Debug for LocalKeyWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeyWallet")
            .field("address", &self.signer.address())
            .finish()
    }
}

impl LocalKeyWallet {
    pub fn new(private_key: &str) -> Result<Self, WalletError> {
        let signer: PrivateKeySigner = private_key.trim().parse().map_err(|_| {
            WalletError::Unavailable(
                "PRIVATE_KEY did not contain a valid hex encoded secret".to_string(),
            )
        })?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

impl WalletProvider for LocalKeyWallet {
    fn label(&self) -> String {
        "local key".to_string()
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.address()])
    }

    async fn signer_address(&self) -> Result<Address, WalletError> {
        Ok(self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    // first well-known dev account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn derives_the_account_address() {
        let w = LocalKeyWallet::new(DEV_KEY).unwrap();
        let expected = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(w.request_accounts().await.unwrap(), vec![expected]);
        assert_eq!(w.signer_address().await.unwrap(), expected);
        assert!(!format!("{w:?}").contains("ac0974"));
    }
}
