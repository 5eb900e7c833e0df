use {
    alchemy::Network,
    anyhow::{Context, Result},
    dotenv::dotenv,
    std::{fmt, fmt::Debug, str::FromStr},
};

pub fn load_env() {
    dotenv().ok();
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub alchemy_api_key: String,
    pub network: Network,
    /// JSON-RPC endpoint of a wallet that answers `eth_requestAccounts`.
    pub wallet_rpc: Option<String>,
    /// Only used to derive an address; nothing is ever signed.
    pub private_key: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("alchemy_api_key", &"<redacted>")
            .field("network", &self.network)
            .field("wallet_rpc", &self.wallet_rpc)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let alchemy_api_key = var("ALCHEMY_API_KEY").context("config.rs: ALCHEMY_API_KEY is not set")?;
        let network = match var("ALCHEMY_NETWORK") {
            Some(slug) => slug
                .parse::<Network>()
                .with_context(|| format!("config.rs: ALCHEMY_NETWORK `{slug}` is not supported"))?,
            None => Network::default(),
        };

        Ok(Self {
            alchemy_api_key,
            network,
            wallet_rpc: var("WALLET_RPC"),
            private_key: var("PRIVATE_KEY"),
        })
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}
