use {
    super::{WalletError, WalletProvider, USER_REJECTED_CODE},
    crate::libs::writing::save_log_to_file,
    alloy::primitives::Address,
    reqwest::Client as HttpClient,
    serde::Deserialize,
    serde_json::Value,
    url::Url,
};

#[derive(Debug, Deserialize)]
struct RpcReply {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: Option<String>,
}

/// A wallet reached over JSON-RPC, e.g. a desktop wallet's local bridge.
/// Speaks the two EIP-1193 account methods and nothing else.
#[derive(Clone, Debug)]
pub struct RpcWallet {
    url: Url,
    http: HttpClient,
}

impl RpcWallet {
    pub fn new(url: &str) -> Result<Self, WalletError> {
        let url = Url::parse(url).map_err(|e| {
            WalletError::Unavailable(format!("WALLET_RPC `{url}` is not a valid url: {e}"))
        })?;
        Ok(Self {
            url,
            http: HttpClient::new(),
        })
    }

    async fn rpc(&self, method: &str) -> Result<Value, WalletError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": [],
        });
        let res = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                WalletError::Unavailable(format!("wallet at {} is unreachable: {e}", self.url))
            })?;
        let reply: RpcReply = res.json().await.map_err(|e| {
            WalletError::Unavailable(format!("wallet at {} sent a non-JSON-RPC reply: {e}", self.url))
        })?;

        if let Some(err) = reply.error {
            let message = err.message.unwrap_or_else(|| "unknown wallet error".to_string());
            save_log_to_file(&format!("[wallet] {method} -> {}: {message}", err.code));
            if err.code == USER_REJECTED_CODE {
                return Err(WalletError::Rejected(message));
            }
            return Err(WalletError::Unavailable(format!(
                "wallet rpc error {}: {message}",
                err.code
            )));
        }
        Ok(reply.result)
    }

    fn accounts(method: &str, result: Value) -> Result<Vec<Address>, WalletError> {
        serde_json::from_value(result).map_err(|e| {
            WalletError::Unavailable(format!("{method} returned something other than accounts: {e}"))
        })
    }
}

impl WalletProvider for RpcWallet {
    fn label(&self) -> String {
        format!("rpc wallet @ {}", self.url.host_str().unwrap_or("?"))
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Self::accounts("eth_requestAccounts", self.rpc("eth_requestAccounts").await?)
    }

    async fn signer_address(&self) -> Result<Address, WalletError> {
        Self::accounts("eth_accounts", self.rpc("eth_accounts").await?)?
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::Rejected("wallet exposes no authorized account".into()))
    }
}
