use std::{fmt, time::Duration};

use alloy::primitives::Address;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::{
    trace_rpc, IndexerError, Network, RawTokenBalance, TokenBalancesPage, TokenMetadata,
    ERC20_FILTER,
};

/// Upper bound on `pageKey` hops for a single owner.
pub const MAX_BALANCE_PAGES: usize = 64;

/// JSON-RPC client for the Alchemy token API.
///
/// The api key is part of the endpoint path, so the endpoint is never
/// printed: `Debug` and every error carry the network slug instead.
#[derive(Clone)]
pub struct AlchemyClient {
    endpoint: Url,
    http: HttpClient,
    network: Network,
}

impl fmt::Debug for AlchemyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlchemyClient")
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

impl AlchemyClient {
    pub fn new(api_key: &str, network: Network, timeout: Duration) -> Result<Self, IndexerError> {
        let endpoint = Url::parse(&network.base_url())?.join(api_key.trim())?;
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            http,
            network,
        })
    }

    /// Point the client at an arbitrary JSON-RPC endpoint (proxies, tests).
    pub fn with_endpoint(endpoint: Url, network: Network) -> Self {
        Self {
            endpoint,
            http: HttpClient::new(),
            network,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// One page of ERC-20 balances for `owner`.
    pub async fn get_token_balances_page(
        &self,
        owner: Address,
        page_key: Option<&str>,
    ) -> Result<TokenBalancesPage, IndexerError> {
        let params = match page_key {
            Some(key) => json!([owner, ERC20_FILTER, { "pageKey": key }]),
            None => json!([owner, ERC20_FILTER]),
        };
        self.rpc("alchemy_getTokenBalances", params).await
    }

    /// Every ERC-20 balance entry for `owner`, pages concatenated in the
    /// order the indexer returns them.
    pub async fn get_token_balances(
        &self,
        owner: Address,
    ) -> Result<Vec<RawTokenBalance>, IndexerError> {
        let mut entries = Vec::new();
        let mut page_key: Option<String> = None;
        for page_no in 0..MAX_BALANCE_PAGES {
            let page = self
                .get_token_balances_page(owner, page_key.as_deref())
                .await?;
            trace_rpc!(
                "[{}] balances page {} for {}: {} entries",
                self.network,
                page_no,
                owner,
                page.token_balances.len()
            );
            entries.extend(page.token_balances);
            match page.page_key {
                Some(next) if !next.is_empty() => page_key = Some(next),
                _ => return Ok(entries),
            }
        }
        trace_rpc!(
            "[{}] stopped paging balances for {} after {} pages",
            self.network,
            owner,
            MAX_BALANCE_PAGES
        );
        Ok(entries)
    }

    pub async fn get_token_metadata(
        &self,
        contract: Address,
    ) -> Result<TokenMetadata, IndexerError> {
        self.rpc("alchemy_getTokenMetadata", json!([contract]))
            .await
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, IndexerError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let bytes = res.bytes().await?;

        let v: Value = match serde_json::from_slice(&bytes) {
            Ok(json) => json,
            Err(_) => {
                let sample: String = String::from_utf8_lossy(&bytes).chars().take(256).collect();
                let hint = if sample.trim_start().starts_with('<') {
                    "Response looks like HTML; check ALCHEMY_NETWORK and that the endpoint serves JSON-RPC."
                } else if sample.trim().is_empty() {
                    "Empty body; the api key may be missing or revoked."
                } else {
                    "Non-JSON response."
                };
                trace_rpc!("[{}] {} decode failure ({}): {}", self.network, method, status, hint);
                return Err(IndexerError::BadResponse {
                    method: method.to_string(),
                    status: status.as_u16(),
                    hint,
                    sample,
                });
            }
        };

        if let Some(err) = v.get("error").filter(|e| !e.is_null()) {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            trace_rpc!("[{}] {} rpc error {}: {}", self.network, method, code, message);
            return Err(IndexerError::Rpc {
                method: method.to_string(),
                code,
                message,
            });
        }
        if !status.is_success() {
            return Err(IndexerError::BadResponse {
                method: method.to_string(),
                status: status.as_u16(),
                hint: "Non-success status without an rpc error object.",
                sample: v.to_string().chars().take(256).collect(),
            });
        }

        let result = v.get("result").cloned().unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|e| IndexerError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }
}
