use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{units::parse_quantity, IndexerError};

/// Token type filter for `alchemy_getTokenBalances`. `erc20` asks for every
/// ERC-20 the owner has interacted with, and is the only filter that pages.
pub const ERC20_FILTER: &str = "erc20";

/// One page of `alchemy_getTokenBalances`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesPage {
    pub address: Address,
    #[serde(default)]
    pub token_balances: Vec<RawTokenBalance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
}

/// Balance entry as it comes off the wire. Entries the indexer could not
/// resolve carry `error` and a null balance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenBalance {
    pub contract_address: Address,
    #[serde(default)]
    pub token_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl RawTokenBalance {
    /// `Ok(None)` when the indexer flagged the entry instead of returning a balance.
    pub fn balance(&self) -> Result<Option<U256>, IndexerError> {
        if self.error.as_ref().is_some_and(|e| !e.is_null()) {
            return Ok(None);
        }
        match self.token_balance.as_deref() {
            Some(hex) => parse_quantity(hex).map(Some),
            None => Ok(None),
        }
    }
}

/// Result of `alchemy_getTokenMetadata`. Every field is nullable upstream;
/// contracts that are not really ERC-20s come back mostly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub logo: Option<String>,
}
