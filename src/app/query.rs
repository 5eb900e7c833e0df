use {
    crate::{
        constants::METADATA_CONCURRENCY,
        libs::{error::AppError, writing::save_log_to_file},
    },
    alchemy::{AlchemyClient, IndexerError, TokenMetadata},
    alloy::primitives::{Address, U256},
    futures_util::stream::{self, StreamExt, TryStreamExt},
};

/// One ERC-20 holding as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalanceEntry {
    pub contract_address: Address,
    pub raw_balance: U256,
}

/// A balance and the metadata fetched for its contract, paired right after
/// the join so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    pub balance: TokenBalanceEntry,
    pub metadata: TokenMetadata,
}

/// The two lookups the balance check needs from an indexing service.
#[allow(async_fn_in_trait)]
pub trait TokenIndexer {
    /// Every balance held by `owner`, in indexer order.
    async fn token_balances(&self, owner: Address) -> Result<Vec<TokenBalanceEntry>, IndexerError>;

    async fn token_metadata(&self, contract: Address) -> Result<TokenMetadata, IndexerError>;
}

impl TokenIndexer for AlchemyClient {
    async fn token_balances(&self, owner: Address) -> Result<Vec<TokenBalanceEntry>, IndexerError> {
        let raw = self.get_token_balances(owner).await?;
        let mut entries = Vec::with_capacity(raw.len());
        for item in raw {
            match item.balance()? {
                Some(raw_balance) => entries.push(TokenBalanceEntry {
                    contract_address: item.contract_address,
                    raw_balance,
                }),
                None => save_log_to_file(&format!(
                    "[query] skipping {} for {owner}: {}",
                    item.contract_address,
                    item.error.map(|e| e.to_string()).unwrap_or_else(|| "no balance".into())
                )),
            }
        }
        Ok(entries)
    }

    async fn token_metadata(&self, contract: Address) -> Result<TokenMetadata, IndexerError> {
        self.get_token_metadata(contract).await
    }
}

/// Turn the address field into an owner address. Blank input is rejected
/// before anything touches the network.
pub fn parse_owner(input: &str) -> Result<Address, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("address is empty".into()));
    }
    trimmed
        .parse::<Address>()
        .map_err(|_| AppError::InvalidInput(format!("`{trimmed}` is not a 20-byte hex address")))
}

/// Fetch balances, then every contract's metadata with at most
/// `METADATA_CONCURRENCY` lookups in flight.
///
/// All-or-nothing: the first failed metadata lookup fails the whole call and
/// no rows are produced.
pub async fn fetch_token_rows<I: TokenIndexer>(
    indexer: &I,
    owner: Address,
) -> Result<Vec<TokenRow>, AppError> {
    fetch_token_rows_limited(indexer, owner, *METADATA_CONCURRENCY).await
}

pub async fn fetch_token_rows_limited<I: TokenIndexer>(
    indexer: &I,
    owner: Address,
    limit: usize,
) -> Result<Vec<TokenRow>, AppError> {
    let balances = indexer
        .token_balances(owner)
        .await
        .map_err(AppError::network)?;

    let lookups = balances.iter().map(|entry| async move {
        indexer
            .token_metadata(entry.contract_address)
            .await
            .map_err(|e| AppError::MetadataFetchError {
                contract: entry.contract_address,
                reason: e.to_string(),
            })
    });
    // `buffered` keeps indexer order
    let metadata: Vec<TokenMetadata> = stream::iter(lookups)
        .buffered(limit.max(1))
        .try_collect()
        .await?;

    save_log_to_file(&format!("[query] {owner}: {} tokens", balances.len()));
    Ok(balances
        .into_iter()
        .zip(metadata)
        .map(|(balance, metadata)| TokenRow { balance, metadata })
        .collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::session::tests::ALICE;
    use alloy::primitives::address;
    use std::{
        collections::HashSet,
        sync::atomic::{AtomicUsize, Ordering},
    };

    pub const USDC: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    pub const DAI: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");
    pub const LINK: Address = address!("0x514910771AF9Ca656af840dff83E8264EcF986CA");

    pub fn meta(name: &str, symbol: &str, decimals: u8) -> TokenMetadata {
        TokenMetadata {
            name: Some(name.into()),
            symbol: Some(symbol.into()),
            decimals: Some(decimals),
            logo: Some(format!("https://logos.example/{symbol}.png")),
        }
    }

    /// In-memory indexer. Metadata is derived from the contract so pairing
    /// mistakes show up as mismatched symbols.
    #[derive(Default)]
    pub struct FakeIndexer {
        pub balances: Vec<TokenBalanceEntry>,
        pub balances_fail: bool,
        pub metadata_fail_for: HashSet<Address>,
        pub calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    impl FakeIndexer {
        pub fn holding(items: &[(Address, u128)]) -> Self {
            Self {
                balances: items
                    .iter()
                    .map(|(a, v)| TokenBalanceEntry {
                        contract_address: *a,
                        raw_balance: U256::from(*v),
                    })
                    .collect(),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Most metadata lookups that were running at the same time.
        pub fn peak_in_flight(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }

        pub fn metadata_for(contract: Address) -> TokenMetadata {
            if contract == USDC {
                meta("USD Coin", "USDC", 6)
            } else if contract == DAI {
                meta("Dai Stablecoin", "DAI", 18)
            } else if contract == LINK {
                meta("ChainLink Token", "LINK", 18)
            } else {
                TokenMetadata::default()
            }
        }
    }

    impl TokenIndexer for FakeIndexer {
        async fn token_balances(&self, _owner: Address) -> Result<Vec<TokenBalanceEntry>, IndexerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.balances_fail {
                return Err(IndexerError::Quantity("0xnope".into()));
            }
            Ok(self.balances.clone())
        }

        async fn token_metadata(&self, contract: Address) -> Result<TokenMetadata, IndexerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            // yield so the lookups really interleave
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if self.metadata_fail_for.contains(&contract) {
                return Err(IndexerError::Rpc {
                    method: "alchemy_getTokenMetadata".into(),
                    code: -32000,
                    message: "boom".into(),
                });
            }
            Ok(Self::metadata_for(contract))
        }
    }

    #[test]
    fn parse_owner_rejects_blank_and_garbage() {
        assert!(matches!(parse_owner(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_owner("   "), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_owner("0x1234"), Err(AppError::InvalidInput(_))));
        assert_eq!(
            parse_owner(" 0x00000000219ab540356cbb839cbe05303d7705fa ").unwrap(),
            ALICE
        );
    }

    #[tokio::test]
    async fn rows_pair_balance_i_with_metadata_i() {
        let indexer = FakeIndexer::holding(&[(USDC, 5_000_000), (DAI, 1), (LINK, 42)]);
        let rows = fetch_token_rows(&indexer, ALICE).await.unwrap();

        assert_eq!(rows.len(), 3);
        for (row, expected) in rows.iter().zip(&indexer.balances) {
            assert_eq!(&row.balance, expected);
            assert_eq!(row.metadata, FakeIndexer::metadata_for(expected.contract_address));
        }
        // one balances call plus one metadata call per token
        assert_eq!(indexer.calls(), 4);
    }

    #[tokio::test]
    async fn one_failed_lookup_fails_everything() {
        let mut indexer = FakeIndexer::holding(&[(USDC, 1), (DAI, 2), (LINK, 3)]);
        indexer.metadata_fail_for.insert(DAI);

        let err = fetch_token_rows(&indexer, ALICE).await.unwrap_err();
        assert!(matches!(err, AppError::MetadataFetchError { contract, .. } if contract == DAI));
    }

    #[tokio::test]
    async fn balances_failure_is_a_network_error() {
        let indexer = FakeIndexer {
            balances_fail: true,
            ..Default::default()
        };
        assert!(matches!(
            fetch_token_rows(&indexer, ALICE).await,
            Err(AppError::NetworkError(_))
        ));
    }

    #[tokio::test]
    async fn alchemy_entries_with_errors_are_skipped() {
        use alchemy::Network;
        use serde_json::json;
        use wiremock::{matchers::body_partial_json, Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(body_partial_json(json!({"method": "alchemy_getTokenBalances"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "address": ALICE,
                    "tokenBalances": [
                        {"contractAddress": USDC, "tokenBalance": "0x1", "error": null},
                        {"contractAddress": DAI, "tokenBalance": null, "error": "execution reverted"},
                        {"contractAddress": LINK, "tokenBalance": "0xDE0B6B3A7640000", "error": null}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let url = url::Url::parse(&format!("{}/v2/k", server.uri())).unwrap();
        let client = AlchemyClient::with_endpoint(url, Network::EthMainnet);
        let entries = client.token_balances(ALICE).await.unwrap();
        let contracts: Vec<Address> = entries.iter().map(|e| e.contract_address).collect();
        assert_eq!(contracts, vec![USDC, LINK]);
        assert_eq!(entries[0].raw_balance, U256::from(1u64));
    }

    #[tokio::test]
    async fn no_holdings_means_no_lookups() {
        let indexer = FakeIndexer::default();
        assert!(fetch_token_rows(&indexer, ALICE).await.unwrap().is_empty());
        assert_eq!(indexer.calls(), 1);
    }

    #[tokio::test]
    async fn metadata_lookups_are_capped() {
        let holdings: Vec<(Address, u128)> = (0..200u8)
            .map(|i| (Address::with_last_byte(i), i as u128))
            .collect();
        let indexer = FakeIndexer::holding(&holdings);

        let rows = fetch_token_rows_limited(&indexer, ALICE, 8).await.unwrap();

        assert_eq!(rows.len(), 200);
        assert!(rows
            .iter()
            .zip(&holdings)
            .all(|(row, (contract, _))| row.balance.contract_address == *contract));
        assert!(indexer.peak_in_flight() <= 8);
        assert!(indexer.peak_in_flight() > 1);
    }
}
