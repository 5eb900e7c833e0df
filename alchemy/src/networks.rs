use std::{fmt, str::FromStr};

use crate::IndexerError;

pub const ALCHEMY_HOST: &str = "g.alchemy.com";

/// Networks the token API is served on. Only the slug and chain id
/// matter to us; everything else is resolved server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    EthMainnet,
    EthSepolia,
    EthHolesky,
    ArbMainnet,
    OptMainnet,
    BaseMainnet,
    PolygonMainnet,
}

pub const ALL_NETWORKS: [Network; 7] = [
    Network::EthMainnet,
    Network::EthSepolia,
    Network::EthHolesky,
    Network::ArbMainnet,
    Network::OptMainnet,
    Network::BaseMainnet,
    Network::PolygonMainnet,
];

impl Network {
    pub fn slug(&self) -> &'static str {
        match self {
            Network::EthMainnet => "eth-mainnet",
            Network::EthSepolia => "eth-sepolia",
            Network::EthHolesky => "eth-holesky",
            Network::ArbMainnet => "arb-mainnet",
            Network::OptMainnet => "opt-mainnet",
            Network::BaseMainnet => "base-mainnet",
            Network::PolygonMainnet => "polygon-mainnet",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::EthMainnet => 1,
            Network::EthSepolia => 11_155_111,
            Network::EthHolesky => 17_000,
            Network::ArbMainnet => 42_161,
            Network::OptMainnet => 10,
            Network::BaseMainnet => 8_453,
            Network::PolygonMainnet => 137,
        }
    }

    /// `https://<slug>.g.alchemy.com/v2/`; the api key is appended by the client.
    pub fn base_url(&self) -> String {
        format!("https://{}.{}/v2/", self.slug(), ALCHEMY_HOST)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Network {
    type Err = IndexerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        // "mainnet" alone is accepted as a shorthand for ethereum mainnet
        if wanted == "mainnet" {
            return Ok(Network::EthMainnet);
        }
        ALL_NETWORKS
            .into_iter()
            .find(|n| n.slug() == wanted)
            .ok_or_else(|| IndexerError::UnknownNetwork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ethereum_mainnet() {
        let n = Network::default();
        assert_eq!(n, Network::EthMainnet);
        assert_eq!(n.chain_id(), 1);
        assert_eq!(n.base_url(), "https://eth-mainnet.g.alchemy.com/v2/");
    }

    #[test]
    fn parses_slugs_case_insensitively() {
        assert_eq!("ETH-SEPOLIA".parse::<Network>().unwrap(), Network::EthSepolia);
        assert_eq!(" mainnet ".parse::<Network>().unwrap(), Network::EthMainnet);
        for n in ALL_NETWORKS {
            assert_eq!(n.to_string().parse::<Network>().unwrap(), n);
        }
    }

    #[test]
    fn rejects_unknown_network() {
        let err = "bsc-mainnet".parse::<Network>().unwrap_err();
        assert!(matches!(err, IndexerError::UnknownNetwork(ref s) if s == "bsc-mainnet"));
    }
}
