//! Thin client for the Alchemy token API: the two JSON-RPC extension
//! methods `alchemy_getTokenBalances` and `alchemy_getTokenMetadata`,
//! plus the network table and the unit helpers needed to display what
//! they return.
pub mod client;
pub mod error;
pub mod networks;
pub mod types;
pub mod units;
pub mod writing;

pub use client::*;
pub use error::IndexerError;
pub use networks::Network;
pub use types::*;
pub use units::*;
