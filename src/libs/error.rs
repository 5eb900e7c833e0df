use alloy::primitives::Address;
use thiserror::Error;

/// Failures surfaced at the action boundary. Each one becomes a notice;
/// none of them ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No wallet configured, or the configured one cannot be reached.
    #[error("wallet unavailable: {0}")]
    WalletUnavailable(String),

    #[error("the wallet rejected the account request")]
    UserRejected,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The balances call failed (unreachable indexer, bad key, bad payload).
    #[error("network error: {0}")]
    NetworkError(String),

    #[error("metadata lookup failed for {contract}: {reason}")]
    MetadataFetchError { contract: Address, reason: String },

    #[error("a balance check is already running")]
    Busy,
}

impl AppError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        AppError::NetworkError(err.to_string())
    }
}
