use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-JSON body. `hint` guesses at the usual misconfigurations.
    #[error("bad response from {method} (http {status}): {hint} sample: {sample}")]
    BadResponse {
        method: String,
        status: u16,
        hint: &'static str,
        sample: String,
    },

    #[error("rpc error {code} from {method}: {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("failed to decode {method} result: {reason}")]
    Decode { method: String, reason: String },

    #[error("bad hex quantity `{0}`")]
    Quantity(String),
}
