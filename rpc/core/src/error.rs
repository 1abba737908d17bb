use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum RpcError {
    #[error("Not implemented")]
    NotImplemented,

    #[error("RPC error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Hex parsing error: {0}")]
    HexParsingError(#[from] hex::FromHexError),

    #[error("Invalid amount {0}")]
    InvalidAmount(f64),

    #[error("Missing required field {0}.{1}")]
    MissingRpcFieldError(String, String),

    #[error(transparent)]
    AddressError(#[from] hns_addresses::AddressError),

    #[error(transparent)]
    CovenantError(#[from] hns_consensus_core::covenant::CovenantError),

    #[error(transparent)]
    WireError(#[from] hns_consensus_core::wire::WireError),

    #[error("{0}")]
    General(String),
}

impl From<String> for RpcError {
    fn from(value: String) -> Self {
        RpcError::General(value)
    }
}

impl From<&str> for RpcError {
    fn from(value: &str) -> Self {
        RpcError::General(value.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(value: serde_json::Error) -> Self {
        RpcError::Json(value.to_string())
    }
}

pub type RpcResult<T> = std::result::Result<T, crate::RpcError>;
