use thiserror::Error;

#[derive(Debug, Error)]
pub enum MiniError {
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("invalid contract address '{0}'")]
    InvalidAddress(String),

    #[error("invalid metadata: {0}")]
    MetadataInvalid(String),

    #[error("function '{0}' not found in contract ABI")]
    FunctionNotFound(String),

    #[error("argument {index} does not match parameter type {expected}")]
    ArgumentMismatch { index: usize, expected: String },

    #[error("timestamp overflow: {now} + {offset} exceeds u64")]
    TimestampOverflow { now: u64, offset: u64 },

    #[error("invalid contract ABI: {0}")]
    AbiJson(String),

    #[error(transparent)]
    Abi(#[from] alloy::dyn_abi::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MiniError>;
