use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid value encoding: {0}")]
    ValueEncoding(String),

    #[error("Unknown chain: {0}")]
    UnknownChain(String),
}
