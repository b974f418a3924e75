//! Error types for the genesis core.

use thiserror::Error;

use crate::types::Address;

/// Errors raised while deriving identities or encoding a validator set.
///
/// Every variant is terminal for the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("malformed key encoding: {0}")]
    MalformedKeyEncoding(String),

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error("invalid identifier length: expected {expected} bytes, got {actual}")]
    InvalidIdentifierLength { expected: usize, actual: usize },

    #[error("identifier does not decode to a point on secp256k1")]
    PointNotOnCurve,

    #[error("validator set is empty")]
    EmptyValidatorSet,

    #[error("duplicate validator address {address} at positions {first} and {second}")]
    DuplicateValidatorAddress {
        address: Address,
        first: usize,
        second: usize,
    },

    #[error("static endpoint host is empty")]
    EmptyHost,

    #[error("malformed genesis extra data: {0}")]
    MalformedExtra(String),
}

impl From<rlp::DecoderError> for CoreError {
    fn from(e: rlp::DecoderError) -> Self {
        CoreError::MalformedExtra(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
