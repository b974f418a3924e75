//! Error types for genesis bootstrapping.

use hotstuff_genesis_core::CoreError;
use thiserror::Error;

/// Errors that can occur while building a genesis validator set.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A supplied node key could not be decoded.
    #[error("node key #{index}: {source}")]
    Key {
        index: usize,
        #[source]
        source: CoreError,
    },

    /// A static endpoint could not be built for a validator.
    #[error("static endpoint for validator #{index}: {source}")]
    Endpoint {
        index: usize,
        #[source]
        source: CoreError,
    },

    /// Validator set or encoding error.
    #[error("genesis error: {0}")]
    Core(#[from] CoreError),

    /// Export serialization error.
    #[error("export error: {0}")]
    Export(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BootstrapError {
    /// The underlying core error, if any.
    pub fn core(&self) -> Option<&CoreError> {
        match self {
            BootstrapError::Key { source, .. } | BootstrapError::Endpoint { source, .. } => {
                Some(source)
            }
            BootstrapError::Core(e) => Some(e),
            BootstrapError::Export(_) | BootstrapError::InvalidConfig(_) => None,
        }
    }
}

/// Result type for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
