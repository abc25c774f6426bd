//! # Provider and Contract Errors
//!
//! [`ProviderError`] maps EIP-1193 error codes onto named variants so callers can
//! tell a user rejection apart from a transport failure. [`ContractError`] adds the
//! failures that only exist once ABI encoding is involved.

use thiserror::Error;

/// User rejected the request.
pub const USER_REJECTED: i64 = 4001;
/// The requested method or account has not been authorized by the user.
pub const UNAUTHORIZED: i64 = 4100;
/// The provider does not support the requested method.
pub const UNSUPPORTED_METHOD: i64 = 4200;
/// The provider is disconnected from all chains.
pub const DISCONNECTED: i64 = 4900;
/// The provider is not connected to the requested chain.
pub const CHAIN_DISCONNECTED: i64 = 4901;

/// Failure reported by (or while talking to) an EIP-1193 provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("User rejected the request")]
    UserRejected,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Provider disconnected: {0}")]
    Disconnected(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Map an EIP-1193 / JSON-RPC error object onto a variant.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            USER_REJECTED => ProviderError::UserRejected,
            UNAUTHORIZED => ProviderError::Unauthorized(message),
            UNSUPPORTED_METHOD => ProviderError::UnsupportedMethod(message),
            DISCONNECTED | CHAIN_DISCONNECTED => ProviderError::Disconnected(message),
            _ => ProviderError::Rpc { code, message },
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        matches!(self, ProviderError::UserRejected)
    }
}

/// Failure of a typed contract call or transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to decode {function} result: {message}")]
    Decode {
        function: &'static str,
        message: String,
    },

    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("Invalid receipt: {0}")]
    InvalidReceipt(String),
}

impl ContractError {
    pub fn is_user_rejected(&self) -> bool {
        matches!(self, ContractError::Provider(e) if e.is_user_rejected())
    }
}
