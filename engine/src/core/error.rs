//! # Engine Error Types
//!
//! Every operation on [`crate::AgentEngine`] returns [`Result`]. None of these
//! errors is fatal to the host; the engine stays usable after each one.
//!
//! ## Error Categories
//!
//! - **Connection**: `ProviderUnavailable`, `UserRejected`, `NotConnected`, `WrongChain`
//! - **Reads**: `Read` (snapshot kept, surfaced from explicit refreshes only)
//! - **Writes**: `Validation`, `Write`, `Reverted`
//! - **Plumbing**: `Provider`, `Config`
//!
//! `WrongChain` is a state rather than a failure: it is returned only when a write
//! is attempted while the wallet sits on another network.

use alloy_primitives::TxHash;
use lib_evm::{ContractError, ProviderError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No injected wallet. Connect stays disabled; reads of cached state still work.
    #[error("No wallet provider available")]
    ProviderUnavailable,

    #[error("User rejected the request")]
    UserRejected,

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Wrong network: expected chain {expected}, wallet is on {actual:?}")]
    WrongChain { expected: u64, actual: Option<u64> },

    #[error("Contracts not bound to a signer")]
    NotBound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Read failed: {0}")]
    Read(ContractError),

    #[error("Transaction failed: {0}")]
    Write(ContractError),

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    #[error("Provider error: {0}")]
    Provider(ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Map a failed submission or confirmation. A wallet-side rejection stays a rejection.
    pub fn from_write(err: ContractError) -> Self {
        if err.is_user_rejected() {
            EngineError::UserRejected
        } else {
            EngineError::Write(err)
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        matches!(self, EngineError::UserRejected)
    }
}

impl From<ProviderError> for EngineError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UserRejected => EngineError::UserRejected,
            other => EngineError::Provider(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
