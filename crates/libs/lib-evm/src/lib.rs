//! # EVM Library
//!
//! Provider abstraction and typed contract access for the Agent Social contracts.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ contracts::{SocialGraph, ReputationLedger}           │  typed calls (sol! ABIs)
//! ├──────────────────────────────────────────────────────┤
//! │ contracts::ContractHandle  +  tx::PendingTransaction │  eth_call / eth_sendTransaction / receipts
//! ├──────────────────────────────────────────────────────┤
//! │ signer::Signer                                       │  account bound to a provider
//! ├──────────────────────────────────────────────────────┤
//! │ provider::Eip1193Provider                            │  injected wallet or http::HttpProvider
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every request goes through [`Eip1193Provider::request`], so the same contract
//! handles work against a browser wallet, a JSON-RPC node, or a test double.
//! Signing never happens here: writes are `eth_sendTransaction` calls the provider
//! signs on its own terms.

pub mod contracts;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod provider;
pub mod rpc;
pub mod signer;
pub mod tx;

// Re-export commonly used types from root for convenience
pub use contracts::{ContractHandle, ReputationLedger, SocialGraph};
pub use error::{ContractError, ProviderError};
#[cfg(feature = "http")]
pub use http::HttpProvider;
pub use provider::{Eip1193Provider, EventSink, ProviderEvent, ProviderEventKind};
pub use signer::Signer;
pub use tx::{PendingTransaction, TxReceipt};

pub use alloy_primitives::{Address, TxHash, U256};
