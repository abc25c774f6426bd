//! # Agent Engine
//!
//! Wallet connection and on-chain agent state synchronization.
//!
//! ```text
//! ProviderAdapter ──▶ ConnectionState ──▶ ContractBinding ──▶ sync ──▶ EngineState snapshot
//!        ▲                                                      │
//!        └──── wallet events (queue) ◀──── writes ◀─────────────┘
//! ```
//!
//! - [`provider`]: the engine's handle on an EIP-1193 wallet
//! - [`connection`]: session state machine
//! - [`binding`]: typed contract handles tied to the current signer
//! - [`sync`]: reads that build an [`shared::AgentRecord`]
//! - [`engine`]: [`AgentEngine`], the facade front ends drive
//!
//! ## Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "http")]
//! # async fn run() -> agent_engine::Result<()> {
//! use agent_engine::{AgentEngine, EngineConfig, HttpProvider, ProviderAdapter};
//! use std::sync::Arc;
//!
//! let config = EngineConfig::lukso_testnet();
//! let provider = Arc::new(HttpProvider::new(config.chain.rpc_url.clone()));
//! let engine = AgentEngine::new(config, Some(ProviderAdapter::new(provider)));
//!
//! engine.connect().await?;
//! let record = engine.refresh().await?;
//! println!("registered: {}", record.is_registered);
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod connection;
pub mod core;
pub mod engine;
pub mod provider;
pub mod state;
pub mod sync;

#[cfg(test)]
mod tests;

pub use binding::{BoundContracts, ContractBinding};
pub use connection::{AccountChange, ConnectionPhase, ConnectionState};
pub use crate::core::{EngineConfig, EngineError, Result};
pub use engine::AgentEngine;
pub use provider::ProviderAdapter;
pub use state::{EngineState, PendingAction, WriteKind};

pub use lib_evm::{Eip1193Provider, EventSink, ProviderError, ProviderEvent, ProviderEventKind, TxReceipt};
#[cfg(feature = "http")]
pub use lib_evm::HttpProvider;
