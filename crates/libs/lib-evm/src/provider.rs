//! # EIP-1193 Provider Abstraction
//!
//! The one seam between this workspace and a wallet. Implementations:
//!
//! - `wallet-web`'s injected provider (`window.lukso` / `window.ethereum`)
//! - [`crate::http::HttpProvider`] for JSON-RPC nodes with managed accounts
//! - in-memory doubles in tests
//!
//! Wallet events are not delivered through callbacks. A subscriber hands the
//! provider an [`EventSink`] and the provider pushes [`ProviderEvent`]s into it in
//! the order the wallet emits them. The consumer drains the queue on its own schedule.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::error::ProviderError;

/// Queue end a provider pushes wallet events into.
pub type EventSink = async_channel::Sender<ProviderEvent>;

/// Wallet-originated events the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// New authorized account list. Empty means the wallet revoked access or locked.
    AccountsChanged(Vec<String>),
    /// New chain id exactly as the wallet reported it (usually `0x`-prefixed hex).
    ChainChanged(String),
}

impl ProviderEvent {
    pub fn kind(&self) -> ProviderEventKind {
        match self {
            ProviderEvent::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
            ProviderEvent::ChainChanged(_) => ProviderEventKind::ChainChanged,
        }
    }
}

/// Event names a provider can be subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEventKind {
    AccountsChanged,
    ChainChanged,
}

impl ProviderEventKind {
    /// Event name on the EIP-1193 `on(...)` surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderEventKind::AccountsChanged => "accountsChanged",
            ProviderEventKind::ChainChanged => "chainChanged",
        }
    }

    pub fn all() -> &'static [ProviderEventKind] {
        &[ProviderEventKind::AccountsChanged, ProviderEventKind::ChainChanged]
    }
}

impl fmt::Display for ProviderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal EIP-1193 surface.
///
/// Futures are not required to be `Send`: browser providers wrap `JsValue`s and the
/// engine runs on a single cooperative thread.
#[async_trait(?Send)]
pub trait Eip1193Provider {
    /// Short name for logs (`lukso`, `ethereum`, `json-rpc`, ...).
    fn name(&self) -> &str;

    /// `request({ method, params })`. Suspends until the provider answers; no timeout is added.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Start forwarding `kind` events into `sink`.
    fn subscribe(&self, kind: ProviderEventKind, sink: EventSink);

    /// Drop every subscription made through [`Eip1193Provider::subscribe`].
    fn remove_all_listeners(&self);
}
