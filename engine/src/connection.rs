//! # Connection State Machine
//!
//! ```text
//!                 connect()                 accounts granted
//! Disconnected ─────────────▶ Connecting ───────────────────▶ Connected{Wrong,Correct}Chain
//!      ▲                          │                                   │     ▲
//!      │      empty / rejected    │                chainChanged(id)   └─────┘
//!      └──────────────────────────┘
//!      ▲                                                              │
//!      └──────── disconnect() / accountsChanged([]) ──────────────────┘
//! ```
//!
//! Transitions are plain methods on [`ConnectionState`]. The engine performs the
//! wallet I/O and applies the outcome here while holding the state lock.

use alloy_primitives::Address;
use std::fmt;
use tracing::debug;

/// Wallet session as last observed.
///
/// `connected == account.is_some()` after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub connected: bool,
    pub connecting: bool,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
}

/// Derived phase, for display and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    ConnectedWrongChain,
    ConnectedCorrectChain,
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionPhase::Disconnected => "disconnected",
            ConnectionPhase::Connecting => "connecting",
            ConnectionPhase::ConnectedWrongChain => "connected (wrong network)",
            ConnectionPhase::ConnectedCorrectChain => "connected",
        };
        f.write_str(label)
    }
}

/// What an `accountsChanged` observation did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChange {
    /// Empty list: the session is gone.
    Disconnected,
    /// Wallet authorized an account while we were disconnected.
    Connected(Address),
    /// Active account switched.
    Switched { from: Address, to: Address },
    /// Same account reported again.
    Unchanged,
}

impl ConnectionState {
    pub fn is_correct_chain(&self, expected: u64) -> bool {
        self.chain_id == Some(expected)
    }

    /// Connected to the expected chain.
    pub fn is_ready(&self, expected: u64) -> bool {
        self.connected && self.is_correct_chain(expected)
    }

    pub fn phase(&self, expected: u64) -> ConnectionPhase {
        if self.connecting {
            ConnectionPhase::Connecting
        } else if !self.connected {
            ConnectionPhase::Disconnected
        } else if self.is_correct_chain(expected) {
            ConnectionPhase::ConnectedCorrectChain
        } else {
            ConnectionPhase::ConnectedWrongChain
        }
    }

    /// Enter `Connecting`. Returns the pre-action state to restore on failure, or
    /// `None` when a connect is already in flight and this one must be a no-op.
    pub fn begin_connect(&mut self) -> Option<ConnectionState> {
        if self.connecting {
            debug!("Connect ignored: already connecting");
            return None;
        }
        let previous = self.clone();
        self.connecting = true;
        Some(previous)
    }

    pub fn connect_succeeded(&mut self, account: Address, chain_id: Option<u64>) {
        self.connected = true;
        self.connecting = false;
        self.account = Some(account);
        self.chain_id = chain_id;
    }

    /// Wallet errored (or the user rejected). Back to where the action started.
    pub fn connect_failed(&mut self, previous: ConnectionState) {
        *self = ConnectionState {
            connecting: false,
            ..previous
        };
    }

    pub fn observe_accounts(&mut self, accounts: &[Address]) -> AccountChange {
        match (accounts.first().copied(), self.account) {
            (None, _) => {
                self.disconnect();
                AccountChange::Disconnected
            }
            (Some(to), Some(from)) if to == from => AccountChange::Unchanged,
            (Some(to), Some(from)) => {
                self.account = Some(to);
                AccountChange::Switched { from, to }
            }
            (Some(to), None) => {
                self.account = Some(to);
                self.connected = true;
                AccountChange::Connected(to)
            }
        }
    }

    /// Record a chain switch. Returns whether the stored chain id changed.
    pub fn observe_chain(&mut self, chain_id: Option<u64>) -> bool {
        let changed = self.chain_id != chain_id;
        self.chain_id = chain_id;
        changed
    }

    /// Back to `Disconnected`. Wallet permissions are untouched.
    pub fn disconnect(&mut self) {
        *self = ConnectionState::default();
    }
}
