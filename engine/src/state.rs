//! # Engine State
//!
//! Everything a front end renders, in one cloneable snapshot.

use alloy_primitives::TxHash;
use shared::AgentRecord;
use std::fmt;

use crate::connection::ConnectionState;

/// Kinds of state-changing actions the engine submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Register,
    UpdateMetadata,
    Follow,
    Unfollow,
    IssueReputation,
    RevokeReputation,
}

impl fmt::Display for WriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WriteKind::Register => "registerAgent",
            WriteKind::UpdateMetadata => "updateAgentMetadata",
            WriteKind::Follow => "follow",
            WriteKind::Unfollow => "unfollow",
            WriteKind::IssueReputation => "issueReputation",
            WriteKind::RevokeReputation => "revokeReputation",
        };
        f.write_str(label)
    }
}

/// Busy flags and the outcome of the most recent write.
///
/// Flags are advisory. Nothing stops a caller from starting a second write
/// while one is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAction {
    pub registering: bool,
    pub updating: bool,
    /// follow / unfollow
    pub social: bool,
    /// issue / revoke reputation
    pub reputation: bool,
    pub last_tx_hash: Option<TxHash>,
    pub last_error: Option<String>,
}

impl PendingAction {
    pub fn is_busy(&self) -> bool {
        self.registering || self.updating || self.social || self.reputation
    }

    /// Start of a write: raise its flag, forget the previous outcome.
    pub(crate) fn begin(&mut self, kind: WriteKind) {
        self.set_flag(kind, true);
        self.last_tx_hash = None;
        self.last_error = None;
    }

    pub(crate) fn finish(&mut self, kind: WriteKind, error: Option<String>) {
        self.set_flag(kind, false);
        if error.is_some() {
            self.last_error = error;
        }
    }

    fn set_flag(&mut self, kind: WriteKind, busy: bool) {
        match kind {
            WriteKind::Register => self.registering = busy,
            WriteKind::UpdateMetadata => self.updating = busy,
            WriteKind::Follow | WriteKind::Unfollow => self.social = busy,
            WriteKind::IssueReputation | WriteKind::RevokeReputation => self.reputation = busy,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// A wallet provider was found. Without one, connect is unavailable.
    pub provider_available: bool,
    pub connection: ConnectionState,
    pub agent: AgentRecord,
    pub pending: PendingAction,
}

impl EngineState {
    /// Forget the session: connection, cached record, and write outcome.
    pub(crate) fn reset_session(&mut self) {
        self.connection.disconnect();
        self.agent = AgentRecord::default();
        self.pending = PendingAction::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_flags() {
        let mut pending = PendingAction {
            last_error: Some("previous failure".to_string()),
            ..Default::default()
        };

        pending.begin(WriteKind::Register);
        assert!(pending.registering);
        assert!(pending.is_busy());
        assert_eq!(pending.last_error, None);

        pending.finish(WriteKind::Register, Some("reverted".to_string()));
        assert!(!pending.is_busy());
        assert_eq!(pending.last_error.as_deref(), Some("reverted"));

        pending.begin(WriteKind::Unfollow);
        assert!(pending.social);
        pending.finish(WriteKind::Unfollow, None);
        assert!(!pending.social);
        assert_eq!(pending.last_error, None);
    }
}
