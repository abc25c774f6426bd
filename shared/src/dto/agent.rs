use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Locally cached view of one agent's on-chain state.
///
/// The record is only meaningful while the wallet is connected to the expected chain.
/// It is always replaced as a whole; no code path updates individual fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentRecord {
    pub is_registered: bool,
    pub metadata_uri: String,
    /// `uint256` reputation rendered as a decimal string.
    pub reputation_score: String,
    pub followers: Vec<Address>,
    pub following: Vec<Address>,
}

impl Default for AgentRecord {
    fn default() -> Self {
        Self {
            is_registered: false,
            metadata_uri: String::new(),
            reputation_score: "0".to_string(),
            followers: Vec::new(),
            following: Vec::new(),
        }
    }
}

impl AgentRecord {
    /// Record for an address the social graph reports as registered.
    pub fn registered(
        metadata_uri: String,
        reputation_score: String,
        followers: Vec<Address>,
        following: Vec<Address>,
    ) -> Self {
        Self {
            is_registered: true,
            metadata_uri,
            reputation_score,
            followers,
            following,
        }
    }

    pub fn follower_count(&self) -> usize {
        self.followers.len()
    }

    pub fn following_count(&self) -> usize {
        self.following.len()
    }
}

/// Reputation report printed by `agentctl reputation query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReputationReport {
    pub agent: Address,
    pub is_registered: bool,
    pub reputation_score: String,
    pub token_balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    /// Whether the agent holds `ISSUER_ROLE`. `None` when the role lookup failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_issuer: Option<bool>,
}

/// Social graph report printed by `agentctl graph`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialGraphReport {
    pub agent: Address,
    pub follower_count: u64,
    pub following_count: u64,
    pub followers: Vec<Address>,
    pub following: Vec<Address>,
}

/// Outcome of a confirmed write, printed by the `agentctl` write commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionReport {
    pub transaction_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub success: bool,
    pub explorer_url: String,
}
