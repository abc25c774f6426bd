use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Chain id of LUKSO Testnet.
pub const LUKSO_TESTNET_CHAIN_ID: u64 = 4201;
/// Chain id of LUKSO Mainnet.
pub const LUKSO_MAINNET_CHAIN_ID: u64 = 42;

/// AgentReputationToken deployment on LUKSO Testnet.
pub const TESTNET_REPUTATION_TOKEN: Address = address!("98b35B543806a1542fcF63883b2AaE224e3Bc66E");
/// AgentSocialGraph deployment on LUKSO Testnet.
pub const TESTNET_SOCIAL_GRAPH: Address = address!("E3350Ad4E7F3f07463352b481dE575f2e76bCd21");

/// Static descriptor of the one network the engine considers "correct".
///
/// Used for comparison and link construction only. Nothing dispatches RPC to
/// `rpc_url` on the engine's behalf; the wallet provider owns the connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainIdentity {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub explorer_url: String,
}

impl ChainIdentity {
    pub fn lukso_testnet() -> Self {
        Self {
            chain_id: LUKSO_TESTNET_CHAIN_ID,
            name: "LUKSO Testnet".to_string(),
            rpc_url: "https://rpc.testnet.lukso.network".to_string(),
            explorer_url: "https://explorer.execution.testnet.lukso.network".to_string(),
        }
    }

    pub fn lukso_mainnet() -> Self {
        Self {
            chain_id: LUKSO_MAINNET_CHAIN_ID,
            name: "LUKSO Mainnet".to_string(),
            rpc_url: "https://rpc.mainnet.lukso.network".to_string(),
            explorer_url: "https://explorer.execution.mainnet.lukso.network".to_string(),
        }
    }

    /// `true` when `chain_id` is this network.
    pub fn is_expected(&self, chain_id: u64) -> bool {
        self.chain_id == chain_id
    }

    /// Explorer page for an address.
    pub fn address_link(&self, address: &Address) -> String {
        format!("{}/address/{}", self.explorer_url.trim_end_matches('/'), address)
    }

    /// Explorer page for a transaction hash.
    pub fn tx_link(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }

    /// Chain id in the `0x`-prefixed form wallets report through `eth_chainId`.
    pub fn hex_chain_id(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

impl Default for ChainIdentity {
    fn default() -> Self {
        Self::lukso_testnet()
    }
}

/// Addresses of the two collaborator contracts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractAddresses {
    pub reputation_token: Address,
    pub social_graph: Address,
}

impl ContractAddresses {
    pub fn lukso_testnet() -> Self {
        Self {
            reputation_token: TESTNET_REPUTATION_TOKEN,
            social_graph: TESTNET_SOCIAL_GRAPH,
        }
    }

    /// Known deployment for a chain, if any.
    pub fn for_chain(chain_id: u64) -> Option<Self> {
        match chain_id {
            LUKSO_TESTNET_CHAIN_ID => Some(Self::lukso_testnet()),
            _ => None,
        }
    }
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self::lukso_testnet()
    }
}
