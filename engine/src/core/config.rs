//! # Engine Configuration
//!
//! The expected network and the two contract deployments the engine binds to.
//! Defaults to LUKSO Testnet; [`EngineConfig::from_env`] overrides from the environment:
//!
//! | Variable                 | Meaning                                   |
//! |--------------------------|-------------------------------------------|
//! | `AGENT_NETWORK`          | `testnet` (default) or `mainnet`          |
//! | `AGENT_CHAIN_ID`         | expected chain id                         |
//! | `AGENT_CHAIN_NAME`       | display name                              |
//! | `AGENT_RPC_URL`          | JSON-RPC endpoint                         |
//! | `AGENT_EXPLORER_URL`     | block explorer base URL                   |
//! | `AGENT_REPUTATION_TOKEN` | reputation token address                  |
//! | `AGENT_SOCIAL_GRAPH`     | social graph address                      |
//! | `AGENT_RECEIPT_POLL_MS`  | receipt polling interval in milliseconds  |

use alloy_primitives::Address;
use lib_utils::{get_env_opt, get_env_parse_opt, validate_http_url};
use shared::{ChainIdentity, ContractAddresses};
use std::time::Duration;

pub const DEFAULT_RECEIPT_POLL_MS: u64 = 1_500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Network the wallet is expected to be on.
    pub chain: ChainIdentity,

    pub contracts: ContractAddresses,

    /// Delay between `eth_getTransactionReceipt` polls while a write confirms.
    pub receipt_poll_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::lukso_testnet()
    }
}

impl EngineConfig {
    pub fn lukso_testnet() -> Self {
        Self {
            chain: ChainIdentity::lukso_testnet(),
            contracts: ContractAddresses::lukso_testnet(),
            receipt_poll_interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_MS),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let network = get_env_opt("AGENT_NETWORK").unwrap_or_else(|| "testnet".to_string());
        let mut chain = match network.trim().to_ascii_lowercase().as_str() {
            "testnet" => ChainIdentity::lukso_testnet(),
            "mainnet" => ChainIdentity::lukso_mainnet(),
            other => {
                return Err(format!(
                    "AGENT_NETWORK must be 'testnet' or 'mainnet', got '{}'",
                    other
                ))
            }
        };

        if let Some(chain_id) = get_env_parse_opt::<u64>("AGENT_CHAIN_ID").map_err(|e| e.to_string())? {
            chain.chain_id = chain_id;
        }
        if let Some(name) = get_env_opt("AGENT_CHAIN_NAME") {
            chain.name = name;
        }
        if let Some(rpc_url) = get_env_opt("AGENT_RPC_URL") {
            chain.rpc_url = rpc_url;
        }
        if let Some(explorer_url) = get_env_opt("AGENT_EXPLORER_URL") {
            chain.explorer_url = explorer_url;
        }

        let known = ContractAddresses::for_chain(chain.chain_id);
        let reputation_token = get_env_parse_opt::<Address>("AGENT_REPUTATION_TOKEN")
            .map_err(|e| e.to_string())?
            .or(known.map(|c| c.reputation_token))
            .ok_or_else(|| {
                format!(
                    "AGENT_REPUTATION_TOKEN must be set: no known deployment on chain {}",
                    chain.chain_id
                )
            })?;
        let social_graph = get_env_parse_opt::<Address>("AGENT_SOCIAL_GRAPH")
            .map_err(|e| e.to_string())?
            .or(known.map(|c| c.social_graph))
            .ok_or_else(|| {
                format!(
                    "AGENT_SOCIAL_GRAPH must be set: no known deployment on chain {}",
                    chain.chain_id
                )
            })?;

        let poll_ms = get_env_parse_opt::<u64>("AGENT_RECEIPT_POLL_MS")
            .map_err(|e| e.to_string())?
            .unwrap_or(DEFAULT_RECEIPT_POLL_MS);

        let config = Self {
            chain,
            contracts: ContractAddresses {
                reputation_token,
                social_graph,
            },
            receipt_poll_interval: Duration::from_millis(poll_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.chain.chain_id == 0 {
            return Err("Chain id must be non-zero".to_string());
        }

        validate_http_url(&self.chain.rpc_url, "RPC URL")?;
        validate_http_url(&self.chain.explorer_url, "Explorer URL")?;

        if self.contracts.reputation_token == Address::ZERO {
            return Err("Reputation token address must be non-zero".to_string());
        }
        if self.contracts.social_graph == Address::ZERO {
            return Err("Social graph address must be non-zero".to_string());
        }
        if self.contracts.reputation_token == self.contracts.social_graph {
            return Err("Reputation token and social graph must be different contracts".to_string());
        }

        if self.receipt_poll_interval.is_zero() {
            return Err("Receipt poll interval must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lukso_testnet() {
        let config = EngineConfig::default();
        assert_eq!(config.chain.chain_id, 4201);
        assert_eq!(config.chain.rpc_url, "https://rpc.testnet.lukso.network");
        assert_eq!(config.contracts, ContractAddresses::lukso_testnet());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.chain.chain_id = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.chain.rpc_url = "wss://rpc.testnet.lukso.network".to_string();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.contracts.social_graph = config.contracts.reputation_token;
        assert_eq!(
            config.validate(),
            Err("Reputation token and social graph must be different contracts".to_string())
        );

        let mut config = EngineConfig::default();
        config.contracts.reputation_token = Address::ZERO;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.receipt_poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
