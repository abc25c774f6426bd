//! agentctl: inspect and drive Agent Social agents from the command line.
//!
//! Reads work against any JSON-RPC endpoint. Writes are sent with
//! `eth_sendTransaction` from a node-managed account (`--from`), so the node signs
//! and no key material ever reaches this process.

mod commands;
mod logging;
mod output;

use std::sync::Arc;

use agent_engine::{AgentEngine, EngineConfig, HttpProvider, ProviderAdapter};
use alloy_primitives::Address;
use anyhow::Context;
use clap::{Parser, Subcommand};
use lib_utils::validate_http_url;
use tracing::debug;

use output::Output;

#[derive(Parser)]
#[command(name = "agentctl", version)]
#[command(about = "Inspect and drive Agent Social agents on LUKSO")]
struct Cli {
    /// JSON-RPC endpoint (defaults to the configured network)
    #[arg(long, global = true, env = "AGENT_RPC_URL")]
    rpc_url: Option<String>,

    /// Node-managed account that sends transactions
    #[arg(long, global = true, env = "AGENT_FROM")]
    from: Option<Address>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show an agent's record (defaults to --from)
    Status { agent: Option<Address> },

    /// Show followers and following of an agent
    Graph { agent: Address },

    /// List every registered agent
    Agents,

    /// Check whether one agent follows another
    IsFollowing { follower: Address, following: Address },

    /// Reputation queries and issuance
    Reputation {
        #[command(subcommand)]
        action: ReputationCommand,
    },

    /// Register --from as an agent
    Register { metadata_uri: String },

    /// Update the metadata URI of --from
    UpdateMetadata { metadata_uri: String },

    /// Follow an agent from --from
    Follow { agent: Address },

    /// Unfollow an agent from --from
    Unfollow { agent: Address },
}

#[derive(Subcommand)]
pub enum ReputationCommand {
    /// Reputation score, token balance and issuer role of an agent
    Query { agent: Address },

    /// Issue reputation (requires ISSUER_ROLE on --from)
    Issue { agent: Address, amount: u128 },

    /// Revoke reputation (requires ISSUER_ROLE on --from)
    Revoke { agent: Address, amount: u128 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose);

    let mut config = EngineConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    if let Some(rpc_url) = &cli.rpc_url {
        validate_http_url(rpc_url, "RPC URL").map_err(anyhow::Error::msg)?;
        config.chain.rpc_url = rpc_url.clone();
    }

    debug!(
        "Network: {} (chain {}) via {}",
        config.chain.name, config.chain.chain_id, config.chain.rpc_url
    );

    let mut provider = HttpProvider::new(config.chain.rpc_url.clone());
    if let Some(from) = cli.from {
        provider = provider.with_account(from);
    }

    let engine = AgentEngine::new(config, Some(ProviderAdapter::new(Arc::new(provider))));
    let output = Output::new(cli.json);

    commands::run(&engine, cli.command, cli.from, &output).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_write_command() {
        let cli = Cli::try_parse_from([
            "agentctl",
            "--from",
            "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "reputation",
            "issue",
            "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            "25",
        ])
        .unwrap();

        assert_eq!(cli.from, Some(Address::repeat_byte(0xaa)));
        match cli.command {
            Command::Reputation {
                action: ReputationCommand::Issue { agent, amount },
            } => {
                assert_eq!(agent, Address::repeat_byte(0xbb));
                assert_eq!(amount, 25);
            }
            _ => panic!("expected reputation issue"),
        }
    }

    #[test]
    fn test_rejects_malformed_address() {
        assert!(Cli::try_parse_from(["agentctl", "graph", "0x1234"]).is_err());
    }

    #[test]
    fn test_json_flag_is_global() {
        let cli = Cli::try_parse_from(["agentctl", "agents", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Agents));
    }
}
