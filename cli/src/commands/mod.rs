//! Subcommand dispatch.

mod query;
mod write;

use agent_engine::AgentEngine;
use alloy_primitives::{Address, U256};
use anyhow::Context;

use crate::output::Output;
use crate::{Command, ReputationCommand};

pub async fn run(
    engine: &AgentEngine,
    command: Command,
    from: Option<Address>,
    out: &Output,
) -> anyhow::Result<()> {
    match command {
        Command::Status { agent } => {
            let agent = agent
                .or(from)
                .context("No agent given; pass an address or set --from")?;
            query::status(engine, agent, out).await
        }
        Command::Graph { agent } => query::graph(engine, agent, out).await,
        Command::Agents => query::agents(engine, out).await,
        Command::IsFollowing {
            follower,
            following,
        } => query::is_following(engine, follower, following, out).await,
        Command::Reputation { action } => match action {
            ReputationCommand::Query { agent } => query::reputation(engine, agent, out).await,
            ReputationCommand::Issue { agent, amount } => {
                write::open_session(engine, from).await?;
                let result = engine.issue_reputation(agent, U256::from(amount)).await;
                write::report(engine, result, out)
            }
            ReputationCommand::Revoke { agent, amount } => {
                write::open_session(engine, from).await?;
                let result = engine.revoke_reputation(agent, U256::from(amount)).await;
                write::report(engine, result, out)
            }
        },
        Command::Register { metadata_uri } => {
            write::open_session(engine, from).await?;
            let result = engine.register(&metadata_uri).await;
            write::report(engine, result, out)
        }
        Command::UpdateMetadata { metadata_uri } => {
            write::open_session(engine, from).await?;
            let result = engine.update_metadata(&metadata_uri).await;
            write::report(engine, result, out)
        }
        Command::Follow { agent } => {
            write::open_session(engine, from).await?;
            let result = engine.follow(agent).await;
            write::report(engine, result, out)
        }
        Command::Unfollow { agent } => {
            write::open_session(engine, from).await?;
            let result = engine.unfollow(agent).await;
            write::report(engine, result, out)
        }
    }
}
