//! Read-only commands. None of these need `--from`.

use agent_engine::AgentEngine;
use alloy_primitives::Address;
use serde::Serialize;
use shared::{short_address, AgentRecord};

use crate::output::{address_list, yes_no, Output};

#[derive(Serialize)]
struct AgentStatus {
    agent: Address,
    #[serde(flatten)]
    record: AgentRecord,
    explorer_url: String,
}

pub async fn status(engine: &AgentEngine, agent: Address, out: &Output) -> anyhow::Result<()> {
    let record = engine.agent_status(agent).await?;
    let status = AgentStatus {
        agent,
        explorer_url: engine.address_link(&agent),
        record,
    };

    out.emit(&status, || {
        let record = &status.record;
        if !record.is_registered {
            return format!("{agent} is not a registered agent\n  {}", status.explorer_url);
        }
        format!(
            "Agent {agent}\n  Metadata:   {}\n  Reputation: {}\n  Followers:  {}\n  Following:  {}\n  {}",
            record.metadata_uri,
            record.reputation_score,
            record.follower_count(),
            record.following_count(),
            status.explorer_url,
        )
    })
}

pub async fn graph(engine: &AgentEngine, agent: Address, out: &Output) -> anyhow::Result<()> {
    let report = engine.social_graph(agent).await?;

    out.emit(&report, || {
        format!(
            "Social graph of {}\n  Followers ({}):\n{}\n  Following ({}):\n{}",
            short_address(&agent.to_string()),
            report.follower_count,
            address_list(&report.followers),
            report.following_count,
            address_list(&report.following),
        )
    })
}

pub async fn agents(engine: &AgentEngine, out: &Output) -> anyhow::Result<()> {
    let agents = engine.registered_agents().await?;

    out.emit(&agents, || {
        format!("{} registered agents\n{}", agents.len(), address_list(&agents))
    })
}

#[derive(Serialize)]
struct FollowCheck {
    follower: Address,
    following: Address,
    is_following: bool,
}

pub async fn is_following(
    engine: &AgentEngine,
    follower: Address,
    following: Address,
    out: &Output,
) -> anyhow::Result<()> {
    let check = FollowCheck {
        follower,
        following,
        is_following: engine.is_following(follower, following).await?,
    };

    out.emit(&check, || {
        format!(
            "{} follows {}: {}",
            short_address(&follower.to_string()),
            short_address(&following.to_string()),
            yes_no(check.is_following),
        )
    })
}

pub async fn reputation(engine: &AgentEngine, agent: Address, out: &Output) -> anyhow::Result<()> {
    let report = engine.reputation(agent).await?;

    out.emit(&report, || {
        let symbol = report.token_symbol.as_deref().unwrap_or("");
        let issuer = match report.is_issuer {
            Some(is_issuer) => yes_no(is_issuer),
            None => "unknown",
        };
        format!(
            "Reputation of {agent}\n  Registered: {}\n  Score:      {}\n  Balance:    {} {symbol}\n  Issuer:     {issuer}",
            yes_no(report.is_registered),
            report.reputation_score,
            report.token_balance,
        )
    })
}
