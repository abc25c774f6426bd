//! # Agent State Synchronizer
//!
//! Reads one agent's record from the bound contracts. Committing the result is the
//! engine's job; this module never touches shared state.

use alloy_primitives::Address;
use lib_evm::ContractError;
use shared::{AgentRecord, ReputationReport, SocialGraphReport};
use tracing::debug;

use crate::binding::BoundContracts;

/// Fetch the full record for `account`.
///
/// An unregistered agent short-circuits to the default record after one call.
/// Otherwise the four detail reads run concurrently and all of them must succeed.
pub async fn fetch_agent_record(
    contracts: &BoundContracts,
    account: Address,
) -> Result<AgentRecord, ContractError> {
    if !contracts.social_graph.is_registered(account).await? {
        debug!("{} is not a registered agent", account);
        return Ok(AgentRecord::default());
    }

    let (metadata_uri, reputation, followers, following) = futures::try_join!(
        contracts.social_graph.get_agent_metadata(account),
        contracts.reputation.get_reputation(account),
        contracts.social_graph.get_followers(account),
        contracts.social_graph.get_following(account),
    )?;

    Ok(AgentRecord::registered(
        metadata_uri,
        reputation.to_string(),
        followers,
        following,
    ))
}

/// Follower/following counts and lists for any agent.
pub async fn fetch_social_graph(
    contracts: &BoundContracts,
    agent: Address,
) -> Result<SocialGraphReport, ContractError> {
    let graph = &contracts.social_graph;
    let (follower_count, following_count, followers, following) = futures::try_join!(
        graph.get_follower_count(agent),
        graph.get_following_count(agent),
        graph.get_followers(agent),
        graph.get_following(agent),
    )?;

    Ok(SocialGraphReport {
        agent,
        follower_count: follower_count.saturating_to(),
        following_count: following_count.saturating_to(),
        followers,
        following,
    })
}

/// Reputation score and raw token balance for any agent.
pub async fn fetch_reputation(
    contracts: &BoundContracts,
    agent: Address,
) -> Result<ReputationReport, ContractError> {
    let (is_registered, score, balance) = futures::try_join!(
        contracts.social_graph.is_registered(agent),
        contracts.reputation.get_reputation(agent),
        contracts.reputation.balance_of(agent),
    )?;

    // Optional extras: a deployment without symbol() or AccessControl still reports a score.
    let token_symbol = contracts.reputation.symbol().await.ok();
    let is_issuer = contracts.reputation.is_issuer(agent).await.ok();

    Ok(ReputationReport {
        agent,
        is_registered,
        reputation_score: score.to_string(),
        token_balance: balance.to_string(),
        token_symbol,
        is_issuer,
    })
}
