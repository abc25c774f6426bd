use alloy_primitives::{Address, U256};

use super::abi::IAgentSocialGraph;
use super::handle::ContractHandle;
use crate::error::ContractError;
use crate::tx::PendingTransaction;

/// Typed handle on the agent social graph contract.
#[derive(Debug, Clone)]
pub struct SocialGraph {
    handle: ContractHandle,
}

impl SocialGraph {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }

    // region:    --- Reads

    pub async fn is_registered(&self, agent: Address) -> Result<bool, ContractError> {
        self.handle
            .read(IAgentSocialGraph::isRegisteredCall { agent })
            .await
    }

    pub async fn get_agent_metadata(&self, agent: Address) -> Result<String, ContractError> {
        self.handle
            .read(IAgentSocialGraph::getAgentMetadataCall { agent })
            .await
    }

    pub async fn get_followers(&self, agent: Address) -> Result<Vec<Address>, ContractError> {
        self.handle
            .read(IAgentSocialGraph::getFollowersCall { agent })
            .await
    }

    pub async fn get_following(&self, agent: Address) -> Result<Vec<Address>, ContractError> {
        self.handle
            .read(IAgentSocialGraph::getFollowingCall { agent })
            .await
    }

    pub async fn get_follower_count(&self, agent: Address) -> Result<U256, ContractError> {
        self.handle
            .read(IAgentSocialGraph::getFollowerCountCall { agent })
            .await
    }

    pub async fn get_following_count(&self, agent: Address) -> Result<U256, ContractError> {
        self.handle
            .read(IAgentSocialGraph::getFollowingCountCall { agent })
            .await
    }

    pub async fn is_following(
        &self,
        follower: Address,
        following: Address,
    ) -> Result<bool, ContractError> {
        self.handle
            .read(IAgentSocialGraph::isFollowingCall {
                follower,
                following,
            })
            .await
    }

    pub async fn get_all_registered_agents(&self) -> Result<Vec<Address>, ContractError> {
        self.handle
            .read(IAgentSocialGraph::getAllRegisteredAgentsCall {})
            .await
    }

    // endregion: --- Reads

    // region:    --- Writes

    pub async fn register_agent(&self, metadata_uri: &str) -> Result<PendingTransaction, ContractError> {
        self.handle
            .send(IAgentSocialGraph::registerAgentCall {
                metadataURI: metadata_uri.to_string(),
            })
            .await
    }

    pub async fn update_agent_metadata(
        &self,
        metadata_uri: &str,
    ) -> Result<PendingTransaction, ContractError> {
        self.handle
            .send(IAgentSocialGraph::updateAgentMetadataCall {
                metadataURI: metadata_uri.to_string(),
            })
            .await
    }

    pub async fn follow(&self, agent: Address) -> Result<PendingTransaction, ContractError> {
        self.handle
            .send(IAgentSocialGraph::followCall {
                agentToFollow: agent,
            })
            .await
    }

    pub async fn unfollow(&self, agent: Address) -> Result<PendingTransaction, ContractError> {
        self.handle
            .send(IAgentSocialGraph::unfollowCall {
                agentToUnfollow: agent,
            })
            .await
    }

    // endregion: --- Writes
}
