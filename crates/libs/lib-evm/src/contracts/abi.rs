//! Solidity interfaces of the deployed Agent Social contracts (LUKSO).

use alloy_sol_types::sol;

sol! {
    /// LSP7-style reputation token. `getReputation` is the score the engine displays.
    #[derive(Debug, PartialEq, Eq)]
    interface IAgentReputationToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function getReputation(address agent) external view returns (uint256);
        function issueReputation(address to, uint256 amount) external returns (bool);
        function revokeReputation(address from, uint256 amount) external returns (bool);
        function hasRole(bytes32 role, address account) external view returns (bool);
        function ISSUER_ROLE() external view returns (bytes32);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event ReputationIssued(address indexed agent, uint256 amount, address indexed issuer);
        event ReputationRevoked(address indexed agent, uint256 amount, address indexed issuer);
    }
}

sol! {
    /// Agent registry plus the follow graph between registered agents.
    #[derive(Debug, PartialEq, Eq)]
    interface IAgentSocialGraph {
        function registerAgent(string metadataURI) external returns (bool);
        function updateAgentMetadata(string metadataURI) external returns (bool);
        function follow(address agentToFollow) external returns (bool);
        function unfollow(address agentToUnfollow) external returns (bool);
        function isFollowing(address follower, address following) external view returns (bool);
        function getFollowers(address agent) external view returns (address[]);
        function getFollowing(address agent) external view returns (address[]);
        function getFollowerCount(address agent) external view returns (uint256);
        function getFollowingCount(address agent) external view returns (uint256);
        function isRegistered(address agent) external view returns (bool);
        function getAgentMetadata(address agent) external view returns (string);
        function getAllRegisteredAgents() external view returns (address[]);

        event AgentRegistered(address indexed agent, string metadataURI);
        event AgentUpdated(address indexed agent, string metadataURI);
        event Follow(address indexed follower, address indexed following);
        event Unfollow(address indexed follower, address indexed following);
    }
}
