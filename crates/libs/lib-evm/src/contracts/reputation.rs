use alloy_primitives::{Address, B256, U256};

use super::abi::IAgentReputationToken;
use super::handle::ContractHandle;
use crate::error::ContractError;
use crate::tx::PendingTransaction;

/// Typed handle on the reputation token.
#[derive(Debug, Clone)]
pub struct ReputationLedger {
    handle: ContractHandle,
}

impl ReputationLedger {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }

    pub async fn get_reputation(&self, agent: Address) -> Result<U256, ContractError> {
        self.handle
            .read(IAgentReputationToken::getReputationCall { agent })
            .await
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256, ContractError> {
        self.handle
            .read(IAgentReputationToken::balanceOfCall { account })
            .await
    }

    pub async fn name(&self) -> Result<String, ContractError> {
        self.handle.read(IAgentReputationToken::nameCall {}).await
    }

    pub async fn symbol(&self) -> Result<String, ContractError> {
        self.handle.read(IAgentReputationToken::symbolCall {}).await
    }

    pub async fn total_supply(&self) -> Result<U256, ContractError> {
        self.handle
            .read(IAgentReputationToken::totalSupplyCall {})
            .await
    }

    pub async fn issuer_role(&self) -> Result<B256, ContractError> {
        self.handle
            .read(IAgentReputationToken::ISSUER_ROLECall {})
            .await
    }

    pub async fn has_role(&self, role: B256, account: Address) -> Result<bool, ContractError> {
        self.handle
            .read(IAgentReputationToken::hasRoleCall { role, account })
            .await
    }

    /// Whether `account` holds `ISSUER_ROLE`.
    pub async fn is_issuer(&self, account: Address) -> Result<bool, ContractError> {
        let role = self.issuer_role().await?;
        self.has_role(role, account).await
    }

    pub async fn issue_reputation(
        &self,
        to: Address,
        amount: U256,
    ) -> Result<PendingTransaction, ContractError> {
        self.handle
            .send(IAgentReputationToken::issueReputationCall { to, amount })
            .await
    }

    pub async fn revoke_reputation(
        &self,
        from: Address,
        amount: U256,
    ) -> Result<PendingTransaction, ContractError> {
        self.handle
            .send(IAgentReputationToken::revokeReputationCall { from, amount })
            .await
    }
}
