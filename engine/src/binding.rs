//! # Contract Binding
//!
//! Typed contract handles tied to the current signer. Both handles exist or
//! neither does; a new signer always means a new binding.

use alloy_primitives::Address;
use lib_evm::{ContractHandle, ReputationLedger, Signer, SocialGraph};
use shared::ContractAddresses;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct BoundContracts {
    pub reputation: ReputationLedger,
    pub social_graph: SocialGraph,
}

impl BoundContracts {
    pub fn new(signer: &Signer, addresses: &ContractAddresses, poll_interval: Duration) -> Self {
        Self {
            reputation: ReputationLedger::new(ContractHandle::new(
                addresses.reputation_token,
                signer.clone(),
                poll_interval,
            )),
            social_graph: SocialGraph::new(ContractHandle::new(
                addresses.social_graph,
                signer.clone(),
                poll_interval,
            )),
        }
    }

    /// Account both handles send from.
    pub fn account(&self) -> Address {
        self.social_graph.handle().signer().address()
    }
}

#[derive(Debug, Clone, Default)]
pub enum ContractBinding {
    #[default]
    Unbound,
    Bound(BoundContracts),
}

impl ContractBinding {
    /// Build handles for both contracts on `signer`. No I/O.
    pub fn bind(signer: &Signer, addresses: &ContractAddresses, poll_interval: Duration) -> Self {
        debug!(
            "Binding contracts for {} (reputation {}, social graph {})",
            signer.address(),
            addresses.reputation_token,
            addresses.social_graph
        );
        ContractBinding::Bound(BoundContracts::new(signer, addresses, poll_interval))
    }

    pub fn unbind() -> Self {
        ContractBinding::Unbound
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, ContractBinding::Bound(_))
    }

    pub fn contracts(&self) -> Option<&BoundContracts> {
        match self {
            ContractBinding::Bound(contracts) => Some(contracts),
            ContractBinding::Unbound => None,
        }
    }
}
