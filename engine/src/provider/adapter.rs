use alloy_primitives::Address;
use lib_evm::rpc::{parse_accounts, parse_chain_id};
use lib_evm::{Eip1193Provider, EventSink, ProviderError, ProviderEventKind, Signer};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// The engine's handle on one wallet provider.
///
/// Constructed explicitly and owned by the engine. Nothing here caches connection
/// state; every query goes to the wallet.
#[derive(Clone)]
pub struct ProviderAdapter {
    provider: Arc<dyn Eip1193Provider>,
}

impl ProviderAdapter {
    pub fn new(provider: Arc<dyn Eip1193Provider>) -> Self {
        Self { provider }
    }

    /// Pick the platform wallet when present, the generic injected one otherwise.
    ///
    /// `None` is a normal outcome: the host has no wallet and connect stays disabled.
    pub fn locate(
        preferred: Option<Arc<dyn Eip1193Provider>>,
        fallback: Option<Arc<dyn Eip1193Provider>>,
    ) -> Option<Self> {
        let adapter = preferred.or(fallback).map(Self::new);
        match &adapter {
            Some(adapter) => debug!("Using wallet provider '{}'", adapter.name()),
            None => debug!("No wallet provider found"),
        }
        adapter
    }

    pub fn name(&self) -> &str {
        self.provider.name()
    }

    pub fn provider(&self) -> &Arc<dyn Eip1193Provider> {
        &self.provider
    }

    /// Accounts the wallet has already authorized (`eth_accounts`). Never prompts.
    pub async fn query_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let raw = self.provider.request("eth_accounts", json!([])).await?;
        Ok(to_addresses(parse_accounts(raw)?))
    }

    /// Ask the user to authorize accounts (`eth_requestAccounts`). Rejection is `UserRejected`.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let raw = self.provider.request("eth_requestAccounts", json!([])).await?;
        Ok(to_addresses(parse_accounts(raw)?))
    }

    /// Current chain id, or `None` if the wallet fails to answer or answers garbage.
    pub async fn query_chain_id(&self) -> Option<u64> {
        match self.provider.request("eth_chainId", json!([])).await {
            Ok(raw) => {
                let chain_id = parse_chain_id(&raw);
                if chain_id.is_none() {
                    warn!("Unparseable eth_chainId result: {}", raw);
                }
                chain_id
            }
            Err(e) => {
                warn!("eth_chainId failed: {}", e);
                None
            }
        }
    }

    pub fn subscribe(&self, kind: ProviderEventKind, sink: EventSink) {
        debug!("Subscribing to {} on '{}'", kind, self.name());
        self.provider.subscribe(kind, sink);
    }

    pub fn unsubscribe_all(&self) {
        debug!("Removing all listeners on '{}'", self.name());
        self.provider.remove_all_listeners();
    }

    /// Signer for `account` on this provider.
    pub fn signer(&self, account: Address) -> Signer {
        Signer::new(account, self.provider.clone())
    }
}

impl fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("provider", &self.name())
            .finish()
    }
}

/// Parse wallet account strings, dropping (and logging) anything that is not an address.
pub(crate) fn to_addresses(accounts: Vec<String>) -> Vec<Address> {
    accounts
        .into_iter()
        .filter_map(|raw| match raw.parse::<Address>() {
            Ok(address) => Some(address),
            Err(_) => {
                warn!("Ignoring malformed account from wallet: {}", raw);
                None
            }
        })
        .collect()
}
