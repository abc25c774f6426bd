//! # Agent Engine
//!
//! Owns the provider adapter, the connection state, the contract binding, and the
//! cached agent record. Front ends call into it and render [`AgentEngine::snapshot`].
//!
//! ## Locking
//!
//! State lives behind synchronous `parking_lot` locks. Guards are scoped so that
//! none is held across an `.await`; every await point re-reads what it needs.
//! When both are taken, `state` is locked before `binding`.
//!
//! ## Wallet events
//!
//! The provider pushes events into an internal queue. The host drains it with
//! [`AgentEngine::next_event`] (long-running loop) or [`AgentEngine::pump_events`]
//! (drain what is queued). Events are handled in emission order.

use alloy_primitives::{Address, TxHash, U256};
use async_channel::{Receiver, Sender};
use lib_evm::rpc::parse_quantity;
use lib_evm::{ContractError, PendingTransaction, ProviderEvent, ProviderEventKind, TxReceipt};
use lib_utils::validate_metadata_uri;
use parking_lot::RwLock;
use shared::{AgentRecord, ReputationReport, SocialGraphReport};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::binding::{BoundContracts, ContractBinding};
use crate::connection::{AccountChange, ConnectionPhase, ConnectionState};
use crate::core::{EngineConfig, EngineError, Result};
use crate::provider::{to_addresses, ProviderAdapter};
use crate::state::{EngineState, PendingAction, WriteKind};
use crate::sync;

pub struct AgentEngine {
    config: EngineConfig,
    adapter: Option<ProviderAdapter>,
    state: Arc<RwLock<EngineState>>,
    binding: RwLock<ContractBinding>,
    events_tx: Sender<ProviderEvent>,
    events_rx: Receiver<ProviderEvent>,
}

impl AgentEngine {
    /// Create an engine and subscribe to the provider's wallet events.
    ///
    /// `adapter == None` is valid: the engine reports `provider_available == false`
    /// and `connect` fails with [`EngineError::ProviderUnavailable`].
    pub fn new(config: EngineConfig, adapter: Option<ProviderAdapter>) -> Self {
        let (events_tx, events_rx) = async_channel::unbounded();

        if let Some(adapter) = &adapter {
            for kind in ProviderEventKind::all() {
                adapter.subscribe(*kind, events_tx.clone());
            }
        }

        let state = EngineState {
            provider_available: adapter.is_some(),
            ..Default::default()
        };

        info!(
            "Agent engine ready for {} (chain {}), provider: {}",
            config.chain.name,
            config.chain.chain_id,
            adapter.as_ref().map(|a| a.name()).unwrap_or("none")
        );

        Self {
            config,
            adapter,
            state: Arc::new(RwLock::new(state)),
            binding: RwLock::new(ContractBinding::Unbound),
            events_tx,
            events_rx,
        }
    }

    // region:    --- Accessors

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn expected_chain_id(&self) -> u64 {
        self.config.chain.chain_id
    }

    /// Shared handle on the live state, for observers that poll it.
    pub fn state_handle(&self) -> Arc<RwLock<EngineState>> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> EngineState {
        self.state.read().clone()
    }

    pub fn connection(&self) -> ConnectionState {
        self.state.read().connection.clone()
    }

    pub fn agent(&self) -> AgentRecord {
        self.state.read().agent.clone()
    }

    pub fn pending(&self) -> PendingAction {
        self.state.read().pending.clone()
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.state.read().connection.phase(self.expected_chain_id())
    }

    pub fn is_correct_chain(&self) -> bool {
        self.state
            .read()
            .connection
            .is_correct_chain(self.expected_chain_id())
    }

    pub fn provider_available(&self) -> bool {
        self.adapter.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.adapter.as_ref().map(ProviderAdapter::name)
    }

    pub fn is_bound(&self) -> bool {
        self.binding.read().is_bound()
    }

    /// Explorer link for a transaction on the expected chain.
    pub fn tx_link(&self, hash: &TxHash) -> String {
        self.config.chain.tx_link(&hash.to_string())
    }

    pub fn address_link(&self, address: &Address) -> String {
        self.config.chain.address_link(address)
    }

    fn adapter(&self) -> Result<&ProviderAdapter> {
        self.adapter.as_ref().ok_or(EngineError::ProviderUnavailable)
    }

    // endregion: --- Accessors

    // region:    --- Connection

    /// Ask the wallet for accounts (user prompt) and enter a connected state.
    ///
    /// A no-op while another connect is in flight. On failure the connection state
    /// reverts to what it was before the call.
    pub async fn connect(&self) -> Result<ConnectionState> {
        let adapter = self.adapter()?.clone();
        self.open_session(&adapter, true).await
    }

    /// Resume a session the wallet already authorized, without prompting.
    ///
    /// Returns whether a session is open afterwards.
    pub async fn restore(&self) -> Result<bool> {
        let adapter = self.adapter()?.clone();
        let connection = self.open_session(&adapter, false).await?;
        Ok(connection.connected)
    }

    async fn open_session(&self, adapter: &ProviderAdapter, prompt: bool) -> Result<ConnectionState> {
        let previous = self.state.write().connection.begin_connect();
        let Some(previous) = previous else {
            return Ok(self.connection());
        };

        let requested = if prompt {
            adapter.request_accounts().await
        } else {
            adapter.query_accounts().await
        };

        let accounts = match requested {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!("Wallet connection failed: {}", e);
                let mut state = self.state.write();
                state.connection.connect_failed(previous);

                // An accountsChanged event may have bound a session while the prompt was open.
                let restored = state.connection.account;
                let bound = self.binding.read().contracts().map(BoundContracts::account);
                if bound != restored {
                    debug!("Restoring binding to {:?} after failed connect", restored);
                    state.agent = AgentRecord::default();
                    match restored {
                        Some(account) => self.rebind(adapter, account),
                        None => *self.binding.write() = ContractBinding::unbind(),
                    }
                }
                return Err(e.into());
            }
        };

        let Some(account) = accounts.first().copied() else {
            if prompt {
                info!("Wallet returned no accounts");
            } else {
                debug!("No previously authorized account to restore");
            }
            let mut state = self.state.write();
            state.reset_session();
            *self.binding.write() = ContractBinding::unbind();
            return Ok(state.connection.clone());
        };

        let chain_id = adapter.query_chain_id().await;

        {
            let mut state = self.state.write();
            if previous.account != Some(account) {
                state.agent = AgentRecord::default();
            }
            state.connection.connect_succeeded(account, chain_id);
            self.rebind(adapter, account);
        }

        info!(
            "Connected {} via '{}' on chain {:?} (expected {})",
            account,
            adapter.name(),
            chain_id,
            self.expected_chain_id()
        );

        self.auto_refresh().await;
        Ok(self.connection())
    }

    /// Drop the session locally. Wallet permissions are not revoked.
    pub fn disconnect(&self) {
        let mut state = self.state.write();
        let was_connected = state.connection.connected;
        state.reset_session();
        *self.binding.write() = ContractBinding::unbind();
        if was_connected {
            info!("Disconnected");
        }
    }

    fn rebind(&self, adapter: &ProviderAdapter, account: Address) {
        *self.binding.write() = ContractBinding::bind(
            &adapter.signer(account),
            &self.config.contracts,
            self.config.receipt_poll_interval,
        );
    }

    // endregion: --- Connection

    // region:    --- Wallet events

    /// Apply one wallet event.
    pub async fn handle_event(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(raw) => self.on_accounts_changed(raw).await,
            ProviderEvent::ChainChanged(raw) => self.on_chain_changed(raw).await,
        }
    }

    async fn on_accounts_changed(&self, raw: Vec<String>) {
        let Some(adapter) = self.adapter.clone() else {
            return;
        };
        let accounts = to_addresses(raw);
        let change = self.state.write().connection.observe_accounts(&accounts);

        match change {
            AccountChange::Unchanged => {}
            AccountChange::Disconnected => {
                info!("Wallet reported no accounts");
                self.disconnect();
            }
            AccountChange::Switched { from, to } => {
                info!("Account switched from {} to {}", from, to);
                {
                    let mut state = self.state.write();
                    state.agent = AgentRecord::default();
                    self.rebind(&adapter, to);
                }
                self.auto_refresh().await;
            }
            AccountChange::Connected(account) => {
                info!("Wallet authorized {}", account);
                let chain_id = adapter.query_chain_id().await;
                {
                    let mut state = self.state.write();
                    // Another event may have ended the session while we waited.
                    if state.connection.account != Some(account) {
                        return;
                    }
                    state.connection.observe_chain(chain_id);
                    self.rebind(&adapter, account);
                }
                self.auto_refresh().await;
            }
        }
    }

    async fn on_chain_changed(&self, raw: String) {
        let Some(adapter) = self.adapter.clone() else {
            return;
        };
        let chain_id = parse_quantity(&raw);
        if chain_id.is_none() {
            warn!("Unparseable chainChanged payload: {}", raw);
        }

        let ready = {
            let mut state = self.state.write();
            let Some(account) = state.connection.account else {
                debug!("Ignoring chainChanged({}) while disconnected", raw);
                return;
            };
            if !state.connection.observe_chain(chain_id) {
                return;
            }
            self.rebind(&adapter, account);
            state.connection.is_ready(self.expected_chain_id())
        };

        info!(
            "Chain changed to {:?} ({})",
            chain_id,
            if ready { "expected network" } else { "wrong network" }
        );

        if ready {
            self.auto_refresh().await;
        }
    }

    /// Handle every queued event. Returns how many were handled.
    pub async fn pump_events(&self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event).await;
            handled += 1;
        }
        handled
    }

    /// Wait for the next wallet event and handle it. Returns `false` once the
    /// engine has been shut down.
    pub async fn next_event(&self) -> bool {
        match self.events_rx.recv().await {
            Ok(event) => {
                self.handle_event(event).await;
                true
            }
            Err(_) => false,
        }
    }

    /// Queue end the provider writes into. Hosts with their own event plumbing can
    /// inject events here.
    pub fn event_sink(&self) -> Sender<ProviderEvent> {
        self.events_tx.clone()
    }

    /// Drop the provider subscriptions and close the event queue.
    pub fn shutdown(&self) {
        if let Some(adapter) = &self.adapter {
            adapter.unsubscribe_all();
        }
        self.events_rx.close();
        debug!("Agent engine shut down");
    }

    // endregion: --- Wallet events

    // region:    --- Synchronization

    /// Re-read the connected agent's record.
    ///
    /// Without a connected, correct-chain, bound session this returns the cached
    /// record and issues no calls. A failed read keeps the cached record and is
    /// returned as [`EngineError::Read`]. The new record is committed only if the
    /// session is still the one the read started from.
    pub async fn refresh(&self) -> Result<AgentRecord> {
        let expected = self.expected_chain_id();

        let (account, contracts) = {
            let state = self.state.read();
            let binding = self.binding.read();
            match (
                state.connection.is_ready(expected),
                state.connection.account,
                binding.contracts(),
            ) {
                (true, Some(account), Some(contracts)) => (account, contracts.clone()),
                _ => {
                    debug!("Refresh skipped: no ready session");
                    return Ok(state.agent.clone());
                }
            }
        };

        match sync::fetch_agent_record(&contracts, account).await {
            Ok(record) => {
                let mut state = self.state.write();
                let still_current = state.connection.is_ready(expected)
                    && state.connection.account == Some(account)
                    && self.binding.read().is_bound();
                if still_current {
                    debug!(
                        "Agent {} refreshed: registered={}, reputation={}, followers={}, following={}",
                        account,
                        record.is_registered,
                        record.reputation_score,
                        record.follower_count(),
                        record.following_count()
                    );
                    state.agent = record.clone();
                    Ok(record)
                } else {
                    debug!("Discarding refresh for {}: session changed", account);
                    Ok(state.agent.clone())
                }
            }
            Err(e) => {
                warn!("Failed to refresh agent {}: {}", account, e);
                Err(EngineError::Read(e))
            }
        }
    }

    async fn auto_refresh(&self) {
        // Already logged by refresh(); automatic refreshes never surface errors.
        let _ = self.refresh().await;
    }

    // endregion: --- Synchronization

    // region:    --- Writes

    /// Register the connected account as an agent.
    pub async fn register(&self, metadata_uri: &str) -> Result<TxReceipt> {
        let uri = validate_metadata_uri(metadata_uri)
            .map_err(EngineError::Validation)?
            .to_string();
        self.submit(WriteKind::Register, move |contracts| async move {
            contracts.social_graph.register_agent(&uri).await
        })
        .await
    }

    /// Point the connected agent at a new metadata document.
    pub async fn update_metadata(&self, metadata_uri: &str) -> Result<TxReceipt> {
        let uri = validate_metadata_uri(metadata_uri)
            .map_err(EngineError::Validation)?
            .to_string();
        self.submit(WriteKind::UpdateMetadata, move |contracts| async move {
            contracts.social_graph.update_agent_metadata(&uri).await
        })
        .await
    }

    pub async fn follow(&self, agent: Address) -> Result<TxReceipt> {
        self.validate_counterparty(agent)?;
        self.submit(WriteKind::Follow, move |contracts| async move {
            contracts.social_graph.follow(agent).await
        })
        .await
    }

    pub async fn unfollow(&self, agent: Address) -> Result<TxReceipt> {
        self.validate_counterparty(agent)?;
        self.submit(WriteKind::Unfollow, move |contracts| async move {
            contracts.social_graph.unfollow(agent).await
        })
        .await
    }

    /// Mint reputation to `agent`. The connected account needs `ISSUER_ROLE`.
    pub async fn issue_reputation(&self, agent: Address, amount: U256) -> Result<TxReceipt> {
        validate_reputation_change(agent, amount)?;
        self.submit(WriteKind::IssueReputation, move |contracts| async move {
            contracts.reputation.issue_reputation(agent, amount).await
        })
        .await
    }

    /// Burn reputation from `agent`. The connected account needs `ISSUER_ROLE`.
    pub async fn revoke_reputation(&self, agent: Address, amount: U256) -> Result<TxReceipt> {
        validate_reputation_change(agent, amount)?;
        self.submit(WriteKind::RevokeReputation, move |contracts| async move {
            contracts.reputation.revoke_reputation(agent, amount).await
        })
        .await
    }

    fn validate_counterparty(&self, agent: Address) -> Result<()> {
        if agent == Address::ZERO {
            return Err(EngineError::Validation("Agent address cannot be zero".to_string()));
        }
        if self.state.read().connection.account == Some(agent) {
            return Err(EngineError::Validation("Agent cannot follow itself".to_string()));
        }
        Ok(())
    }

    /// Contracts for a write: connected, on the expected chain, bound.
    fn write_contracts(&self) -> Result<BoundContracts> {
        let state = self.state.read();
        if !state.connection.connected {
            return Err(EngineError::NotConnected);
        }
        let expected = self.expected_chain_id();
        if !state.connection.is_correct_chain(expected) {
            return Err(EngineError::WrongChain {
                expected,
                actual: state.connection.chain_id,
            });
        }
        self.binding
            .read()
            .contracts()
            .cloned()
            .ok_or(EngineError::NotBound)
    }

    /// Submit, record the hash, await confirmation, refresh, record the outcome.
    ///
    /// The refresh runs whenever the confirmation wait settles, including on a
    /// revert or a failed wait. A failed submission leaves the record untouched.
    async fn submit<F, Fut>(&self, kind: WriteKind, send: F) -> Result<TxReceipt>
    where
        F: FnOnce(BoundContracts) -> Fut,
        Fut: Future<Output = std::result::Result<PendingTransaction, ContractError>>,
    {
        let contracts = self.write_contracts()?;
        let account = contracts.account();
        self.state.write().pending.begin(kind);
        info!("Submitting {} from {}", kind, account);

        let pending = match send(contracts).await {
            Ok(pending) => pending,
            Err(e) => {
                let err = EngineError::from_write(e);
                warn!("{} not submitted: {}", kind, err);
                self.settle(kind, account, Some(err.to_string()));
                return Err(err);
            }
        };

        let hash = pending.hash();
        {
            let mut state = self.state.write();
            if state.connection.account == Some(account) {
                state.pending.last_tx_hash = Some(hash);
            }
        }
        info!("{} pending: {}", kind, self.tx_link(&hash));

        let confirmation = pending.wait().await;
        self.auto_refresh().await;

        let outcome = match confirmation {
            Ok(receipt) if receipt.success => {
                info!("{} confirmed in block {:?}", kind, receipt.block_number);
                Ok(receipt)
            }
            Ok(_) => Err(EngineError::Reverted(hash)),
            Err(e) => Err(EngineError::from_write(e)),
        };

        if let Err(err) = &outcome {
            warn!("{} failed: {}", kind, err);
        }
        self.settle(kind, account, outcome.as_ref().err().map(ToString::to_string));
        outcome
    }

    /// Record a write's outcome, unless the session that sent it has ended.
    fn settle(&self, kind: WriteKind, account: Address, error: Option<String>) {
        let mut state = self.state.write();
        if state.connection.account == Some(account) {
            state.pending.finish(kind, error);
        } else {
            debug!("Session of {} ended; discarding {} outcome", account, kind);
        }
    }

    // endregion: --- Writes

    // region:    --- Queries

    /// Contracts for read-only queries: the session's binding, or a throwaway
    /// binding from the zero address when nobody is connected.
    fn read_contracts(&self) -> Result<BoundContracts> {
        if let Some(contracts) = self.binding.read().contracts() {
            return Ok(contracts.clone());
        }
        let adapter = self.adapter()?;
        Ok(BoundContracts::new(
            &adapter.signer(Address::ZERO),
            &self.config.contracts,
            self.config.receipt_poll_interval,
        ))
    }

    /// Record of any agent. Does not touch the cached snapshot.
    pub async fn agent_status(&self, agent: Address) -> Result<AgentRecord> {
        let contracts = self.read_contracts()?;
        sync::fetch_agent_record(&contracts, agent)
            .await
            .map_err(EngineError::Read)
    }

    pub async fn social_graph(&self, agent: Address) -> Result<SocialGraphReport> {
        let contracts = self.read_contracts()?;
        sync::fetch_social_graph(&contracts, agent)
            .await
            .map_err(EngineError::Read)
    }

    pub async fn reputation(&self, agent: Address) -> Result<ReputationReport> {
        let contracts = self.read_contracts()?;
        sync::fetch_reputation(&contracts, agent)
            .await
            .map_err(EngineError::Read)
    }

    pub async fn registered_agents(&self) -> Result<Vec<Address>> {
        let contracts = self.read_contracts()?;
        contracts
            .social_graph
            .get_all_registered_agents()
            .await
            .map_err(EngineError::Read)
    }

    pub async fn is_following(&self, follower: Address, following: Address) -> Result<bool> {
        let contracts = self.read_contracts()?;
        contracts
            .social_graph
            .is_following(follower, following)
            .await
            .map_err(EngineError::Read)
    }

    // endregion: --- Queries
}

fn validate_reputation_change(agent: Address, amount: U256) -> Result<()> {
    if agent == Address::ZERO {
        return Err(EngineError::Validation("Agent address cannot be zero".to_string()));
    }
    if amount.is_zero() {
        return Err(EngineError::Validation("Amount must be positive".to_string()));
    }
    Ok(())
}
