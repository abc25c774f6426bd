//! Behavioural tests for [`AgentEngine`] against an in-memory wallet.
//!
//! [`MockWallet`] speaks EIP-1193 and plays both contracts: calldata is decoded with
//! the same `sol!` interfaces the engine encodes with, and every request is counted
//! by method (or by contract function for `eth_call`).

mod sync;

use alloy_primitives::{address, hex, keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{SolInterface, SolValue};
use async_trait::async_trait;
use lib_evm::contracts::abi::IAgentReputationToken::IAgentReputationTokenCalls;
use lib_evm::contracts::abi::IAgentSocialGraph::IAgentSocialGraphCalls;
use lib_evm::{Eip1193Provider, EventSink, ProviderError, ProviderEvent, ProviderEventKind};
use parking_lot::Mutex;
use serde_json::{json, Value};
use shared::ContractAddresses;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::{AgentEngine, EngineConfig, ProviderAdapter};

pub(crate) const EXPECTED_CHAIN: u64 = 4201;
pub(crate) const ALICE: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub(crate) const BOB: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
pub(crate) const CAROL: Address = address!("cccccccccccccccccccccccccccccccccccccccc");

// region:    --- Mock wallet

#[derive(Debug, Clone, Default)]
pub(crate) struct AgentFixture {
    pub metadata_uri: String,
    pub reputation: U256,
    pub followers: Vec<Address>,
    pub following: Vec<Address>,
}

#[derive(Default)]
struct WalletState {
    accounts: Vec<Address>,
    /// `eth_accounts` only reports accounts once the user has approved.
    authorized: bool,
    chain_id: u64,
    reject_connect: bool,
    reject_next_tx: bool,
    revert_next_tx: bool,
    fail_reads: HashSet<String>,
    agents: HashMap<Address, AgentFixture>,
    issuers: HashSet<Address>,
    receipts: HashMap<B256, bool>,
    sent: u8,
}

/// Pauses one request until the test releases it.
pub(crate) struct Gate {
    pub entered: async_channel::Receiver<()>,
    pub release: async_channel::Sender<()>,
}

struct GateSlot {
    entered: async_channel::Sender<()>,
    release: async_channel::Receiver<()>,
}

pub(crate) struct MockWallet {
    state: Mutex<WalletState>,
    contracts: ContractAddresses,
    calls: Mutex<HashMap<String, usize>>,
    sinks: Mutex<Vec<(ProviderEventKind, EventSink)>>,
    gates: Mutex<HashMap<String, GateSlot>>,
}

impl MockWallet {
    pub fn new(accounts: &[Address], chain_id: u64) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(WalletState {
                accounts: accounts.to_vec(),
                chain_id,
                ..Default::default()
            }),
            contracts: ContractAddresses::lukso_testnet(),
            calls: Mutex::new(HashMap::new()),
            sinks: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
        })
    }

    // --- setup

    pub fn with_agent(self: &Arc<Self>, agent: Address, fixture: AgentFixture) -> Arc<Self> {
        self.state.lock().agents.insert(agent, fixture);
        self.clone()
    }

    pub fn authorize(&self) {
        self.state.lock().authorized = true;
    }

    pub fn set_chain(&self, chain_id: u64) {
        self.state.lock().chain_id = chain_id;
    }

    pub fn set_accounts(&self, accounts: &[Address]) {
        self.state.lock().accounts = accounts.to_vec();
    }

    pub fn reject_connect(&self) {
        self.state.lock().reject_connect = true;
    }

    pub fn reject_next_tx(&self) {
        self.state.lock().reject_next_tx = true;
    }

    pub fn revert_next_tx(&self) {
        self.state.lock().revert_next_tx = true;
    }

    pub fn fail_read(&self, function: &str) {
        self.state.lock().fail_reads.insert(function.to_string());
    }

    pub fn heal_reads(&self) {
        self.state.lock().fail_reads.clear();
    }

    pub fn make_issuer(&self, account: Address) {
        self.state.lock().issuers.insert(account);
    }

    pub fn agent(&self, agent: Address) -> Option<AgentFixture> {
        self.state.lock().agents.get(&agent).cloned()
    }

    /// Hold the next request for `key` (a method, or a contract function name).
    pub fn gate(&self, key: &str) -> Gate {
        let (entered_tx, entered_rx) = async_channel::bounded(1);
        let (release_tx, release_rx) = async_channel::bounded(1);
        self.gates.lock().insert(
            key.to_string(),
            GateSlot {
                entered: entered_tx,
                release: release_rx,
            },
        );
        Gate {
            entered: entered_rx,
            release: release_tx,
        }
    }

    // --- observation

    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn listener_count(&self) -> usize {
        self.sinks.lock().len()
    }

    // --- wallet events

    pub fn emit_accounts(&self, accounts: &[Address]) {
        self.state.lock().accounts = accounts.to_vec();
        let payload: Vec<String> = accounts.iter().map(|a| a.to_string()).collect();
        self.emit(ProviderEvent::AccountsChanged(payload));
    }

    pub fn emit_chain(&self, chain_id: u64) {
        self.state.lock().chain_id = chain_id;
        self.emit(ProviderEvent::ChainChanged(format!("0x{chain_id:x}")));
    }

    fn emit(&self, event: ProviderEvent) {
        for (kind, sink) in self.sinks.lock().iter() {
            if *kind == event.kind() {
                sink.try_send(event.clone()).unwrap();
            }
        }
    }

    // --- request handling

    async fn pass_gate(&self, key: &str) {
        let slot = self.gates.lock().remove(key);
        if let Some(slot) = slot {
            slot.entered.send(()).await.unwrap();
            slot.release.recv().await.unwrap();
        }
    }

    fn count(&self, key: &str) {
        *self.calls.lock().entry(key.to_string()).or_default() += 1;
    }

    fn accounts_json(accounts: &[Address]) -> Value {
        json!(accounts.iter().map(|a| a.to_string()).collect::<Vec<_>>())
    }

    fn call_key(&self, params: &Value) -> (Address, Bytes, String) {
        let to: Address = params[0]["to"].as_str().unwrap().parse().unwrap();
        let data: Bytes = params[0]["data"].as_str().unwrap().parse().unwrap();
        let name = if to == self.contracts.social_graph {
            social_graph_name(&IAgentSocialGraphCalls::abi_decode(&data).unwrap())
        } else {
            reputation_name(&IAgentReputationTokenCalls::abi_decode(&data).unwrap())
        };
        (to, data, name.to_string())
    }

    fn eth_call(&self, to: Address, data: &Bytes, name: &str) -> Result<Value, ProviderError> {
        let state = self.state.lock();
        if state.fail_reads.contains(name) {
            return Err(ProviderError::from_rpc(-32000, format!("{name} reverted")));
        }
        let empty = AgentFixture::default();
        let agent = |a: &Address| state.agents.get(a).unwrap_or(&empty);

        let out = if to == self.contracts.social_graph {
            match IAgentSocialGraphCalls::abi_decode(data).unwrap() {
                IAgentSocialGraphCalls::isRegistered(c) => state.agents.contains_key(&c.agent).abi_encode(),
                IAgentSocialGraphCalls::getAgentMetadata(c) => agent(&c.agent).metadata_uri.abi_encode(),
                IAgentSocialGraphCalls::getFollowers(c) => agent(&c.agent).followers.abi_encode(),
                IAgentSocialGraphCalls::getFollowing(c) => agent(&c.agent).following.abi_encode(),
                IAgentSocialGraphCalls::getFollowerCount(c) => {
                    U256::from(agent(&c.agent).followers.len()).abi_encode()
                }
                IAgentSocialGraphCalls::getFollowingCount(c) => {
                    U256::from(agent(&c.agent).following.len()).abi_encode()
                }
                IAgentSocialGraphCalls::isFollowing(c) => {
                    agent(&c.follower).following.contains(&c.following).abi_encode()
                }
                IAgentSocialGraphCalls::getAllRegisteredAgents(_) => {
                    let mut all: Vec<Address> = state.agents.keys().copied().collect();
                    all.sort();
                    all.abi_encode()
                }
                _ => return Err(ProviderError::from_rpc(-32000, "not a view function")),
            }
        } else {
            match IAgentReputationTokenCalls::abi_decode(data).unwrap() {
                IAgentReputationTokenCalls::getReputation(c) => agent(&c.agent).reputation.abi_encode(),
                IAgentReputationTokenCalls::balanceOf(c) => agent(&c.account).reputation.abi_encode(),
                IAgentReputationTokenCalls::symbol(_) => "REP".to_string().abi_encode(),
                IAgentReputationTokenCalls::name(_) => "Agent Reputation".to_string().abi_encode(),
                IAgentReputationTokenCalls::totalSupply(_) => state
                    .agents
                    .values()
                    .fold(U256::ZERO, |sum, a| sum + a.reputation)
                    .abi_encode(),
                IAgentReputationTokenCalls::ISSUER_ROLE(_) => issuer_role().abi_encode(),
                IAgentReputationTokenCalls::hasRole(c) => {
                    (c.role == issuer_role() && state.issuers.contains(&c.account)).abi_encode()
                }
                _ => return Err(ProviderError::from_rpc(-32000, "not a view function")),
            }
        };
        Ok(json!(hex::encode_prefixed(out)))
    }

    fn send_transaction(&self, params: &Value) -> Result<Value, ProviderError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.reject_next_tx) {
            return Err(ProviderError::from_rpc(4001, "User denied transaction signature"));
        }
        let from: Address = params[0]["from"].as_str().unwrap().parse().unwrap();
        let to: Address = params[0]["to"].as_str().unwrap().parse().unwrap();
        let data: Bytes = params[0]["data"].as_str().unwrap().parse().unwrap();

        state.sent += 1;
        let hash = B256::with_last_byte(state.sent);
        let success = !std::mem::take(&mut state.revert_next_tx);
        state.receipts.insert(hash, success);
        if success {
            apply_write(&mut state, &self.contracts, from, to, &data);
        }
        Ok(json!(hash))
    }
}

fn apply_write(state: &mut WalletState, contracts: &ContractAddresses, from: Address, to: Address, data: &Bytes) {
    if to == contracts.social_graph {
        match IAgentSocialGraphCalls::abi_decode(data).unwrap() {
            IAgentSocialGraphCalls::registerAgent(c) => {
                state.agents.entry(from).or_default().metadata_uri = c.metadataURI;
            }
            IAgentSocialGraphCalls::updateAgentMetadata(c) => {
                state.agents.entry(from).or_default().metadata_uri = c.metadataURI;
            }
            IAgentSocialGraphCalls::follow(c) => {
                state.agents.entry(from).or_default().following.push(c.agentToFollow);
                state.agents.entry(c.agentToFollow).or_default().followers.push(from);
            }
            IAgentSocialGraphCalls::unfollow(c) => {
                let target = c.agentToUnfollow;
                state.agents.entry(from).or_default().following.retain(|a| *a != target);
                state.agents.entry(target).or_default().followers.retain(|a| *a != from);
            }
            _ => {}
        }
    } else {
        match IAgentReputationTokenCalls::abi_decode(data).unwrap() {
            IAgentReputationTokenCalls::issueReputation(c) => {
                state.agents.entry(c.to).or_default().reputation += c.amount;
            }
            IAgentReputationTokenCalls::revokeReputation(c) => {
                let agent = state.agents.entry(c.from).or_default();
                agent.reputation = agent.reputation.saturating_sub(c.amount);
            }
            _ => {}
        }
    }
}

fn issuer_role() -> B256 {
    keccak256("ISSUER_ROLE")
}

fn social_graph_name(call: &IAgentSocialGraphCalls) -> &'static str {
    match call {
        IAgentSocialGraphCalls::isRegistered(_) => "isRegistered",
        IAgentSocialGraphCalls::getAgentMetadata(_) => "getAgentMetadata",
        IAgentSocialGraphCalls::getFollowers(_) => "getFollowers",
        IAgentSocialGraphCalls::getFollowing(_) => "getFollowing",
        IAgentSocialGraphCalls::getFollowerCount(_) => "getFollowerCount",
        IAgentSocialGraphCalls::getFollowingCount(_) => "getFollowingCount",
        IAgentSocialGraphCalls::isFollowing(_) => "isFollowing",
        IAgentSocialGraphCalls::getAllRegisteredAgents(_) => "getAllRegisteredAgents",
        _ => "socialGraphWrite",
    }
}

fn reputation_name(call: &IAgentReputationTokenCalls) -> &'static str {
    match call {
        IAgentReputationTokenCalls::getReputation(_) => "getReputation",
        IAgentReputationTokenCalls::balanceOf(_) => "balanceOf",
        IAgentReputationTokenCalls::symbol(_) => "symbol",
        IAgentReputationTokenCalls::ISSUER_ROLE(_) => "ISSUER_ROLE",
        IAgentReputationTokenCalls::hasRole(_) => "hasRole",
        _ => "reputationOther",
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for MockWallet {
    fn name(&self) -> &str {
        "mock"
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let call = (method == "eth_call").then(|| self.call_key(&params));
        let key = call.as_ref().map(|(_, _, name)| name.as_str()).unwrap_or(method).to_string();
        self.count(&key);
        self.pass_gate(&key).await;

        match method {
            "eth_accounts" => {
                let state = self.state.lock();
                if state.authorized {
                    Ok(Self::accounts_json(&state.accounts))
                } else {
                    Ok(json!([]))
                }
            }
            "eth_requestAccounts" => {
                let mut state = self.state.lock();
                if state.reject_connect {
                    return Err(ProviderError::from_rpc(4001, "User rejected the request."));
                }
                state.authorized = true;
                Ok(Self::accounts_json(&state.accounts))
            }
            "eth_chainId" => Ok(json!(format!("0x{:x}", self.state.lock().chain_id))),
            "eth_call" => match call {
                Some((to, data, name)) => self.eth_call(to, &data, &name),
                None => unreachable!(),
            },
            "eth_sendTransaction" => self.send_transaction(&params),
            "eth_getTransactionReceipt" => {
                let hash: B256 = params[0].as_str().unwrap().parse().unwrap();
                let success = self.state.lock().receipts.get(&hash).copied();
                Ok(match success {
                    Some(success) => {
                        let status = if success { "0x1" } else { "0x0" };
                        json!({
                            "transactionHash": hash,
                            "blockNumber": "0x1",
                            "gasUsed": "0x5208",
                            "status": status,
                        })
                    }
                    None => Value::Null,
                })
            }
            other => Err(ProviderError::from_rpc(4200, format!("{other} not supported"))),
        }
    }

    fn subscribe(&self, kind: ProviderEventKind, sink: EventSink) {
        self.sinks.lock().push((kind, sink));
    }

    fn remove_all_listeners(&self) {
        self.sinks.lock().clear();
    }
}

// endregion: --- Mock wallet

// region:    --- Helpers

pub(crate) fn test_config() -> EngineConfig {
    EngineConfig {
        receipt_poll_interval: Duration::from_millis(1),
        ..EngineConfig::lukso_testnet()
    }
}

pub(crate) fn engine_for(wallet: &Arc<MockWallet>) -> AgentEngine {
    AgentEngine::new(test_config(), Some(ProviderAdapter::new(wallet.clone())))
}

/// Engine already connected through `connect()`, call counters reset.
pub(crate) async fn connected(wallet: &Arc<MockWallet>) -> AgentEngine {
    let engine = engine_for(wallet);
    engine.connect().await.unwrap();
    wallet.reset_calls();
    engine
}

pub(crate) fn registered(metadata_uri: &str, reputation: u64) -> AgentFixture {
    AgentFixture {
        metadata_uri: metadata_uri.to_string(),
        reputation: U256::from(reputation),
        followers: vec![BOB],
        following: vec![BOB, CAROL],
    }
}

// endregion: --- Helpers
