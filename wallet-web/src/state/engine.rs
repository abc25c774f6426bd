//! Engine state management
//!
//! The engine lives in a local (non-`Send`) stored value; components read a signal mirror of
//! its snapshot. The mirror is re-synced after every action and wallet event, and polled while
//! an action is in flight so busy flags and the pending transaction hash show up promptly.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use agent_engine::{
    AgentEngine, ConnectionPhase, Eip1193Provider, EngineConfig, EngineError, EngineState, ProviderAdapter,
};
use alloy_primitives::Address;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::ChainIdentity;

use crate::services::InjectedProvider;

const IN_FLIGHT_SYNC_MS: u32 = 250;

/// Global engine context
#[derive(Clone, Copy)]
pub struct EngineContext {
    engine: StoredValue<Rc<AgentEngine>, LocalStorage>,
    /// Mirror of the engine snapshot
    pub state: RwSignal<EngineState>,
    /// Last connect failure; write failures live in `state.pending.last_error`
    pub error: RwSignal<Option<String>>,
}

impl EngineContext {
    fn new(engine: AgentEngine) -> Self {
        let state = RwSignal::new(engine.snapshot());
        Self {
            engine: StoredValue::new_local(Rc::new(engine)),
            state,
            error: RwSignal::new(None),
        }
    }

    pub fn engine(&self) -> Rc<AgentEngine> {
        self.engine.get_value()
    }

    pub fn chain(&self) -> ChainIdentity {
        self.engine().config().chain.clone()
    }

    /// Reactive connection phase
    pub fn phase(&self) -> ConnectionPhase {
        let expected = self.engine().expected_chain_id();
        self.state.with(|state| state.connection.phase(expected))
    }

    pub fn sync(&self) {
        self.state.set(self.engine().snapshot());
    }

    /// Run an engine action, keeping the signal mirror current until it settles.
    fn run<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<AgentEngine>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let ctx = *self;
        let engine = self.engine();
        let settled = Rc::new(Cell::new(false));

        let watching = Rc::clone(&settled);
        spawn_local(async move {
            while !watching.get() {
                ctx.sync();
                TimeoutFuture::new(IN_FLIGHT_SYNC_MS).await;
            }
        });

        spawn_local(async move {
            action(engine).await;
            settled.set(true);
            ctx.sync();
        });
    }

    pub fn connect(&self) {
        let error = self.error;
        error.set(None);
        self.run(move |engine| async move {
            if let Err(e) = engine.connect().await {
                log::warn!("Connect failed: {}", e);
                error.set(Some(connect_message(&e)));
            }
        });
    }

    pub fn disconnect(&self) {
        self.error.set(None);
        self.engine().disconnect();
        self.sync();
    }

    pub fn refresh(&self) {
        self.run(|engine| async move {
            if let Err(e) = engine.refresh().await {
                log::warn!("Refresh failed: {}", e);
            }
        });
    }

    pub fn register(&self, metadata_uri: String) {
        self.run(move |engine| async move {
            if let Err(e) = engine.register(&metadata_uri).await {
                log::warn!("Register failed: {}", e);
            }
        });
    }

    pub fn update_metadata(&self, metadata_uri: String) {
        self.run(move |engine| async move {
            if let Err(e) = engine.update_metadata(&metadata_uri).await {
                log::warn!("Metadata update failed: {}", e);
            }
        });
    }

    pub fn follow(&self, agent: Address) {
        self.run(move |engine| async move {
            if let Err(e) = engine.follow(agent).await {
                log::warn!("Follow failed: {}", e);
            }
        });
    }

    pub fn unfollow(&self, agent: Address) {
        self.run(move |engine| async move {
            if let Err(e) = engine.unfollow(agent).await {
                log::warn!("Unfollow failed: {}", e);
            }
        });
    }
}

fn connect_message(error: &EngineError) -> String {
    match error {
        EngineError::UserRejected => "Connection request was rejected in the wallet".to_string(),
        EngineError::ProviderUnavailable => {
            "No wallet found. Install the Universal Profile browser extension".to_string()
        }
        other => other.to_string(),
    }
}

/// Locate the wallet, build the engine, restore any authorized session and start
/// draining wallet events.
pub fn provide_engine_context() -> EngineContext {
    let adapter = ProviderAdapter::locate(
        InjectedProvider::platform().map(|p| Arc::new(p) as Arc<dyn Eip1193Provider>),
        InjectedProvider::generic().map(|p| Arc::new(p) as Arc<dyn Eip1193Provider>),
    );
    if adapter.is_none() {
        log::warn!("No EIP-1193 wallet injected into this page");
    }

    let context = EngineContext::new(AgentEngine::new(EngineConfig::default(), adapter));
    provide_context(context);

    if context.engine().provider_available() {
        context.run(|engine| async move {
            match engine.restore().await {
                Ok(true) => log::info!("Restored wallet session"),
                Ok(false) => log::debug!("No authorized account to restore"),
                Err(e) => log::warn!("Session restore failed: {}", e),
            }
        });

        let engine = context.engine();
        spawn_local(async move {
            while engine.next_event().await {
                context.sync();
            }
            log::debug!("Wallet event loop stopped");
        });
    }

    on_cleanup(move || context.engine().shutdown());

    context
}

pub fn use_engine_context() -> EngineContext {
    expect_context::<EngineContext>()
}
