//! Injected EIP-1193 wallets via wasm-bindgen
//!
//! The UP Browser Extension injects `window.lukso`; generic wallets inject `window.ethereum`.
//! Both speak EIP-1193, so one adapter type covers them.

use std::cell::RefCell;

use agent_engine::{Eip1193Provider, EventSink, ProviderError, ProviderEvent, ProviderEventKind};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// ============================================================================
// JAVASCRIPT INTEROP
// ============================================================================

#[wasm_bindgen(inline_js = "
export function findInjectedProvider(key) {
    const provider = window[key];
    if (provider && typeof provider.request === 'function') {
        return provider;
    }
    return null;
}

export async function providerRequest(provider, method, params) {
    return await provider.request({ method: method, params: params });
}

export function providerOn(provider, event, handler) {
    if (typeof provider.on === 'function') {
        provider.on(event, handler);
    }
}

export function providerRemoveListener(provider, event, handler) {
    if (typeof provider.removeListener === 'function') {
        provider.removeListener(event, handler);
    }
}

export function errorCode(error) {
    if (error && typeof error.code === 'number') {
        return error.code;
    }
    return undefined;
}

export function errorMessage(error) {
    if (!error) {
        return 'Unknown wallet error';
    }
    return error.message || String(error);
}
")]
extern "C" {
    fn findInjectedProvider(key: &str) -> JsValue;

    #[wasm_bindgen(catch)]
    async fn providerRequest(provider: &JsValue, method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    fn providerOn(provider: &JsValue, event: &str, handler: &js_sys::Function);

    fn providerRemoveListener(provider: &JsValue, event: &str, handler: &js_sys::Function);

    fn errorCode(error: &JsValue) -> Option<f64>;

    fn errorMessage(error: &JsValue) -> String;
}

// ============================================================================
// PROVIDER
// ============================================================================

struct Listener {
    kind: ProviderEventKind,
    handler: Closure<dyn FnMut(JsValue)>,
}

/// A wallet object injected into `window` by a browser extension.
pub struct InjectedProvider {
    name: &'static str,
    inner: JsValue,
    listeners: RefCell<Vec<Listener>>,
}

impl InjectedProvider {
    /// The UP Browser Extension (`window.lukso`).
    pub fn platform() -> Option<Self> {
        Self::find("lukso", "Universal Profile")
    }

    /// Any other EIP-1193 wallet (`window.ethereum`).
    pub fn generic() -> Option<Self> {
        Self::find("ethereum", "Injected wallet")
    }

    fn find(key: &str, name: &'static str) -> Option<Self> {
        let inner = findInjectedProvider(key);
        if inner.is_null() || inner.is_undefined() {
            log::debug!("No wallet at window.{}", key);
            return None;
        }

        log::info!("Found {} at window.{}", name, key);
        Some(Self {
            name,
            inner,
            listeners: RefCell::new(Vec::new()),
        })
    }
}

fn provider_error(error: JsValue) -> ProviderError {
    let message = errorMessage(&error);
    match errorCode(&error) {
        Some(code) => ProviderError::from_rpc(code as i64, message),
        None => ProviderError::Transport(message),
    }
}

fn event_from_payload(kind: ProviderEventKind, payload: JsValue) -> Option<ProviderEvent> {
    match kind {
        ProviderEventKind::AccountsChanged => {
            let parsed = serde_wasm_bindgen::from_value::<Vec<String>>(payload.clone()).map_err(|e| e.to_string());
            let event = accounts_event(parsed);
            if event.is_none() {
                log::warn!("Dropping malformed accountsChanged payload: {:?}", payload);
            }
            event
        }
        ProviderEventKind::ChainChanged => {
            // Wallets emit a hex string; a few older ones emit a number.
            let chain_id = payload
                .as_string()
                .or_else(|| payload.as_f64().map(|id| (id as u64).to_string()))
                .unwrap_or_default();
            Some(ProviderEvent::ChainChanged(chain_id))
        }
    }
}

/// An empty list means the wallet disconnected; an unparseable payload means nothing.
fn accounts_event(parsed: Result<Vec<String>, String>) -> Option<ProviderEvent> {
    parsed.ok().map(ProviderEvent::AccountsChanged)
}

#[async_trait(?Send)]
impl Eip1193Provider for InjectedProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let params = params
            .serialize(&serializer)
            .map_err(|e| ProviderError::InvalidResponse(format!("Unserializable params: {}", e)))?;

        let result = providerRequest(&self.inner, method, params)
            .await
            .map_err(provider_error)?;

        if result.is_null() || result.is_undefined() {
            return Ok(Value::Null);
        }

        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("{} returned {}", method, e)))
    }

    fn subscribe(&self, kind: ProviderEventKind, sink: EventSink) {
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            let Some(event) = event_from_payload(kind, payload) else {
                return;
            };
            if sink.try_send(event).is_err() {
                log::debug!("Dropped {} event: engine stopped listening", kind);
            }
        });

        providerOn(&self.inner, kind.as_str(), handler.as_ref().unchecked_ref());
        self.listeners.borrow_mut().push(Listener { kind, handler });
    }

    fn remove_all_listeners(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            providerRemoveListener(
                &self.inner,
                listener.kind.as_str(),
                listener.handler.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_accounts_payload_is_dropped() {
        assert_eq!(accounts_event(Err("invalid type: map".to_string())), None);
    }

    #[test]
    fn test_empty_accounts_payload_still_disconnects() {
        assert_eq!(accounts_event(Ok(Vec::new())), Some(ProviderEvent::AccountsChanged(Vec::new())));
    }
}
