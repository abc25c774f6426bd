//! # JSON-RPC HTTP Provider
//!
//! EIP-1193 over plain JSON-RPC. Used by `agentctl`, where the node manages the
//! sending account (`--from`) and signs `eth_sendTransaction` itself.
//!
//! HTTP has no push channel, so subscriptions are accepted and never fire.

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

use crate::error::ProviderError;
use crate::provider::{Eip1193Provider, EventSink, ProviderEventKind};

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
    account: Option<Address>,
    next_id: AtomicU64,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            account: None,
            next_id: AtomicU64::new(1),
        }
    }

    /// Pin the account reported by `eth_accounts` / `eth_requestAccounts`.
    ///
    /// Without one, account queries are forwarded to the node.
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        trace!("rpc #{} {} -> {}", id, method, self.url);

        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "{} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let parsed: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        match parsed.error {
            Some(err) => {
                debug!("rpc #{} {} failed: {} {}", id, method, err.code, err.message);
                Err(ProviderError::from_rpc(err.code, err.message))
            }
            // `"result": null` is a valid answer (e.g. a receipt that is not mined yet)
            None => Ok(parsed.result.unwrap_or(Value::Null)),
        }
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for HttpProvider {
    fn name(&self) -> &str {
        "json-rpc"
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        match (method, self.account) {
            ("eth_accounts" | "eth_requestAccounts", Some(account)) => Ok(json!([account])),
            // Nodes expose managed accounts through eth_accounts only.
            ("eth_requestAccounts", None) => self.call("eth_accounts", params).await,
            _ => self.call(method, params).await,
        }
    }

    fn subscribe(&self, kind: ProviderEventKind, _sink: EventSink) {
        debug!("{} subscription on {} is inert over HTTP", kind, self.url);
    }

    fn remove_all_listeners(&self) {}
}
