//! # Transaction Confirmation
//!
//! A submitted write is a [`PendingTransaction`]: the hash is known immediately, the
//! receipt arrives later. [`PendingTransaction::wait`] polls `eth_getTransactionReceipt`
//! until the node returns one. There is no deadline; a transaction that never lands
//! keeps the caller suspended.

use alloy_primitives::TxHash;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::ContractError;
use crate::provider::Eip1193Provider;
use crate::rpc::parse_quantity;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1_500);

/// Submitted, not yet confirmed.
#[derive(Clone)]
pub struct PendingTransaction {
    hash: TxHash,
    provider: Arc<dyn Eip1193Provider>,
    poll_interval: Duration,
}

impl PendingTransaction {
    pub fn new(hash: TxHash, provider: Arc<dyn Eip1193Provider>, poll_interval: Duration) -> Self {
        Self {
            hash,
            provider,
            poll_interval,
        }
    }

    /// Parse the `eth_sendTransaction` result into a pending transaction.
    pub fn from_response(
        value: &Value,
        provider: Arc<dyn Eip1193Provider>,
        poll_interval: Duration,
    ) -> Result<Self, ContractError> {
        let raw = value
            .as_str()
            .ok_or_else(|| ContractError::InvalidTxHash(value.to_string()))?;
        let hash = raw
            .parse::<TxHash>()
            .map_err(|_| ContractError::InvalidTxHash(raw.to_string()))?;
        Ok(Self::new(hash, provider, poll_interval))
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Wait for the receipt. A reverted transaction still yields `Ok` with `success == false`.
    pub async fn wait(self) -> Result<TxReceipt, ContractError> {
        let mut polls: u64 = 0;
        loop {
            let raw = self
                .provider
                .request("eth_getTransactionReceipt", json!([self.hash]))
                .await?;
            if !raw.is_null() {
                let receipt = TxReceipt::from_json(&raw)?;
                debug!(
                    "Receipt for {} after {} polls: success={}",
                    self.hash, polls, receipt.success
                );
                return Ok(receipt);
            }
            polls += 1;
            trace!("No receipt yet for {} (poll {})", self.hash, polls);
            sleep(self.poll_interval).await;
        }
    }
}

impl fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTransaction")
            .field("hash", &self.hash)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

/// The parts of a receipt the engine looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    pub success: bool,
}

impl TxReceipt {
    pub fn from_json(value: &Value) -> Result<Self, ContractError> {
        let hash = value
            .get("transactionHash")
            .and_then(Value::as_str)
            .ok_or_else(|| ContractError::InvalidReceipt("missing transactionHash".to_string()))?;
        let transaction_hash = hash
            .parse::<TxHash>()
            .map_err(|_| ContractError::InvalidReceipt(format!("bad transactionHash {hash}")))?;

        let quantity = |key: &str| value.get(key).and_then(Value::as_str).and_then(parse_quantity);

        // Pre-Byzantium receipts carry no status field.
        let success = match value.get("status") {
            None | Some(Value::Null) => true,
            Some(status) => status.as_str().and_then(parse_quantity).ok_or_else(|| {
                ContractError::InvalidReceipt(format!("bad status {status}"))
            })? == 1,
        };

        Ok(Self {
            transaction_hash,
            block_number: quantity("blockNumber"),
            gas_used: quantity("gasUsed"),
            success,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}
