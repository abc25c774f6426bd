//! Transaction commands, sent from the node-managed `--from` account.

use agent_engine::{AgentEngine, ConnectionPhase, EngineError, TxReceipt};
use alloy_primitives::Address;
use anyhow::{bail, Context};
use shared::TransactionReport;
use tracing::{info, warn};

use crate::output::Output;

/// Connect the engine to the `--from` account and check the node's chain.
pub async fn open_session(engine: &AgentEngine, from: Option<Address>) -> anyhow::Result<()> {
    let from = from.context("Transactions need a sender; pass --from or set AGENT_FROM")?;

    let connection = engine.connect().await.context("Failed to open session")?;
    if connection.account != Some(from) {
        bail!("Node did not accept {from} as the sending account");
    }

    match engine.phase() {
        ConnectionPhase::ConnectedCorrectChain => {
            info!("Sending from {} on {}", from, engine.config().chain.name);
            Ok(())
        }
        ConnectionPhase::ConnectedWrongChain => bail!(
            "RPC endpoint is on chain {}, expected {} ({})",
            connection
                .chain_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            engine.expected_chain_id(),
            engine.config().chain.name,
        ),
        phase => bail!("Session not ready: {phase}"),
    }
}

/// Print the outcome of a write and the refreshed agent record.
pub fn report(
    engine: &AgentEngine,
    result: agent_engine::Result<TxReceipt>,
    out: &Output,
) -> anyhow::Result<()> {
    match result {
        Ok(receipt) => {
            let report = TransactionReport {
                transaction_hash: receipt.transaction_hash.to_string(),
                block_number: receipt.block_number,
                success: true,
                explorer_url: engine.tx_link(&receipt.transaction_hash),
            };
            out.emit(&report, || {
                let record = engine.agent();
                let block = report
                    .block_number
                    .map(|n| format!(" in block {n}"))
                    .unwrap_or_default();
                format!(
                    "Confirmed{block}\n  {}\n  Registered: {}  Reputation: {}  Followers: {}  Following: {}",
                    report.explorer_url,
                    record.is_registered,
                    record.reputation_score,
                    record.follower_count(),
                    record.following_count(),
                )
            })
        }
        Err(EngineError::Reverted(hash)) => {
            let report = TransactionReport {
                transaction_hash: hash.to_string(),
                block_number: None,
                success: false,
                explorer_url: engine.tx_link(&hash),
            };
            if out.is_json() {
                out.emit(&report, String::new)?;
            }
            warn!("Transaction {} reverted", hash);
            bail!("Transaction reverted: {}", report.explorer_url)
        }
        Err(e) => Err(e.into()),
    }
}
