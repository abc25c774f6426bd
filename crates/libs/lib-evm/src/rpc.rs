//! JSON-RPC value helpers.

use alloy_primitives::Bytes;
use serde_json::Value;

use crate::error::ProviderError;

/// Parse a hex (`0x1069`) or decimal (`4201`) quantity.
pub fn parse_quantity(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() => u64::from_str_radix(hex, 16).ok(),
        Some(_) => None,
        None => raw.parse().ok(),
    }
}

/// Chain id out of an `eth_chainId` result or a `chainChanged` payload.
pub fn parse_chain_id(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => parse_quantity(s),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

/// Account list out of an `eth_accounts` / `eth_requestAccounts` result.
pub fn parse_accounts(value: Value) -> Result<Vec<String>, ProviderError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(ProviderError::InvalidResponse(format!(
                    "expected account string, got {other}"
                ))),
            })
            .collect(),
        other => Err(ProviderError::InvalidResponse(format!(
            "expected account list, got {other}"
        ))),
    }
}

/// Hex-encoded `eth_call` return data.
pub fn parse_bytes(value: &Value) -> Result<Bytes, ProviderError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse(format!("expected hex data, got {value}")))?;
    raw.parse()
        .map_err(|e| ProviderError::InvalidResponse(format!("invalid hex data {raw}: {e}")))
}
