use alloy_primitives::{hex, Address};
use alloy_sol_types::SolCall;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::error::ContractError;
use crate::rpc::parse_bytes;
use crate::signer::Signer;
use crate::tx::PendingTransaction;

/// A contract address bound to a signer.
///
/// Reads go through `eth_call` from the signer's account, writes through
/// `eth_sendTransaction`. The provider decides how (and whether) to sign.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    address: Address,
    signer: Signer,
    poll_interval: Duration,
}

impl ContractHandle {
    pub fn new(address: Address, signer: Signer, poll_interval: Duration) -> Self {
        Self {
            address,
            signer,
            poll_interval,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// `eth_call` against the latest block, decoding the return data of `C`.
    pub async fn read<C: SolCall>(&self, call: C) -> Result<C::Return, ContractError> {
        let params = json!([
            {
                "from": self.signer.address(),
                "to": self.address,
                "data": hex::encode_prefixed(call.abi_encode()),
            },
            "latest"
        ]);
        let raw = self.signer.provider().request("eth_call", params).await?;
        let bytes = parse_bytes(&raw)?;
        C::abi_decode_returns(&bytes).map_err(|e| ContractError::Decode {
            function: C::SIGNATURE,
            message: e.to_string(),
        })
    }

    /// `eth_sendTransaction` from the signer's account. Returns once the provider hands back a hash.
    pub async fn send<C: SolCall>(&self, call: C) -> Result<PendingTransaction, ContractError> {
        let params = json!([{
            "from": self.signer.address(),
            "to": self.address,
            "data": hex::encode_prefixed(call.abi_encode()),
        }]);
        let raw = self
            .signer
            .provider()
            .request("eth_sendTransaction", params)
            .await?;
        let pending = PendingTransaction::from_response(
            &raw,
            self.signer.provider().clone(),
            self.poll_interval,
        )?;
        debug!("{} submitted to {}: {}", C::SIGNATURE, self.address, pending.hash());
        Ok(pending)
    }
}
