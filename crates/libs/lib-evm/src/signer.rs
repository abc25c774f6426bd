use alloy_primitives::Address;
use std::fmt;
use std::sync::Arc;

use crate::provider::Eip1193Provider;

/// An account paired with the provider that signs for it.
///
/// Holds no key material. Re-derived whenever the account or chain changes.
#[derive(Clone)]
pub struct Signer {
    address: Address,
    provider: Arc<dyn Eip1193Provider>,
}

impl Signer {
    pub fn new(address: Address, provider: Arc<dyn Eip1193Provider>) -> Self {
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &Arc<dyn Eip1193Provider> {
        &self.provider
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .field("provider", &self.provider.name())
            .finish()
    }
}
