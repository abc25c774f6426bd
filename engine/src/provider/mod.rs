//! Wallet provider access.

mod adapter;

pub use adapter::ProviderAdapter;
pub(crate) use adapter::to_addresses;
