//! # Contracts
//!
//! `sol!` ABIs plus typed handles over [`ContractHandle`]. A handle is cheap to
//! clone and is rebuilt, not mutated, when the signer changes.

pub mod abi;
mod handle;
mod reputation;
mod social_graph;

pub use handle::ContractHandle;
pub use reputation::ReputationLedger;
pub use social_graph::SocialGraph;
