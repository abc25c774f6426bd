//! # Data Transfer Objects (DTOs)
//!
//! Data structures shared between the engine, the command line and the browser front end.
//!
//! ## Module Organization
//!
//! - [`agent`] - Agent record snapshot plus the report shapes printed by `agentctl --json`
//! - [`chain`] - Expected network descriptor and the two contract addresses
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "is_registered": true,
//!   "metadata_uri": "ipfs://Qm123",
//!   "reputation_score": "150",
//!   "followers": ["0x98b35b543806a1542fcf63883b2aae224e3bc66e"],
//!   "following": []
//! }
//! ```

pub mod agent;
pub mod chain;

pub use agent::*;
pub use chain::*;
