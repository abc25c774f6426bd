//! # Shared Data Transfer Objects Library
//!
//! This library defines the data model shared by the synchronization engine, the
//! `agentctl` command line, and the browser front end.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::agent`]**: The cached on-chain agent record and CLI report types
//!   - **[`dto::chain`]**: Expected network descriptor and contract addresses
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::short_address`]**: `0x1234...abcd` style shortening
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using `serde`:
//! - Field names use **snake_case**
//! - Addresses serialize as `0x`-prefixed hex strings
//! - Reputation scores are decimal strings so that `uint256` values survive JSON round trips
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::agent::AgentRecord;
//! use shared::dto::chain::ChainIdentity;
//! use shared::utils::short_address;
//!
//! let record = AgentRecord::default();
//! assert!(!record.is_registered);
//! assert_eq!(record.reputation_score, "0");
//!
//! let chain = ChainIdentity::lukso_testnet();
//! assert!(chain.is_expected(4201));
//!
//! assert_eq!(
//!     short_address("0x98b35B543806a1542fcF63883b2AaE224e3Bc66E"),
//!     "0x98b3...c66E"
//! );
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
