//! # Utilities Library
//!
//! Shared utility functions for environment variables and input validation.

pub mod envs;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_parse, get_env_parse_opt};
pub use validation::{validate_http_url, validate_metadata_uri, validate_not_empty};
