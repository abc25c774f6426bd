//! Configuration and error types shared by every engine component.

pub mod config;
pub mod error;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
