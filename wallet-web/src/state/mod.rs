//! Application state

pub mod engine;

pub use engine::{provide_engine_context, use_engine_context, EngineContext};
