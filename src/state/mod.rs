//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `EngineState`: the crawl engine's lifecycle (idle, running, draining, done)

mod engine_state;

pub use engine_state::EngineState;
