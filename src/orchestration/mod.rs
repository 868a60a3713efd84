//! Fetch a snapshot, compile it (memoized) and answer queries against it.

pub mod orchestrator;

pub use orchestrator::{OrchestrationError, Orchestrator};
