//! Topic-based event bus for runtime events.
//!
//! Simulation events, wallet and progression notifications and diagnostics
//! are published to topics; consumers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
