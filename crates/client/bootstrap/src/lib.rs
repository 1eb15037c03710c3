//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, content assembly, and runtime setup that can
//! be reused by the headless binary or any future front-end.
pub mod builder;
pub mod config;
pub mod content;

pub use builder::{SessionBuilder, SessionSetup};
pub use config::ClientConfig;
pub use content::{ContentProvider, DataDirContent};
