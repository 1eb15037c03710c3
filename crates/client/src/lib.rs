//! Headless client for the banana battler.
//!
//! The binary is the composition root: it reads configuration, installs
//! logging, asks `client-bootstrap` for a session and then paces
//! [`runtime::Runtime::tick`] in real time. The pieces worth testing on
//! their own live here.
//!
//! - [`autopilot`] plays the idle loop: spends bananas and moves between levels
//! - [`logging`] sets up stderr and per-session file logging
//! - [`status`] renders the periodic one-line session summary
pub mod autopilot;
pub mod logging;
pub mod status;

pub use autopilot::Autopilot;
pub use status::StatusLine;
