//! Public runtime API surface.
//!
//! Front-ends talk to the session only through [`Command`]s; every command
//! either applies completely and reports a [`CommandOutcome`] or is refused
//! with a [`RuntimeError`] and changes nothing.
mod commands;
mod errors;

pub use commands::{Command, CommandOutcome};
pub use errors::{Result, RuntimeError};
