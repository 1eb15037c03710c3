//! Session orchestration for the banana battler simulation.
//!
//! This crate wires the deterministic core to everything with side effects:
//! the command queue, save slots, the topic event bus and the audio hook.
//! Consumers build a [`Runtime`] and call [`Runtime::tick`] once per frame.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the session orchestrator and builder
//! - [`api`] exposes the commands and errors downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`hooks`] maps simulation events to presentation cues
//! - [`repository`] persists progression between sessions
pub mod api;
pub mod events;
pub mod hooks;
pub mod repository;
pub mod runtime;

pub use api::{Command, CommandOutcome, Result, RuntimeError};
pub use events::{Event, EventBus, Topic};
pub use hooks::{AudioCue, SoundSink, TracingSoundSink};
pub use repository::{
    FileProgressRepository, InMemoryProgressRepository, ProgressRepository, RepositoryError,
    SAVE_VERSION, SaveFile, default_save_dir,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, SessionPhase};
