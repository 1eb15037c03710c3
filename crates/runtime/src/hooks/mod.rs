//! Presentation hooks driven by simulation events.
//!
//! The runtime never waits on a hook: cues are fire-and-forget and a sink that
//! drops them leaves the simulation unaffected.

mod audio;

pub use audio::{AudioCue, SoundSink, TracingSoundSink};
