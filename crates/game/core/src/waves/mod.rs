//! Ordered playback of a level's waves.
//!
//! The sequencer does not create actors itself. [`WaveSequencer::release_due`]
//! hands out spawn directives as their time comes, the engine reports which
//! actors it created via [`WaveSequencer::track`], and
//! [`WaveSequencer::update`] advances to the next wave only once the current
//! one has finished spawning and every tracked actor is gone.

mod sequencer;

pub use sequencer::{SpawnDirective, WavePhase, WaveSequencer, WaveSignal};
