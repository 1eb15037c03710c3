//! Audio cues for attacks, hits and deaths.

use game_core::{Faction, GameEvent};

/// A sound the presentation layer should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// `faction` swung at something.
    Attack { faction: Faction },
    /// A member of `faction` was hit and survived.
    Hurt { faction: Faction },
    Death { faction: Faction },
}

impl AudioCue {
    /// The cue triggered by `event`, if any.
    ///
    /// A lethal hit maps to nothing here; the death cue follows from
    /// [`GameEvent::ActorDied`] in the same step.
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ActorAttacked { faction, .. } => Some(Self::Attack { faction: *faction }),
            GameEvent::ActorDamaged {
                faction, remaining, ..
            } if *remaining > 0.0 => Some(Self::Hurt { faction: *faction }),
            GameEvent::ActorDied { faction, .. } => Some(Self::Death { faction: *faction }),
            _ => None,
        }
    }

    pub fn faction(&self) -> Faction {
        match self {
            Self::Attack { faction } | Self::Hurt { faction } | Self::Death { faction } => *faction,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::Hurt { .. } => "hurt",
            Self::Death { .. } => "death",
        }
    }
}

/// Audio collaborator. Implementations must return immediately.
pub trait SoundSink: Send + Sync {
    fn play(&self, cue: AudioCue);
}

/// Default sink for headless sessions: records cues at `trace` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSoundSink;

impl SoundSink for TracingSoundSink {
    fn play(&self, cue: AudioCue) {
        tracing::trace!(cue = cue.name(), faction = %cue.faction(), "play sound");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ActorId;

    #[test]
    fn lethal_hit_only_cues_death() {
        let hit = GameEvent::ActorDamaged {
            actor: ActorId(1),
            faction: Faction::Banana,
            amount: 5.0,
            remaining: 0.0,
        };
        let died = GameEvent::ActorDied {
            actor: ActorId(1),
            faction: Faction::Banana,
        };

        assert_eq!(AudioCue::from_event(&hit), None);
        assert_eq!(
            AudioCue::from_event(&died),
            Some(AudioCue::Death {
                faction: Faction::Banana
            })
        );
    }

    #[test]
    fn surviving_hit_cues_hurt() {
        let hit = GameEvent::ActorDamaged {
            actor: ActorId(0),
            faction: Faction::Monkey,
            amount: 2.0,
            remaining: 98.0,
        };
        let cue = AudioCue::from_event(&hit).unwrap();
        assert_eq!(cue.name(), "hurt");
        assert_eq!(cue.faction(), Faction::Monkey);
    }
}
