use bitflags::bitflags;

use crate::combat::{ActorId, Faction};
use crate::env::OracleError;
use crate::time::SimTime;

/// Everything observable that happened during one step, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    ActorSpawned {
        actor: ActorId,
        faction: Faction,
        definition: String,
        position: f32,
    },
    TargetAcquired {
        actor: ActorId,
        target: ActorId,
    },
    TargetLost {
        actor: ActorId,
        target: ActorId,
    },
    ActorAttacked {
        attacker: ActorId,
        faction: Faction,
        target: ActorId,
        damage: f32,
    },
    ActorDamaged {
        actor: ActorId,
        faction: Faction,
        amount: f32,
        remaining: f32,
    },
    ActorDied {
        actor: ActorId,
        faction: Faction,
    },
    BananasEarned {
        amount: u64,
        balance: u64,
    },
    PlayerDefeated {
        actor: ActorId,
    },
    /// `wave` is one-based.
    WaveStarted {
        level: String,
        wave: usize,
        total: usize,
    },
    /// `wave` is one-based.
    WaveCompleted {
        level: String,
        wave: usize,
    },
    LevelStarted {
        level: String,
        waves: usize,
    },
    LevelCompleted {
        level: String,
        next_level: Option<String>,
    },
    /// A wave entry referenced content that does not exist; the slot was consumed.
    SpawnSkipped {
        enemy: String,
        error: OracleError,
    },
}

impl GameEvent {
    pub fn is_combat(&self) -> bool {
        matches!(
            self,
            Self::ActorSpawned { .. }
                | Self::TargetAcquired { .. }
                | Self::TargetLost { .. }
                | Self::ActorAttacked { .. }
                | Self::ActorDamaged { .. }
                | Self::ActorDied { .. }
                | Self::PlayerDefeated { .. }
        )
    }
}

bitflags! {
    /// Which parts of the session a step touched.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TickChanges: u8 {
        const WALLET = 1 << 0;
        const ROSTER = 1 << 1;
        const WAVE   = 1 << 2;
        const PLAYER = 1 << 3;
    }
}

/// Result of one [`super::GameEngine::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub time: SimTime,
    pub events: Vec<GameEvent>,
    pub changes: TickChanges,
}
