use core::fmt;

use crate::time::SimTime;

/// Stable handle of a spawned actor. Never reused within a battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// The player. Walks toward negative x.
    Monkey,
    /// Enemies. Spawn behind the player and walk toward positive x.
    Banana,
}

impl Faction {
    /// Sign of the walking direction along the x axis.
    pub const fn direction(self) -> f32 {
        match self {
            Faction::Monkey => -1.0,
            Faction::Banana => 1.0,
        }
    }

    pub const fn opponent(self) -> Faction {
        match self {
            Faction::Monkey => Faction::Banana,
            Faction::Banana => Faction::Monkey,
        }
    }
}

/// Snapshot of the numbers combat reads.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub max_health: f32,
    pub damage: f32,
    pub cooldown_ms: u64,
    pub speed: f32,
    pub range: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Player,
    Enemy {
        definition: String,
        /// Bananas paid out when this actor dies.
        reward: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatState {
    Moving,
    Fighting { target: ActorId },
    /// Terminal. Dead actors neither move nor attack.
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Survived,
    /// This hit was the lethal one. Reported exactly once per actor.
    Killed,
    /// The actor was already dead; nothing changed.
    AlreadyDead,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatActor {
    pub id: ActorId,
    pub faction: Faction,
    pub kind: ActorKind,
    pub position: f32,
    pub stats: CombatStats,
    health: f32,
    state: CombatState,
    next_attack_at: SimTime,
}

impl CombatActor {
    pub fn new(
        id: ActorId,
        faction: Faction,
        kind: ActorKind,
        position: f32,
        stats: CombatStats,
    ) -> Self {
        Self {
            id,
            faction,
            kind,
            position,
            stats,
            health: stats.max_health,
            state: CombatState::Moving,
            next_attack_at: SimTime::ZERO,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn target(&self) -> Option<ActorId> {
        match self.state {
            CombatState::Fighting { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != CombatState::Dead
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    /// Bananas owed to the killer's side, zero for the player.
    pub fn reward(&self) -> u64 {
        match &self.kind {
            ActorKind::Enemy { reward, .. } => *reward,
            ActorKind::Player => 0,
        }
    }

    pub fn next_attack_at(&self) -> SimTime {
        self.next_attack_at
    }

    pub fn can_attack(&self, now: SimTime) -> bool {
        matches!(self.state, CombatState::Fighting { .. }) && now >= self.next_attack_at
    }

    /// Signed distance from this actor to `position` along its walking direction.
    pub fn distance_ahead(&self, position: f32) -> f32 {
        (position - self.position) * self.faction.direction()
    }

    /// Applies `amount` of damage. Health reaching exactly zero is lethal.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::AlreadyDead;
        }
        self.health -= amount.max(0.0);
        if self.health <= 0.0 {
            self.health = 0.0;
            self.state = CombatState::Dead;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Survived
        }
    }

    pub fn heal_full(&mut self) {
        if self.is_alive() {
            self.health = self.stats.max_health;
        }
    }

    /// Replaces the stat snapshot, keeping current health (capped at the new maximum).
    pub fn apply_stats(&mut self, stats: CombatStats) {
        self.stats = stats;
        if self.is_alive() {
            self.health = self.health.min(stats.max_health);
        }
    }

    pub(crate) fn engage(&mut self, target: ActorId) {
        if self.is_alive() {
            self.state = CombatState::Fighting { target };
        }
    }

    pub(crate) fn disengage(&mut self) {
        if self.is_alive() {
            self.state = CombatState::Moving;
        }
    }

    pub(crate) fn record_attack(&mut self, now: SimTime) {
        self.next_attack_at = now.saturating_add(self.stats.cooldown_ms);
    }
}
