use std::collections::BTreeSet;

use crate::combat::ActorId;
use crate::env::{LevelDefinition, WaveDefinition};
use crate::time::SimTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    /// No level loaded.
    Idle,
    /// The current wave still has spawns to hand out.
    Spawning,
    /// Everything spawned; waiting for the live set to empty.
    Clearing,
    /// Every wave was cleared. Terminal until another `start_level`.
    LevelComplete,
}

/// One enemy the engine should create now.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnDirective {
    pub enemy: String,
    /// Zero-based wave index.
    pub wave: usize,
    pub spawn_distance: f32,
}

/// Progress notifications produced by the sequencer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WaveSignal {
    /// `wave` is zero-based.
    WaveStarted { wave: usize },
    WaveCompleted { wave: usize },
    LevelCompleted,
}

#[derive(Clone, Copy, Debug, Default)]
struct SpawnCursor {
    entry: usize,
    emitted: u32,
    next_spawn_at: SimTime,
}

#[derive(Clone, Debug)]
pub struct WaveSequencer {
    level: Option<LevelDefinition>,
    wave_index: usize,
    phase: WavePhase,
    cursor: SpawnCursor,
    live: BTreeSet<ActorId>,
}

impl Default for WaveSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveSequencer {
    pub fn new() -> Self {
        Self {
            level: None,
            wave_index: 0,
            phase: WavePhase::Idle,
            cursor: SpawnCursor::default(),
            live: BTreeSet::new(),
        }
    }

    /// Loads `level` and begins its first wave, abandoning any wave in progress.
    pub fn start_level(&mut self, level: LevelDefinition, now: SimTime) -> Vec<WaveSignal> {
        self.level = Some(level);
        self.wave_index = 0;
        self.live.clear();
        self.start_next_wave(now)
    }

    /// Drops the loaded level and forgets tracked actors.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Begins the wave at the current index, or completes the level when none remain.
    fn start_next_wave(&mut self, now: SimTime) -> Vec<WaveSignal> {
        if self.wave_index >= self.total_waves() {
            self.phase = WavePhase::LevelComplete;
            return vec![WaveSignal::LevelCompleted];
        }
        self.phase = WavePhase::Spawning;
        self.cursor = SpawnCursor {
            entry: 0,
            emitted: 0,
            next_spawn_at: now,
        };
        vec![WaveSignal::WaveStarted {
            wave: self.wave_index,
        }]
    }

    /// Hands out every spawn whose time has come.
    ///
    /// Entries are walked in order. Each spawn is followed by the entry's
    /// delay, the last one included, and the wave counts as fully spawned once
    /// that trailing delay has elapsed.
    pub fn release_due(&mut self, now: SimTime) -> Vec<SpawnDirective> {
        let mut released = Vec::new();
        if self.phase != WavePhase::Spawning {
            return released;
        }
        let Some(wave) = self.current_wave().cloned() else {
            self.phase = WavePhase::Clearing;
            return released;
        };

        while self.cursor.next_spawn_at <= now {
            let Some(entry) = wave.spawns.get(self.cursor.entry) else {
                self.phase = WavePhase::Clearing;
                break;
            };
            if self.cursor.emitted >= entry.count {
                self.cursor.entry += 1;
                self.cursor.emitted = 0;
                continue;
            }

            released.push(SpawnDirective {
                enemy: entry.enemy.clone(),
                wave: self.wave_index,
                spawn_distance: wave.spawn_distance,
            });
            self.cursor.emitted += 1;
            self.cursor.next_spawn_at = self.cursor.next_spawn_at.saturating_add(entry.delay_ms());
        }
        released
    }

    /// Adds a spawned actor to the live set of the current wave.
    pub fn track(&mut self, actor: ActorId) {
        self.live.insert(actor);
    }

    pub fn untrack(&mut self, actor: ActorId) -> bool {
        self.live.remove(&actor)
    }

    /// Drops tracked actors for which `is_present` returns `false`.
    pub fn prune(&mut self, mut is_present: impl FnMut(ActorId) -> bool) {
        self.live.retain(|id| is_present(*id));
    }

    /// Liveness check: completes the current wave and starts the next once
    /// spawning is done and nothing tracked is left alive.
    pub fn update(&mut self, now: SimTime) -> Vec<WaveSignal> {
        if self.phase != WavePhase::Clearing || !self.live.is_empty() {
            return Vec::new();
        }
        let mut signals = vec![WaveSignal::WaveCompleted {
            wave: self.wave_index,
        }];
        self.wave_index += 1;
        signals.extend(self.start_next_wave(now));
        signals
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn level(&self) -> Option<&LevelDefinition> {
        self.level.as_ref()
    }

    pub fn next_level(&self) -> Option<&str> {
        self.level.as_ref().and_then(|level| level.next_level.as_deref())
    }

    pub fn is_level_complete(&self) -> bool {
        self.phase == WavePhase::LevelComplete
    }

    pub fn is_spawning_finished(&self) -> bool {
        matches!(self.phase, WavePhase::Clearing | WavePhase::LevelComplete)
    }

    pub fn current_wave(&self) -> Option<&WaveDefinition> {
        self.level.as_ref()?.waves.get(self.wave_index)
    }

    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    /// One-based wave number for display, capped at the wave count.
    pub fn current_wave_number(&self) -> usize {
        (self.wave_index + 1).min(self.total_waves())
    }

    pub fn total_waves(&self) -> usize {
        self.level.as_ref().map_or(0, |level| level.waves.len())
    }

    pub fn total_enemies_in_level(&self) -> u32 {
        self.level.as_ref().map_or(0, LevelDefinition::total_enemies)
    }

    pub fn active_enemy_count(&self) -> usize {
        self.live.len()
    }
}
