//! Fixed-order simulation step.
//!
//! [`GameEngine::step`] advances the clock and then runs, in this order:
//!
//! 1. pending progression events (refresh the player, full heal on evolution)
//! 2. spawn release from the wave sequencer
//! 3. movement and range probing
//! 4. attack resolution
//! 5. death and reward processing
//! 6. wave liveness (next wave or level completion)
//!
//! Commands such as upgrades are applied by the caller before the step that
//! should observe them, so a recorded command log replays identically.
mod events;

pub use events::{GameEvent, TickChanges, TickReport};

use crate::combat::{ActorId, ActorKind, Battlefield, CombatActor, Faction};
use crate::config::GameConfig;
use crate::economy::Wallet;
use crate::env::{GameEnv, OracleError};
use crate::manager::{StatsEvent, StatsManager};
use crate::time::SimTime;
use crate::waves::{WaveSequencer, WaveSignal};

/// Mutable collaborators borrowed for one step.
pub struct EngineContext<'a> {
    pub wallet: &'a mut Wallet,
    pub stats: &'a mut StatsManager,
    pub env: GameEnv<'a>,
}

#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    clock: SimTime,
    battlefield: Battlefield,
    waves: WaveSequencer,
    player: Option<ActorId>,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            clock: SimTime::ZERO,
            battlefield: Battlefield::new(),
            waves: WaveSequencer::new(),
            player: None,
        }
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.battlefield
    }

    pub fn waves(&self) -> &WaveSequencer {
        &self.waves
    }

    pub fn player(&self) -> Option<ActorId> {
        self.player
    }

    pub fn player_actor(&self) -> Option<&CombatActor> {
        self.player.and_then(|id| self.battlefield.get(id))
    }

    pub fn is_player_alive(&self) -> bool {
        self.player_actor().is_some_and(CombatActor::is_alive)
    }

    /// Places a fresh player built from the current stats, replacing any previous one.
    pub fn spawn_player(&mut self, stats: &StatsManager) -> ActorId {
        if let Some(previous) = self.player.take() {
            self.battlefield.remove(previous);
        }
        let id = self.battlefield.spawn(
            Faction::Monkey,
            ActorKind::Player,
            self.config.player_spawn_x,
            stats.player_stats(),
        );
        self.player = Some(id);
        id
    }

    /// Loads a level, discarding enemies and spawns left over from the previous one.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownLevel` if `level_id` is not in the environment.
    pub fn start_level(
        &mut self,
        level_id: &str,
        env: GameEnv<'_>,
    ) -> Result<Vec<GameEvent>, OracleError> {
        let level = env.level(level_id)?.clone();
        self.battlefield.clear_faction(Faction::Banana);

        let mut events = vec![GameEvent::LevelStarted {
            level: level.id.clone(),
            waves: level.waves.len(),
        }];
        let signals = self.waves.start_level(level, self.clock);
        self.translate_signals(signals, &mut events);
        Ok(events)
    }

    /// Clears the battlefield and the sequencer. The clock keeps running.
    pub fn reset(&mut self) {
        self.battlefield.clear();
        self.waves.reset();
        self.player = None;
    }

    pub fn step(&mut self, dt_ms: u64, ctx: EngineContext<'_>) -> TickReport {
        let EngineContext { wallet, stats, env } = ctx;
        self.clock = self.clock.saturating_add(dt_ms);
        let mut report = TickReport {
            time: self.clock,
            ..TickReport::default()
        };

        self.apply_stats_events(stats, &mut report);
        self.release_spawns(env, &mut report);
        self.battlefield.advance(dt_ms, &mut report.events);
        self.battlefield.resolve_attacks(self.clock, &mut report.events);
        self.process_deaths(wallet, &mut report);
        self.check_waves(&mut report);

        report
    }

    fn apply_stats_events(&mut self, stats: &mut StatsManager, report: &mut TickReport) {
        let pending = stats.take_pending_events();
        if pending.is_empty() {
            return;
        }
        let evolved = pending
            .iter()
            .any(|event| matches!(event, StatsEvent::Evolved { .. }));
        let snapshot = stats.player_stats();

        if let Some(player) = self.player.and_then(|id| self.battlefield.get_mut(id)) {
            player.apply_stats(snapshot);
            if evolved {
                player.heal_full();
            }
            report.changes |= TickChanges::PLAYER;
        }
    }

    fn release_spawns(&mut self, env: GameEnv<'_>, report: &mut TickReport) {
        let directives = self.waves.release_due(self.clock);
        if directives.is_empty() {
            return;
        }
        let anchor = self
            .player_actor()
            .map_or(self.config.player_spawn_x, |player| player.position);

        for directive in directives {
            let definition = match env.enemy(&directive.enemy) {
                Ok(definition) => definition,
                Err(error) => {
                    report.events.push(GameEvent::SpawnSkipped {
                        enemy: directive.enemy,
                        error,
                    });
                    continue;
                }
            };
            let position = anchor - Faction::Banana.direction() * directive.spawn_distance;
            let kind = ActorKind::Enemy {
                definition: definition.id.clone(),
                reward: definition.reward,
            };
            let id = self.battlefield.spawn(
                Faction::Banana,
                kind,
                position,
                definition.combat_stats(),
            );
            self.waves.track(id);
            report.events.push(GameEvent::ActorSpawned {
                actor: id,
                faction: Faction::Banana,
                definition: definition.id.clone(),
                position,
            });
            report.changes |= TickChanges::ROSTER;
        }
    }

    fn process_deaths(&mut self, wallet: &mut Wallet, report: &mut TickReport) {
        for actor in self.battlefield.remove_dead() {
            report.changes |= TickChanges::ROSTER;
            report.events.push(GameEvent::ActorDied {
                actor: actor.id,
                faction: actor.faction,
            });
            self.waves.untrack(actor.id);

            if actor.is_player() {
                if self.player == Some(actor.id) {
                    self.player = None;
                }
                report.changes |= TickChanges::PLAYER;
                report.events.push(GameEvent::PlayerDefeated { actor: actor.id });
                continue;
            }

            let reward = actor.reward();
            if reward > 0 {
                wallet.add(reward);
                report.changes |= TickChanges::WALLET;
                report.events.push(GameEvent::BananasEarned {
                    amount: reward,
                    balance: wallet.balance(),
                });
            }
        }
    }

    fn check_waves(&mut self, report: &mut TickReport) {
        let battlefield = &self.battlefield;
        self.waves.prune(|id| battlefield.contains(id));

        let signals = self.waves.update(self.clock);
        if !signals.is_empty() {
            report.changes |= TickChanges::WAVE;
            self.translate_signals(signals, &mut report.events);
        }
    }

    fn translate_signals(&self, signals: Vec<WaveSignal>, events: &mut Vec<GameEvent>) {
        let level = self
            .waves
            .level()
            .map(|level| level.id.clone())
            .unwrap_or_default();
        let total = self.waves.total_waves();

        for signal in signals {
            events.push(match signal {
                WaveSignal::WaveStarted { wave } => GameEvent::WaveStarted {
                    level: level.clone(),
                    wave: wave + 1,
                    total,
                },
                WaveSignal::WaveCompleted { wave } => GameEvent::WaveCompleted {
                    level: level.clone(),
                    wave: wave + 1,
                },
                WaveSignal::LevelCompleted => GameEvent::LevelCompleted {
                    level: level.clone(),
                    next_level: self.waves.next_level().map(str::to_owned),
                },
            });
        }
    }
}

#[cfg(test)]
mod tests;
