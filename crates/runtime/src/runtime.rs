//! High-level session orchestrator.
//!
//! The runtime owns the wallet, the progression manager and the engine, and
//! is the only place where they meet I/O. Every frame the host calls
//! [`Runtime::tick`], which applies queued commands first and then advances
//! the simulation, so a recorded command log replays identically.
//!
//! Wallet and progression observers are plain closures, which keeps the
//! runtime on the thread that created it; hosts drive it from their main
//! loop rather than a spawned task.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use game_content::GameContent;
use game_core::{
    BalanceChanged, Catalog, EngineContext, FormOracle, GameConfig, GameEngine, GameError,
    GameEvent, LevelOracle, ProgressSave, StatsEvent, StatsManager, TickReport, Wallet,
};

use crate::api::{Command, CommandOutcome, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::hooks::{AudioCue, SoundSink, TracingSoundSink};
use crate::repository::{ProgressRepository, SaveFile};

/// Coarse session state. Ticks only advance the simulation in `Battle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Nothing loaded yet; waiting for a level.
    Start,
    Battle,
    Paused,
    /// The player was defeated; upgrades still work, a level start retries.
    Results,
}

impl SessionPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Battle => "battle",
            Self::Paused => "paused",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime configuration shared across the orchestrator and its collaborators.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Repository slot this session reads and writes.
    pub save_slot: String,
    /// Ignore (and overwrite) whatever the slot holds when the session starts.
    pub reset_on_start: bool,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            save_slot: "main".to_owned(),
            reset_on_start: false,
            event_buffer_size: 256,
        }
    }
}

/// One play session over a content set.
pub struct Runtime {
    config: RuntimeConfig,
    catalog: Catalog,
    engine: GameEngine,
    wallet: Wallet,
    stats: StatsManager,
    repository: Option<Arc<dyn ProgressRepository>>,
    sound: Box<dyn SoundSink>,
    bus: EventBus,
    phase: SessionPhase,
    commands: VecDeque<Command>,
    level: Option<String>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn stats(&self) -> &StatsManager {
        &self.stats
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Id of the level most recently started, if any.
    pub fn current_level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    /// Level that follows the current one according to the content.
    pub fn next_level(&self) -> Option<&str> {
        let current = self.level.as_deref()?;
        self.catalog.level(current)?.next_level.as_deref()
    }

    /// Cloneable handle to the event bus.
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Queues a command for the start of the next tick.
    pub fn enqueue(&mut self, command: Command) {
        tracing::trace!(command = %command, "command queued");
        self.commands.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Applies a command immediately.
    ///
    /// Refusals change nothing; they are returned and also published on
    /// [`Topic::Diagnostics`].
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        let result = self.apply(&command);
        match &result {
            Ok(outcome) => {
                tracing::debug!(command = %command, ?outcome, "command applied");
            }
            Err(error) => {
                tracing::debug!(
                    command = %command,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "command refused: {}",
                    error
                );
                self.bus.publish(Event::CommandRejected {
                    command: command.to_string(),
                    code: error.error_code(),
                    message: error.to_string(),
                });
            }
        }
        result
    }

    /// Runs queued commands, then one simulation step of `dt_ms`.
    ///
    /// Returns `None` when the session is not in battle.
    pub fn tick(&mut self, dt_ms: u64) -> Option<TickReport> {
        while let Some(command) = self.commands.pop_front() {
            // Refusals are already reported by `execute`.
            let _ = self.execute(command);
        }

        if self.phase != SessionPhase::Battle {
            return None;
        }

        let report = self.engine.step(
            dt_ms,
            EngineContext {
                wallet: &mut self.wallet,
                stats: &mut self.stats,
                env: self.catalog.env(),
            },
        );
        self.dispatch(&report.events);
        Some(report)
    }

    /// Writes the current progress and balance to the save slot.
    pub fn flush(&mut self) -> Result<()> {
        self.persist()?;
        tracing::info!(
            slot = %self.config.save_slot,
            bananas = self.wallet.balance(),
            "session flushed"
        );
        Ok(())
    }

    fn apply(&mut self, command: &Command) -> Result<CommandOutcome> {
        let outcome = match command {
            Command::Upgrade(stat) => {
                CommandOutcome::Upgraded(self.stats.try_upgrade(*stat, &mut self.wallet)?)
            }
            Command::UpgradeDps => {
                CommandOutcome::Upgraded(self.stats.try_upgrade_dps(&mut self.wallet)?)
            }
            Command::Evolve => {
                let receipt = self.stats.try_evolve(&mut self.wallet)?;
                tracing::info!(from = %receipt.from, to = %receipt.to, cost = receipt.cost, "evolved");
                CommandOutcome::Evolved(receipt)
            }
            Command::LevelUp => CommandOutcome::LeveledUp(self.stats.try_level_up(&mut self.wallet)?),
            Command::StartLevel(level) => return self.start_level(level),
            Command::StartNextLevel => {
                let next = self.next_level().ok_or(RuntimeError::NoNextLevel)?.to_owned();
                return self.start_level(&next);
            }
            Command::GrantBananas(amount) => {
                self.wallet.add(*amount);
                CommandOutcome::BalanceSet {
                    balance: self.wallet.balance(),
                }
            }
            Command::ResetWallet => {
                self.wallet.reset();
                CommandOutcome::BalanceSet { balance: 0 }
            }
            Command::NewSession => {
                self.wallet.reset();
                self.stats.reset_all_progress();
                self.engine.reset();
                self.level = None;
                self.set_phase(SessionPhase::Start);
                tracing::info!(slot = %self.config.save_slot, "new session");
                CommandOutcome::SessionReset
            }
            Command::Pause => {
                return self.transition(command, SessionPhase::Battle, SessionPhase::Paused);
            }
            Command::Resume => {
                return self.transition(command, SessionPhase::Paused, SessionPhase::Battle);
            }
        };

        self.persist_or_warn();
        Ok(outcome)
    }

    fn start_level(&mut self, level: &str) -> Result<CommandOutcome> {
        if self.phase == SessionPhase::Paused {
            return Err(RuntimeError::InvalidPhase {
                command: "start_level",
                phase: self.phase,
            });
        }

        let events = self.engine.start_level(level, self.catalog.env())?;
        self.engine.spawn_player(&self.stats);
        self.level = Some(level.to_owned());
        tracing::info!(
            level,
            waves = self.engine.waves().total_waves(),
            enemies = self.engine.waves().total_enemies_in_level(),
            "level started"
        );

        self.set_phase(SessionPhase::Battle);
        self.dispatch(&events);

        Ok(CommandOutcome::LevelStarted {
            level: level.to_owned(),
        })
    }

    fn transition(
        &mut self,
        command: &Command,
        from: SessionPhase,
        to: SessionPhase,
    ) -> Result<CommandOutcome> {
        if self.phase != from {
            return Err(RuntimeError::InvalidPhase {
                command: command.name(),
                phase: self.phase,
            });
        }
        self.set_phase(to);
        Ok(CommandOutcome::PhaseChanged { from, to })
    }

    fn set_phase(&mut self, to: SessionPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        tracing::info!(%from, %to, "session phase changed");
        self.bus.publish(Event::PhaseChanged { from, to });
    }

    /// Routes engine events to audio, logs and the bus, then applies the
    /// phase and persistence consequences.
    fn dispatch(&mut self, events: &[GameEvent]) {
        let mut persist = false;
        let mut defeated = false;

        for event in events {
            if let Some(cue) = AudioCue::from_event(event) {
                self.sound.play(cue);
            }

            match event {
                GameEvent::WaveStarted { level, wave, total } => {
                    tracing::info!(%level, wave, total, "wave started");
                }
                GameEvent::WaveCompleted { level, wave } => {
                    tracing::info!(%level, wave, "wave completed");
                    persist = true;
                }
                GameEvent::LevelCompleted { level, next_level } => {
                    tracing::info!(%level, next_level = ?next_level, "level completed");
                    persist = true;
                }
                GameEvent::PlayerDefeated { actor } => {
                    tracing::info!(%actor, time = %self.engine.clock(), "player defeated");
                    defeated = true;
                }
                GameEvent::SpawnSkipped { enemy, error } => {
                    tracing::warn!(
                        %enemy,
                        code = error.error_code(),
                        "skipped spawn: {}",
                        error
                    );
                }
                _ => {}
            }

            self.bus.publish(Event::Game(event.clone()));
        }

        if defeated {
            self.set_phase(SessionPhase::Results);
            persist = true;
        }
        if persist {
            self.persist_or_warn();
        }
    }

    fn persist(&self) -> Result<()> {
        let Some(repository) = &self.repository else {
            return Ok(());
        };
        let file = SaveFile::new(self.stats.save().clone(), self.wallet.balance())?;
        repository.save(&self.config.save_slot, &file)?;
        Ok(())
    }

    fn persist_or_warn(&mut self) {
        if let Err(error) = self.persist() {
            tracing::warn!(slot = %self.config.save_slot, "failed to persist progress: {}", error);
            self.bus.publish(Event::PersistenceFailed {
                slot: self.config.save_slot.clone(),
                message: error.to_string(),
            });
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<GameContent>,
    repository: Option<Arc<dyn ProgressRepository>>,
    sound: Option<Box<dyn SoundSink>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            repository: None,
            sound: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required game content
    pub fn content(mut self, content: GameContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Persist progress through `repository`. Without one the session is ephemeral.
    pub fn repository(mut self, repository: impl ProgressRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Share an existing repository with the runtime.
    pub fn shared_repository(mut self, repository: Arc<dyn ProgressRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the audio collaborator (defaults to [`TracingSoundSink`])
    pub fn sound_sink(mut self, sink: impl SoundSink + 'static) -> Self {
        self.sound = Some(Box::new(sink));
        self
    }

    pub fn save_slot(mut self, slot: impl Into<String>) -> Self {
        self.config.save_slot = slot.into();
        self
    }

    pub fn reset_on_start(mut self, reset: bool) -> Self {
        self.config.reset_on_start = reset;
        self
    }

    /// Restores the save slot and assembles the session in the `Start` phase.
    ///
    /// A slot that cannot be loaded is logged and replaced by fresh progress.
    pub fn build(self) -> Result<Runtime> {
        let GameContent {
            config: game_config,
            catalog,
        } = self.content.ok_or(RuntimeError::MissingContent)?;
        if catalog.first_level().is_none() {
            return Err(RuntimeError::NoLevels);
        }

        let (save, bananas) = restore(self.repository.as_deref(), &self.config, &game_config);
        let bus = EventBus::with_capacity(self.config.event_buffer_size);

        let mut wallet = Wallet::with_balance(bananas);
        let wallet_bus = bus.clone();
        wallet.subscribe(move |change: &BalanceChanged| {
            wallet_bus.publish(Event::Balance(*change));
        });

        let mut stats = StatsManager::new(game_config.clone(), catalog.chain().clone(), save);
        let stats_bus = bus.clone();
        stats.subscribe(move |event: &StatsEvent| {
            stats_bus.publish(Event::Stats(event.clone()));
        });
        if stats.form().is_none() {
            tracing::warn!(
                form = %stats.progress().current_form,
                "saved form is not in the evolution chain; purchases are disabled"
            );
        }

        let mut runtime = Runtime {
            engine: GameEngine::new(game_config),
            catalog,
            wallet,
            stats,
            repository: self.repository,
            sound: self.sound.unwrap_or_else(|| Box::new(TracingSoundSink)),
            bus,
            phase: SessionPhase::Start,
            commands: VecDeque::new(),
            level: None,
            config: self.config,
        };

        if runtime.config.reset_on_start {
            runtime.persist_or_warn();
        }

        tracing::debug!(
            slot = %runtime.config.save_slot,
            form = %runtime.stats.current_form_name(),
            bananas = runtime.wallet.balance(),
            "runtime ready"
        );
        Ok(runtime)
    }
}

fn restore(
    repository: Option<&dyn ProgressRepository>,
    config: &RuntimeConfig,
    game_config: &GameConfig,
) -> (ProgressSave, u64) {
    let fresh = || (ProgressSave::new(game_config.active_monkey.clone()), 0);
    let slot = &config.save_slot;

    let Some(repository) = repository else {
        return fresh();
    };
    if config.reset_on_start {
        tracing::info!(%slot, "reset on start requested; discarding saved progress");
        return fresh();
    }

    match repository.load(slot) {
        Ok(Some(file)) => {
            tracing::info!(
                %slot,
                bananas = file.bananas,
                saved_at = %file.saved_at,
                "restored saved progress"
            );
            (file.progress, file.bananas)
        }
        Ok(None) => {
            tracing::debug!(%slot, "no saved progress; starting fresh");
            fresh()
        }
        Err(error) => {
            tracing::warn!(%slot, "failed to load saved progress, starting fresh: {}", error);
            fresh()
        }
    }
}
