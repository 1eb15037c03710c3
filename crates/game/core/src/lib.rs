//! Deterministic rules of the banana idle battler.
//!
//! `game-core` owns the economy (stat rules, wallet, progression and the
//! [`StatsManager`] transactions), the side-scrolling combat model and the
//! wave sequencer, and ties them together in [`GameEngine::step`]. Nothing in
//! this crate performs I/O, reads a clock or logs; the runtime supplies time
//! deltas and content through the oracle traits in [`env`].
pub mod combat;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod error;
pub mod manager;
pub mod notify;
pub mod progress;
pub mod stats;
pub mod time;
pub mod waves;

pub use combat::{
    ActorId, ActorKind, Battlefield, CombatActor, CombatState, CombatStats, DamageOutcome, Faction,
};
pub use config::GameConfig;
pub use economy::{BalanceChanged, Wallet, WalletError};
pub use engine::{EngineContext, GameEngine, GameEvent, TickChanges, TickReport};
pub use env::{
    Catalog, EnemyDefinition, EnemyOracle, FormChain, FormOracle, GameEnv, LevelDefinition,
    LevelOracle, MonkeyForm, OracleError, SpawnEntry, WaveDefinition,
};
pub use error::{ErrorSeverity, GameError};
pub use manager::{
    EvolutionReceipt, LevelUpReceipt, MAX_FORM_LABEL, StatsEvent, StatsManager, UpgradeError,
    UpgradeReceipt,
};
pub use notify::{Observers, SubscriptionId};
pub use progress::{MonkeyProgress, ProgressSave};
pub use stats::{StatKind, StatRule, StatTable, scaled_cost};
pub use time::{SimTime, millis_from_secs};
pub use waves::{SpawnDirective, WavePhase, WaveSequencer, WaveSignal};
