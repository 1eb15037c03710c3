use super::*;
use crate::env::{
    Catalog, EnemyDefinition, FormChain, FormOracle, LevelDefinition, MonkeyForm, SpawnEntry,
    WaveDefinition,
};
use crate::progress::ProgressSave;
use crate::stats::{StatKind, StatRule, StatTable};

fn form(id: &str, health: f32) -> MonkeyForm {
    MonkeyForm::new(
        id,
        id,
        StatTable::new(
            StatRule::new(health, 15.0, 1.0, 50, 1.2),
            StatRule::new(5.0, 2.0, 1.0, 40, 1.25),
            StatRule::new(1.0, 0.1, 1.0, 30, 1.2),
            StatRule::flat(1.0),
            StatRule::new(5.0, 0.2, 1.0, 35, 1.2),
        ),
    )
}

fn catalog() -> Catalog {
    let chain = FormChain::new(vec![form("monkee_1", 100.0), form("monkee_2", 130.0)]).unwrap();
    let enemies = vec![
        EnemyDefinition::new("bananemy", 15.0, 2.0, 0.5).with_movement(1.0, 2.0),
        EnemyDefinition::new("sprout", 5.0, 1.0, 1.0)
            .with_movement(1.0, 2.0)
            .with_reward(3),
        EnemyDefinition::new("big_bad", 500.0, 60.0, 0.15).with_movement(1.6, 6.0),
    ];
    let mut close = WaveDefinition::new(vec![SpawnEntry::new("sprout", 1, 0.0)]);
    close.spawn_distance = 1.0;
    let levels = vec![
        LevelDefinition::new(
            "jungle_1",
            vec![WaveDefinition::new(vec![SpawnEntry::new("bananemy", 2, 0.0)])],
        )
        .with_next_level("jungle_2"),
        LevelDefinition::new(
            "haunted",
            vec![WaveDefinition::new(vec![
                SpawnEntry::new("ghost", 1, 0.0),
                SpawnEntry::new("bananemy", 1, 0.0),
            ])],
        ),
        LevelDefinition::new("close_quarters", vec![close]),
        LevelDefinition::new(
            "doom",
            vec![WaveDefinition::new(vec![SpawnEntry::new("big_bad", 1, 0.0)])],
        ),
    ];
    Catalog::new(enemies, chain, levels)
}

struct Session {
    catalog: Catalog,
    engine: GameEngine,
    wallet: Wallet,
    stats: StatsManager,
}

impl Session {
    fn new() -> Self {
        let catalog = catalog();
        let stats = StatsManager::new(
            GameConfig::default(),
            catalog.chain().clone(),
            ProgressSave::new("starter"),
        );
        let mut engine = GameEngine::new(GameConfig::default());
        engine.spawn_player(&stats);
        Self {
            catalog,
            engine,
            wallet: Wallet::new(),
            stats,
        }
    }

    fn start(&mut self, level: &str) -> Vec<GameEvent> {
        self.engine.start_level(level, self.catalog.env()).unwrap()
    }

    fn step(&mut self, dt_ms: u64) -> TickReport {
        let ctx = EngineContext {
            wallet: &mut self.wallet,
            stats: &mut self.stats,
            env: self.catalog.env(),
        };
        self.engine.step(dt_ms, ctx)
    }

    fn run_until(&mut self, mut done: impl FnMut(&GameEvent) -> bool) -> Vec<GameEvent> {
        let mut seen = Vec::new();
        for _ in 0..2_000 {
            let report = self.step(100);
            let finished = report.events.iter().any(&mut done);
            seen.extend(report.events);
            if finished {
                return seen;
            }
        }
        panic!("condition not reached; events: {seen:?}");
    }
}

#[test]
fn start_level_announces_first_wave() {
    let mut session = Session::new();

    let events = session.start("jungle_1");

    assert_eq!(
        events,
        vec![
            GameEvent::LevelStarted {
                level: "jungle_1".into(),
                waves: 1
            },
            GameEvent::WaveStarted {
                level: "jungle_1".into(),
                wave: 1,
                total: 1
            },
        ]
    );
    assert_eq!(
        session
            .engine
            .start_level("nowhere", session.catalog.env())
            .unwrap_err(),
        OracleError::UnknownLevel("nowhere".into())
    );
}

#[test]
fn clearing_a_level_pays_each_kill_once() {
    let mut session = Session::new();
    session.start("jungle_1");

    let events = session.run_until(|e| matches!(e, GameEvent::LevelCompleted { .. }));

    let earned: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BananasEarned { .. }))
        .collect();
    assert_eq!(earned.len(), 2);
    assert_eq!(session.wallet.balance(), 2);
    assert!(session.engine.is_player_alive());
    assert!(events.contains(&GameEvent::LevelCompleted {
        level: "jungle_1".into(),
        next_level: Some("jungle_2".into())
    }));
    assert!(session.engine.waves().is_level_complete());
    assert_eq!(session.engine.battlefield().living(Faction::Banana), 0);
}

#[test]
fn enemies_spawn_behind_the_player() {
    let mut session = Session::new();
    session.start("jungle_1");

    let report = session.step(0);

    let positions: Vec<f32> = report
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ActorSpawned { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(positions, vec![-15.0, -15.0]);
    assert!(report.changes.contains(TickChanges::ROSTER));
    assert_eq!(session.engine.waves().active_enemy_count(), 2);
}

#[test]
fn unknown_enemy_is_skipped_and_wave_continues() {
    let mut session = Session::new();
    session.start("haunted");

    let report = session.step(0);

    assert_eq!(
        report.events[0],
        GameEvent::SpawnSkipped {
            enemy: "ghost".into(),
            error: OracleError::UnknownEnemy("ghost".into())
        }
    );
    assert!(matches!(
        report.events[1],
        GameEvent::ActorSpawned { ref definition, .. } if definition == "bananemy"
    ));
    assert_eq!(session.engine.waves().active_enemy_count(), 1);

    session.run_until(|e| matches!(e, GameEvent::LevelCompleted { .. }));
    assert_eq!(session.wallet.balance(), 1);
}

#[test]
fn one_step_runs_phases_in_order() {
    let mut session = Session::new();
    session.start("close_quarters");

    let report = session.step(0);

    let kinds: Vec<&str> = report
        .events
        .iter()
        .map(|e| match e {
            GameEvent::ActorSpawned { .. } => "spawned",
            GameEvent::TargetAcquired { .. } => "acquired",
            GameEvent::ActorAttacked { .. } => "attacked",
            GameEvent::ActorDamaged { .. } => "damaged",
            GameEvent::ActorDied { .. } => "died",
            GameEvent::BananasEarned { .. } => "earned",
            GameEvent::WaveCompleted { .. } => "wave_completed",
            GameEvent::LevelCompleted { .. } => "level_completed",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "spawned",
            "acquired",
            "acquired",
            "attacked",
            "damaged",
            "died",
            "earned",
            "wave_completed",
            "level_completed",
        ]
    );
    assert_eq!(session.wallet.balance(), 3);
    assert!(
        report
            .changes
            .contains(TickChanges::WALLET | TickChanges::ROSTER | TickChanges::WAVE)
    );
}

#[test]
fn upgrades_refresh_player_and_evolution_heals() {
    let mut session = Session::new();
    let player = session.engine.player().unwrap();
    session
        .engine
        .battlefield_mut()
        .get_mut(player)
        .unwrap()
        .take_damage(40.0);
    session.wallet.add(1_000);

    session
        .stats
        .try_upgrade(StatKind::Health, &mut session.wallet)
        .unwrap();
    let report = session.step(0);
    let actor = session.engine.player_actor().unwrap();
    assert!(report.changes.contains(TickChanges::PLAYER));
    assert_eq!(actor.max_health(), 115.0);
    assert_eq!(actor.health(), 60.0);

    session.stats.try_evolve(&mut session.wallet).unwrap();
    session.step(0);
    let actor = session.engine.player_actor().unwrap();
    assert_eq!(actor.max_health(), 130.0);
    assert_eq!(actor.health(), 130.0);
}

#[test]
fn player_death_is_reported_without_reward() {
    let mut session = Session::new();
    session.start("doom");

    let events = session.run_until(|e| matches!(e, GameEvent::PlayerDefeated { .. }));

    assert!(session.engine.player().is_none());
    assert!(!session.engine.is_player_alive());
    assert_eq!(session.wallet.balance(), 0);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::BananasEarned { .. }))
    );
    assert_eq!(session.engine.waves().active_enemy_count(), 1);
}

#[test]
fn restarting_a_level_discards_leftover_enemies() {
    let mut session = Session::new();
    session.start("jungle_1");
    session.step(0);
    assert_eq!(session.engine.battlefield().living(Faction::Banana), 2);

    session.start("close_quarters");

    assert_eq!(session.engine.battlefield().living(Faction::Banana), 0);
    assert_eq!(session.engine.waves().active_enemy_count(), 0);
    assert!(session.engine.is_player_alive());
}
