use std::sync::{Arc, Mutex};

use game_content::GameContent;
use game_core::{
    Catalog, EnemyDefinition, Faction, FormChain, GameConfig, GameEvent, LevelDefinition,
    MonkeyForm, OracleError, ProgressSave, SpawnEntry, StatKind, StatRule, StatTable,
    UpgradeError, WaveDefinition,
};
use runtime::{
    AudioCue, Command, CommandOutcome, Event, InMemoryProgressRepository, ProgressRepository,
    Runtime, RuntimeError, SaveFile, SessionPhase, SoundSink, Topic,
};

const DT: u64 = 100;

fn form(id: &str, damage: f32) -> MonkeyForm {
    MonkeyForm::new(
        id,
        id,
        StatTable::new(
            StatRule::new(100.0, 10.0, 1.0, 10, 1.0),
            StatRule::new(damage, 5.0, 1.0, 10, 1.0),
            StatRule::new(2.0, 0.0, 1.0, 10, 1.0),
            StatRule::flat(1.0),
            StatRule::flat(5.0),
        ),
    )
}

fn wave(enemy: &str, count: u32) -> WaveDefinition {
    let mut wave = WaveDefinition::new(vec![SpawnEntry::new(enemy, count, 0.0)]);
    wave.spawn_distance = 6.0;
    wave
}

fn content() -> GameContent {
    let mut config = GameConfig::default();
    config.starting_form = "m1".into();
    config.base_evolution_cost = 20;

    let chain = FormChain::new(vec![form("m1", 50.0), form("m2", 80.0)]).unwrap();
    let enemies = vec![
        EnemyDefinition::new("dummy", 10.0, 1.0, 1.0)
            .with_movement(2.0, 1.0)
            .with_reward(3),
        EnemyDefinition::new("brute", 1_000_000.0, 1000.0, 0.1)
            .with_movement(5.0, 10.0)
            .with_reward(50),
    ];
    let mut broken = WaveDefinition::new(vec![
        SpawnEntry::new("ghost", 1, 0.0),
        SpawnEntry::new("dummy", 1, 0.0),
    ]);
    broken.spawn_distance = 6.0;
    let levels = vec![
        LevelDefinition::new("meadow", vec![wave("dummy", 2)]).with_next_level("arena"),
        LevelDefinition::new("arena", vec![wave("brute", 1)]),
        LevelDefinition::new("broken", vec![broken]),
        LevelDefinition::new("void", Vec::new()),
    ];

    GameContent {
        config,
        catalog: Catalog::new(enemies, chain, levels),
    }
}

fn runtime_with(repo: Arc<InMemoryProgressRepository>) -> Runtime {
    Runtime::builder()
        .content(content())
        .shared_repository(repo)
        .build()
        .unwrap()
}

/// Ticks until `done` matches an event or `max_ticks` elapse; returns every event seen.
fn run_until(
    runtime: &mut Runtime,
    max_ticks: usize,
    done: impl Fn(&GameEvent) -> bool,
) -> Vec<GameEvent> {
    let mut seen = Vec::new();
    for _ in 0..max_ticks {
        let Some(report) = runtime.tick(DT) else {
            break;
        };
        let finished = report.events.iter().any(&done);
        seen.extend(report.events);
        if finished {
            break;
        }
    }
    seen
}

#[derive(Clone, Default)]
struct RecordingSink {
    cues: Arc<Mutex<Vec<AudioCue>>>,
}

impl SoundSink for RecordingSink {
    fn play(&self, cue: AudioCue) {
        self.cues.lock().unwrap().push(cue);
    }
}

#[test]
fn builder_requires_content() {
    assert!(matches!(
        Runtime::builder().build(),
        Err(RuntimeError::MissingContent)
    ));
}

#[test]
fn clearing_a_level_pays_rewards_and_persists() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo.clone());
    assert_eq!(runtime.phase(), SessionPhase::Start);
    assert!(runtime.tick(DT).is_none());

    let outcome = runtime.execute(Command::StartLevel("meadow".into())).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::LevelStarted {
            level: "meadow".into()
        }
    );
    assert_eq!(runtime.phase(), SessionPhase::Battle);

    let events = run_until(&mut runtime, 200, |event| {
        matches!(event, GameEvent::LevelCompleted { .. })
    });

    let kills = events
        .iter()
        .filter(|event| matches!(event, GameEvent::BananasEarned { .. }))
        .count();
    assert_eq!(kills, 2);
    assert!(events.contains(&GameEvent::LevelCompleted {
        level: "meadow".into(),
        next_level: Some("arena".into()),
    }));
    assert_eq!(runtime.wallet().balance(), 6);
    assert_eq!(runtime.next_level(), Some("arena"));

    let saved = repo.load("main").unwrap().unwrap();
    assert_eq!(saved.bananas, 6);
}

#[test]
fn defeat_ends_battle_and_level_start_retries() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);
    let mut waves = runtime.subscribe(Topic::Wave);

    runtime.execute(Command::StartLevel("arena".into())).unwrap();
    let events = run_until(&mut runtime, 50, |event| {
        matches!(event, GameEvent::PlayerDefeated { .. })
    });

    assert!(
        events
            .iter()
            .any(|event| matches!(event, GameEvent::PlayerDefeated { .. }))
    );
    assert_eq!(runtime.phase(), SessionPhase::Results);
    assert!(!runtime.engine().is_player_alive());
    assert!(runtime.tick(DT).is_none());

    let mut phases = Vec::new();
    while let Ok(event) = waves.try_recv() {
        if let Event::PhaseChanged { to, .. } = event {
            phases.push(to);
        }
    }
    assert_eq!(phases, vec![SessionPhase::Battle, SessionPhase::Results]);

    runtime.execute(Command::StartLevel("meadow".into())).unwrap();
    assert_eq!(runtime.phase(), SessionPhase::Battle);
    assert!(runtime.engine().is_player_alive());
}

#[test]
fn refused_upgrade_changes_nothing_and_is_reported() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo.clone());
    let mut diagnostics = runtime.subscribe(Topic::Diagnostics);

    for _ in 0..3 {
        let result = runtime.execute(Command::Upgrade(StatKind::Damage));
        assert!(matches!(
            result,
            Err(RuntimeError::Upgrade(UpgradeError::InsufficientFunds {
                needed: 10,
                available: 0
            }))
        ));
    }

    assert_eq!(runtime.stats().level(StatKind::Damage), 0);
    assert_eq!(runtime.wallet().balance(), 0);
    assert!(repo.load("main").unwrap().is_none());

    match diagnostics.try_recv().unwrap() {
        Event::CommandRejected { command, code, .. } => {
            assert_eq!(command, "upgrade damage");
            assert_eq!(code, "UPGRADE_INSUFFICIENT_FUNDS");
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn purchases_spend_and_persist() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo.clone());
    let mut economy = runtime.subscribe(Topic::Economy);

    runtime.execute(Command::GrantBananas(45)).unwrap();
    let outcome = runtime.execute(Command::Upgrade(StatKind::Damage)).unwrap();
    assert!(matches!(outcome, CommandOutcome::Upgraded(receipt) if receipt.level == 1 && receipt.cost == 10));
    runtime.execute(Command::UpgradeDps).unwrap();

    assert_eq!(runtime.stats().level(StatKind::Damage), 1);
    assert_eq!(runtime.stats().level(StatKind::AttacksPerSecond), 1);
    assert_eq!(runtime.wallet().balance(), 25);

    let saved = repo.load("main").unwrap().unwrap();
    assert_eq!(saved.bananas, 25);
    let progress = saved.progress.active().unwrap();
    assert_eq!(progress.level(StatKind::Damage), 1);

    let mut balances = Vec::new();
    while let Ok(event) = economy.try_recv() {
        if let Event::Balance(change) = event {
            balances.push(change.balance);
        }
    }
    assert_eq!(balances, vec![45, 35, 25]);
}

#[test]
fn evolution_heals_player_on_next_tick() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);
    runtime.execute(Command::GrantBananas(100)).unwrap();
    runtime.execute(Command::StartLevel("meadow".into())).unwrap();

    let outcome = runtime.execute(Command::Evolve).unwrap();
    assert!(matches!(outcome, CommandOutcome::Evolved(ref receipt) if receipt.to == "m2"));
    assert_eq!(runtime.stats().current_form_name(), "m2");
    assert_eq!(runtime.wallet().balance(), 80);

    runtime.tick(DT).unwrap();
    let player = runtime.engine().player_actor().unwrap();
    assert_eq!(player.stats.damage, 80.0);
    assert_eq!(player.health(), player.max_health());
}

#[test]
fn queued_commands_apply_before_the_step() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);

    runtime.enqueue(Command::StartLevel("meadow".into()));
    runtime.enqueue(Command::Pause);
    assert_eq!(runtime.pending_commands(), 2);

    assert!(runtime.tick(DT).is_none());
    assert_eq!(runtime.phase(), SessionPhase::Paused);
    assert_eq!(runtime.pending_commands(), 0);
    let paused_at = runtime.engine().clock();

    assert!(matches!(
        runtime.execute(Command::StartLevel("meadow".into())),
        Err(RuntimeError::InvalidPhase {
            phase: SessionPhase::Paused,
            ..
        })
    ));

    runtime.enqueue(Command::Resume);
    let report = runtime.tick(DT).unwrap();
    assert_eq!(report.time.as_millis(), paused_at.as_millis() + DT);
}

#[test]
fn pause_outside_battle_is_refused() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);

    assert!(matches!(
        runtime.execute(Command::Pause),
        Err(RuntimeError::InvalidPhase {
            command: "pause",
            phase: SessionPhase::Start
        })
    ));
    assert!(runtime.execute(Command::Resume).is_err());
}

#[test]
fn unknown_level_is_rejected_without_state_change() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);

    let result = runtime.execute(Command::StartLevel("moon".into()));
    assert!(matches!(
        result,
        Err(RuntimeError::Content(OracleError::UnknownLevel(_)))
    ));
    assert_eq!(runtime.phase(), SessionPhase::Start);
    assert_eq!(runtime.current_level(), None);
    assert!(matches!(
        runtime.execute(Command::StartNextLevel),
        Err(RuntimeError::NoNextLevel)
    ));
}

#[test]
fn start_next_level_follows_the_content_chain() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);

    runtime.execute(Command::StartLevel("meadow".into())).unwrap();
    let outcome = runtime.execute(Command::StartNextLevel).unwrap();

    assert_eq!(
        outcome,
        CommandOutcome::LevelStarted {
            level: "arena".into()
        }
    );
    assert_eq!(runtime.current_level(), Some("arena"));
    assert_eq!(runtime.next_level(), None);
}

#[test]
fn missing_enemy_is_skipped_with_a_diagnostic() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);
    let mut diagnostics = runtime.subscribe(Topic::Diagnostics);

    runtime.execute(Command::StartLevel("broken".into())).unwrap();
    let events = run_until(&mut runtime, 200, |event| {
        matches!(event, GameEvent::LevelCompleted { .. })
    });

    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::LevelCompleted { level, .. } if level == "broken"
    )));
    assert_eq!(runtime.wallet().balance(), 3);
    assert!(matches!(
        diagnostics.try_recv(),
        Ok(Event::Game(GameEvent::SpawnSkipped { ref enemy, .. })) if enemy == "ghost"
    ));
}

#[test]
fn level_without_waves_completes_through_the_normal_path() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo.clone());
    let mut waves = runtime.subscribe(Topic::Wave);

    runtime.execute(Command::StartLevel("void".into())).unwrap();

    assert!(runtime.engine().waves().is_level_complete());
    assert!(repo.load("main").unwrap().is_some());

    let mut seen = Vec::new();
    while let Ok(event) = waves.try_recv() {
        seen.push(event);
    }
    assert!(seen.contains(&Event::PhaseChanged {
        from: SessionPhase::Start,
        to: SessionPhase::Battle
    }));
    assert_eq!(
        seen.last(),
        Some(&Event::Game(GameEvent::LevelCompleted {
            level: "void".into(),
            next_level: None,
        }))
    );
}

#[test]
fn new_session_wipes_wallet_and_progress() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo.clone());
    runtime.execute(Command::GrantBananas(100)).unwrap();
    runtime.execute(Command::Upgrade(StatKind::Health)).unwrap();
    runtime.execute(Command::LevelUp).unwrap();
    runtime.execute(Command::StartLevel("meadow".into())).unwrap();

    let outcome = runtime.execute(Command::NewSession).unwrap();

    assert_eq!(outcome, CommandOutcome::SessionReset);
    assert_eq!(runtime.phase(), SessionPhase::Start);
    assert_eq!(runtime.wallet().balance(), 0);
    assert_eq!(runtime.stats().level(StatKind::Health), 0);
    assert_eq!(runtime.stats().monkey_level(), 1);
    assert_eq!(runtime.current_level(), None);
    assert!(runtime.engine().battlefield().is_empty());

    let saved = repo.load("main").unwrap().unwrap();
    assert_eq!(saved.bananas, 0);
}

#[test]
fn wallet_cheats_update_balance() {
    let repo = Arc::new(InMemoryProgressRepository::new());
    let mut runtime = runtime_with(repo);

    assert_eq!(
        runtime.execute(Command::GrantBananas(12)).unwrap(),
        CommandOutcome::BalanceSet { balance: 12 }
    );
    assert_eq!(
        runtime.execute(Command::ResetWallet).unwrap(),
        CommandOutcome::BalanceSet { balance: 0 }
    );
    assert_eq!(runtime.wallet().balance(), 0);
}

#[test]
fn restores_saved_progress() {
    let mut progress = ProgressSave::new("starter");
    let monkey = progress.get_or_create("starter", "m2");
    *monkey.levels.get_mut(StatKind::Damage) = 2;
    let repo = Arc::new(InMemoryProgressRepository::with_slot(
        "main",
        SaveFile::new(progress, 42).unwrap(),
    ));

    let runtime = runtime_with(repo);

    assert_eq!(runtime.wallet().balance(), 42);
    assert_eq!(runtime.stats().current_form_name(), "m2");
    assert_eq!(runtime.stats().level(StatKind::Damage), 2);
}

#[test]
fn corrupt_save_falls_back_to_fresh_progress() {
    let mut file = SaveFile::new(ProgressSave::new("starter"), 500).unwrap();
    file.bananas = 9_999;
    let repo = Arc::new(InMemoryProgressRepository::with_slot("main", file));

    let runtime = runtime_with(repo);

    assert_eq!(runtime.wallet().balance(), 0);
    assert_eq!(runtime.stats().current_form_name(), "m1");
}

#[test]
fn reset_on_start_discards_and_overwrites_the_slot() {
    let repo = Arc::new(InMemoryProgressRepository::with_slot(
        "main",
        SaveFile::new(ProgressSave::new("starter"), 500).unwrap(),
    ));

    let runtime = Runtime::builder()
        .content(content())
        .shared_repository(repo.clone())
        .reset_on_start(true)
        .build()
        .unwrap();

    assert_eq!(runtime.wallet().balance(), 0);
    assert_eq!(repo.load("main").unwrap().unwrap().bananas, 0);
}

#[test]
fn combat_drives_audio_cues() {
    let sink = RecordingSink::default();
    let mut runtime = Runtime::builder()
        .content(content())
        .sound_sink(sink.clone())
        .build()
        .unwrap();

    runtime.execute(Command::StartLevel("meadow".into())).unwrap();
    run_until(&mut runtime, 200, |event| {
        matches!(event, GameEvent::LevelCompleted { .. })
    });

    let cues = sink.cues.lock().unwrap();
    assert!(cues.contains(&AudioCue::Attack {
        faction: Faction::Monkey
    }));
    let deaths = cues
        .iter()
        .filter(|cue| **cue == AudioCue::Death {
            faction: Faction::Banana
        })
        .count();
    assert_eq!(deaths, 2);
}

#[test]
fn ephemeral_session_never_touches_storage() {
    let mut runtime = Runtime::builder().content(content()).build().unwrap();
    runtime.execute(Command::GrantBananas(5)).unwrap();
    runtime.flush().unwrap();
    assert_eq!(runtime.wallet().balance(), 5);
}
