//! One-line session summary for the log.

use std::fmt;

use game_core::StatKind;
use runtime::Runtime;

/// Snapshot of what a player would see on the HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub time_ms: u64,
    pub phase: String,
    pub bananas: u64,
    pub form: String,
    pub next_form: String,
    pub level: Option<String>,
    /// One-based wave number and total waves.
    pub wave: (usize, usize),
    pub enemies: usize,
    pub player_health: Option<(f32, f32)>,
    pub dps: f32,
    pub upgrades: [u32; 5],
}

impl StatusLine {
    pub fn capture(runtime: &Runtime) -> Self {
        let engine = runtime.engine();
        let stats = runtime.stats();
        let waves = engine.waves();

        Self {
            time_ms: engine.clock().as_millis(),
            phase: runtime.phase().to_string(),
            bananas: runtime.wallet().balance(),
            form: stats.current_form_name().to_owned(),
            next_form: stats.next_form_name().to_owned(),
            level: runtime.current_level().map(str::to_owned),
            wave: (waves.current_wave_number(), waves.total_waves()),
            enemies: waves.active_enemy_count(),
            player_health: engine
                .player_actor()
                .map(|player| (player.health(), player.max_health())),
            dps: stats.derived_dps(),
            upgrades: StatKind::ALL.map(|stat| stats.level(stat)),
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>7.1}s] {:<7} bananas={} form={} (next: {}) level={} wave={}/{} enemies={}",
            self.time_ms as f64 / 1000.0,
            self.phase,
            self.bananas,
            self.form,
            self.next_form,
            self.level.as_deref().unwrap_or("-"),
            self.wave.0,
            self.wave.1,
            self.enemies,
        )?;
        if let Some((health, max)) = self.player_health {
            write!(f, " hp={:.0}/{:.0}", health, max)?;
        }
        let [hp, dmg, aps, spd, rng] = self.upgrades;
        write!(
            f,
            " dps={:.1} upgrades=hp{}/dmg{}/aps{}/spd{}/rng{}",
            self.dps, hp, dmg, aps, spd, rng
        )
    }
}
