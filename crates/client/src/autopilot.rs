//! Scripted player for unattended sessions.

use game_core::StatKind;
use runtime::{Command, Runtime, SessionPhase};

/// Decides which commands to issue each frame.
///
/// Spending happens only once a level has been played (`Battle` or
/// `Results`): evolve whenever affordable, otherwise buy the cheapest
/// affordable upgrade that still raises its stat (ties go to
/// [`StatKind::ALL`] order). At most one purchase per frame.
///
/// Flow: start `home_level` from `Start`, go back to it after a defeat, and
/// after a cleared level advance to the next one or replay the last.
#[derive(Debug, Clone)]
pub struct Autopilot {
    home_level: String,
    spend: bool,
}

impl Autopilot {
    pub fn new(home_level: impl Into<String>) -> Self {
        Self {
            home_level: home_level.into(),
            spend: true,
        }
    }

    /// Navigate levels only; never spend.
    pub fn without_spending(mut self) -> Self {
        self.spend = false;
        self
    }

    pub fn plan(&self, runtime: &Runtime) -> Vec<Command> {
        let mut commands = Vec::new();

        match runtime.phase() {
            SessionPhase::Paused => return commands,
            SessionPhase::Start => {
                commands.push(Command::StartLevel(self.home_level.clone()));
                return commands;
            }
            SessionPhase::Results => {
                commands.push(Command::StartLevel(self.home_level.clone()));
            }
            SessionPhase::Battle => {
                if runtime.engine().waves().is_level_complete() {
                    commands.push(self.after_clear(runtime));
                }
            }
        }

        if self.spend
            && let Some(purchase) = Self::purchase(runtime)
        {
            commands.push(purchase);
        }
        commands
    }

    fn after_clear(&self, runtime: &Runtime) -> Command {
        if runtime.next_level().is_some() {
            return Command::StartNextLevel;
        }
        let replay = runtime.current_level().unwrap_or(&self.home_level);
        Command::StartLevel(replay.to_owned())
    }

    fn purchase(runtime: &Runtime) -> Option<Command> {
        let stats = runtime.stats();
        let wallet = runtime.wallet();

        if stats.can_evolve(wallet) {
            return Some(Command::Evolve);
        }

        StatKind::ALL
            .into_iter()
            .filter(|stat| stats.can_afford(*stat, wallet))
            .filter(|stat| {
                stats
                    .next_value(*stat)
                    .is_some_and(|next| next > stats.current_value(*stat))
            })
            .min_by_key(|stat| stats.current_cost(*stat))
            .map(Command::Upgrade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::{ContentFactory, default_data_dir};

    fn runtime() -> Runtime {
        let content = ContentFactory::new(default_data_dir()).load_all().unwrap();
        Runtime::builder().content(content).build().unwrap()
    }

    #[test]
    fn starts_home_level_from_start() {
        let runtime = runtime();
        let pilot = Autopilot::new("jungle_1");

        assert_eq!(
            pilot.plan(&runtime),
            vec![Command::StartLevel("jungle_1".into())]
        );
    }

    #[test]
    fn nothing_is_bought_before_the_first_level() {
        let mut runtime = runtime();
        runtime.execute(Command::GrantBananas(300)).unwrap();

        assert_eq!(
            Autopilot::new("jungle_1").plan(&runtime),
            vec![Command::StartLevel("jungle_1".into())]
        );
    }

    #[test]
    fn upgrades_that_change_nothing_are_skipped() {
        let mut runtime = runtime();
        runtime.execute(Command::StartLevel("jungle_1".into())).unwrap();

        // Move speed is free but flat in the bundled forms.
        assert!(runtime.stats().can_afford(StatKind::MoveSpeed, runtime.wallet()));
        assert!(Autopilot::new("jungle_1").plan(&runtime).is_empty());
    }

    #[test]
    fn buys_cheapest_paid_upgrade() {
        let mut runtime = runtime();
        runtime.execute(Command::StartLevel("jungle_1".into())).unwrap();
        runtime.execute(Command::GrantBananas(35)).unwrap();
        let pilot = Autopilot::new("jungle_1");

        // attacks_per_second costs 30, range 35, damage 40, health 50.
        assert_eq!(
            pilot.plan(&runtime),
            vec![Command::Upgrade(StatKind::AttacksPerSecond)]
        );
    }

    #[test]
    fn evolution_wins_when_affordable() {
        let mut runtime = runtime();
        runtime.execute(Command::StartLevel("jungle_1".into())).unwrap();
        runtime.execute(Command::GrantBananas(300)).unwrap();

        let plan = Autopilot::new("jungle_1").plan(&runtime);
        assert_eq!(plan, vec![Command::Evolve]);
    }

    #[test]
    fn paused_sessions_are_left_alone() {
        let mut runtime = runtime();
        runtime.execute(Command::StartLevel("jungle_1".into())).unwrap();
        runtime.execute(Command::GrantBananas(300)).unwrap();
        runtime.execute(Command::Pause).unwrap();

        assert!(Autopilot::new("jungle_1").plan(&runtime).is_empty());
    }

    #[test]
    fn navigation_only_mode_never_spends() {
        let mut runtime = runtime();
        runtime.execute(Command::StartLevel("jungle_1".into())).unwrap();
        runtime.execute(Command::GrantBananas(300)).unwrap();

        let pilot = Autopilot::new("jungle_1").without_spending();
        assert!(pilot.plan(&runtime).is_empty());
    }
}
