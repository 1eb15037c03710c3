//! Upgrade, level-up and evolution transactions.
//!
//! [`StatsManager`] is the only writer of [`ProgressSave`] and the only place
//! that debits the wallet for progression. Each transaction validates
//! everything before touching the wallet, then spends and mutates together, so
//! a refused purchase leaves both untouched.

mod error;
mod events;

pub use error::UpgradeError;
pub use events::{EvolutionReceipt, LevelUpReceipt, StatsEvent, UpgradeReceipt};

use crate::combat::CombatStats;
use crate::config::GameConfig;
use crate::economy::Wallet;
use crate::env::{FormChain, MonkeyForm};
use crate::notify::{Observers, SubscriptionId};
use crate::progress::{MonkeyProgress, ProgressSave};
use crate::stats::{StatKind, scaled_cost};
use crate::time::millis_from_secs;

/// Label shown in place of the next form once the chain is exhausted.
pub const MAX_FORM_LABEL: &str = "MAX FORM";

#[derive(Debug)]
pub struct StatsManager {
    config: GameConfig,
    chain: FormChain,
    save: ProgressSave,
    active: usize,
    observers: Observers<StatsEvent>,
    pending: Vec<StatsEvent>,
}

impl StatsManager {
    /// Binds `save` to the chain, creating the active monkey's progression on first use.
    pub fn new(config: GameConfig, chain: FormChain, mut save: ProgressSave) -> Self {
        if save.active_monkey.is_empty() {
            save.active_monkey = config.active_monkey.clone();
        }
        let active_id = save.active_monkey.clone();
        let active = save.index_or_create(&active_id, &config.starting_form);
        Self {
            config,
            chain,
            save,
            active,
            observers: Observers::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn chain(&self) -> &FormChain {
        &self.chain
    }

    pub fn save(&self) -> &ProgressSave {
        &self.save
    }

    pub fn progress(&self) -> &MonkeyProgress {
        &self.save.monkeys[self.active]
    }

    fn progress_mut(&mut self) -> &mut MonkeyProgress {
        &mut self.save.monkeys[self.active]
    }

    /// Definition of the active form, `None` if the save names a form outside the chain.
    pub fn form(&self) -> Option<&MonkeyForm> {
        self.chain.get(&self.progress().current_form)
    }

    /// Swaps in a different save and announces a stats change.
    pub fn replace_save(&mut self, mut save: ProgressSave) {
        if save.active_monkey.is_empty() {
            save.active_monkey = self.config.active_monkey.clone();
        }
        let active_id = save.active_monkey.clone();
        self.active = save.index_or_create(&active_id, &self.config.starting_form);
        self.save = save;
        self.emit(StatsEvent::StatsChanged);
    }

    // ===== reads =====

    pub fn level(&self, stat: StatKind) -> u32 {
        self.progress().level(stat)
    }

    pub fn max_level(&self, stat: StatKind) -> u32 {
        let caps = self
            .form()
            .and_then(|form| form.max_levels.as_ref())
            .unwrap_or(&self.config.max_levels);
        *caps.get(stat)
    }

    pub fn is_maxed(&self, stat: StatKind) -> bool {
        self.level(stat) >= self.max_level(stat)
    }

    /// Effective value: rule output at the current level times the form multiplier.
    pub fn current_value(&self, stat: StatKind) -> f32 {
        match self.form() {
            Some(form) => form.value_at(stat, self.level(stat)),
            None => *self.config.fallback_values.get(stat),
        }
    }

    /// Value `stat` would have after one more purchase; `None` when maxed or
    /// the active form is unknown.
    pub fn next_value(&self, stat: StatKind) -> Option<f32> {
        if self.is_maxed(stat) {
            return None;
        }
        self.form()
            .map(|form| form.value_at(stat, self.level(stat) + 1))
    }

    /// Price of the next purchase of `stat` (level L to L + 1).
    pub fn current_cost(&self, stat: StatKind) -> u64 {
        match self.form() {
            Some(form) => form.rule(stat).cost_at(self.level(stat)),
            None => *self.config.fallback_costs.get(stat),
        }
    }

    pub fn can_afford(&self, stat: StatKind, wallet: &Wallet) -> bool {
        !self.is_maxed(stat) && wallet.can_afford(self.current_cost(stat))
    }

    /// Damage times attacks per second. Never stored.
    pub fn derived_dps(&self) -> f32 {
        self.current_value(StatKind::Damage) * self.current_value(StatKind::AttacksPerSecond)
    }

    /// Seconds between player attacks; one second when the cadence is not positive.
    pub fn attack_cooldown(&self) -> f32 {
        let aps = self.current_value(StatKind::AttacksPerSecond);
        if aps > 0.0 { 1.0 / aps } else { 1.0 }
    }

    pub fn player_stats(&self) -> CombatStats {
        CombatStats {
            max_health: self.current_value(StatKind::Health),
            damage: self.current_value(StatKind::Damage),
            cooldown_ms: millis_from_secs(self.attack_cooldown()),
            speed: self.current_value(StatKind::MoveSpeed),
            range: self.current_value(StatKind::Range),
        }
    }

    pub fn monkey_level(&self) -> u32 {
        self.progress().monkey_level
    }

    pub fn level_up_cost(&self) -> u64 {
        scaled_cost(
            self.config.base_level_up_cost,
            self.config.level_up_cost_multiplier,
            self.monkey_level().saturating_sub(1),
        )
    }

    /// Price of evolving out of the current form, `None` if that form is unknown.
    pub fn evolution_cost(&self) -> Option<u64> {
        let index = self.chain.index_of(&self.progress().current_form)?;
        Some(scaled_cost(
            self.config.base_evolution_cost,
            self.config.evolution_cost_multiplier,
            index as u32,
        ))
    }

    pub fn can_evolve(&self, wallet: &Wallet) -> bool {
        match (self.next_form(), self.evolution_cost()) {
            (Some(_), Some(cost)) => wallet.can_afford(cost),
            _ => false,
        }
    }

    pub fn next_form(&self) -> Option<&MonkeyForm> {
        self.chain.next(&self.progress().current_form)
    }

    pub fn next_form_name(&self) -> &str {
        self.next_form().map_or(MAX_FORM_LABEL, |form| form.name.as_str())
    }

    pub fn current_form_name(&self) -> &str {
        self.form().map_or(self.progress().current_form.as_str(), |form| form.name.as_str())
    }

    // ===== transactions =====

    /// Buys one level of `stat`.
    ///
    /// # Errors
    ///
    /// - `UpgradeError::UnknownForm` if the active form is not in the chain
    /// - `UpgradeError::MaxLevel` if `stat` is capped (the wallet is not consulted)
    /// - `UpgradeError::InsufficientFunds` if the wallet cannot cover the cost
    pub fn try_upgrade(
        &mut self,
        stat: StatKind,
        wallet: &mut Wallet,
    ) -> Result<UpgradeReceipt, UpgradeError> {
        let level = self.level(stat);
        let cost = {
            let form = self.form().ok_or_else(|| self.unknown_form())?;
            let max = self.max_level(stat);
            if level >= max {
                return Err(UpgradeError::MaxLevel { stat, max });
            }
            form.rule(stat).cost_at(level)
        };

        spend(wallet, cost)?;
        let level = self.progress_mut().increment(stat);
        self.emit(StatsEvent::StatsChanged);
        Ok(UpgradeReceipt { stat, level, cost })
    }

    /// The damage-per-second purchase, which upgrades attack cadence.
    pub fn try_upgrade_dps(&mut self, wallet: &mut Wallet) -> Result<UpgradeReceipt, UpgradeError> {
        self.try_upgrade(StatKind::AttacksPerSecond, wallet)
    }

    /// Moves to the next form, zeroing every upgrade level.
    ///
    /// # Errors
    ///
    /// - `UpgradeError::UnknownForm` if the active form is not in the chain
    /// - `UpgradeError::FinalForm` at the end of the chain
    /// - `UpgradeError::InsufficientFunds` if the wallet cannot cover the cost
    pub fn try_evolve(&mut self, wallet: &mut Wallet) -> Result<EvolutionReceipt, UpgradeError> {
        let from = self.progress().current_form.clone();
        let cost = self.evolution_cost().ok_or_else(|| self.unknown_form())?;
        let to = match self.next_form() {
            Some(next) => next.id.clone(),
            None => return Err(UpgradeError::FinalForm { form: from }),
        };

        spend(wallet, cost)?;
        self.progress_mut().evolve_to(to.clone());
        self.emit(StatsEvent::StatsChanged);
        self.emit(StatsEvent::Evolved {
            from: from.clone(),
            to: to.clone(),
        });
        Ok(EvolutionReceipt { from, to, cost })
    }

    /// Buys one monkey level.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::InsufficientFunds` if the wallet cannot cover the cost.
    pub fn try_level_up(&mut self, wallet: &mut Wallet) -> Result<LevelUpReceipt, UpgradeError> {
        let cost = self.level_up_cost();
        spend(wallet, cost)?;

        let progress = self.progress_mut();
        progress.monkey_level += 1;
        let level = progress.monkey_level;
        self.emit(StatsEvent::LevelUp { level });
        Ok(LevelUpReceipt { level, cost })
    }

    /// Discards every monkey's progression. The active monkey starts over in
    /// the starting form at level 1 with no upgrades.
    pub fn reset_all_progress(&mut self) {
        let fresh = ProgressSave::new(self.save.active_monkey.clone());
        self.replace_save(fresh);
    }

    // ===== notifications =====

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StatsEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Drains events queued since the last call, oldest first.
    pub fn take_pending_events(&mut self) -> Vec<StatsEvent> {
        std::mem::take(&mut self.pending)
    }

    fn emit(&mut self, event: StatsEvent) {
        self.observers.notify(&event);
        self.pending.push(event);
    }

    fn unknown_form(&self) -> UpgradeError {
        UpgradeError::UnknownForm {
            form: self.progress().current_form.clone(),
        }
    }
}

fn spend(wallet: &mut Wallet, cost: u64) -> Result<(), UpgradeError> {
    let available = wallet.balance();
    if wallet.try_spend(cost) {
        Ok(())
    } else {
        Err(UpgradeError::InsufficientFunds {
            needed: cost,
            available,
        })
    }
}
