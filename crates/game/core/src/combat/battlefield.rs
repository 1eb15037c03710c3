use std::collections::BTreeMap;

use super::{ActorId, ActorKind, CombatActor, CombatState, CombatStats, DamageOutcome, Faction};
use crate::engine::GameEvent;
use crate::time::SimTime;

/// Every actor of the current battle, keyed and iterated by id.
#[derive(Clone, Debug, Default)]
pub struct Battlefield {
    actors: BTreeMap<ActorId, CombatActor>,
    next_id: u32,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(
        &mut self,
        faction: Faction,
        kind: ActorKind,
        position: f32,
        stats: CombatStats,
    ) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.insert(id, CombatActor::new(id, faction, kind, position, stats));
        id
    }

    pub fn get(&self, id: ActorId) -> Option<&CombatActor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut CombatActor> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn remove(&mut self, id: ActorId) -> Option<CombatActor> {
        self.actors.remove(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &CombatActor> {
        self.actors.values()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn living(&self, faction: Faction) -> usize {
        self.actors
            .values()
            .filter(|actor| actor.faction == faction && actor.is_alive())
            .count()
    }

    /// Drops every actor of `faction`, dead or alive.
    pub fn clear_faction(&mut self, faction: Faction) {
        self.actors.retain(|_, actor| actor.faction != faction);
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }

    /// Movement phase: validates targets, probes for opponents and walks.
    ///
    /// Actors are processed in id order against the positions left by the
    /// actors before them, and a walker never steps past the nearest opponent
    /// ahead of it.
    pub fn advance(&mut self, dt_ms: u64, events: &mut Vec<GameEvent>) {
        let dt = dt_ms as f32 / 1000.0;
        let ids: Vec<ActorId> = self.actors.keys().copied().collect();

        for id in ids {
            let Some(actor) = self.actors.get(&id) else {
                continue;
            };
            if !actor.is_alive() {
                continue;
            }

            if let CombatState::Fighting { target } = actor.state() {
                if self.in_reach(actor, target) {
                    continue;
                }
                if let Some(actor) = self.actors.get_mut(&id) {
                    actor.disengage();
                }
                events.push(GameEvent::TargetLost { actor: id, target });
            }

            let Some(actor) = self.actors.get(&id) else {
                continue;
            };
            let range = actor.stats.range;
            let ahead = self.nearest_opponent_ahead(actor);
            let step = match ahead {
                Some((_, distance)) if distance <= range => 0.0,
                Some((_, distance)) => {
                    (actor.stats.speed.max(0.0) * dt).min((distance - range).max(0.0))
                }
                None => actor.stats.speed.max(0.0) * dt,
            };

            let Some(actor) = self.actors.get_mut(&id) else {
                continue;
            };
            actor.position += actor.faction.direction() * step;

            if let Some((target, distance)) = ahead {
                if distance - step <= range {
                    actor.engage(target);
                    events.push(GameEvent::TargetAcquired { actor: id, target });
                }
            }
        }
    }

    /// Combat phase: every fighting actor whose cooldown has elapsed hits its target once.
    pub fn resolve_attacks(&mut self, now: SimTime, events: &mut Vec<GameEvent>) {
        let ids: Vec<ActorId> = self.actors.keys().copied().collect();

        for id in ids {
            let (target, damage, faction) = match self.actors.get(&id) {
                Some(actor) if actor.is_alive() && actor.can_attack(now) => match actor.target() {
                    Some(target) => (target, actor.stats.damage, actor.faction),
                    None => continue,
                },
                _ => continue,
            };

            let Some(defender) = self.actors.get_mut(&target) else {
                continue;
            };
            let outcome = defender.take_damage(damage);
            if outcome == DamageOutcome::AlreadyDead {
                continue;
            }
            let remaining = defender.health();
            let defender_faction = defender.faction;

            if let Some(attacker) = self.actors.get_mut(&id) {
                attacker.record_attack(now);
            }
            events.push(GameEvent::ActorAttacked {
                attacker: id,
                faction,
                target,
                damage,
            });
            events.push(GameEvent::ActorDamaged {
                actor: target,
                faction: defender_faction,
                amount: damage,
                remaining,
            });
        }
    }

    /// Removes and returns dead actors in id order.
    pub fn remove_dead(&mut self) -> Vec<CombatActor> {
        let dead: Vec<ActorId> = self
            .actors
            .values()
            .filter(|actor| !actor.is_alive())
            .map(|actor| actor.id)
            .collect();
        dead.into_iter().filter_map(|id| self.actors.remove(&id)).collect()
    }

    fn in_reach(&self, actor: &CombatActor, target: ActorId) -> bool {
        self.actors.get(&target).is_some_and(|other| {
            other.is_alive() && (other.position - actor.position).abs() <= actor.stats.range
        })
    }

    /// Closest living opponent at or ahead of `actor`, with its distance.
    fn nearest_opponent_ahead(&self, actor: &CombatActor) -> Option<(ActorId, f32)> {
        let opponent = actor.faction.opponent();
        self.actors
            .values()
            .filter(|other| other.faction == opponent && other.is_alive())
            .map(|other| (other.id, actor.distance_ahead(other.position)))
            .filter(|(_, distance)| *distance >= 0.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
