//! Side-scrolling combat.
//!
//! Every participant is a [`CombatActor`] running the same two-state machine:
//! it walks toward the opposing side until a forward range probe finds an
//! opponent, then attacks that opponent on its cooldown until the target dies
//! or leaves range. [`Battlefield`] owns all actors and advances them in id
//! order so a step is reproducible.

mod actor;
mod battlefield;

pub use actor::{ActorId, ActorKind, CombatActor, CombatState, CombatStats, DamageOutcome, Faction};
pub use battlefield::Battlefield;
