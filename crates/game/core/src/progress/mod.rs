//! Persistent upgrade progression.
//!
//! A [`ProgressSave`] is the whole persisted state of one save slot apart from
//! the banana balance: one [`MonkeyProgress`] per monkey id plus the id of the
//! monkey currently being played.

mod monkey;
mod save;

pub use monkey::MonkeyProgress;
pub use save::ProgressSave;
