//! Upgradeable stats.
//!
//! Every monkey form carries one [`StatRule`] per [`StatKind`]. A rule turns an
//! upgrade level into an effective value and into the price of the next
//! purchase; [`StatTable`] keeps the five per-stat entries side by side.

mod kind;
mod rule;
mod table;

pub use kind::StatKind;
pub use rule::{StatRule, scaled_cost};
pub use table::StatTable;
