//! Repository layer for dynamic runtime data
//!
//! Repositories hold what CHANGES during play: the progression save and the
//! banana balance, one [`SaveFile`] per slot.
//!
//! Static content (forms, enemies, levels) comes from game-content, never from here.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileProgressRepository, default_save_dir};
pub use memory::InMemoryProgressRepository;
pub use traits::ProgressRepository;
pub use types::{SAVE_VERSION, SaveFile};
