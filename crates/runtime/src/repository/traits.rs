//! Repository contract for saving and loading progression.

use super::{Result, SaveFile};

/// Persistence for [`SaveFile`]s keyed by slot name.
///
/// `load` returns `Ok(None)` for a slot that was never written; a slot that
/// exists but cannot be trusted (bad JSON, checksum mismatch) is an error so
/// callers can decide whether to start fresh.
pub trait ProgressRepository: Send + Sync {
    fn load(&self, slot: &str) -> Result<Option<SaveFile>>;

    /// Replaces the slot's contents.
    fn save(&self, slot: &str, file: &SaveFile) -> Result<()>;

    /// Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// Slot names in ascending order.
    fn list_slots(&self) -> Result<Vec<String>>;

    fn exists(&self, slot: &str) -> bool {
        self.list_slots()
            .map(|slots| slots.iter().any(|s| s == slot))
            .unwrap_or(false)
    }
}
