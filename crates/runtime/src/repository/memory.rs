//! In-memory ProgressRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{ProgressRepository, RepositoryError, Result, SaveFile};

/// In-memory implementation of ProgressRepository.
///
/// Files are verified on load exactly like the file-backed repository, so
/// tests can exercise the checksum path without touching disk.
pub struct InMemoryProgressRepository {
    slots: RwLock<HashMap<String, SaveFile>>,
}

impl InMemoryProgressRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Create with `file` already stored under `slot`.
    pub fn with_slot(slot: impl Into<String>, file: SaveFile) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.into(), file);
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl Default for InMemoryProgressRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressRepository for InMemoryProgressRepository {
    fn load(&self, slot: &str) -> Result<Option<SaveFile>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match slots.get(slot) {
            Some(file) => {
                file.verify(slot)?;
                Ok(Some(file.clone()))
            }
            None => Ok(None),
        }
    }

    fn save(&self, slot: &str, file: &SaveFile) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_owned(), file.clone());
        Ok(())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = slots.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ProgressSave;

    #[test]
    fn stores_by_slot() {
        let repo = InMemoryProgressRepository::new();
        let file = SaveFile::new(ProgressSave::new("starter"), 5).unwrap();

        repo.save("one", &file).unwrap();
        assert_eq!(repo.load("one").unwrap(), Some(file));
        assert_eq!(repo.load("two").unwrap(), None);
        assert_eq!(repo.list_slots().unwrap(), vec!["one"]);

        repo.delete("one").unwrap();
        assert!(!repo.exists("one"));
    }

    #[test]
    fn verifies_on_load() {
        let mut file = SaveFile::new(ProgressSave::new("starter"), 5).unwrap();
        file.checksum = "00".repeat(32);
        let repo = InMemoryProgressRepository::with_slot("main", file);

        assert!(matches!(
            repo.load("main"),
            Err(RepositoryError::ChecksumMismatch { .. })
        ));
    }
}
