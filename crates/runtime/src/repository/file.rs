//! File-based ProgressRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{ProgressRepository, RepositoryError, Result, SaveFile};

/// Platform save directory, e.g. `~/.local/share/banana-battler/saves` on Linux.
pub fn default_save_dir() -> Option<PathBuf> {
    ProjectDirs::from("io", "bananabattler", "banana-battler")
        .map(|dirs| dirs.data_dir().join("saves"))
}

/// File-based implementation of ProgressRepository.
///
/// Each slot is stored as `{slot}.json`, pretty-printed so players can read
/// their own saves. Writes go to a temp file first and are renamed into
/// place, so a crash mid-write leaves the previous save intact.
pub struct FileProgressRepository {
    base_dir: PathBuf,
}

impl FileProgressRepository {
    /// Create a new file-based progress repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RepositoryError::InvalidSlot(slot.to_owned()));
        }
        Ok(self.base_dir.join(format!("{}.json", slot)))
    }
}

impl ProgressRepository for FileProgressRepository {
    fn load(&self, slot: &str) -> Result<Option<SaveFile>> {
        let path = self.slot_path(slot)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let file: SaveFile = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        file.verify(slot)?;

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());

        Ok(Some(file))
    }

    fn save(&self, slot: &str, file: &SaveFile) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(file)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            bananas = file.bananas,
            "Saved slot '{}' to {}",
            slot,
            path.display()
        );

        Ok(())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".json")
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }
}
