use chrono::{DateTime, Utc};
use game_core::ProgressSave;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{RepositoryError, Result};

/// Current on-disk envelope version.
pub const SAVE_VERSION: u32 = 1;

/// Everything a session persists: progression plus the wallet balance.
///
/// `checksum` is the hex SHA-256 of the canonical JSON of
/// `(version, progress, bananas)`; `saved_at` is informational and not covered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub checksum: String,
    pub progress: ProgressSave,
    pub bananas: u64,
}

#[derive(Serialize)]
struct ChecksumPayload<'a> {
    version: u32,
    progress: &'a ProgressSave,
    bananas: u64,
}

impl SaveFile {
    /// Seals `progress` and `bananas` with the current time and checksum.
    pub fn new(progress: ProgressSave, bananas: u64) -> Result<Self> {
        let mut file = Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            checksum: String::new(),
            progress,
            bananas,
        };
        file.checksum = file.compute_checksum()?;
        Ok(file)
    }

    pub fn compute_checksum(&self) -> Result<String> {
        let payload = ChecksumPayload {
            version: self.version,
            progress: &self.progress,
            bananas: self.bananas,
        };
        let bytes = serde_json::to_vec(&payload)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    /// Checks the version and checksum of a file read back from storage.
    pub fn verify(&self, slot: &str) -> Result<()> {
        if self.version > SAVE_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: self.version,
                supported: SAVE_VERSION,
            });
        }
        let actual = self.compute_checksum()?;
        if actual != self.checksum {
            return Err(RepositoryError::ChecksumMismatch {
                slot: slot.to_owned(),
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::StatKind;

    fn sample() -> ProgressSave {
        let mut save = ProgressSave::new("starter");
        let monkey = save.get_or_create("starter", "monkee_1");
        *monkey.levels.get_mut(StatKind::Damage) = 3;
        save
    }

    #[test]
    fn sealed_file_verifies() {
        let file = SaveFile::new(sample(), 120).unwrap();
        assert_eq!(file.version, SAVE_VERSION);
        assert_eq!(file.checksum.len(), 64);
        file.verify("main").unwrap();
    }

    #[test]
    fn tampered_balance_is_detected() {
        let mut file = SaveFile::new(sample(), 120).unwrap();
        file.bananas = 999_999;
        assert!(matches!(
            file.verify("main"),
            Err(RepositoryError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut file = SaveFile::new(sample(), 0).unwrap();
        file.version = SAVE_VERSION + 1;
        assert!(matches!(
            file.verify("main"),
            Err(RepositoryError::UnsupportedVersion { .. })
        ));
    }
}
