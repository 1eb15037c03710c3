//! Content sources for a client session.
use std::path::PathBuf;

use anyhow::Result;
use game_content::{ContentFactory, GameContent};
use game_core::FormOracle;

/// Factory for the content a session plays.
pub trait ContentProvider: Send + Sync {
    fn load(&self) -> Result<GameContent>;
}

/// Loads content from a data directory through [`ContentFactory`].
#[derive(Clone, Debug)]
pub struct DataDirContent {
    dir: PathBuf,
}

impl DataDirContent {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data set bundled with game-content.
    pub fn bundled() -> Self {
        Self::new(game_content::default_data_dir())
    }
}

impl ContentProvider for DataDirContent {
    fn load(&self) -> Result<GameContent> {
        let content = ContentFactory::new(self.dir.clone()).load_all()?;
        tracing::debug!(
            dir = %self.dir.display(),
            forms = content.catalog.chain().len(),
            levels = content.catalog.levels().len(),
            "content loaded"
        );
        Ok(content)
    }
}
