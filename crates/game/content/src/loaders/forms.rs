//! Monkey form chain loader.

use std::path::Path;

use game_core::{FormChain, MonkeyForm};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Evolution chain structure for RON files, weakest form first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormCatalog {
    pub forms: Vec<MonkeyForm>,
}

/// Loader for the monkey evolution chain from RON files.
pub struct FormLoader;

impl FormLoader {
    pub fn load(path: &Path) -> LoadResult<FormChain> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<FormChain> {
        let catalog: FormCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse form catalog RON: {}", e))?;

        FormChain::new(catalog.forms)
            .map_err(|e| anyhow::anyhow!("Invalid evolution chain: {}", e))
    }
}
