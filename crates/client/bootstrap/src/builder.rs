//! Builds the runtime, content and config bundle used by front-ends.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use game_core::LevelOracle;
use runtime::{FileProgressRepository, Runtime, RuntimeConfig, default_save_dir};

use crate::config::ClientConfig;
use crate::content::{ContentProvider, DataDirContent};

/// Builder that assembles content, persistence and configuration for clients.
pub struct SessionBuilder {
    config: ClientConfig,
    content: Arc<dyn ContentProvider>,
}

impl SessionBuilder {
    pub fn new(config: ClientConfig) -> Self {
        let default_content = DataDirContent::new(config.content_dir.clone());
        Self {
            config,
            content: Arc::new(default_content),
        }
    }

    /// Provide a custom content source (e.g. generated levels in tests).
    pub fn content_provider(mut self, provider: impl ContentProvider + 'static) -> Self {
        self.content = Arc::new(provider);
        self
    }

    pub fn build(self) -> Result<SessionSetup> {
        let content = self.content.load().context("failed to load game content")?;

        let start_level = match &self.config.start_level {
            Some(level) => {
                if content.catalog.level(level).is_none() {
                    anyhow::bail!("start level '{}' is not defined", level);
                }
                level.clone()
            }
            None => content
                .catalog
                .first_level()
                .map(|level| level.id.clone())
                .context("content defines no levels")?,
        };

        let runtime_config = RuntimeConfig {
            save_slot: self.config.save_slot.clone(),
            reset_on_start: self.config.reset_on_start,
            event_buffer_size: self.config.event_buffer,
        };
        let mut builder = Runtime::builder().config(runtime_config).content(content);

        let save_dir = if self.config.enable_persistence {
            let dir = self
                .config
                .save_data_dir
                .clone()
                .or_else(default_save_dir)
                .context("no save directory available; set SAVE_DATA_DIR")?;
            let repository = FileProgressRepository::new(&dir)
                .with_context(|| format!("failed to open save directory {}", dir.display()))?;
            builder = builder.repository(repository);
            Some(dir)
        } else {
            None
        };

        let runtime = builder.build()?;

        tracing::info!(
            slot = %self.config.save_slot,
            persistence = save_dir.is_some(),
            start_level = %start_level,
            "session assembled"
        );

        Ok(SessionSetup {
            config: self.config,
            start_level,
            save_dir,
            runtime,
        })
    }
}

pub struct SessionSetup {
    pub config: ClientConfig,
    /// Level the front-end should start first.
    pub start_level: String,
    pub save_dir: Option<PathBuf>,
    pub runtime: Runtime,
}
