//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap a client session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `forms.ron`, `enemies.ron`, `levels.ron` and `config.toml`.
    pub content_dir: PathBuf,
    /// Save directory; the platform data directory when unset.
    pub save_data_dir: Option<PathBuf>,
    pub save_slot: String,
    /// Names the log directory; generated from the clock when unset.
    pub session_id: Option<String>,
    pub enable_persistence: bool,
    pub reset_on_start: bool,
    /// Simulation step length and real-time pacing interval.
    pub tick_millis: u64,
    /// Level loaded when the session starts; the first level when unset.
    pub start_level: Option<String>,
    pub event_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: game_content::default_data_dir(),
            save_data_dir: None,
            save_slot: "main".to_owned(),
            session_id: None,
            enable_persistence: true,
            reset_on_start: false,
            tick_millis: 100,
            start_level: None,
            event_buffer: 256,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Content directory (default: bundled data)
    /// - `SAVE_DATA_DIR` - Directory for save slots (default: platform-specific)
    /// - `GAME_SAVE_SLOT` - Save slot name (default: main)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `ENABLE_PERSISTENCE` - Persist progress between runs (default: true)
    /// - `RESET_ON_START` - Discard saved progress at startup (default: false)
    /// - `TICK_MILLIS` - Simulation step in milliseconds (default: 100)
    /// - `START_LEVEL` - Level to start in (default: first level)
    /// - `EVENT_BUFFER` - Per-topic event buffer (default: 256)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("CONTENT_DATA_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        config.save_data_dir = lookup("SAVE_DATA_DIR").map(PathBuf::from);

        if let Some(slot) = lookup("GAME_SAVE_SLOT").filter(|s| !s.is_empty()) {
            config.save_slot = slot;
        }
        config.session_id = lookup("GAME_SESSION_ID").filter(|s| !s.is_empty());

        if let Some(enable) = read_flag(&lookup, "ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        }
        if let Some(reset) = read_flag(&lookup, "RESET_ON_START") {
            config.reset_on_start = reset;
        }

        if let Some(millis) = read_env::<u64>(&lookup, "TICK_MILLIS") {
            config.tick_millis = millis.max(1);
        }
        config.start_level = lookup("START_LEVEL").filter(|s| !s.is_empty());

        if let Some(capacity) = read_env::<usize>(&lookup, "EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Accepts `true`/`false`, `1`/`0`, and a bare (empty) variable as `true`.
fn read_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = lookup(key)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
