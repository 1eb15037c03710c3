//! Banana battler headless client.
//!
//! Main entry point: loads `.env`, merges command-line flags over the
//! environment configuration, installs logging and runs the session loop
//! until ctrl-c or the requested simulated duration.
//!
//! # Examples
//!
//! ```bash
//! # Play in real time with the autopilot spending bananas
//! cargo run -p monkey-client
//!
//! # Simulate ten minutes as fast as possible in a throwaway slot
//! cargo run -p monkey-client -- --fast --duration 600 --slot scratch --reset
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use client_bootstrap::{ClientConfig, SessionBuilder};
use monkey_client::{Autopilot, StatusLine, logging};
use runtime::Runtime;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Parser)]
#[command(name = "monkey", version, about = "Headless banana battler session")]
struct Args {
    /// Content directory (overrides CONTENT_DATA_DIR)
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Save directory (overrides SAVE_DATA_DIR)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Save slot name (overrides GAME_SAVE_SLOT)
    #[arg(long)]
    slot: Option<String>,

    /// Session id used for the log directory (overrides GAME_SESSION_ID)
    #[arg(long)]
    session: Option<String>,

    /// Level to start in (overrides START_LEVEL)
    #[arg(long)]
    level: Option<String>,

    /// Simulation step in milliseconds (overrides TICK_MILLIS)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Do not read or write save files
    #[arg(long)]
    no_persist: bool,

    /// Discard saved progress before starting
    #[arg(long)]
    reset: bool,

    /// Disable the autopilot; the monkey only fights
    #[arg(long)]
    manual: bool,

    /// Let the autopilot move between levels but never spend bananas
    #[arg(long, conflicts_with = "manual")]
    no_spend: bool,

    /// Stop after this many simulated seconds
    #[arg(long)]
    duration: Option<u64>,

    /// Run without real-time pacing (requires --duration)
    #[arg(long, requires = "duration")]
    fast: bool,

    /// Simulated seconds between status lines
    #[arg(long, default_value_t = 10)]
    status_every: u64,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(dir) = &self.content_dir {
            config.content_dir = dir.clone();
        }
        if let Some(dir) = &self.save_dir {
            config.save_data_dir = Some(dir.clone());
        }
        if let Some(slot) = &self.slot {
            config.save_slot = slot.clone();
        }
        if let Some(session) = &self.session {
            config.session_id = Some(session.clone());
        }
        if let Some(level) = &self.level {
            config.start_level = Some(level.clone());
        }
        if let Some(millis) = self.tick_ms {
            config.tick_millis = millis.max(1);
        }
        if self.no_persist {
            config.enable_persistence = false;
        }
        if self.reset {
            config.reset_on_start = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = ClientConfig::from_env();
    args.apply(&mut config);

    let session_id = config
        .session_id
        .clone()
        .unwrap_or_else(logging::generated_session_id);
    let _log_guard = logging::setup_logging(&session_id, args.verbose)?;

    tracing::info!("Starting banana battler");
    tracing::info!("Content: {}", config.content_dir.display());
    tracing::info!(
        "Persistence: {} (slot '{}')",
        config.enable_persistence,
        config.save_slot
    );

    let setup = SessionBuilder::new(config).build()?;
    if let Some(dir) = &setup.save_dir {
        tracing::info!("Saves: {}", dir.display());
    }
    let tick_ms = setup.config.tick_millis;
    let autopilot = (!args.manual).then(|| {
        let pilot = Autopilot::new(setup.start_level.clone());
        if args.no_spend {
            pilot.without_spending()
        } else {
            pilot
        }
    });
    let mut runtime = setup.runtime;

    if autopilot.is_none() {
        runtime.enqueue(runtime::Command::StartLevel(setup.start_level.clone()));
    }

    let limit_ms = args.duration.map(|secs| secs.saturating_mul(1000));
    let status_every_ms = args.status_every.max(1).saturating_mul(1000);
    let mut session = Session {
        autopilot,
        tick_ms,
        limit_ms,
        status_every_ms,
        next_status_ms: 0,
        elapsed_ms: 0,
    };

    if args.fast {
        while session.frame(&mut runtime) {}
    } else {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Interrupted, shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if !session.frame(&mut runtime) {
                        break;
                    }
                }
            }
        }
    }

    tracing::info!("{}", StatusLine::capture(&runtime));
    runtime.flush()?;
    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Frame driver shared by paced and fast runs.
struct Session {
    autopilot: Option<Autopilot>,
    tick_ms: u64,
    limit_ms: Option<u64>,
    status_every_ms: u64,
    next_status_ms: u64,
    elapsed_ms: u64,
}

impl Session {
    /// Runs one frame. Returns `false` once the duration limit is reached.
    fn frame(&mut self, runtime: &mut Runtime) -> bool {
        if let Some(autopilot) = &self.autopilot {
            for command in autopilot.plan(runtime) {
                runtime.enqueue(command);
            }
        }
        runtime.tick(self.tick_ms);
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.tick_ms);

        if self.elapsed_ms >= self.next_status_ms {
            tracing::info!("{}", StatusLine::capture(runtime));
            self.next_status_ms = self.elapsed_ms.saturating_add(self.status_every_ms);
        }

        self.limit_ms.is_none_or(|limit| self.elapsed_ms < limit)
    }
}
