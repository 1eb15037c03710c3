//! Topic-based event bus implementation.

use std::sync::Arc;

use game_core::{BalanceChanged, GameEvent, StatsEvent};
use tokio::sync::broadcast;

use crate::runtime::SessionPhase;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Wallet balance, rewards and progression changes
    Economy,
    /// Spawns, targeting, attacks and deaths
    Combat,
    /// Wave and level flow, session phase changes
    Wave,
    /// Skipped content, refused commands, persistence failures
    Diagnostics,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Economy,
        Topic::Combat,
        Topic::Wave,
        Topic::Diagnostics,
    ];
}

/// Event wrapper that carries the topic and typed payload
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Game(GameEvent),
    Balance(BalanceChanged),
    Stats(StatsEvent),
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
    CommandRejected {
        command: String,
        code: &'static str,
        message: String,
    },
    PersistenceFailed {
        slot: String,
        message: String,
    },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(GameEvent::BananasEarned { .. }) => Topic::Economy,
            Event::Game(GameEvent::SpawnSkipped { .. }) => Topic::Diagnostics,
            Event::Game(event) if event.is_combat() => Topic::Combat,
            Event::Game(_) => Topic::Wave,
            Event::Balance(_) | Event::Stats(_) => Topic::Economy,
            Event::PhaseChanged { .. } => Topic::Wave,
            Event::CommandRejected { .. } | Event::PersistenceFailed { .. } => Topic::Diagnostics,
        }
    }
}

#[derive(Debug)]
struct Channels {
    economy: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    wave: broadcast::Sender<Event>,
    diagnostics: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Economy => &self.economy,
            Topic::Combat => &self.combat,
            Topic::Wave => &self.wave,
            Topic::Diagnostics => &self.diagnostics,
        }
    }
}

/// Topic-based event bus
///
/// Publishing never blocks: a topic without subscribers drops the event, and
/// a lagging subscriber loses the oldest events in its buffer.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                economy: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
                wave: broadcast::channel(capacity).0,
                diagnostics: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics, one receiver per topic in request order.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
