//! Moderation outcomes, broadcast for host UIs and logging sinks.
//!
//! Observability only: nothing in the decision path depends on whether
//! anyone subscribes.

use tokio::sync::broadcast;
use vigil_shares::PeerName;

/// Which event path a ban came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanOrigin {
    Upload,
    Search,
}

/// Moderation outcome events.
#[derive(Debug, Clone)]
pub enum ModerationEvent {
    /// A probe of the peer's shares has started.
    Probing { peer: PeerName },
    /// The peer was evaluated and allowed.
    Cleared {
        peer: PeerName,
        public_files: u64,
        private_files: u64,
    },
    /// The peer was banned.
    Banned { peer: PeerName, origin: BanOrigin },
}

impl ModerationEvent {
    pub fn peer(&self) -> &PeerName {
        match self {
            Self::Probing { peer } | Self::Cleared { peer, .. } | Self::Banned { peer, .. } => peer,
        }
    }

    pub fn is_ban(&self) -> bool {
        matches!(self, Self::Banned { .. })
    }
}

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Non-blocking broadcast emitter. Slow subscribers drop events independently.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    tx: broadcast::Sender<ModerationEvent>,
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl EventEmitter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn emit(&self, event: ModerationEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ModerationEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn probing(&self, peer: PeerName) {
        self.emit(ModerationEvent::Probing { peer });
    }

    pub fn cleared(&self, peer: PeerName, public_files: u64, private_files: u64) {
        self.emit(ModerationEvent::Cleared {
            peer,
            public_files,
            private_files,
        });
    }

    pub fn banned(&self, peer: PeerName, origin: BanOrigin) {
        self.emit(ModerationEvent::Banned { peer, origin });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emitter_basic() {
        let emitter = EventEmitter::default();
        let mut rx = emitter.subscribe();

        emitter.probing(PeerName::from("alice"));

        let event = rx.recv().await.unwrap();
        match event {
            ModerationEvent::Probing { peer } => assert_eq!(peer, PeerName::from("alice")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_emitter_multiple_subscribers() {
        let emitter = EventEmitter::default();
        let mut rx1 = emitter.subscribe();
        let mut rx2 = emitter.subscribe();

        emitter.banned(PeerName::from("bob"), BanOrigin::Search);

        for rx in [&mut rx1, &mut rx2] {
            let event = rx.recv().await.unwrap();
            assert!(event.is_ban());
            assert_eq!(event.peer(), &PeerName::from("bob"));
        }
    }

    #[test]
    fn test_emitter_without_subscribers_does_not_panic() {
        let emitter = EventEmitter::default();
        emitter.cleared(PeerName::from("carol"), 10, 0);
        emitter.banned(PeerName::from("dave"), BanOrigin::Upload);
        assert_eq!(emitter.subscriber_count(), 0);
    }
}
