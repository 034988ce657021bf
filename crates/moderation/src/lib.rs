//! Trader moderation for a peer-to-peer file-sharing client.
//!
//! The host client feeds three kinds of network events into a
//! [`Moderator`]: an upload being queued for a peer, peer statistics
//! arriving from any origin, and incoming search responses. The moderator
//! correlates the first two (they can arrive in either order), fetches the
//! peer's share listing through the host's browse service, runs the
//! [`vigil_classifier`] heuristic, and bans traders through the host's ban
//! service — optionally messaging them first.
//!
//! All handlers are infallible and run to completion without blocking; the
//! only suspension point is a browse-cache miss, where evaluation resumes
//! on the later stats event.

pub mod config;
pub mod correlator;
pub mod events;
pub mod notifier;
pub mod traits;

pub use config::{ConfigError, ModerationConfig};
pub use correlator::{Moderator, SearchResponse, StatsSource};
pub use events::{BanOrigin, EventEmitter, ModerationEvent};
pub use notifier::send_notice;
pub use traits::{BanService, BrowseService, BuddyRegistry, MessagingService};

pub use vigil_classifier::{ClassifierConfig, Decision, Evaluation};
pub use vigil_probe::{ProbeStatus, ProbeTracker};
