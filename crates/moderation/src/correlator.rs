//! Correlates unordered network events into at-most-one evaluation per
//! peer.
//!
//! Two independent signals drive the upload path: the host queueing an
//! upload for a peer, and peer statistics arriving from any origin. They
//! can arrive in either order. The probe tracker ties them together: an
//! upload marks the peer pending and either evaluates straight from the
//! browse cache or requests a browse and defers to the stats event. Search
//! responses are handled synchronously and never touch the tracker.

use tracing::{debug, info};
use vigil_classifier::evaluate;
use vigil_probe::{ProbeStatus, ProbeTracker};
use vigil_shares::{PeerName, ShareSnapshot};

use crate::config::{ConfigError, ModerationConfig};
use crate::events::{BanOrigin, EventEmitter, ModerationEvent};
use crate::notifier::send_notice;
use crate::traits::{BanService, BrowseService, BuddyRegistry, MessagingService};

/// Origin of a peer-statistics event. Only stats reported by the peer
/// itself carry a complete share listing; server-aggregated stats do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    Peer,
    Server,
}

/// What an incoming search result reveals about the responding peer's
/// shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub has_public_files: bool,
    pub has_private_files: bool,
}

impl SearchResponse {
    /// Zero public entries and at least one private entry. Any public
    /// presence disqualifies.
    pub fn is_fully_private(&self) -> bool {
        !self.has_public_files && self.has_private_files
    }
}

/// The moderation state machine.
///
/// Owns the probe tracker and the configuration; consumes the host's
/// services through the [`crate::traits`] contracts. Handlers never block
/// and never fail: on missing or unexpected data they degrade to a log
/// line, so the worst case is a missed ban, not a crash.
pub struct Moderator<B, W, M, U> {
    config: ModerationConfig,
    probes: ProbeTracker<PeerName>,
    bans: B,
    browse: W,
    messaging: M,
    buddies: U,
    events: EventEmitter,
}

impl<B, W, M, U> Moderator<B, W, M, U>
where
    B: BanService,
    W: BrowseService,
    M: MessagingService,
    U: BuddyRegistry,
{
    pub fn new(
        config: ModerationConfig,
        bans: B,
        browse: W,
        messaging: M,
        buddies: U,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let probes = ProbeTracker::new(config.max_tracked_peers);
        Ok(Self {
            config,
            probes,
            bans,
            browse,
            messaging,
            buddies,
            events: EventEmitter::default(),
        })
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// Probe status of a peer, for host introspection.
    pub fn probe_status(&self, peer: &PeerName) -> ProbeStatus {
        self.probes.status(peer)
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ModerationEvent> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// The host queued an upload for `peer`.
    ///
    /// First relevant event for a peer starts a probe; any later one is a
    /// no-op, which makes initiation at-most-once per tracked entry.
    pub fn on_upload_queued(&self, peer: &PeerName) {
        if !self.config.ban_on_upload {
            return;
        }

        if !self.probes.mark_pending(peer.clone()) {
            if self.config.debug_logging {
                debug!(%peer, "upload queued for already probed peer, skipping");
            }
            return;
        }
        self.events.probing(peer.clone());

        match self.browse.cached(peer) {
            Some(snapshot) => {
                if self.config.debug_logging {
                    debug!(%peer, "share listing already cached, evaluating");
                }
                self.check_peer(peer, &snapshot);
                self.probes.mark_done(peer.clone());
            }
            None => {
                // Suspension point: evaluation resumes in on_peer_stats
                // once the listing has been fetched.
                if self.config.debug_logging {
                    debug!(%peer, "share listing not cached, requesting browse");
                }
                self.browse.request_browse(peer);
            }
        }
    }

    /// Statistics about `peer` arrived from `source`.
    ///
    /// Fires for every peer the host learns about, not only for this
    /// component's own browse requests, so anything already finalized is
    /// ignored. Unsolicited peer-origin stats for an untracked peer are
    /// still evaluated when a listing is available.
    pub fn on_peer_stats(&self, peer: &PeerName, source: StatsSource) {
        if !self.config.ban_on_upload {
            return;
        }

        let status = self.probes.status(peer);
        if status.is_done() {
            return;
        }
        if source != StatsSource::Peer {
            return;
        }

        if self.config.debug_logging {
            debug!(%peer, "peer stats received");
        }

        // Pending means the browse was requested by on_upload_queued, so
        // the browse session is ours to close afterwards.
        let self_initiated = status.is_pending();

        match self.browse.cached(peer) {
            Some(snapshot) => self.check_peer(peer, &snapshot),
            None => {
                // Stats without a listing: nothing to recover, fail open.
                debug!(%peer, "peer stats received but no share listing available, giving up");
            }
        }

        if self_initiated {
            self.browse.release(peer);
        }

        self.probes.mark_done(peer.clone());
    }

    /// An incoming search result from `peer`.
    ///
    /// Stateless per call: evaluated synchronously against the listing
    /// flags the result itself carries, without touching the probe
    /// tracker.
    pub fn on_search_response(&self, peer: &PeerName, response: &SearchResponse) {
        if !self.config.ban_on_search {
            return;
        }
        if self.is_exempt(peer) {
            return;
        }
        if !response.is_fully_private() {
            return;
        }
        if self.bans.is_banned(peer) {
            if self.config.debug_logging {
                debug!(%peer, "fully private search result from already banned peer");
            }
            return;
        }

        if self.config.send_message_on_search_ban {
            send_notice(
                &self.messaging,
                peer,
                &self.config.search_ban_message,
                self.config.open_chat_ui,
            );
        }
        self.bans.ban(peer);
        info!(%peer, "banned: fully private share listing in a search result");
        self.events.banned(peer.clone(), BanOrigin::Search);
    }

    /// Shared evaluation path for the upload/stats correlation.
    fn check_peer(&self, peer: &PeerName, snapshot: &ShareSnapshot) {
        if self.is_exempt(peer) {
            if self.config.debug_logging {
                debug!(%peer, "whitelisted or buddy, not evaluated");
            }
            return;
        }

        let result = evaluate(&snapshot.public, &snapshot.private, &self.config.classifier());

        if !result.is_ban() {
            debug!(
                %peer,
                public = result.public_files,
                private = result.private_files,
                "peer cleared"
            );
            self.events
                .cleared(peer.clone(), result.public_files, result.private_files);
            return;
        }

        if self.bans.is_banned(peer) {
            debug!(%peer, "peer is already banned");
            return;
        }

        if self.config.send_message_on_ban {
            send_notice(
                &self.messaging,
                peer,
                &self.config.upload_ban_message,
                self.config.open_chat_ui,
            );
        }
        self.bans.ban(peer);
        info!(
            %peer,
            public = result.public_files,
            private = result.private_files,
            ratio = result.private_ratio,
            "banned: disproportionately private shares"
        );
        self.events.banned(peer.clone(), BanOrigin::Upload);
    }

    fn is_exempt(&self, peer: &PeerName) -> bool {
        self.config.is_whitelisted(peer) || self.buddies.contains(peer)
    }
}
