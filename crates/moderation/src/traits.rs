//! Contracts for the host-client services the moderator calls into.
//!
//! All calls are fire-and-forget from the moderator's perspective:
//! failures are the host's concern and are never surfaced here.

use auto_impl::auto_impl;
use vigil_shares::{PeerName, ShareSnapshot};

/// The host's network filter: ban state and ban enforcement.
#[auto_impl(&, Box, Arc)]
pub trait BanService: Send + Sync {
    fn is_banned(&self, peer: &PeerName) -> bool;
    fn ban(&self, peer: &PeerName);
}

/// The host's peer-browsing subsystem.
#[auto_impl(&, Box, Arc)]
pub trait BrowseService: Send + Sync {
    /// The peer's share listing, if it has already been fetched.
    fn cached(&self, peer: &PeerName) -> Option<ShareSnapshot>;

    /// Ask the host to fetch the peer's share listing. Asynchronous: the
    /// eventual result is signalled through a later peer-stats event.
    fn request_browse(&self, peer: &PeerName);

    /// Close a browse session this component opened.
    fn release(&self, peer: &PeerName);
}

/// The host's private-messaging transport.
#[auto_impl(&, Box, Arc)]
pub trait MessagingService: Send + Sync {
    fn send_line(&self, peer: &PeerName, text: &str, open_ui: bool);
}

/// The host's buddy list. Buddies are never banned.
#[auto_impl(&, Box, Arc)]
pub trait BuddyRegistry: Send + Sync {
    fn contains(&self, peer: &PeerName) -> bool;
}
