//! Moderation configuration (TOML-serializable).
//!
//! Immutable during a session: the host's settings UI builds a new config
//! and a new [`crate::Moderator`] to apply changes. The classifier and
//! notifier only ever read it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vigil_classifier::ClassifierConfig;
use vigil_shares::PeerName;

/// Peers exempt from banning regardless of their shares. Seeded with the
/// cover-art lookup bot, which shares nothing at all.
pub const DEFAULT_WHITELIST: &[&str] = &["awesomeme"];

const DEFAULT_BAN_MESSAGE: &str = "You seem to have a lot of private folders, please message to \
                                   ask for an unban if you are not a trader.";

const DEFAULT_MAX_TRACKED_PEERS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("private threshold must be a percentage in 0..=100, got {0}")]
    ThresholdOutOfRange(u8),
}

/// Named, typed options the component exposes to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Evaluate peers when they queue an upload.
    #[serde(default = "default_true")]
    pub ban_on_upload: bool,

    /// Ban peers whose search results expose a fully private share.
    #[serde(default = "default_true")]
    pub ban_on_search: bool,

    /// Message peers before banning them on the upload path.
    #[serde(default = "default_true")]
    pub send_message_on_ban: bool,

    /// Message peers before banning them on the search path. Off by
    /// default: search results arrive in bulk and the extra messages may
    /// get the local user rate-limited.
    #[serde(default)]
    pub send_message_on_search_ban: bool,

    /// Private chat message sent before an upload-path ban. Each line is
    /// sent as a separate message; blank means no message.
    #[serde(default = "default_ban_message")]
    pub upload_ban_message: String,

    /// Private chat message sent before a search-path ban.
    #[serde(default = "default_ban_message")]
    pub search_ban_message: String,

    /// Open a chat tab on the local client for each message sent.
    #[serde(default = "default_true")]
    pub open_chat_ui: bool,

    /// Private-share percentage (0-100) at or above which a peer is
    /// considered a trader.
    #[serde(default = "default_threshold_percent")]
    pub private_threshold_percent: u8,

    /// Public file count at or above which a peer is always allowed.
    #[serde(default = "default_min_public_files")]
    pub min_public_files: u32,

    /// Count only music files when tallying shares.
    #[serde(default = "default_true")]
    pub music_only: bool,

    /// Peers never banned, on top of the host's buddy list.
    #[serde(default = "default_whitelist")]
    pub whitelist: BTreeSet<PeerName>,

    /// Cap on remembered probe entries. `None` = unlimited.
    #[serde(default = "default_max_tracked_peers")]
    pub max_tracked_peers: Option<usize>,

    /// Log every handled event, not just decisions.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            ban_on_upload: true,
            ban_on_search: true,
            send_message_on_ban: true,
            send_message_on_search_ban: false,
            upload_ban_message: DEFAULT_BAN_MESSAGE.to_owned(),
            search_ban_message: DEFAULT_BAN_MESSAGE.to_owned(),
            open_chat_ui: true,
            private_threshold_percent: 95,
            min_public_files: 1,
            music_only: true,
            whitelist: default_whitelist(),
            max_tracked_peers: Some(DEFAULT_MAX_TRACKED_PEERS),
            debug_logging: false,
        }
    }
}

impl ModerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.private_threshold_percent > 100 {
            return Err(ConfigError::ThresholdOutOfRange(
                self.private_threshold_percent,
            ));
        }
        Ok(())
    }

    /// The ban threshold as a fraction in `0.0..=1.0`.
    pub fn threshold(&self) -> f64 {
        f64::from(self.private_threshold_percent.min(100)) / 100.0
    }

    /// The classifier's view of this configuration.
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            music_only: self.music_only,
            threshold: self.threshold(),
            min_public_files: self.min_public_files,
        }
    }

    pub fn is_whitelisted(&self, peer: &PeerName) -> bool {
        self.whitelist.contains(peer)
    }
}

fn default_true() -> bool {
    true
}

fn default_ban_message() -> String {
    DEFAULT_BAN_MESSAGE.to_owned()
}

fn default_threshold_percent() -> u8 {
    95
}

fn default_min_public_files() -> u32 {
    1
}

fn default_whitelist() -> BTreeSet<PeerName> {
    DEFAULT_WHITELIST.iter().copied().map(PeerName::from).collect()
}

fn default_max_tracked_peers() -> Option<usize> {
    Some(DEFAULT_MAX_TRACKED_PEERS)
}
