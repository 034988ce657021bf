//! Peer naming.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque unique name of a remote peer.
///
/// Soulseek-style networks identify peers by username rather than by
/// address, so this is a thin string wrapper. It is the map key everywhere
/// in the moderation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerName(String);

impl PeerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for PeerName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for PeerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
