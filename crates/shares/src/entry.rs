//! File records inside a shared folder.

use serde::{Deserialize, Serialize};

/// Extensions counted as music when extension filtering is enabled.
///
/// Matched case-insensitively against the part of the filename after the
/// last `.`.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "aac", "aiff", "ape", "flac", "m4a", "mp3", "ogg", "opus", "wav", "wma",
];

/// One file inside a shared folder: name plus size in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The substring after the last `.`, if any.
    ///
    /// Names without a dot, or with a trailing dot, have no extension.
    pub fn extension(&self) -> Option<&str> {
        match self.name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Whether the extension belongs to [`AUDIO_EXTENSIONS`] (case-insensitive).
    pub fn is_music(&self) -> bool {
        self.extension()
            .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
    }
}
