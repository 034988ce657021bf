//! Pure trader heuristic: decides from a peer's public/private share
//! listings whether the peer hides a disproportionate share of its files.
//!
//! No side effects, deterministic, safe to call repeatedly.

use serde::{Deserialize, Serialize};
use vigil_shares::FolderListing;

/// Classifier outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Ban,
}

impl Decision {
    pub fn is_ban(&self) -> bool {
        matches!(self, Decision::Ban)
    }
}

/// Thresholds the heuristic runs under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Count only files with a music extension.
    pub music_only: bool,
    /// Private-share ratio at or above which a peer is banned, as a
    /// fraction in `0.0..=1.0`.
    pub threshold: f64,
    /// Public file count at or above which a peer is always allowed,
    /// regardless of ratio.
    pub min_public_files: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            music_only: true,
            threshold: 0.95,
            min_public_files: 1,
        }
    }
}

/// Decision plus the tallies it was made from, for logging and events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub decision: Decision,
    pub public_files: u64,
    pub private_files: u64,
    /// `private / (public + private)`, or `0.0` when both counts are zero.
    pub private_ratio: f64,
}

impl Evaluation {
    pub fn is_ban(&self) -> bool {
        self.decision.is_ban()
    }
}

/// Evaluate one peer's listings.
///
/// A peer is banned only when it has private files, its public file count
/// is below `min_public_files`, and the private ratio reaches `threshold`.
/// A ratio exactly at the threshold bans. Everything else allows:
/// nothing private means nothing hidden, and no relevant files at all
/// means there is nothing to judge.
pub fn evaluate(
    public: &FolderListing,
    private: &FolderListing,
    config: &ClassifierConfig,
) -> Evaluation {
    let count = |listing: &FolderListing| {
        if config.music_only {
            listing.music_file_count()
        } else {
            listing.file_count()
        }
    };

    let public_files = count(public);
    let private_files = count(private);
    let total = public_files + private_files;

    let private_ratio = if total == 0 {
        0.0
    } else {
        private_files as f64 / total as f64
    };

    let decision = if private_files == 0 {
        Decision::Allow
    } else if public_files >= u64::from(config.min_public_files) || private_ratio < config.threshold
    {
        Decision::Allow
    } else {
        Decision::Ban
    };

    Evaluation {
        decision,
        public_files,
        private_files,
        private_ratio,
    }
}
