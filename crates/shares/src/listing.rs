//! Folder listings as a peer's browse response reports them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::FileEntry;

/// Mapping from folder path to the ordered files it contains.
///
/// An empty listing is valid input everywhere (zero counts).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderListing {
    folders: BTreeMap<String, Vec<FileEntry>>,
}

impl FolderListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a folder, replacing any previous contents under the same path.
    pub fn insert(&mut self, path: impl Into<String>, files: Vec<FileEntry>) {
        self.folders.insert(path.into(), files);
    }

    /// Append a single file to a folder, creating the folder if needed.
    pub fn add_file(&mut self, path: impl Into<String>, file: FileEntry) {
        self.folders.entry(path.into()).or_default().push(file);
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Total number of files across all folders.
    pub fn file_count(&self) -> u64 {
        self.folders.values().map(|files| files.len() as u64).sum()
    }

    /// Total number of files with a music extension across all folders.
    pub fn music_file_count(&self) -> u64 {
        self.folders
            .values()
            .flatten()
            .filter(|file| file.is_music())
            .count() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FileEntry])> {
        self.folders
            .iter()
            .map(|(path, files)| (path.as_str(), files.as_slice()))
    }
}

impl FromIterator<(String, Vec<FileEntry>)> for FolderListing {
    fn from_iter<I: IntoIterator<Item = (String, Vec<FileEntry>)>>(iter: I) -> Self {
        Self {
            folders: iter.into_iter().collect(),
        }
    }
}

/// The public/private listing pair one browse of a peer yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSnapshot {
    pub public: FolderListing,
    pub private: FolderListing,
}

impl ShareSnapshot {
    pub fn new(public: FolderListing, private: FolderListing) -> Self {
        Self { public, private }
    }
}
