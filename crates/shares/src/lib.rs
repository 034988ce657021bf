//! Primitives describing what a remote peer shares: peer names, file
//! entries, and public/private folder listings.

mod entry;
mod listing;
mod peer;

pub use entry::{AUDIO_EXTENSIONS, FileEntry};
pub use listing::{FolderListing, ShareSnapshot};
pub use peer::PeerName;
