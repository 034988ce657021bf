//! Per-peer probe bookkeeping.
//!
//! Deduplicates concurrent evaluation attempts: a peer is probed at most
//! once per tracked entry, and a peer whose probe is in flight is not
//! re-entered until that probe resolves. Entries are held in an LRU map
//! with an optional capacity cap so the tracker cannot grow without bound
//! over a long session.

use std::fmt::Debug;
use std::hash::Hash;

use hashlink::LruCache;
use parking_lot::Mutex;

/// Blanket-implemented for any type usable as a probe key.
pub trait ProbeId: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> ProbeId for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Probe status of one peer. Absence from the tracker reads as `Unprobed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Unprobed,
    Pending,
    Done,
}

impl ProbeStatus {
    pub fn is_unprobed(&self) -> bool {
        matches!(self, ProbeStatus::Unprobed)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ProbeStatus::Pending)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ProbeStatus::Done)
    }
}

/// Stored per tracked peer. `Unprobed` is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Pending,
    Done,
}

/// Tri-state probe tracker keyed by peer.
///
/// Transitions go unprobed → pending → done and never regress;
/// re-evaluation after done only happens through a fresh external event
/// creating a new entry after eviction.
pub struct ProbeTracker<Id: ProbeId> {
    entries: Mutex<LruCache<Id, Slot>>,
}

impl<Id: ProbeId> std::fmt::Debug for ProbeTracker<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeTracker")
            .field("tracked", &self.len())
            .finish()
    }
}

impl<Id: ProbeId> ProbeTracker<Id> {
    /// `capacity` caps the number of tracked peers; `None` means unlimited.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity.unwrap_or(usize::MAX).max(1))),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Record the start of a probe. Returns `false` (and changes nothing)
    /// when the peer already has any status — pending or done.
    pub fn mark_pending(&self, id: Id) -> bool {
        let mut entries = self.entries.lock();
        if entries.get(&id).is_some() {
            return false;
        }
        entries.insert(id, Slot::Pending);
        true
    }

    /// Finalize a peer's probe. Also valid for peers never marked pending,
    /// e.g. when stats arrive unsolicited.
    pub fn mark_done(&self, id: Id) {
        self.entries.lock().insert(id, Slot::Done);
    }

    pub fn status(&self, id: &Id) -> ProbeStatus {
        match self.entries.lock().get(id) {
            Some(Slot::Pending) => ProbeStatus::Pending,
            Some(Slot::Done) => ProbeStatus::Done,
            None => ProbeStatus::Unprobed,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
