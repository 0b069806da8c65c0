//! IdGenerator port - where IDs come from
//!
//! Sequences are owned by whoever constructs the entities (the publisher for
//! jobs, the board builder for managers) instead of living in globals, so
//! two boards in one process never share numbering.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ids::{Id, IdMarker};

/// Produces unique, increasing IDs of one kind.
///
/// Implementations are `Send + Sync` so any task can draw from them.
pub trait IdGenerator<T: IdMarker>: Send + Sync {
    fn next_id(&self) -> Id<T>;
}

/// Atomic counter starting at 1 (or any chosen start).
pub struct SequentialIds<T: IdMarker> {
    next: AtomicU64,
    _marker: std::marker::PhantomData<T>,
}

impl<T: IdMarker> SequentialIds<T> {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: IdMarker> Default for SequentialIds<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IdMarker> IdGenerator<T> for SequentialIds<T> {
    fn next_id(&self) -> Id<T> {
        Id::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
