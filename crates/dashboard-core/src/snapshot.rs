//! Last-successful-fetch cache with generation tickets
//!
//! Every fetch takes a [`FetchTicket`] before it goes out. A ticket only
//! commits if nothing newer has been applied since it was issued, so a slow
//! response can never overwrite a faster, newer one. Optimistic patches via
//! [`Snapshot::update`] claim a generation too, which makes fetches started
//! before the patch stale.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Slot<T> {
    value: Option<Arc<T>>,
    generation: u64,
    fetched_at: Option<Instant>,
}

/// Shared holder of the last successfully fetched value
#[derive(Debug)]
pub struct Snapshot<T> {
    slot: RwLock<Slot<T>>,
    next_generation: AtomicU64,
    in_flight: AtomicUsize,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Snapshot<T> {
    /// Empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(Slot {
                value: None,
                generation: 0,
                fetched_at: None,
            }),
            next_generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn claim_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Start a fetch
    pub fn begin(&self) -> FetchTicket<'_, T> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        FetchTicket {
            snapshot: self,
            generation: self.claim_generation(),
        }
    }

    /// Current value, if any fetch has succeeded
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().value.clone()
    }

    /// Generation of the current value (0 before the first commit)
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Time since the last committed fetch
    #[must_use]
    pub fn age(&self) -> Option<Duration> {
        self.slot.read().fetched_at.map(|at| at.elapsed())
    }

    /// Whether the value is missing or older than `max_age`
    #[must_use]
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.age().is_none_or(|age| age >= max_age)
    }

    /// Whether a fetch is currently outstanding
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Replace the value with `f(current)`. Fetches issued before this call
    /// can no longer commit. Returns `false` if there is nothing to patch.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let mut slot = self.slot.write();
        let Some(current) = slot.value.as_ref() else {
            return false;
        };
        let next = f(current);
        slot.value = Some(Arc::new(next));
        slot.generation = self.claim_generation();
        true
    }

    /// Drop the value. Outstanding tickets may still commit afterwards.
    pub fn clear(&self) {
        let mut slot = self.slot.write();
        slot.value = None;
        slot.fetched_at = None;
    }
}

/// Permission to commit one fetch result
///
/// Dropping a ticket without committing (an error or a cancelled request)
/// leaves the snapshot untouched.
pub struct FetchTicket<'a, T> {
    snapshot: &'a Snapshot<T>,
    generation: u64,
}

impl<T> FetchTicket<'_, T> {
    /// Generation this ticket was issued with
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Store the fetched value unless something newer was applied first.
    /// Returns whether the value was stored.
    pub fn commit(self, value: T) -> bool {
        let mut slot = self.snapshot.slot.write();
        if self.generation <= slot.generation {
            return false;
        }
        slot.value = Some(Arc::new(value));
        slot.generation = self.generation;
        slot.fetched_at = Some(Instant::now());
        true
    }
}

impl<T> Drop for FetchTicket<'_, T> {
    fn drop(&mut self) {
        self.snapshot.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<T> fmt::Debug for FetchTicket<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchTicket")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
