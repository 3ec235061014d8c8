//! # Update Scheduler
//!
//! Coalesces bursts of widget edits into a bounded stream of commits.
//!
//! ## Design
//!
//! - Tier 1, per-path debounce: a `Set` becomes eligible only after its path
//!   has been quiet for the debounce window. A newer value for the same path
//!   replaces the older one and restarts the window.
//! - Tier 2, trailing throttle: the first eligible update opens a window of
//!   one throttle interval. Everything that becomes eligible inside the
//!   window is merged (latest patch per path) and delivered as one
//!   [`Commit`] when the window closes.
//! - `Delete` skips tier 1 and cancels any debounced `Set` on the same path,
//!   so a stale value cannot resurrect a field that was just reset.
//!
//! The scheduler is sans-IO: callers pass the current [`Instant`] in and ask
//! for [`UpdateScheduler::next_deadline`] to know when to poll again.
//! [`crate::EditSession`] drives it from a tokio task.

use crate::config::EditorConfig;
use crate::mutations::{self, Patch};
use crate::session::Updater;
use formthinker_common::{Path, Value};
use indexmap::IndexMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Debounced {
    patch: Patch,
    eligible_at: Instant,
}

/// Two-tier debounce/throttle state machine
#[derive(Debug)]
pub struct UpdateScheduler {
    debounce: Duration,
    throttle: Duration,

    /// Values still inside their quiet window
    debouncing: IndexMap<Path, Debounced>,

    /// Eligible values waiting for the throttle boundary, in last-write order
    pending: IndexMap<Path, Patch>,

    /// Close of the open throttle window
    flush_at: Option<Instant>,
}

impl UpdateScheduler {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_timing(config.debounce(), config.throttle())
    }

    pub fn with_timing(debounce: Duration, throttle: Duration) -> Self {
        Self {
            debounce,
            throttle,
            debouncing: IndexMap::new(),
            pending: IndexMap::new(),
            flush_at: None,
        }
    }

    /// Accept one edit observed at `now`.
    ///
    /// Call [`poll`](Self::poll) first so anything already due is delivered
    /// before the new edit joins a window.
    pub fn schedule(&mut self, path: Path, patch: Patch, now: Instant) {
        if patch.is_delete() {
            self.debouncing.shift_remove(&path);
            self.enqueue(path, patch, now);
            return;
        }

        self.debouncing.insert(
            path,
            Debounced {
                patch,
                eligible_at: deadline(now, self.debounce),
            },
        );
    }

    /// Advance to `now`, returning the commit whose window has closed.
    ///
    /// At most one commit is returned per call; loop until `None` when the
    /// caller may have fallen behind by more than one interval.
    pub fn poll(&mut self, now: Instant) -> Option<Commit> {
        self.promote(now);

        if !self.flush_at.is_some_and(|at| at <= now) {
            return None;
        }

        self.flush_at = None;
        let updates: Vec<_> = self.pending.drain(..).collect();
        tracing::debug!(updates = updates.len(), "throttle window closed");

        Some(Commit { updates })
    }

    /// Earliest instant at which [`poll`](Self::poll) can make progress
    pub fn next_deadline(&self) -> Option<Instant> {
        let debounced = self.debouncing.values().map(|d| d.eligible_at).min();
        match (self.flush_at, debounced) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drop everything pending in both tiers. Safe to call repeatedly.
    pub fn cancel_all(&mut self) {
        if !self.is_idle() {
            tracing::debug!(
                debouncing = self.debouncing.len(),
                pending = self.pending.len(),
                "cancelling scheduled updates"
            );
        }
        self.debouncing.clear();
        self.pending.clear();
        self.flush_at = None;
    }

    pub fn is_idle(&self) -> bool {
        self.debouncing.is_empty() && self.pending.is_empty()
    }

    /// Number of scheduled updates across both tiers
    pub fn pending_count(&self) -> usize {
        self.debouncing.len() + self.pending.len()
    }

    /// Move debounced values whose window has elapsed into the throttle tier,
    /// in the order they became eligible. Values that became eligible after
    /// the open window closes stay put until that window is flushed.
    fn promote(&mut self, now: Instant) {
        loop {
            let limit = self.flush_at.map_or(now, |at| at.min(now));
            let next = self
                .debouncing
                .iter()
                .enumerate()
                .filter(|(_, (_, entry))| entry.eligible_at <= limit)
                .min_by_key(|(_, (_, entry))| entry.eligible_at)
                .map(|(index, _)| index);

            let Some((path, entry)) = next.and_then(|i| self.debouncing.shift_remove_index(i))
            else {
                break;
            };
            self.enqueue(path, entry.patch, entry.eligible_at);
        }
    }

    /// Scheduled paths across both tiers, throttle tier first
    pub fn pending_paths(&self) -> impl Iterator<Item = &Path> {
        self.pending.keys().chain(self.debouncing.keys())
    }

    fn enqueue(&mut self, path: Path, patch: Patch, at: Instant) {
        // Re-inserting moves the path to the end so replay order follows the
        // latest writes
        self.pending.shift_remove(&path);
        self.pending.insert(path, patch);

        if self.flush_at.is_none() {
            self.flush_at = Some(deadline(at, self.throttle));
        }
    }
}

/// Timers longer than this are treated as never firing
const MAX_WAIT: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

fn deadline(at: Instant, after: Duration) -> Instant {
    at.checked_add(after.min(MAX_WAIT))
        .or_else(|| at.checked_add(Duration::from_secs(60 * 60 * 24)))
        .unwrap_or(at)
}

/// Merged payload delivered at one throttle boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    updates: Vec<(Path, Patch)>,
}

impl Commit {
    pub fn updates(&self) -> &[(Path, Patch)] {
        &self.updates
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Replay every update against the document current at flush time
    pub fn apply(&self, doc: &Value) -> Value {
        self.updates
            .iter()
            .fold(doc.clone(), |acc, (path, patch)| {
                mutations::apply(&acc, path, patch)
            })
    }

    /// Package this commit as a document updater for a sink
    pub fn into_updater(self) -> Updater {
        Box::new(move |doc: &Value| self.apply(doc))
    }
}
