//! Latest-request-wins ticketing for debounced callers.
//!
//! The engine itself is synchronous and pure; superseding a stale in-flight
//! query is the caller's concern. A UI that fires a search per (debounced)
//! keystroke stamps each request with [`QuerySession::ticket`] and checks
//! [`QuerySession::is_current`] before rendering, so a slow older query can
//! never overwrite the results of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Stamp for one search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

/// Monotonic request counter shared by all callers of one search box.
#[derive(Debug, Default)]
pub struct QuerySession {
    generation: AtomicU64,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn ticket(&self) -> QueryTicket {
        QueryTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True while no newer ticket has been issued.
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }
}
