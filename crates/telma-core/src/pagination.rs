//! Cursor-driven pagination with a single request in flight.
//!
//! A [`Paginator`] holds the opaque next-page URL returned by the API and
//! moves between three states:
//!
//! ```text
//!          begin_load (cursor present)
//!   Idle ─────────────────────────────▶ Loading
//!    ▲                                    │
//!    │ complete(next = Some) / fail       │ complete(next = None)
//!    └────────────────────────────────────┤
//!                                         ▼
//!                                     Exhausted
//! ```
//!
//! Triggers while `Loading` or `Exhausted` are no-ops. Each session started by
//! [`Paginator::reset`] bumps a generation counter so that a response to a
//! request from an earlier session cannot overwrite the current cursor.

use serde::Serialize;
use tracing::debug;

/// Pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    /// No request in flight; more pages may exist.
    Idle,
    /// A next-page request is outstanding.
    Loading,
    /// The last response carried no next link.
    Exhausted,
}

/// Permission to issue one next-page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// URL to fetch.
    pub url: String,
    generation: u64,
}

/// Result of handing a response back to the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was applied; carries the new state.
    Applied(FeedState),
    /// The ticket belongs to an earlier session and was ignored.
    Stale,
}

/// Cursor state machine for one listing session.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: FeedState,
    cursor: Option<String>,
    generation: u64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Paginator {
    /// Paginator seeded with the cursor from the first page.
    #[must_use]
    pub fn new(cursor: Option<String>) -> Self {
        let state = if cursor.is_some() {
            FeedState::Idle
        } else {
            FeedState::Exhausted
        };
        Self {
            state,
            cursor,
            generation: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> FeedState {
        self.state
    }

    /// Next-page URL, if known.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Whether another page can be requested right now.
    #[must_use]
    pub const fn can_load(&self) -> bool {
        matches!(self.state, FeedState::Idle) && self.cursor.is_some()
    }

    /// Start a new session with a fresh cursor.
    ///
    /// Outstanding tickets from the previous session become stale.
    pub fn reset(&mut self, cursor: Option<String>) {
        self.generation = self.generation.wrapping_add(1);
        self.state = if cursor.is_some() {
            FeedState::Idle
        } else {
            FeedState::Exhausted
        };
        self.cursor = cursor;
    }

    /// Claim the next request.
    ///
    /// Returns `None` (and changes nothing) unless the paginator is `Idle`
    /// with a cursor.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.can_load() {
            debug!("load trigger ignored in state {:?}", self.state);
            return None;
        }
        let url = self.cursor.clone()?;
        self.state = FeedState::Loading;
        Some(LoadTicket {
            url,
            generation: self.generation,
        })
    }

    /// Record a successful response carrying the following cursor.
    pub fn complete(&mut self, ticket: &LoadTicket, next: Option<String>) -> Completion {
        if !self.owns(ticket) {
            debug!("discarding stale page response for {}", ticket.url);
            return Completion::Stale;
        }
        self.state = if next.is_some() {
            FeedState::Idle
        } else {
            FeedState::Exhausted
        };
        self.cursor = next;
        Completion::Applied(self.state)
    }

    /// Record a failed request; the cursor is kept so a later trigger can try
    /// the same page again.
    pub fn fail(&mut self, ticket: &LoadTicket) -> Completion {
        if !self.owns(ticket) {
            return Completion::Stale;
        }
        self.state = FeedState::Idle;
        Completion::Applied(self.state)
    }

    fn owns(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && self.state == FeedState::Loading
    }
}
