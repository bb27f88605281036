use serde::{Deserialize, Serialize};
use tracing::trace;

use super::FilterSelection;

/// Handle for one in-flight reload. Only the most recently issued ticket may
/// commit its result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReloadTicket {
    pub sequence: u64,
    pub selection: FilterSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadOutcome {
    /// The fetched rows became the displayed dataset.
    Applied { sequence: u64, points_len: usize },
    /// A newer request was issued before this one resolved.
    Discarded { sequence: u64 },
}

/// Sequence bookkeeping for last-request-wins reloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadCoordinator {
    last_issued: u64,
    in_flight: Option<u64>,
}

impl ReloadCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, superseding any request still in flight.
    pub fn issue(&mut self, selection: FilterSelection) -> ReloadTicket {
        self.last_issued += 1;
        if let Some(previous) = self.in_flight.replace(self.last_issued) {
            trace!(previous, next = self.last_issued, "superseding in-flight reload");
        }
        ReloadTicket {
            sequence: self.last_issued,
            selection,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &ReloadTicket) -> bool {
        self.in_flight == Some(ticket.sequence)
    }

    /// Marks `ticket` resolved. Returns `false` for superseded or already
    /// settled tickets, whose results must be dropped.
    pub fn settle(&mut self, ticket: &ReloadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }
}
