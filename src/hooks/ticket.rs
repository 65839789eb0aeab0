//! One counter that answers both "is the owner still mounted?" and "is this
//! the newest invocation?". Every invocation takes a ticket; only the holder
//! of the current ticket may write state. Closing the epoch on unmount makes
//! every outstanding ticket stale at once.

use std::cell::Cell;

const CLOSED: u64 = u64::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

#[derive(Debug, Default)]
pub(crate) struct Epoch(Cell<u64>);

impl Epoch {
    /// Starts a new invocation, superseding every earlier ticket.
    /// Returns `None` once the owner is gone.
    pub(crate) fn issue(&self) -> Option<Ticket> {
        let current = self.0.get();
        if current == CLOSED {
            return None;
        }
        let next = current + 1;
        self.0.set(next);
        Some(Ticket(next))
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 != CLOSED && self.0.get() == ticket.0
    }

    pub(crate) fn close(&self) {
        self.0.set(CLOSED);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.0.get() == CLOSED
    }
}
