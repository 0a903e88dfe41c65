use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued fetch. Only the most recently issued ticket is
/// allowed to replace the visible track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn number(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FetchSequence {
    issued: AtomicU64,
}

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}
