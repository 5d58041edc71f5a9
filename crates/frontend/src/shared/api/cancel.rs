//! Guards against committing responses nobody is waiting for.
//!
//! Pages cancel their token on unmount and tag each load with a ticket;
//! a response is applied only if its token is live and its ticket is the
//! latest one issued.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Issues monotonically increasing tickets for one logical request stream
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Cancellation plus sequencing for one page-level data stream
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    token: CancelToken,
    sequencer: RequestSequencer,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Independent request stream cancelled together with this one
    pub fn child(&self) -> RequestScope {
        RequestScope {
            token: self.token.clone(),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn begin(&self) -> RequestTicket {
        self.sequencer.begin()
    }

    /// True when a response tagged with `ticket` may update state
    pub fn should_commit(&self, ticket: RequestTicket) -> bool {
        let current = self.sequencer.is_current(ticket);
        if !current {
            log::debug!("discarding out-of-order response {:?}", ticket);
        }
        !self.token.is_cancelled() && current
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}
