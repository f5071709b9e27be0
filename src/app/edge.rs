//! Interrupt → poll-loop handoff.
//!
//! The GPIO ISR only raises the flag; the control loop swaps it back to
//! `false` once per poll.  Single writer (ISR), single consumer (loop), so
//! one atomic is enough.

use core::sync::atomic::{AtomicBool, Ordering};

/// "An edge occurred since the last poll."  Carries no level.
#[derive(Debug)]
pub struct EdgeFlag(AtomicBool);

impl EdgeFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// ISR side.  Lock-free, allocation-free.
    #[inline]
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Consumer side: return whether an edge was pending and clear it.
    #[inline]
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for EdgeFlag {
    fn default() -> Self {
        Self::new()
    }
}
