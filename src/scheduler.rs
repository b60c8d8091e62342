use std::cell::Cell;

use crate::error::Result;

/// Arranges for the render loop to be ticked once more.
///
/// The browser implementation is `requestAnimationFrame`; each tick asks for
/// the next one before returning, so the loop keeps itself alive without
/// recursion.
pub trait FrameScheduler {
    fn request_frame(&self) -> Result<()>;
}

/// Records frame requests so a test can step the loop by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Cell<u32>,
    total: Cell<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame requests not yet consumed by `take_frame`.
    pub fn pending(&self) -> u32 {
        self.pending.get()
    }

    /// Every request made since construction.
    pub fn total_requests(&self) -> u32 {
        self.total.get()
    }

    /// Consumes one pending request. Returns false if none was pending.
    pub fn take_frame(&self) -> bool {
        match self.pending.get() {
            0 => false,
            n => {
                self.pending.set(n - 1);
                true
            }
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self) -> Result<()> {
        self.pending.set(self.pending.get() + 1);
        self.total.set(self.total.get() + 1);
        Ok(())
    }
}
