//! Cross-core stop signal
//!
//! The firmware never stops its long-running loops. Host tests do, so the
//! worker and timer loops check this between polls.

use portable_atomic::{AtomicBool, Ordering};

/// One-way stop request shared between execution contexts
#[derive(Debug)]
pub struct ShutdownSignal {
    raised: AtomicBool,
}

impl ShutdownSignal {
    /// Create a lowered signal
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Ask every loop watching this signal to exit after its current poll
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
