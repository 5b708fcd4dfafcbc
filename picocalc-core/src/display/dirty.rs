//! Dirty flag shared by the periodic tick and the flush worker

use portable_atomic::{AtomicBool, Ordering};

/// "Frame buffer changed since the last flush"
///
/// Setting is a plain store so it is safe from interrupt context at any
/// rate. Consuming is a single swap: a `mark()` that lands after the swap
/// stays set for the next poll and is never lost.
#[derive(Debug)]
pub struct DirtyFlag {
    dirty: AtomicBool,
}

impl DirtyFlag {
    /// Create a clean flag (boot state)
    pub const fn new() -> Self {
        Self {
            dirty: AtomicBool::new(false),
        }
    }

    /// Request a flush. Marking an already dirty flag is a no-op.
    pub fn mark(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Read and clear in one step
    ///
    /// Returns `true` if a flush was requested since the last `take()`.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Peek without consuming
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}

impl Default for DirtyFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as StdOrdering};
    use std::thread;

    #[test]
    fn test_boot_state_is_clean() {
        let flag = DirtyFlag::new();
        assert!(!flag.is_dirty());
        assert!(!flag.take());
    }

    #[test]
    fn test_take_clears() {
        let flag = DirtyFlag::new();
        flag.mark();
        flag.mark();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_mark_after_take_survives() {
        let flag = DirtyFlag::new();
        flag.mark();
        assert!(flag.take());
        // Producer fires again right after the worker cleared
        flag.mark();
        assert!(flag.is_dirty());
        assert!(flag.take());
    }

    #[test]
    fn test_no_mark_lost_across_threads() {
        const MARKS: usize = 10_000;
        let flag = DirtyFlag::new();
        // Number of the mark about to be set, published before the mark
        let generation = AtomicUsize::new(0);
        let consumed_generation = AtomicUsize::new(0);

        thread::scope(|s| {
            s.spawn(|| {
                for i in 1..=MARKS {
                    generation.store(i, StdOrdering::SeqCst);
                    flag.mark();
                }
            });
            s.spawn(|| {
                for _ in 0..MARKS {
                    if flag.take() {
                        let seen = generation.load(StdOrdering::SeqCst);
                        consumed_generation.fetch_max(seen, StdOrdering::SeqCst);
                    }
                }
            });
        });

        // The final mark was either consumed by a take that observed it or
        // is still pending.
        let pending = flag.take();
        assert!(pending || consumed_generation.load(StdOrdering::SeqCst) == MARKS);
    }
}
