//! Blocking entry guard
//!
//! There is exactly one guard per core, reached through
//! [`SchedulerGuard::for_core`]. A scheduler run through
//! [`SchedulerGuard::block_on`] (or an executor that holds a
//! [`SchedulerHandle`]) marks its core busy; a second blocking entry on the
//! same core is refused no matter which `ToneScheduler` makes it.

use core::future::Future;

use portable_atomic::{AtomicBool, Ordering};

/// A blocking entry was refused because a scheduler is already running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reentrant;

/// Processor core a guard belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Core {
    Zero,
    One,
}

/// Tracks whether a scheduler is active on one core
#[derive(Debug)]
pub struct SchedulerGuard {
    active: AtomicBool,
}

#[cfg(not(test))]
static GUARDS: [SchedulerGuard; 2] = [SchedulerGuard::new(), SchedulerGuard::new()];

// Host tests run on parallel threads; each thread stands in for its own pair
// of cores.
#[cfg(test)]
std::thread_local! {
    static GUARDS: &'static [SchedulerGuard; 2] =
        std::boxed::Box::leak(std::boxed::Box::new([SchedulerGuard::new(), SchedulerGuard::new()]));
}

impl SchedulerGuard {
    const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    /// The guard owned by `core`
    ///
    /// Every call for the same core returns the same guard.
    pub fn for_core(core: Core) -> &'static SchedulerGuard {
        #[cfg(not(test))]
        let guards = &GUARDS;
        #[cfg(test)]
        let guards = GUARDS.with(|g| *g);

        match core {
            Core::Zero => &guards[0],
            Core::One => &guards[1],
        }
    }

    /// Whether a scheduler handle is currently held
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Claim the core for a scheduler
    ///
    /// The claim lasts until the returned handle is dropped.
    pub fn enter(&self) -> Result<SchedulerHandle<'_>, Reentrant> {
        if self.active.swap(true, Ordering::AcqRel) {
            return Err(Reentrant);
        }
        Ok(SchedulerHandle { guard: self })
    }

    /// Run `future` to completion on a fresh executor
    ///
    /// Refused without polling `future` if a scheduler is already active.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, Reentrant> {
        let _handle = self.enter()?;
        Ok(embassy_futures::block_on(future))
    }
}

/// Proof that a scheduler is running on this core
#[must_use = "the guard is released as soon as the handle is dropped"]
pub struct SchedulerHandle<'a> {
    guard: &'a SchedulerGuard,
}

impl Drop for SchedulerHandle<'_> {
    fn drop(&mut self) {
        self.guard.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_enter_is_refused() {
        let guard = SchedulerGuard::for_core(Core::Zero);
        let handle = guard.enter().unwrap();
        assert!(guard.is_active());
        assert!(matches!(guard.enter(), Err(Reentrant)));

        drop(handle);
        assert!(!guard.is_active());
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn test_nested_block_on_is_refused() {
        let guard = SchedulerGuard::for_core(Core::Zero);
        let result = guard.block_on(async { guard.block_on(async { 1 }) });
        assert_eq!(result, Ok(Err(Reentrant)));
        assert!(!guard.is_active());
    }

    #[test]
    fn test_block_on_returns_output() {
        let guard = SchedulerGuard::for_core(Core::Zero);
        assert_eq!(guard.block_on(async { 7 }), Ok(7));
    }

    #[test]
    fn test_lookups_share_one_guard_per_core() {
        let first = SchedulerGuard::for_core(Core::Zero);
        let second = SchedulerGuard::for_core(Core::Zero);
        assert!(core::ptr::eq(first, second));

        let _handle = first.enter().unwrap();
        assert!(second.is_active());
        assert!(!SchedulerGuard::for_core(Core::One).is_active());
        assert!(SchedulerGuard::for_core(Core::One).enter().is_ok());
    }
}
