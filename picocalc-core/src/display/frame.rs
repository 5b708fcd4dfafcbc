//! Typed lock around the frame buffer
//!
//! Both cores reach the buffer only through this lock: the renderer to draw,
//! the flush worker to transfer. Holding the guard for the whole hardware
//! transfer is what keeps a half-drawn frame off the glass.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};

/// Mutual-exclusion wrapper owning a frame buffer of type `B`
pub struct FrameLock<M: RawMutex, B> {
    inner: Mutex<M, B>,
}

impl<M: RawMutex, B> FrameLock<M, B> {
    /// Wrap a frame buffer
    pub const fn new(buffer: B) -> Self {
        Self {
            inner: Mutex::new(buffer),
        }
    }

    /// Wait for exclusive access
    pub async fn lock(&self) -> MutexGuard<'_, M, B> {
        self.inner.lock().await
    }

    /// Take the lock only if nobody holds it
    pub fn try_lock(&self) -> Option<MutexGuard<'_, M, B>> {
        self.inner.try_lock().ok()
    }

    /// Consume the lock and return the buffer
    pub fn into_inner(self) -> B {
        self.inner.into_inner()
    }
}
