//! Thread affinity checks for accordion state.
//!
//! Expansion state is mutated without locking, so every mutation must happen
//! on the thread that owns the list view. [`ThreadAffinity`] records that
//! thread when the controller is created and verifies it on entry points.

use std::thread::ThreadId;

/// Records the thread an object belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the bound thread.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            panic!(
                "accordion state accessed from wrong thread: expected {:?}, current {:?}",
                self.thread_id,
                std::thread::current().id()
            );
        }
    }

    /// Debug-only assertion that we are on the bound thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}
