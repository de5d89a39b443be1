//! Cross-thread stop signaling for the time manager.
//!
//! The search may run several workers, each polling [`TimeManager`](crate::time_manager::TimeManager)
//! at leaf boundaries. `force_stop` is the one piece of time-manager state
//! any thread may write; everything else is single-writer (the thread
//! driving iterative deepening). `StopFlag` gives that one field
//! atomic-publish semantics without pulling in a heavier lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheaply cloneable, thread-safe stop signal.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// A flag that is not yet set.
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Whether the flag has been set by any clone.
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag. Visible to every clone's next [`is_stopped`](Self::is_stopped) call.
    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        assert!(!StopFlag::new().is_stopped());
    }

    #[test]
    fn stop_is_visible_through_clones() {
        let flag = StopFlag::new();
        let clone = flag.clone();
        clone.stop();
        assert!(flag.is_stopped());
    }
}
