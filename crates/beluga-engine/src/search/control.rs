//! Search control: a stop flag only. There is no cooperative timeout —
//! callers budget depth instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared, cloneable stop signal for a [`Searcher`](crate::search::Searcher).
///
/// The shell thread calls [`SearchControl::stop`]; the search thread polls
/// [`SearchControl::should_stop`] at each of the four recursion points (main
/// search, endgame, internal iterative deepening, aspiration loop).
#[derive(Clone)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
}

impl SearchControl {
    pub fn new() -> Self {
        Self { stopped: Arc::new(AtomicBool::new(false)) }
    }

    /// Raise the stop flag. Published with release ordering.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Lower the stop flag, preparing the control for reuse.
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::Release);
    }

    /// Poll the stop flag. Acquire ordering pairs with [`SearchControl::stop`].
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl Default for SearchControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unstopped() {
        let control = SearchControl::new();
        assert!(!control.should_stop());
    }

    #[test]
    fn stop_is_visible_through_a_clone() {
        let control = SearchControl::new();
        let clone = control.clone();
        clone.stop();
        assert!(control.should_stop());
    }

    #[test]
    fn reset_clears_a_raised_flag() {
        let control = SearchControl::new();
        control.stop();
        control.reset();
        assert!(!control.should_stop());
    }
}
