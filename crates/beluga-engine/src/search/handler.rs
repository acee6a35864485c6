//! Progress callbacks emitted synchronously from the search thread.

use crate::search::pv::Pv;

/// Capability set of search progress events. A null handler (the default
/// blanket impl on `()`) emits nothing.
pub trait SearchHandler {
    /// A depth finished without failing the aspiration window.
    fn on_iterate(&mut self, _depth: i32, _pv: &Pv, _score: i32, _nodes: u64) {}
    /// The aspiration window failed high; it will be widened and re-searched.
    fn on_fail_high(&mut self, _depth: i32, _score: i32, _nodes: u64) {}
    /// The aspiration window failed low; it will be widened and re-searched.
    fn on_fail_low(&mut self, _depth: i32, _score: i32, _nodes: u64) {}
    /// The endgame branch was taken and solved exactly.
    fn on_ending(&mut self, _pv: &Pv, _score: i32, _nodes: u64) {}
}

/// A handler that observes nothing.
impl SearchHandler for () {}

impl<F> SearchHandler for F
where
    F: FnMut(SearchEvent),
{
    fn on_iterate(&mut self, depth: i32, pv: &Pv, score: i32, nodes: u64) {
        self(SearchEvent::Iterate { depth, pv: pv.clone(), score, nodes });
    }
    fn on_fail_high(&mut self, depth: i32, score: i32, nodes: u64) {
        self(SearchEvent::FailHigh { depth, score, nodes });
    }
    fn on_fail_low(&mut self, depth: i32, score: i32, nodes: u64) {
        self(SearchEvent::FailLow { depth, score, nodes });
    }
    fn on_ending(&mut self, pv: &Pv, score: i32, nodes: u64) {
        self(SearchEvent::Ending { pv: pv.clone(), score, nodes });
    }
}

/// A single progress event, for callers that prefer a plain closure over
/// implementing [`SearchHandler`] directly.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Iterate { depth: i32, pv: Pv, score: i32, nodes: u64 },
    FailHigh { depth: i32, score: i32, nodes: u64 },
    FailLow { depth: i32, score: i32, nodes: u64 },
    Ending { pv: Pv, score: i32, nodes: u64 },
}
