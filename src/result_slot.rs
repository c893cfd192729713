use crate::analysis::AnalysisResult;
use std::sync::{Mutex, PoisonError};

/// Holder for the most recently displayed analysis.
///
/// Overlapping analyses can resolve out of order. The generation counter makes
/// that ordering explicit: a slow early request cannot overwrite the verdict
/// of one started after it.
#[derive(Default)]
pub struct ResultSlot {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_generation: u64,
    applied_generation: u64,
    latest: Option<AnalysisResult>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a generation for a new analysis. Call once per invocation,
    /// before the request is issued.
    pub fn begin(&self) -> u64 {
        let mut inner = self.lock();
        inner.next_generation += 1;
        inner.next_generation
    }

    /// Store `result` unless a newer generation has already applied.
    /// Returns whether the slot accepted it.
    pub fn apply(&self, generation: u64, result: AnalysisResult) -> bool {
        let mut inner = self.lock();
        if generation < inner.applied_generation {
            return false;
        }
        inner.applied_generation = generation;
        inner.latest = Some(result);
        true
    }

    pub fn latest(&self) -> Option<AnalysisResult> {
        self.lock().latest.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FallbackReason;
    use crate::heuristic;

    fn verdict(text: &str) -> AnalysisResult {
        heuristic::fallback_result(text, FallbackReason::Status(500))
    }

    #[test]
    fn stale_generation_is_rejected() {
        let slot = ResultSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        // Second request resolves first.
        assert!(slot.apply(second, verdict("all clear")));
        // The earlier request's late result must not win.
        assert!(!slot.apply(first, verdict("urgent")));

        let latest = slot.latest().unwrap();
        assert_eq!(latest.recommendation, "safe");
    }

    #[test]
    fn in_order_applies_win() {
        let slot = ResultSlot::new();
        let first = slot.begin();
        assert!(slot.apply(first, verdict("all clear")));

        let second = slot.begin();
        assert!(slot.apply(second, verdict("urgent")));

        let latest = slot.latest().unwrap();
        assert_eq!(latest.recommendation, "suspicious");
    }

    #[test]
    fn empty_slot_has_no_result() {
        assert!(ResultSlot::new().latest().is_none());
    }
}
