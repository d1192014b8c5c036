//! Wall-clock phase timing for a clustering call.

use std::cell::RefCell;
use std::time::Instant;

/// One recorded phase duration.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfEntry {
    pub label: &'static str,
    pub duration_ms: f64,
}

/// Ordered sink for phase durations within a single clustering call.
///
/// Guards append on drop, so an enclosing phase lands after the sub-phases
/// it contains ("total" is recorded last). The `RefCell` keeps the sink
/// `!Sync`: guards can only live on the calling thread, never inside worker
/// closures.
#[derive(Debug, Default)]
pub struct PerfTrace {
    entries: RefCell<Vec<PerfEntry>>,
}

impl PerfTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a scoped phase; the elapsed time is recorded when the returned
    /// guard drops, however the scope exits.
    pub fn scope(&self, label: &'static str) -> PhaseTimer<'_> {
        PhaseTimer {
            trace: self,
            label,
            start: Instant::now(),
        }
    }

    pub fn into_entries(self) -> Vec<PerfEntry> {
        self.entries.into_inner()
    }
}

/// Scoped guard recording the elapsed milliseconds of one phase.
pub struct PhaseTimer<'a> {
    trace: &'a PerfTrace,
    label: &'static str,
    start: Instant,
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_secs_f64() * 1e3;
        self.trace.entries.borrow_mut().push(PerfEntry {
            label: self.label,
            duration_ms,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_drop_order() {
        let trace = PerfTrace::new();
        {
            let _total = trace.scope("total");
            {
                let _first = trace.scope("first");
            }
            {
                let _second = trace.scope("second");
            }
        }
        let labels: Vec<_> = trace.into_entries().iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["first", "second", "total"]);
    }

    #[test]
    fn records_on_early_exit() {
        fn bail_out(trace: &PerfTrace) -> Option<()> {
            let _timer = trace.scope("phase");
            None
        }

        let trace = PerfTrace::new();
        assert!(bail_out(&trace).is_none());
        let entries = trace.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "phase");
        assert!(entries[0].duration_ms >= 0.0);
    }
}
