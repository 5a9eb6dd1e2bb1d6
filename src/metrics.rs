//! Operation counters reported by the majority finder.
//!
//! A [`MetricsSink`] is a passive collection of four monotonically increasing
//! counters.  The finder reports element reads, equality comparisons and its
//! own elapsed time into whatever sink the caller hands it; allocated bytes
//! are left to collaborators such as the benchmark driver.  Two variants are
//! provided:
//!
//! * [`PerformanceTracker`] keeps real counts in atomics and can be shared by
//!   reference across threads running independent finder calls.
//! * [`NoopSink`] discards every record.  A single `'static` instance is
//!   available through [`noop_sink`], so opting out of measurement costs
//!   nothing and needs no branching at the call site.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Recording capability the finder reports into.
pub trait MetricsSink: Send + Sync {
    /// Adds `delta` equality comparisons.
    fn record_comparisons(&self, delta: u64);

    /// Adds `delta` element reads.
    fn record_reads(&self, delta: u64);

    /// Adds `delta` nanoseconds of elapsed time.
    fn record_elapsed_nanos(&self, delta: u64);

    /// Adds `delta` allocated bytes.
    fn record_allocated_bytes(&self, delta: u64);

    /// Returns the comparison count.
    fn comparisons(&self) -> u64;

    /// Returns the element read count.
    fn reads(&self) -> u64;

    /// Returns the accumulated elapsed time in nanoseconds.
    fn elapsed_nanos(&self) -> u64;

    /// Returns the accumulated allocated bytes.
    fn allocated_bytes(&self) -> u64;

    /// Zeroes every counter.
    ///
    /// Each counter is cleared individually; a concurrent reader may observe
    /// some counters cleared and others not.
    fn reset(&self);

    /// Copies the current counter values.
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            comparisons: self.comparisons(),
            reads: self.reads(),
            elapsed_nanos: self.elapsed_nanos(),
            allocated_bytes: self.allocated_bytes(),
        }
    }
}

/// Point-in-time copy of a sink's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Equality comparisons.
    pub comparisons: u64,
    /// Element reads.
    pub reads: u64,
    /// Elapsed time in nanoseconds.
    pub elapsed_nanos: u64,
    /// Allocated bytes.
    pub allocated_bytes: u64,
}

/// Atomic counter set shared by reference between concurrent callers.
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    comparisons: AtomicU64,
    reads: AtomicU64,
    elapsed_nanos: AtomicU64,
    allocated_bytes: AtomicU64,
}

impl PerformanceTracker {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for PerformanceTracker {
    #[inline]
    fn record_comparisons(&self, delta: u64) {
        self.comparisons.fetch_add(delta, Ordering::Relaxed);
    }

    #[inline]
    fn record_reads(&self, delta: u64) {
        self.reads.fetch_add(delta, Ordering::Relaxed);
    }

    #[inline]
    fn record_elapsed_nanos(&self, delta: u64) {
        self.elapsed_nanos.fetch_add(delta, Ordering::Relaxed);
    }

    #[inline]
    fn record_allocated_bytes(&self, delta: u64) {
        self.allocated_bytes.fetch_add(delta, Ordering::Relaxed);
    }

    fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    fn elapsed_nanos(&self) -> u64 {
        self.elapsed_nanos.load(Ordering::Relaxed)
    }

    fn allocated_bytes(&self) -> u64 {
        self.allocated_bytes.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.comparisons.store(0, Ordering::Relaxed);
        self.reads.store(0, Ordering::Relaxed);
        self.elapsed_nanos.store(0, Ordering::Relaxed);
        self.allocated_bytes.store(0, Ordering::Relaxed);
    }
}

/// Sink that discards every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSink;

static NOOP: NoopSink = NoopSink;

impl MetricsSink for NoopSink {
    #[inline(always)]
    fn record_comparisons(&self, _delta: u64) {}

    #[inline(always)]
    fn record_reads(&self, _delta: u64) {}

    #[inline(always)]
    fn record_elapsed_nanos(&self, _delta: u64) {}

    #[inline(always)]
    fn record_allocated_bytes(&self, _delta: u64) {}

    fn comparisons(&self) -> u64 {
        0
    }

    fn reads(&self) -> u64 {
        0
    }

    fn elapsed_nanos(&self) -> u64 {
        0
    }

    fn allocated_bytes(&self) -> u64 {
        0
    }

    fn reset(&self) {}
}

/// Returns a fresh, zeroed tracker.
pub fn create_sink() -> PerformanceTracker {
    PerformanceTracker::new()
}

/// Returns the shared no-op sink.
pub fn noop_sink() -> &'static NoopSink {
    &NOOP
}

/// Reports the time between its creation and its drop to a sink.
///
/// Dropping happens on normal return and during unwinding alike, so the
/// elapsed time is recorded exactly once per guard.
pub(crate) struct ElapsedGuard<'a> {
    sink: &'a dyn MetricsSink,
    start: Instant,
}

impl<'a> ElapsedGuard<'a> {
    pub(crate) fn start(sink: &'a dyn MetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
        }
    }
}

impl Drop for ElapsedGuard<'_> {
    fn drop(&mut self) {
        let nanos = u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.sink.record_elapsed_nanos(nanos);
    }
}
