//! Boyer–Moore majority vote.
//!
//! The finder runs in two linear passes over the input and keeps only a
//! candidate and a counter between them.  Pass one narrows the input down to
//! the single value that *could* be a majority; pass two counts that value to
//! decide whether it actually is one.
//!
//! Every element visited is reported as one read and every element-to-candidate
//! equality test as one comparison.  The decision at the end adds one more
//! comparison.  For an input of length `n >= 1` this gives
//!
//! * reads: exactly `2n`,
//! * comparisons: `2n - r`, where `r` is the number of times pass one adopted
//!   the element after a zero count as its new candidate (that element is
//!   read but not compared).  `r` never exceeds `(n - 1) / 2`.
//!
//! An empty input touches no counter other than elapsed time.

use crate::metrics::{noop_sink, ElapsedGuard, MetricsSink};
use thiserror::Error;

/// Errors raised by [`find_majority`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MajorityError {
    /// The input sequence reference was absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Finds the strict majority element of `sequence`.
///
/// `sequence` may be empty but must be present; `None` is rejected with
/// [`MajorityError::InvalidArgument`] before the sink is touched.  When
/// `sink` is `None` the shared [`NoopSink`](crate::NoopSink) is used.
///
/// # Examples
///
/// ```
/// use majority_vote::{create_sink, find_majority, MetricsSink};
///
/// let sink = create_sink();
/// let found = find_majority(Some(&[2, 2, 1, 2, 3, 2, 2]), Some(&sink)).unwrap();
/// assert_eq!(found, Some(2));
/// assert_eq!(sink.reads(), 14);
///
/// assert_eq!(find_majority(Some(&[1, 2, 3, 4]), None).unwrap(), None);
/// assert!(find_majority(None, None).is_err());
/// ```
pub fn find_majority(
    sequence: Option<&[i32]>,
    sink: Option<&dyn MetricsSink>,
) -> Result<Option<i32>, MajorityError> {
    let sequence = sequence.ok_or(MajorityError::InvalidArgument(
        "input sequence must not be absent",
    ))?;
    let sink: &dyn MetricsSink = match sink {
        Some(sink) => sink,
        None => noop_sink(),
    };
    Ok(majority_of(sequence, sink))
}

/// Infallible form of [`find_majority`] for callers holding a slice.
pub fn majority_of(sequence: &[i32], sink: &dyn MetricsSink) -> Option<i32> {
    let _elapsed = ElapsedGuard::start(sink);
    let n = sequence.len();
    if n == 0 {
        return None;
    }

    let candidate = select_candidate(sequence, sink);

    let mut occurrences = 0usize;
    for &value in sequence {
        sink.record_reads(1);
        sink.record_comparisons(1);
        if value == candidate {
            occurrences += 1;
        }
    }

    sink.record_comparisons(1);
    (occurrences > n / 2).then_some(candidate)
}

/// Pass one. `sequence` must be non-empty.
fn select_candidate(sequence: &[i32], sink: &dyn MetricsSink) -> i32 {
    let n = sequence.len();
    let mut candidate = sequence[0];
    let mut count = 1usize;
    sink.record_reads(1);

    let mut i = 1;
    while i < n {
        sink.record_reads(1);
        sink.record_comparisons(1);
        if sequence[i] == candidate {
            count += 1;
        } else {
            count -= 1;
            if count == 0 && i + 1 < n {
                i += 1;
                sink.record_reads(1);
                candidate = sequence[i];
                count = 1;
            }
        }
        i += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{create_sink, MetricsSnapshot, PerformanceTracker};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    fn run(input: &[i32]) -> (Option<i32>, PerformanceTracker) {
        let sink = create_sink();
        let found = find_majority(Some(input), Some(&sink)).unwrap();
        (found, sink)
    }

    fn occurrences(input: &[i32], value: i32) -> usize {
        input.iter().filter(|&&v| v == value).count()
    }

    /// Counts calls rather than summing deltas.
    #[derive(Default)]
    struct CallCounter {
        elapsed_calls: AtomicU64,
        other_calls: AtomicU64,
    }

    impl MetricsSink for CallCounter {
        fn record_comparisons(&self, _delta: u64) {
            self.other_calls.fetch_add(1, Ordering::Relaxed);
        }

        fn record_reads(&self, _delta: u64) {
            self.other_calls.fetch_add(1, Ordering::Relaxed);
        }

        fn record_elapsed_nanos(&self, _delta: u64) {
            self.elapsed_calls.fetch_add(1, Ordering::Relaxed);
        }

        fn record_allocated_bytes(&self, _delta: u64) {
            self.other_calls.fetch_add(1, Ordering::Relaxed);
        }

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

    #[test]
    fn empty_input_has_no_majority() {
        let (found, sink) = run(&[]);
        assert_eq!(found, None);
        assert_eq!(sink.reads(), 0);
        assert_eq!(sink.comparisons(), 0);
    }

    #[test]
    fn absent_input_is_rejected_without_touching_sink() {
        let sink = create_sink();
        let err = find_majority(None, Some(&sink)).unwrap_err();
        assert!(matches!(err, MajorityError::InvalidArgument(_)));
        assert_eq!(sink.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn single_element_is_majority() {
        let (found, sink) = run(&[7]);
        assert_eq!(found, Some(7));
        assert_eq!(sink.reads(), 2);
        assert_eq!(sink.comparisons(), 2);
    }

    #[test]
    fn detects_majority_without_resets() {
        let (found, sink) = run(&[2, 2, 1, 2, 3, 2, 2]);
        assert_eq!(found, Some(2));
        assert_eq!(sink.reads(), 14);
        assert_eq!(sink.comparisons(), 14);
    }

    #[test]
    fn distinct_values_have_no_majority() {
        // One reset at index 2 skips a comparison.
        let (found, sink) = run(&[1, 2, 3, 4]);
        assert_eq!(found, None);
        assert_eq!(sink.reads(), 8);
        assert_eq!(sink.comparisons(), 7);
    }

    #[test]
    fn bare_majority_of_odd_length() {
        let (found, sink) = run(&[5, 5, 5, 1, 1]);
        assert_eq!(found, Some(5));
        assert_eq!(sink.reads(), 10);
        assert_eq!(sink.comparisons(), 10);
    }

    #[test]
    fn exact_half_is_not_a_majority() {
        let (found, sink) = run(&[1, 1, 2, 2]);
        assert_eq!(found, None);
        assert_eq!(sink.reads(), 8);
        assert_eq!(sink.comparisons(), 8);
    }

    #[test]
    fn majority_after_reset_is_found() {
        let (found, sink) = run(&[1, 2, 3, 3, 3]);
        assert_eq!(found, Some(3));
        assert_eq!(sink.reads(), 10);
        assert_eq!(sink.comparisons(), 9);
    }

    #[test]
    fn elapsed_time_is_recorded_once_per_call() {
        let inputs: [&[i32]; 4] = [&[], &[7], &[1, 2, 3, 4], &[2, 2, 1, 2, 3, 2, 2]];
        for input in inputs {
            let sink = CallCounter::default();
            find_majority(Some(input), Some(&sink)).unwrap();
            assert_eq!(sink.elapsed_calls.load(Ordering::Relaxed), 1, "n = {}", input.len());
        }

        let sink = CallCounter::default();
        assert!(find_majority(None, Some(&sink)).is_err());
        assert_eq!(sink.elapsed_calls.load(Ordering::Relaxed), 0);
        assert_eq!(sink.other_calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn missing_sink_uses_noop() {
        let input = [4, 4, 9];
        assert_eq!(find_majority(Some(&input), None).unwrap(), Some(4));
        assert_eq!(noop_sink().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn shared_sink_sums_concurrent_calls() {
        let shared = create_sink();
        let inputs: Vec<Vec<i32>> = (1..=16)
            .map(|n| (0..n * 50).map(|i| (i % 3) as i32).collect())
            .collect();
        thread::scope(|scope| {
            for input in &inputs {
                let shared = &shared;
                scope.spawn(move || {
                    find_majority(Some(input.as_slice()), Some(shared)).unwrap();
                });
            }
        });

        let mut expected_reads = 0;
        let mut expected_comparisons = 0;
        for input in &inputs {
            let (_, sink) = run(input);
            expected_reads += sink.reads();
            expected_comparisons += sink.comparisons();
        }
        assert_eq!(shared.reads(), expected_reads);
        assert_eq!(shared.comparisons(), expected_comparisons);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = vec![3, 1, 3, 2, 3];
        let before = input.clone();
        let _ = run(&input);
        assert_eq!(input, before);
    }

    proptest! {
        #[test]
        fn returned_value_is_a_strict_majority(input in prop::collection::vec(0i32..4, 0..200)) {
            let (found, _) = run(&input);
            if let Some(value) = found {
                prop_assert!(occurrences(&input, value) > input.len() / 2);
            }
        }

        #[test]
        fn absent_result_means_no_majority_exists(input in prop::collection::vec(0i32..3, 0..200)) {
            let (found, _) = run(&input);
            if found.is_none() {
                for &value in &input {
                    prop_assert!(occurrences(&input, value) <= input.len() / 2);
                }
            }
        }

        #[test]
        fn counters_scale_linearly(input in prop::collection::vec(any::<i32>(), 1..500)) {
            let n = input.len() as u64;
            let (_, sink) = run(&input);
            prop_assert_eq!(sink.reads(), 2 * n);
            let max_resets = (n - 1) / 2;
            prop_assert!(sink.comparisons() <= 2 * n);
            prop_assert!(sink.comparisons() >= 2 * n - max_resets);
        }

        #[test]
        fn repeated_calls_agree(input in prop::collection::vec(0i32..5, 0..300)) {
            let (first, a) = run(&input);
            let (second, b) = run(&input);
            prop_assert_eq!(first, second);
            prop_assert_eq!(a.reads(), b.reads());
            prop_assert_eq!(a.comparisons(), b.comparisons());
        }

        #[test]
        fn planted_majority_is_found(
            majority in any::<i32>(),
            noise in prop::collection::vec(any::<i32>(), 0..100),
            extra in 1usize..20,
        ) {
            let mut input = noise.clone();
            input.extend(std::iter::repeat(majority).take(noise.len() + extra));
            let (found, _) = run(&input);
            prop_assert_eq!(found, Some(majority));
        }
    }
}
