#![deny(missing_docs)]

//! # majority_vote
//!
//! **majority_vote** finds the strict majority element of an integer
//! sequence, the value occurring in more than half of its positions, using
//! the two-pass Boyer–Moore voting algorithm.  The finder runs in linear time
//! with constant auxiliary space and reports its own cost into a pluggable
//! metrics sink, so callers can measure element reads, comparisons and
//! elapsed time without changing what the algorithm returns.
//!
//! ## Features
//!
//! * **Majority finder**: [`find_majority`] rejects an absent input and
//!   otherwise returns `Some(value)` or `None`; [`majority_of`] is the
//!   infallible form over a slice.
//! * **Metrics sinks**: [`PerformanceTracker`] counts with atomics and can be
//!   shared across threads; [`NoopSink`] discards everything and is the
//!   default when no sink is given.
//! * **Benchmark driver**: the [`bench`] module generates seeded inputs, runs
//!   trials per size (optionally on the rayon pool) and writes CSV and JSON
//!   reports.
//!
//! ## Usage
//!
//! ```rust
//! use majority_vote::{create_sink, find_majority, MetricsSink};
//!
//! let sink = create_sink();
//! let found = find_majority(Some(&[5, 5, 5, 1, 1]), Some(&sink)).unwrap();
//! assert_eq!(found, Some(5));
//! // Two full passes over five elements.
//! assert_eq!(sink.reads(), 10);
//! ```
//!
//! The `majority` binary wraps the same operations for the command line:
//! `majority find 2 2 1 2 3 2 2` and `majority bench --sizes 100,1000`.

pub mod bench;
mod data;
pub mod generator;
mod io;
mod majority;
pub mod metrics;

pub use bench::{run_benchmark, BenchConfig, BenchError, BenchReport, SizeSummary, TrialRecord};
pub use data::{encode_sequence, parse_sequence, ParseError};
pub use generator::{generate_majority_input, generate_uniform_input};
pub use io::{csv_row, render_table, write_csv, write_summary_json, CSV_HEADER};
pub use majority::{find_majority, majority_of, MajorityError};
pub use metrics::{
    create_sink, noop_sink, MetricsSink, MetricsSnapshot, NoopSink, PerformanceTracker,
};
