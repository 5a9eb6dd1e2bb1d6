//! Benchmark driver for the majority finder.
//!
//! For each configured input size the driver generates a majority-bearing
//! input, runs the finder `trials` times with a fresh [`PerformanceTracker`]
//! per trial and keeps one [`TrialRecord`] per run.  Every trial also reports
//! into one aggregate tracker shared by all trials, which exercises the
//! concurrent accumulation path when trials run on the rayon pool.
//!
//! Trials of the same size reuse the same generated input, so the read and
//! comparison columns are constant per size and only the timing varies.

use crate::generator::generate_majority_input;
use crate::majority::majority_of;
use crate::metrics::{create_sink, MetricsSink, MetricsSnapshot, PerformanceTracker};
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Input sizes used when none are configured.
pub const DEFAULT_SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];
/// Trials per size used when none are configured.
pub const DEFAULT_TRIALS: usize = 5;
/// Base generator seed.
pub const DEFAULT_SEED: u64 = 1234;
/// Output directory used when neither a flag nor the environment names one.
pub const DEFAULT_OUT_DIR: &str = "docs/performance-plots";
/// Environment variable overriding [`DEFAULT_OUT_DIR`].
pub const OUT_DIR_ENV: &str = "MAJORITY_BENCH_OUT";

/// Errors raised by the benchmark driver and its report writers.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The configuration cannot be run.
    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(String),
    /// Filesystem failure while writing reports.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Summary serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Benchmark parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Input sizes, benchmarked in order.
    pub sizes: Vec<usize>,
    /// Trials per size.
    pub trials: usize,
    /// Base generator seed; each size draws from `seed + n`.
    pub seed: u64,
    /// Directory receiving the CSV and JSON reports.
    pub out_dir: PathBuf,
    /// Run the trials of each size on the rayon pool.
    pub parallel: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            parallel: false,
        }
    }
}

impl BenchConfig {
    /// Default configuration with the output directory taken from
    /// [`OUT_DIR_ENV`] when it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(OUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.out_dir = PathBuf::from(dir);
            }
        }
        config
    }

    /// Checks that the configuration describes at least one trial.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.sizes.is_empty() {
            return Err(BenchError::InvalidConfig("no input sizes selected".into()));
        }
        if self.trials == 0 {
            return Err(BenchError::InvalidConfig("trials must be at least 1".into()));
        }
        self.total_trials()?;
        Ok(())
    }

    /// Number of finder invocations the configuration describes.
    pub fn total_trials(&self) -> Result<usize, BenchError> {
        self.sizes.len().checked_mul(self.trials).ok_or_else(|| {
            BenchError::InvalidConfig(format!(
                "{} sizes x {} trials overflows the trial count",
                self.sizes.len(),
                self.trials
            ))
        })
    }
}

/// Counters of a single finder invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Input length.
    pub n: usize,
    /// Trial index within the size.
    pub trial: usize,
    /// Elapsed time in nanoseconds.
    pub time_ns: u64,
    /// Element reads.
    pub reads: u64,
    /// Equality comparisons.
    pub comparisons: u64,
    /// Bytes allocated for the input.
    pub memory_bytes: u64,
    /// Whether a majority was found.
    pub found: bool,
}

/// Averages over the trials of one input size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSummary {
    /// Input length.
    pub n: usize,
    /// Number of trials averaged.
    pub trials: usize,
    /// Mean elapsed time in nanoseconds.
    pub avg_time_ns: f64,
    /// Mean element reads.
    pub avg_reads: f64,
    /// Mean equality comparisons.
    pub avg_comparisons: f64,
    /// Mean allocated bytes.
    pub avg_memory_bytes: f64,
    /// Trials that found a majority.
    pub found: usize,
}

impl SizeSummary {
    fn from_records(n: usize, records: &[TrialRecord]) -> Self {
        let trials = records.len();
        let mean = |f: fn(&TrialRecord) -> u64| -> f64 {
            if trials == 0 {
                return 0.0;
            }
            records.iter().map(|r| f(r) as f64).sum::<f64>() / trials as f64
        };
        Self {
            n,
            trials,
            avg_time_ns: mean(|r| r.time_ns),
            avg_reads: mean(|r| r.reads),
            avg_comparisons: mean(|r| r.comparisons),
            avg_memory_bytes: mean(|r| r.memory_bytes),
            found: records.iter().filter(|r| r.found).count(),
        }
    }
}

/// Outcome of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    /// One record per trial, grouped by size in configuration order.
    pub records: Vec<TrialRecord>,
    /// One summary per size.
    pub summaries: Vec<SizeSummary>,
    /// Counters accumulated across every trial.
    pub totals: MetricsSnapshot,
}

/// Runs every configured trial and collects the results.
pub fn run_benchmark(config: &BenchConfig) -> Result<BenchReport, BenchError> {
    config.validate()?;
    let aggregate = create_sink();
    let mut records = Vec::with_capacity(config.total_trials()?);
    let mut summaries = Vec::with_capacity(config.sizes.len());

    for &n in &config.sizes {
        let input = generate_majority_input(n, config.seed);
        let size_records = run_size(&input, config.trials, config.parallel, &aggregate);
        let summary = SizeSummary::from_records(n, &size_records);
        info!(
            n,
            trials = summary.trials,
            avg_time_ns = summary.avg_time_ns,
            avg_reads = summary.avg_reads,
            avg_comparisons = summary.avg_comparisons,
            found = summary.found,
            "benchmarked input size"
        );
        records.extend(size_records);
        summaries.push(summary);
    }

    Ok(BenchReport {
        records,
        summaries,
        totals: aggregate.snapshot(),
    })
}

fn run_size(
    input: &[i32],
    trials: usize,
    parallel: bool,
    aggregate: &PerformanceTracker,
) -> Vec<TrialRecord> {
    let use_parallel = {
        #[cfg(not(target_arch = "wasm32"))]
        {
            parallel && trials > 1 && rayon::current_num_threads() > 1
        }
        #[cfg(target_arch = "wasm32")]
        {
            let _ = parallel;
            false
        }
    };

    if use_parallel {
        #[cfg(not(target_arch = "wasm32"))]
        {
            return (0..trials)
                .into_par_iter()
                .map(|trial| run_trial(input, trial, aggregate))
                .collect();
        }
    }
    (0..trials)
        .map(|trial| run_trial(input, trial, aggregate))
        .collect()
}

fn run_trial(input: &[i32], trial: usize, aggregate: &PerformanceTracker) -> TrialRecord {
    let tracker = create_sink();
    tracker.record_allocated_bytes(std::mem::size_of_val(input) as u64);
    let result = majority_of(input, &tracker);

    let snapshot = tracker.snapshot();
    aggregate.record_reads(snapshot.reads);
    aggregate.record_comparisons(snapshot.comparisons);
    aggregate.record_elapsed_nanos(snapshot.elapsed_nanos);
    aggregate.record_allocated_bytes(snapshot.allocated_bytes);

    let record = TrialRecord {
        n: input.len(),
        trial,
        time_ns: snapshot.elapsed_nanos,
        reads: snapshot.reads,
        comparisons: snapshot.comparisons,
        memory_bytes: snapshot.allocated_bytes,
        found: result.is_some(),
    };
    debug!(
        n = record.n,
        trial,
        time_ns = record.time_ns,
        found = record.found,
        "trial complete"
    );
    record
}
