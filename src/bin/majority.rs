//! Command-line front end for the majority finder.
//!
//! `majority find` checks a single sequence and prints the counters the
//! finder reported; `majority bench` runs the benchmark driver and writes its
//! CSV and JSON reports.

use majority_vote::{
    create_sink, find_majority, parse_sequence, render_table, run_benchmark, write_csv,
    write_summary_json, BenchConfig, MetricsSink,
};
use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::{fmt, EnvFilter};

fn fatal(message: &str) -> ! {
    tracing::error!("{message}");
    std::process::exit(1);
}

fn print_help() {
    println!("Usage: majority <find|bench> ...");
    println!("  find [--file <path>] [<int> ...]");
    println!("       (reads stdin when neither a file nor integers are given)");
    println!("  bench [--sizes <n,n,...>] [--trials <N>] [--seed <N>] [--out <dir>] [--parallel]");
    println!("        (MAJORITY_BENCH_OUT overrides the default output directory)");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("find") => cmd_find(args.collect()),
        Some("bench") => cmd_bench(args.collect()),
        Some("-h") | Some("--help") | Some("help") => print_help(),
        Some(other) => {
            print_help();
            fatal(&format!("unknown command: {other}"));
        }
        None => {
            print_help();
            std::process::exit(1);
        }
    }
}

fn cmd_find(args: Vec<String>) {
    let mut file: Option<PathBuf> = None;
    let mut tokens = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--file" => {
                let path = iter
                    .next()
                    .unwrap_or_else(|| fatal("--file requires a path"));
                file = Some(PathBuf::from(path));
            }
            _ => tokens.push(arg),
        }
    }

    let text = match file {
        Some(path) => fs::read_to_string(&path).unwrap_or_else(|err| {
            fatal(&format!("failed to read {}: {err}", path.display()))
        }),
        None if !tokens.is_empty() => tokens.join(" "),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .unwrap_or_else(|err| fatal(&format!("failed to read stdin: {err}")));
            buf
        }
    };
    let sequence =
        parse_sequence(&text).unwrap_or_else(|err| fatal(&format!("invalid sequence: {err}")));

    let sink = create_sink();
    let found = find_majority(Some(sequence.as_slice()), Some(&sink))
        .unwrap_or_else(|err| fatal(&err.to_string()));
    tracing::debug!(n = sequence.len(), found = found.is_some(), "find complete");

    match found {
        Some(value) => println!("majority: {value}"),
        None => println!("majority: none"),
    }
    println!(
        "n={} reads={} comparisons={} time_ns={}",
        sequence.len(),
        sink.reads(),
        sink.comparisons(),
        sink.elapsed_nanos()
    );
}

fn parse_flag<T: std::str::FromStr>(flag: &str, value: Option<String>) -> T {
    let value = value.unwrap_or_else(|| fatal(&format!("{flag} requires a value")));
    value
        .trim()
        .parse::<T>()
        .unwrap_or_else(|_| fatal(&format!("invalid value for {flag}: {value}")))
}

fn parse_sizes(value: Option<String>) -> Vec<usize> {
    let value = value.unwrap_or_else(|| fatal("--sizes requires a value"));
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .unwrap_or_else(|_| fatal(&format!("invalid size: {part}")))
        })
        .collect()
}

fn cmd_bench(args: Vec<String>) {
    let mut config = BenchConfig::from_env();
    let mut iter = args.into_iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--sizes" => config.sizes = parse_sizes(iter.next()),
            "--trials" => config.trials = parse_flag("--trials", iter.next()),
            "--seed" => config.seed = parse_flag("--seed", iter.next()),
            "--out" => {
                let dir: String = parse_flag("--out", iter.next());
                config.out_dir = PathBuf::from(dir);
            }
            "--parallel" => config.parallel = true,
            other => {
                print_help();
                fatal(&format!("unknown flag: {other}"));
            }
        }
    }

    tracing::info!(
        sizes = ?config.sizes,
        trials = config.trials,
        seed = config.seed,
        parallel = config.parallel,
        out = %config.out_dir.display(),
        "starting benchmark"
    );
    let report = run_benchmark(&config).unwrap_or_else(|err| fatal(&err.to_string()));

    for line in render_table(&report.summaries) {
        println!("{line}");
    }
    let csv = write_csv(&config.out_dir, &report.records)
        .unwrap_or_else(|err| fatal(&format!("failed to write csv: {err}")));
    let json = write_summary_json(&config.out_dir, &report.summaries)
        .unwrap_or_else(|err| fatal(&format!("failed to write summary: {err}")));
    println!("CSV exported to {}", csv.display());
    println!("Summary exported to {}", json.display());
    tracing::info!(
        total_reads = report.totals.reads,
        total_comparisons = report.totals.comparisons,
        total_time_ns = report.totals.elapsed_nanos,
        "benchmark complete"
    );
}
