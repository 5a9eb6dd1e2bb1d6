use majority_vote::{
    create_sink, generate_majority_input, generate_uniform_input, majority_of, MetricsSink,
};
use std::fs::File;
use std::io::Write;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let max_exp = args.get(1).and_then(|s| s.parse::<u32>().ok());
    let exponents: Vec<u32> = match max_exp {
        Some(m) => (2..=m).collect(),
        None => (2..=6).collect(),
    };
    if exponents.is_empty() {
        eprintln!("No sizes selected; provide a max exponent >= 2.");
        return;
    }

    let mut rows = Vec::new();
    println!(
        "{:>9} | {:>8} | {:>10} | {:>12} | {:>12} | {:>8}",
        "n", "input", "reads", "comparisons", "time(ns)", "result"
    );
    println!("{}", "-".repeat(72));
    for &exp in &exponents {
        let Some(n) = 10usize.checked_pow(exp).and_then(|base| base.checked_add(1)) else {
            eprintln!("10^{exp} does not fit in usize; stopping.");
            break;
        };
        for (label, input) in [
            ("planted", generate_majority_input(n, 1234)),
            ("uniform", generate_uniform_input(n, 4, 1234)),
        ] {
            let sink = create_sink();
            let result = majority_of(&input, &sink);
            let shown = result.map_or_else(|| "none".to_string(), |v| v.to_string());
            println!(
                "{:>9} | {:>8} | {:>10} | {:>12} | {:>12} | {:>8}",
                n,
                label,
                sink.reads(),
                sink.comparisons(),
                sink.elapsed_nanos(),
                shown
            );
            rows.push((n, label, sink.snapshot(), shown));
        }
    }

    if let Ok(path) = std::env::var("MAJORITY_SCALE_OUT") {
        let mut file = File::create(&path).expect("create csv output");
        writeln!(file, "n,input,reads,comparisons,time_ns,result").expect("write csv header");
        for (n, label, snapshot, shown) in rows {
            writeln!(
                file,
                "{n},{label},{},{},{},{shown}",
                snapshot.reads, snapshot.comparisons, snapshot.elapsed_nanos
            )
            .expect("write csv row");
        }
        println!("CSV exported to {path}");
    }
}
