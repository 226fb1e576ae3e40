//! Triplet Counting Benchmark
//!
//! Measures every counting strategy on one input file and prints the most
//! frequent triplets.
//!
//! ## What It Benchmarks
//!
//! 1. **Text strategies**: the file is loaded once, then counted with the
//!    sequential, word-parallel and word-queued strategies
//! 2. **File strategies**: the file is streamed in chunks, on the calling
//!    thread and on the worker pool
//!
//! ## Usage
//!
//! ```bash
//! # All strategies, default options
//! ./target/release/triplet_bench /path/to/book.txt
//!
//! # Top 20, case sensitive, 4 workers, 500 lines per chunk
//! ./target/release/triplet_bench /path/to/book.txt --top 20 --case-sensitive \
//!     --workers 4 --chunk-length 500
//!
//! # Engine logs
//! RUST_LOG=tripleter_core=debug ./target/release/triplet_bench /path/to/book.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === words-parallel ===
//! --------------------------------
//! Mode        : words-parallel
//! Elapsed     : 0.052 s
//! Throughput  : 0.412 GiB/s
//! Triplets    : 17_351_022
//! Triplets/sec: 333_673_500
//! --------------------------------
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tripleter_core::{FrequencyTable, Result, Strategy, TripletConfig, TripletError, Tripleter};

const WARMUP_RUNS: usize = 1;

/// Benchmark the triplet counting strategies on a text file.
#[derive(Debug, Parser)]
#[command(name = "triplet_bench", version)]
struct Args {
    /// Input text file.
    path: PathBuf,

    /// Number of top triplets to print.
    #[arg(long, default_value_t = TripletConfig::default().top_k)]
    top: usize,

    /// Distinguish upper and lower case.
    #[arg(long)]
    case_sensitive: bool,

    /// Worker threads for the parallel strategies (0 = one per core).
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Lines per chunk for the file strategies.
    #[arg(long, default_value_t = TripletConfig::default().chunk_length)]
    chunk_length: usize,

    /// Carry the last two characters of each chunk into the next one.
    #[arg(long)]
    carry_boundary: bool,

    /// Measured runs per strategy.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = TripletConfig {
        case_sensitive: args.case_sensitive,
        chunk_length: args.chunk_length,
        carry_chunk_boundary: args.carry_boundary,
        workers: args.workers,
        top_k: args.top,
        ..Default::default()
    };
    config.validate()?;
    let engine = Tripleter::with_config(config);

    println!("Loading file...");
    let input = load(&args.path)?;
    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Workers:   {}\n", fmt_workers(args.workers));

    let mut reference = None;
    for strategy in Strategy::ALL {
        let table = bench(strategy.name(), input.len(), args.runs, || {
            engine.count(&input, strategy)
        })?;
        reference.get_or_insert(table);
    }

    bench("file-sequential", input.len(), args.runs, || {
        engine.count_file_sequential(&args.path)
    })?;
    let table = bench("file-parallel", input.len(), args.runs, || {
        engine.count_file(&args.path)
    })?;

    let table = reference.unwrap_or(table);
    print_top(&table, args.top);
    println!("Engine: {:?}", engine.metrics());

    Ok(())
}

fn load(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(TripletError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

fn bench<F>(label: &str, input_bytes: usize, runs: u32, mut f: F) -> Result<FrequencyTable>
where
    F: FnMut() -> Result<FrequencyTable>,
{
    println!("=== {} ===", label);

    for _ in 0..WARMUP_RUNS {
        std::hint::black_box(f()?);
    }

    let mut total = Duration::ZERO;
    let mut last = FrequencyTable::new();
    for _ in 0..runs {
        let start = Instant::now();
        last = std::hint::black_box(f()?);
        total += start.elapsed();
    }

    print_perf(label, input_bytes, total / runs, &last);
    Ok(last)
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, table: &FrequencyTable) {
    let triplets = table.total();
    let secs = elapsed.as_secs_f64();
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    if secs > 0.0 {
        println!("Throughput  : {:.3} GiB/s", gib / secs);
    }

    if triplets > 0 {
        println!("Triplets    : {}", fmt_count(triplets));
        println!("Distinct    : {}", fmt_count(table.len() as u64));
        if secs > 0.0 {
            println!("Triplets/sec: {}", fmt_count((triplets as f64 / secs) as u64));
        }
    }

    println!("--------------------------------\n");
}

fn print_top(table: &FrequencyTable, k: usize) {
    println!("=== Top {} of {} ===", k, fmt_count(table.len() as u64));
    for (rank, entry) in table.top_k(k).iter().enumerate() {
        println!("{:>3}. {}", rank + 1, entry);
    }
    let stats = table.stats();
    println!("{}", stats);
    println!("Table memory: {}\n", fmt_bytes(stats.memory_usage_bytes() as u64));
}

fn fmt_workers(workers: usize) -> String {
    match workers {
        0 => format!("auto ({})", available_cores()),
        n => n.to_string(),
    }
}

fn available_cores() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
