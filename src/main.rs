//! Benchmark runner: baseline vs multi-threaded shortcut on a random matrix.
//!
//! Usage: `shortcut N [ITERATIONS] [THREADS]`
//!
//! Set `SHORTCUT_SEED` to get the same matrix on every run.

use std::env;
use std::process;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use shortcut::{ParallelConfig, SquareMatrix, shortcut_baseline, shortcut_parallel_with};

struct Args {
    n: usize,
    iterations: usize,
    threads: Option<usize>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("shortcut");
    let usage = format!("usage: {} N [ITERATIONS] [THREADS]", program);

    let parse = |s: &str, what: &str| -> Result<usize, String> {
        s.parse::<usize>()
            .map_err(|e| format!("invalid {} '{}': {}\n{}", what, s, e, usage))
    };

    match args.len() {
        2..=4 => {
            let n = parse(args[1].as_str(), "N")?;
            let iterations = args.get(2).map(|s| parse(s.as_str(), "ITERATIONS")).transpose()?.unwrap_or(1);
            let threads = args.get(3).map(|s| parse(s.as_str(), "THREADS")).transpose()?;
            if n == 0 {
                return Err(format!("N must be at least 1\n{}", usage));
            }
            Ok(Args {
                n,
                iterations: iterations.max(1),
                threads,
            })
        }
        _ => Err(usage),
    }
}

fn build_matrix(n: usize) -> shortcut::Result<SquareMatrix> {
    match env::var("SHORTCUT_SEED").ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => SquareMatrix::random_with_rng(n, &mut StdRng::seed_from_u64(seed)),
        None => SquareMatrix::random(n),
    }
}

fn run(args: &Args) -> shortcut::Result<()> {
    let mut config = ParallelConfig::default();
    if let Some(threads) = args.threads {
        config = config.with_workers(threads);
    }

    println!("=== Shortcut Benchmark ===\n");
    println!(
        "Matrix: {}×{}, iterations: {}, workers: {}\n",
        args.n,
        args.n,
        args.iterations,
        config.worker_count()
    );

    let d = build_matrix(args.n)?;
    if args.n <= 8 {
        println!("Input:\n{}", d);
    }

    let mut total_baseline = 0.0;
    let mut total_parallel = 0.0;

    for iter in 0..args.iterations {
        let start = Instant::now();
        let expected = shortcut_baseline(&d);
        let baseline_ms = start.elapsed().as_secs_f64() * 1000.0;

        let start = Instant::now();
        let got = shortcut_parallel_with(&d, &config)?;
        let parallel_ms = start.elapsed().as_secs_f64() * 1000.0;

        if got != expected {
            eprintln!("iteration {}: parallel result differs from baseline", iter + 1);
            process::exit(2);
        }
        if iter == 0 && args.n <= 8 {
            println!("Shortcuts:\n{}", got);
        }

        println!(
            "{}. baseline {:10.2} ms   parallel {:10.2} ms   ({:.1}×)",
            iter + 1,
            baseline_ms,
            parallel_ms,
            baseline_ms / parallel_ms
        );
        total_baseline += baseline_ms;
        total_parallel += parallel_ms;
    }

    println!("{}", "-".repeat(60));
    println!(
        "avg  baseline {:10.2} ms   parallel {:10.2} ms   ({:.1}×)",
        total_baseline / args.iterations as f64,
        total_parallel / args.iterations as f64,
        total_baseline / total_parallel
    );
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
