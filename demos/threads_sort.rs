//! Thread-backed demo: P simulated ranks inside one process.
//!
//! Run with `cargo run --example threads_sort -- 10007 --ranks 4 --seed 7`.

use brick_sort::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::process::exit;
use std::time::Instant;

struct Args {
    elements: usize,
    ranks: usize,
    seed: u64,
    verbose: bool,
    baseline: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        elements: 100,
        ranks: 4,
        seed: 0,
        verbose: false,
        baseline: false,
    };
    let argv: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--ranks" => {
                i += 1;
                args.ranks = argv.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| usage(&argv[0]));
            }
            "--seed" => {
                i += 1;
                args.seed = argv.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| usage(&argv[0]));
            }
            "--verbose" => args.verbose = true,
            "--baseline" => args.baseline = true,
            "--help" => usage(&argv[0]),
            other => match other.parse() {
                Ok(n) => args.elements = n,
                Err(_) => usage(&argv[0]),
            },
        }
        i += 1;
    }
    args
}

fn usage(program: &str) -> ! {
    eprintln!("usage: {program} [elements] [--ranks P] [--seed S] [--verbose] [--baseline]");
    exit(2)
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let input: Vec<i64> = (0..args.elements).map(|_| rng.gen_range(0..1000)).collect();
    if args.verbose {
        println!("unsorted: {input:?}");
    }

    let baseline = args.baseline.then(|| {
        let mut copy = input.clone();
        let start = Instant::now();
        copy.sort_unstable();
        start.elapsed()
    });

    let config = SortConfig::new(args.elements);
    let workers: Vec<_> = (0..args.ranks)
        .map(|rank| {
            let input = (rank == 0).then(|| input.clone());
            let ranks = args.ranks;
            std::thread::spawn(move || {
                let comm = ThreadComm::new(rank, ranks);
                sort_distributed(&comm, &config, input)
            })
        })
        .collect();

    let mut sorted = None;
    let mut timings = None;
    for (rank, worker) in workers.into_iter().enumerate() {
        match worker.join().expect("worker thread panicked") {
            Ok(outcome) => {
                if rank == 0 {
                    sorted = outcome.sorted;
                    timings = Some(outcome.timings);
                }
            }
            Err(err) => {
                eprintln!("rank {rank}: {err}");
                exit(1);
            }
        }
    }

    let sorted = sorted.expect("coordinator produced no sequence");
    if args.verbose {
        println!("sorted: {sorted:?}");
    }
    println!(
        "sorted {} element(s) across {} rank(s)",
        sorted.len(),
        args.ranks
    );
    if let Some(timings) = timings {
        println!("{timings}");
        if let Some(single) = baseline {
            println!(
                "single-process sort: {single:?} ({:.2}x the distributed total)",
                single.as_secs_f64() / timings.total().as_secs_f64().max(f64::EPSILON)
            );
        }
    }
}
