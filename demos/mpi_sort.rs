//! MPI-backed demo: one rank per process.
//!
//! Run with `mpirun -n 4 cargo run --example mpi_sort --features mpi-support -- 10007`.

use brick_sort::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::process::exit;

struct Args {
    elements: usize,
    seed: u64,
    verbose: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        elements: 100,
        seed: 0,
        verbose: false,
    };
    let argv: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--seed" => {
                i += 1;
                args.seed = argv.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| usage(&argv[0]));
            }
            "--verbose" => args.verbose = true,
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
    eprintln!("usage: {program} [elements] [--seed S] [--verbose]");
    exit(2)
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let comm = MpiComm::new().expect("MPI initialization failed");
    let rank = comm.rank();

    let input = (rank == 0).then(|| {
        let mut rng = SmallRng::seed_from_u64(args.seed);
        (0..args.elements)
            .map(|_| rng.gen_range(0..1000))
            .collect::<Vec<i64>>()
    });
    if args.verbose {
        if let Some(seq) = &input {
            println!("unsorted: {seq:?}");
        }
    }

    match sort_distributed(&comm, &SortConfig::new(args.elements), input) {
        Ok(outcome) => {
            if let Some(sorted) = outcome.sorted {
                if args.verbose {
                    println!("sorted: {sorted:?}");
                }
                println!(
                    "sorted {} element(s) across {} rank(s)",
                    sorted.len(),
                    comm.size()
                );
                println!("{}", outcome.timings);
            }
        }
        Err(err) => {
            eprintln!("rank {rank}: {err}");
            exit(1);
        }
    }
}
