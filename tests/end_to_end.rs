mod util;
use util::*;

use brick_sort::algs::communicator::Communicator;
use brick_sort::algs::driver::{SortConfig, sort_distributed};
use brick_sort::sort_error::BrickSortError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serial_test::serial;
use std::sync::Arc;

fn random_sequence(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1000..1000)).collect()
}

fn sort_on_world(ranks: usize, input: Vec<i64>) -> Vec<Option<Vec<i64>>> {
    let total = input.len();
    let input = Arc::new(input);
    run_world(ranks, move |comm| {
        let mine = (comm.rank() == 0).then(|| input.as_ref().clone());
        sort_distributed(&comm, &SortConfig::new(total), mine)
            .expect("sort failed")
            .sorted
    })
}

#[test]
#[serial]
fn sorts_random_sequences_across_the_grid() {
    for ranks in [1usize, 2, 3, 4, 8] {
        for total in [ranks, 100, 10_007] {
            let seed = (ranks * 31 + total) as u64;
            let input = random_sequence(total, seed);
            let expected = sorted_copy(&input);
            let results = sort_on_world(ranks, input);
            assert_eq!(
                results[0].as_deref(),
                Some(expected.as_slice()),
                "ranks={ranks} total={total}"
            );
            for r in &results[1..] {
                assert_eq!(*r, None, "non-coordinator returned a sequence");
            }
        }
    }
}

#[test]
#[serial]
fn sorts_a_fully_reversed_sequence() {
    for ranks in [2usize, 4, 8] {
        let total = 64;
        let input: Vec<i64> = (0..total as i64).rev().collect();
        let expected = sorted_copy(&input);
        let results = sort_on_world(ranks, input);
        assert_eq!(results[0].as_deref(), Some(expected.as_slice()));
    }
}

#[test]
#[serial]
fn sorts_duplicates_and_single_element() {
    let results = sort_on_world(1, vec![7]);
    assert_eq!(results[0], Some(vec![7]));

    let input = vec![2i64; 40];
    let results = sort_on_world(4, input.clone());
    assert_eq!(results[0], Some(input));
}

#[test]
#[serial]
fn degenerate_configs_error_on_every_rank() {
    for (ranks, total) in [(2usize, 0usize), (2, 1), (4, 3), (8, 1), (1, 0)] {
        let results = run_world(ranks, move |comm| {
            let mine = (comm.rank() == 0).then(|| random_sequence(total, 1));
            sort_distributed(&comm, &SortConfig::new(total), mine)
        });
        for outcome in results {
            assert_eq!(
                outcome,
                Err(BrickSortError::DegenerateBlocks {
                    elements: total,
                    ranks
                }),
                "ranks={ranks} total={total}"
            );
        }
    }
}

#[test]
#[serial]
fn uncoverable_rank_count_errors_on_every_rank() {
    let results = run_world(5, |comm| {
        let mine = (comm.rank() == 0).then(|| random_sequence(50, 2));
        sort_distributed(&comm, &SortConfig::new(50), mine)
    });
    for outcome in results {
        assert_eq!(
            outcome,
            Err(BrickSortError::UncoveredRanks {
                ranks: 5,
                covered: 4
            })
        );
    }
}
