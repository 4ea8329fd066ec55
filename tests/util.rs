#![allow(dead_code)]
use brick_sort::algs::communicator::ThreadComm;
use std::sync::Arc;

/// Run `f` on `ranks` simulated ranks, one OS thread each.
/// Returns the per-rank results in rank order.
pub fn run_world<T, F>(ranks: usize, f: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(ThreadComm) -> T + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let workers: Vec<_> = (0..ranks)
        .map(|rank| {
            let f = Arc::clone(&f);
            std::thread::spawn(move || f(ThreadComm::new(rank, ranks)))
        })
        .collect();
    workers
        .into_iter()
        .map(|w| w.join().expect("rank thread panicked"))
        .collect()
}

/// Two-rank thread comms (ranks 0 and 1).
pub fn threads2() -> (ThreadComm, ThreadComm) {
    (ThreadComm::new(0, 2), ThreadComm::new(1, 2))
}

/// Reference ordering to compare distributed results against.
pub fn sorted_copy(v: &[i64]) -> Vec<i64> {
    let mut s = v.to_vec();
    s.sort_unstable();
    s
}
