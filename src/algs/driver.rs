//! Run orchestration: distribute, sort locally, exchange, collect.
//!
//! Every rank calls [`sort_distributed`] with the same configuration; only
//! the coordinator supplies the input sequence and only the coordinator gets
//! the sorted result back. Degenerate configurations are rejected on every
//! rank before any message is sent, so an aborting run never strands a peer
//! in a blocking receive.

use crate::algs::communicator::Communicator;
use crate::algs::exchange::{self, LineSlot};
use crate::algs::{collect, local_sort, partition};
use crate::metrics::{PhaseTimer, PhaseTimes};
use crate::sort_error::BrickSortError;
use crate::topology::line::VirtualLine;
use serde::{Deserialize, Serialize};

/// Shared run configuration. Every rank must construct an identical value;
/// block sizes and round counts derive from it deterministically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Total element count N across all ranks.
    pub total_elements: usize,
}

impl SortConfig {
    pub fn new(total_elements: usize) -> Self {
        Self { total_elements }
    }
}

/// Result of one run on one rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortOutcome {
    /// The globally sorted sequence; `Some` only on the coordinator.
    pub sorted: Option<Vec<i64>>,
    /// This rank's wall-clock split across the four phases.
    pub timings: PhaseTimes,
}

/// Sort `input` across all ranks of `comm`.
///
/// The coordinator (rank 0) passes `Some(sequence)` with exactly
/// `config.total_elements` elements; every other rank passes `None` (any
/// value it passes is ignored).
///
/// # Errors
/// Configuration errors ([`BrickSortError::DegenerateBlocks`],
/// [`BrickSortError::UncoveredRanks`], [`BrickSortError::InputLength`])
/// surface before any communication. Transport failures are fatal and
/// propagate as [`BrickSortError::CommError`] / [`BrickSortError::PayloadSize`].
pub fn sort_distributed<C: Communicator>(
    comm: &C,
    config: &SortConfig,
    input: Option<Vec<i64>>,
) -> Result<SortOutcome, BrickSortError> {
    let ranks = comm.size();
    let total = config.total_elements;
    if partition::is_degenerate(total, ranks) {
        return Err(BrickSortError::DegenerateBlocks {
            elements: total,
            ranks,
        });
    }
    let line = VirtualLine::build(ranks)?;
    let rank = comm.rank();
    log::debug!("rank {rank}: sorting {total} element(s) across {ranks} rank(s)");

    let mut timer = PhaseTimer::start();

    let mut block = partition::scatter_blocks(comm, total, input)?;
    let distribute = timer.lap();

    local_sort::sort_block(&mut block);
    comm.barrier();
    let local_sort = timer.lap();

    let mut slot = LineSlot::new(&line, rank, block);
    exchange::run_rounds(comm, &mut slot)?;
    let exchange = timer.lap();

    let sorted = collect::collect_along_line(comm, slot)?;
    let collect = timer.lap();

    let timings = PhaseTimes {
        distribute,
        local_sort,
        exchange,
        collect,
    };
    log::debug!("rank {rank}: {timings}");

    Ok(SortOutcome { sorted, timings })
}
