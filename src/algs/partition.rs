//! Splitting the global sequence into per-rank blocks.
//!
//! Block sizing is a pure function of the shared run configuration: every
//! rank gets `total / ranks` contiguous elements in original order, and the
//! division remainder lands entirely on rank 0. Because both sides of every
//! later exchange derive their sizes from the same inputs, sizes are never
//! re-negotiated at runtime.

use crate::algs::communicator::{Communicator, tags};
use crate::algs::transfer;
use crate::sort_error::BrickSortError;

/// Number of elements assigned to `rank`.
pub fn block_len(total: usize, ranks: usize, rank: usize) -> usize {
    total / ranks + if rank == 0 { total % ranks } else { 0 }
}

/// Offset of `rank`'s block within the global sequence.
pub fn block_offset(total: usize, ranks: usize, rank: usize) -> usize {
    if rank == 0 {
        0
    } else {
        (total / ranks) * rank + total % ranks
    }
}

/// All block lengths, rank order.
pub fn block_sizes(total: usize, ranks: usize) -> Vec<usize> {
    (0..ranks).map(|r| block_len(total, ranks, r)).collect()
}

/// True when the configuration would hand some rank an empty block.
pub fn is_degenerate(total: usize, ranks: usize) -> bool {
    total == 0 || total < ranks
}

/// The distribute collective: rank 0 slices the global sequence and delivers
/// block `r` to rank `r`; every other rank receives exactly its own block.
///
/// The caller has already validated the configuration on every rank, so no
/// peer can be left blocked in a receive by a coordinator that aborted.
pub fn scatter_blocks<C: Communicator>(
    comm: &C,
    total: usize,
    input: Option<Vec<i64>>,
) -> Result<Vec<i64>, BrickSortError> {
    let ranks = comm.size();
    if comm.rank() == 0 {
        let seq = input.ok_or(BrickSortError::InputLength {
            expected: total,
            got: 0,
        })?;
        if seq.len() != total {
            return Err(BrickSortError::InputLength {
                expected: total,
                got: seq.len(),
            });
        }
        for r in 1..ranks {
            let off = block_offset(total, ranks, r);
            let len = block_len(total, ranks, r);
            transfer::send_block(comm, r, tags::SCATTER, &seq[off..off + len]);
        }
        let mut own = seq;
        own.truncate(block_len(total, ranks, 0));
        Ok(own)
    } else {
        transfer::recv_block(comm, 0, tags::SCATTER)
    }
}
