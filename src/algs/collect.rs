//! Chained collection of sorted blocks back to the coordinator.
//!
//! Blocks fold toward the front of the line: the back endpoint sends its
//! block and stops, every interior position appends what it received from
//! behind and forwards the concatenation, and position 0 — the coordinator —
//! prepends its own block to own the fully sorted sequence. This is a
//! sequential pipeline along the path, O(P) messages deep, not a reduction
//! tree; each link waits only on its immediate neighbor.

use crate::algs::communicator::{Communicator, tags};
use crate::algs::exchange::LineSlot;
use crate::algs::transfer;
use crate::sort_error::BrickSortError;

/// Fold every rank's block to the line's front. Returns the global sequence
/// on the coordinator, `None` everywhere else.
pub fn collect_along_line<C: Communicator>(
    comm: &C,
    slot: LineSlot,
) -> Result<Option<Vec<i64>>, BrickSortError> {
    match (slot.rank_before(), slot.rank_after()) {
        // Only rank on the line: its block is the result.
        (None, None) => Ok(Some(slot.block)),
        // Back endpoint: start the fold and stop.
        (Some(prev), None) => {
            transfer::send_block(comm, prev, tags::COLLECT, &slot.block);
            Ok(None)
        }
        // Interior: append everything folded so far, pass it on.
        (Some(prev), Some(next)) => {
            let folded = transfer::recv_block(comm, next, tags::COLLECT)?;
            let mut buffer = slot.block;
            buffer.extend_from_slice(&folded);
            transfer::send_block(comm, prev, tags::COLLECT, &buffer);
            Ok(None)
        }
        // Coordinator: its block heads the sequence.
        (None, Some(next)) => {
            let folded = transfer::recv_block(comm, next, tags::COLLECT)?;
            let mut sequence = slot.block;
            sequence.extend_from_slice(&folded);
            Ok(Some(sequence))
        }
    }
}
