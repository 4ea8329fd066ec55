//! The odd-even block exchange: the algorithmic heart of the sort.
//!
//! Each rank runs the same state machine over its line position. Per round a
//! rank either pairs with one line neighbor — swap blocks, merge the two
//! sorted runs, keep its own-sized half — or sits the round out; either way
//! it flips its pairing direction and joins the round barrier. The merge-trim
//! is the network's comparator: after a pairing, everything kept by the
//! lower line index is ≤ everything kept by the higher, so repeated rounds
//! converge to global order by the odd-even transposition argument applied at
//! block granularity.

use crate::algs::communicator::{Communicator, tags};
use crate::algs::local_sort::is_ascending;
use crate::algs::transfer;
use crate::sort_error::BrickSortError;
use crate::topology::line::VirtualLine;

/// Rounds needed to reach global order for a line of `line_len` blocks.
///
/// One phase per line position; both pairing parities get terminal passes. A
/// single rank never has a partner, so it runs no rounds at all.
pub fn round_count(line_len: usize) -> usize {
    if line_len <= 1 { 0 } else { line_len }
}

/// Merge two ascending runs into one; ties are taken from `front` first, so
/// both partners of a pair compute identical merges when the lower-index
/// block is passed as `front`.
pub fn merge_sorted(front: &[i64], back: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(front.len() + back.len());
    let (mut i, mut j) = (0, 0);
    while i < front.len() && j < back.len() {
        if front[i] <= back[j] {
            out.push(front[i]);
            i += 1;
        } else {
            out.push(back[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&front[i..]);
    out.extend_from_slice(&back[j..]);
    out
}

/// First `n` elements of a merged run (the lower line index keeps these).
pub fn split_front(merged: &[i64], n: usize) -> Vec<i64> {
    merged[..n].to_vec()
}

/// Last `n` elements of a merged run (the higher line index keeps these).
pub fn split_back(merged: &[i64], n: usize) -> Vec<i64> {
    merged[merged.len() - n..].to_vec()
}

/// This round's pairing, from the perspective of one rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pairing {
    /// Rank to swap with.
    pub rank: usize,
    /// True when this rank holds the lower line index of the pair and keeps
    /// the front half of the merge.
    pub keep_front: bool,
}

/// Per-rank exchange state: identity, line placement, current block, and the
/// alternating pairing direction. Constructed once at process start and
/// threaded explicitly through the round loop.
#[derive(Clone, Debug)]
pub struct LineSlot {
    pub rank: usize,
    /// This rank's position in the visiting order.
    pub index: usize,
    line_len: usize,
    before: Option<usize>,
    after: Option<usize>,
    forward: bool,
    pub block: Vec<i64>,
}

impl LineSlot {
    pub fn new(line: &VirtualLine, rank: usize, block: Vec<i64>) -> Self {
        let index = line.position_of(rank);
        Self {
            rank,
            index,
            line_len: line.len(),
            before: line.rank_before(index),
            after: line.rank_after(index),
            // direction starts toward the higher line index for everyone
            forward: true,
            block,
        }
    }

    pub fn line_len(&self) -> usize {
        self.line_len
    }

    /// Rank one line step toward the front, if any.
    pub fn rank_before(&self) -> Option<usize> {
        self.before
    }

    /// Rank one line step toward the back, if any.
    pub fn rank_after(&self) -> Option<usize> {
        self.after
    }

    /// Partner for the current round, if this rank has one.
    ///
    /// Even index pairs toward the back when `forward`, toward the front
    /// otherwise; odd index does the opposite. Together the two parities
    /// produce the alternating (0,1),(2,3),… then (1,2),(3,4),… schedule.
    pub fn partner(&self) -> Option<Pairing> {
        let toward_back = (self.index % 2 == 0) == self.forward;
        if toward_back {
            self.after.map(|rank| Pairing {
                rank,
                keep_front: true,
            })
        } else {
            self.before.map(|rank| Pairing {
                rank,
                keep_front: false,
            })
        }
    }

    /// Flip the pairing direction. Runs at the end of every round whether or
    /// not this rank paired; endpoint ranks flip through rounds they sit out.
    pub fn advance(&mut self) {
        self.forward = !self.forward;
    }
}

/// Run the full schedule of exchange rounds, with a barrier closing each
/// round so no rank starts round `k+1` before every rank finished round `k`.
pub fn run_rounds<C: Communicator>(comm: &C, slot: &mut LineSlot) -> Result<(), BrickSortError> {
    let rounds = round_count(slot.line_len());
    for round in 0..rounds {
        if let Some(pair) = slot.partner() {
            let tag = tags::EXCHANGE.offset(round as u16);
            let theirs = transfer::swap_blocks(comm, pair.rank, tag, &slot.block)?;
            let own = slot.block.len();
            let merged = if pair.keep_front {
                merge_sorted(&slot.block, &theirs)
            } else {
                merge_sorted(&theirs, &slot.block)
            };
            slot.block = if pair.keep_front {
                split_front(&merged, own)
            } else {
                split_back(&merged, own)
            };
            log::trace!(
                "rank {} round {round}: paired with {} keeping {}",
                slot.rank,
                pair.rank,
                if pair.keep_front { "front" } else { "back" },
            );
            debug_assert!(is_ascending(&slot.block));
        }
        slot.advance();
        comm.barrier();
    }
    Ok(())
}
