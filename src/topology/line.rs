//! `VirtualLine`: a Hamiltonian path through the rank grid.
//!
//! The sort network treats the ranks as a one-dimensional chain, whatever the
//! physical grid shape. The line is a boustrophedon traversal — row 0 left to
//! right, row 1 right to left, and so on — so every pair of consecutive line
//! entries occupies neighboring grid cells and messages between line
//! neighbors cross exactly one physical link.
//!
//! Built once per run, immutable afterward. Every rank appears exactly once;
//! positions 0 and P−1 are the endpoints with a single line neighbor each.

use crate::sort_error::BrickSortError;
use crate::topology::grid::GridDims;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualLine {
    dims: GridDims,
    /// position -> rank
    order: Vec<usize>,
    /// rank -> position
    position: Vec<usize>,
}

impl VirtualLine {
    /// Build the visiting order for `ranks` processes.
    ///
    /// # Errors
    /// Returns [`BrickSortError::UncoveredRanks`] when the near-square grid
    /// cannot hold every rank (e.g. P = 5 or 7). Truncating the line instead
    /// would leave the missing ranks stuck at the first barrier.
    pub fn build(ranks: usize) -> Result<Self, BrickSortError> {
        let dims = GridDims::for_ranks(ranks);
        if !dims.covers(ranks) {
            log::warn!(
                "grid {}x{} holds {} of {} ranks; no full visiting order",
                dims.width,
                dims.height,
                dims.covered(),
                ranks
            );
            return Err(BrickSortError::UncoveredRanks {
                ranks,
                covered: dims.covered(),
            });
        }

        let mut order = Vec::with_capacity(ranks);
        for row in 0..dims.width {
            let base = row * dims.height;
            if row % 2 == 0 {
                order.extend(base..base + dims.height);
            } else {
                order.extend((base..base + dims.height).rev());
            }
        }

        let mut position = vec![0usize; ranks];
        for (pos, &rank) in order.iter().enumerate() {
            position[rank] = pos;
        }

        Ok(Self {
            dims,
            order,
            position,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Rank occupying line position `pos`.
    pub fn rank_at(&self, pos: usize) -> usize {
        self.order[pos]
    }

    /// Line position of `rank`.
    pub fn position_of(&self, rank: usize) -> usize {
        self.position[rank]
    }

    /// The full visiting order, front to back.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Rank one step toward the front of the line, if any.
    pub fn rank_before(&self, pos: usize) -> Option<usize> {
        pos.checked_sub(1).map(|p| self.order[p])
    }

    /// Rank one step toward the back of the line, if any.
    pub fn rank_after(&self, pos: usize) -> Option<usize> {
        self.order.get(pos + 1).copied()
    }
}
