//! Logical 2-D grid dimensions derived from the rank count.
//!
//! Ranks are numbered row-major: rank `r` sits at row `r / height`, column
//! `r % height`, in a grid of `width` rows by `height` columns. The point of
//! the grid is physical locality: two ranks that differ by 1 (same row) or by
//! `height` (same column) share a physical link.

use serde::{Deserialize, Serialize};

/// Grid shape for a given rank count: `width = floor(sqrt(P))` rows of
/// `height = P / width` columns. The product may fall short of P for rank
/// counts with no near-square factorization; callers must check
/// [`GridDims::covers`] before trusting the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub width: usize,
    pub height: usize,
}

impl GridDims {
    pub fn for_ranks(ranks: usize) -> Self {
        let width = ranks.isqrt();
        let height = if width == 0 { 0 } else { ranks / width };
        Self { width, height }
    }

    /// Number of ranks the grid actually holds.
    pub fn covered(&self) -> usize {
        self.width * self.height
    }

    /// True when every rank in `[0, ranks)` has a grid cell.
    pub fn covers(&self, ranks: usize) -> bool {
        self.covered() == ranks
    }

    /// True when two ranks occupy neighboring grid cells (one hop on a
    /// physical link).
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        if self.height == 0 || a == b {
            return false;
        }
        let (row_a, col_a) = (a / self.height, a % self.height);
        let (row_b, col_b) = (b / self.height, b % self.height);
        (row_a == row_b && col_a.abs_diff(col_b) == 1)
            || (col_a == col_b && row_a.abs_diff(row_b) == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_square_shapes() {
        assert_eq!(GridDims::for_ranks(1), GridDims { width: 1, height: 1 });
        assert_eq!(GridDims::for_ranks(2), GridDims { width: 1, height: 2 });
        assert_eq!(GridDims::for_ranks(4), GridDims { width: 2, height: 2 });
        assert_eq!(GridDims::for_ranks(8), GridDims { width: 2, height: 4 });
        assert_eq!(GridDims::for_ranks(9), GridDims { width: 3, height: 3 });
    }

    #[test]
    fn coverage_gaps_are_visible() {
        // floor(sqrt(5)) = 2, 5 / 2 = 2: a 2x2 grid leaves rank 4 homeless.
        let dims = GridDims::for_ranks(5);
        assert_eq!(dims.covered(), 4);
        assert!(!dims.covers(5));
    }

    #[test]
    fn adjacency_is_row_or_column_step() {
        let dims = GridDims::for_ranks(8); // 2 rows of 4
        assert!(dims.adjacent(0, 1));
        assert!(dims.adjacent(3, 7));
        assert!(!dims.adjacent(3, 4)); // row wrap is not a link
        assert!(!dims.adjacent(0, 5));
        assert!(!dims.adjacent(2, 2));
    }
}
