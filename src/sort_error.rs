//! Unified error type for every public fallible `brick-sort` API.
//!
//! [`BrickSortError`] carries both configuration errors — detected before any
//! communication happens — and fatal transport failures. Each rank derives the
//! same protocol state from the shared configuration, so configuration errors
//! are raised identically on every rank.

use std::error::Error;
use std::fmt;

/// Errors surfaced by the distributed sort and its building blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrickSortError {
    /// The requested element count cannot be split into one non-empty block
    /// per rank (e.g. zero elements, or fewer elements than ranks).
    DegenerateBlocks {
        /// Total number of elements requested.
        elements: usize,
        /// Number of ranks participating in the run.
        ranks: usize,
    },
    /// The near-square grid cannot cover all `ranks`, so no full visiting
    /// order (Hamiltonian line) exists.
    UncoveredRanks {
        /// Number of ranks that needed covering.
        ranks: usize,
        /// Number of ranks the grid actually covers.
        covered: usize,
    },
    /// The coordinator's input does not match the configured element count.
    InputLength {
        /// Element count the configuration promised.
        expected: usize,
        /// Element count the coordinator actually supplied.
        got: usize,
    },
    /// A communication step with `neighbor` failed fatally.
    CommError {
        /// Rank of the neighbor the failed exchange was with.
        neighbor: usize,
        /// Human-readable description of the failure.
        source: String,
    },
    /// A received payload frame did not have the announced length.
    PayloadSize {
        /// Rank of the neighbor the frame came from.
        neighbor: usize,
        /// Number of bytes the header announced.
        expected: usize,
        /// Number of bytes actually received.
        got: usize,
    },
}

impl BrickSortError {
    /// Build a [`BrickSortError::CommError`] for a receive that completed with
    /// no data (the communicator's `wait` returned `None`).
    pub fn recv_failed(neighbor: usize) -> Self {
        BrickSortError::CommError {
            neighbor,
            source: format!("receive from rank {neighbor} failed (wait returned no data)"),
        }
    }
}

impl fmt::Display for BrickSortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrickSortError::DegenerateBlocks { elements, ranks } => write!(
                f,
                "cannot split {elements} element(s) into one non-empty block per {ranks} rank(s)"
            ),
            BrickSortError::UncoveredRanks { ranks, covered } => write!(
                f,
                "grid covers {covered} of {ranks} rank(s); no full visiting order"
            ),
            BrickSortError::InputLength { expected, got } => write!(
                f,
                "coordinator input length mismatch: expected {expected}, got {got}"
            ),
            BrickSortError::CommError { neighbor, source } => {
                write!(f, "communication error with rank {neighbor}: {source}")
            }
            BrickSortError::PayloadSize {
                neighbor,
                expected,
                got,
            } => write!(
                f,
                "payload from rank {neighbor} had wrong size: expected {expected} byte(s), got {got}"
            ),
        }
    }
}

impl Error for BrickSortError {}
