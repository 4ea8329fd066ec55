//! # brick-sort
//!
//! brick-sort is a distributed sorting crate for message-passing process
//! grids. An unsorted sequence of N integers is split into P contiguous
//! blocks, one per rank; the ranks cooperate through pairwise neighbor
//! exchanges only — no rank ever holds the whole dataset except the
//! coordinator at the edges of a run — and converge to global order through
//! an odd-even transposition network applied at block granularity.
//!
//! ## How a run works
//! - A **virtual line** (a Hamiltonian snake path through the near-square
//!   rank grid) gives every rank at most two logical neighbors, each one
//!   physical link away.
//! - The coordinator **distributes** one contiguous block per rank, every
//!   rank **locally sorts** its block, then P **exchange rounds** each pair
//!   line neighbors to swap blocks, merge, and keep their own-sized half,
//!   with a barrier closing every round.
//! - A chained **collection** folds the blocks back along the line to the
//!   coordinator, which owns the sorted sequence.
//!
//! ## Communication backends
//! Pluggable via the [`algs::communicator::Communicator`] trait: `NoComm`
//! (serial unit tests), `ThreadComm` (one OS thread per rank inside a single
//! process), and `MpiComm` (feature `mpi-support`).
//!
//! ## Determinism
//! Block sizes, the visiting order, and the pairing schedule are pure
//! functions of the shared run configuration, so every rank derives the same
//! protocol state without negotiation. Demos and tests draw inputs from
//! seeded `SmallRng` generators so runs are reproducible.

pub mod algs;
pub mod metrics;
pub mod sort_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::communicator::{CommTag, Communicator, NoComm, ThreadComm, Wait};
    #[cfg(feature = "mpi-support")]
    pub use crate::algs::communicator::MpiComm;
    pub use crate::algs::driver::{SortConfig, SortOutcome, sort_distributed};
    pub use crate::metrics::PhaseTimes;
    pub use crate::sort_error::BrickSortError;
    pub use crate::topology::grid::GridDims;
    pub use crate::topology::line::VirtualLine;
}
