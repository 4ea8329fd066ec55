//! Logical process topology: the rank grid and the virtual line over it.

pub mod grid;
pub mod line;

pub use grid::GridDims;
pub use line::VirtualLine;
