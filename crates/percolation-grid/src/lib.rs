//! Site lattice and incremental connectivity for percolation experiments.
//!
//! An n-by-n grid of sites starts fully closed. Sites are opened one at a
//! time, and each open merges the site with its open orthogonal neighbors in
//! a union-find structure. Two virtual nodes stand in for the top and bottom
//! boundaries, so asking whether the system percolates is a single
//! connectivity query.
//!
//! # Modules
//!
//! - [`error`] -- [`GridError`] for bad sizes and out-of-bounds coordinates.
//! - [`grid`] -- [`Percolation`], the lattice with open/full/percolates
//!   queries, and the [`FullnessPolicy`] that controls backwash.
//! - [`union_find`] -- [`DisjointSet`], weighted quick-union with path
//!   compression.
//!
//! # Example
//!
//! ```
//! use percolation_grid::Percolation;
//!
//! let mut grid = Percolation::new(3)?;
//! grid.open(1, 1)?;
//! grid.open(2, 1)?;
//! assert!(!grid.percolates());
//! grid.open(3, 1)?;
//! assert!(grid.percolates());
//! # Ok::<(), percolation_grid::GridError>(())
//! ```
//!
//! [`DisjointSet`]: union_find::DisjointSet

pub mod error;
pub mod grid;
pub mod union_find;

// Re-export primary types at crate root.
pub use error::GridError;
pub use grid::{FullnessPolicy, Percolation, Site};
pub use union_find::{DisjointSet, DisjointSetError};
