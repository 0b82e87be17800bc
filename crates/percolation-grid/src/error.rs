//! Error types for the `percolation-grid` crate.
//!
//! All fallible grid operations return [`GridError`]. Callers that only care
//! about the two externally visible failure kinds (bad construction argument,
//! out-of-bounds coordinate) can classify an error with
//! [`GridError::is_invalid_argument`] and [`GridError::is_out_of_bounds`].

use crate::union_find::DisjointSetError;

/// Errors that can occur while building or mutating a [`Percolation`] grid.
///
/// [`Percolation`]: crate::Percolation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The requested grid size is not at least 1.
    #[error("grid size must be at least 1, got {n}")]
    InvalidSize {
        /// The rejected size.
        n: usize,
    },

    /// `n * n + 2` elements cannot be indexed or allocated.
    #[error("grid size {n} is too large to index")]
    SizeOverflow {
        /// The rejected size.
        n: usize,
    },

    /// A row coordinate fell outside `[1, n]`.
    #[error("row index out of bounds: {row} (valid range 1..={n})")]
    RowOutOfBounds {
        /// The offending row.
        row: usize,
        /// The grid size.
        n: usize,
    },

    /// A column coordinate fell outside `[1, n]`.
    #[error("column index out of bounds: {col} (valid range 1..={n})")]
    ColumnOutOfBounds {
        /// The offending column.
        col: usize,
        /// The grid size.
        n: usize,
    },

    /// The underlying disjoint-set rejected an element.
    #[error("connectivity error: {source}")]
    Connectivity {
        /// The underlying disjoint-set error.
        #[from]
        source: DisjointSetError,
    },
}

impl GridError {
    /// Whether this error rejected a construction argument.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidSize { .. } | Self::SizeOverflow { .. })
    }

    /// Whether this error rejected a site coordinate.
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Self::RowOutOfBounds { .. } | Self::ColumnOutOfBounds { .. }
        )
    }
}
