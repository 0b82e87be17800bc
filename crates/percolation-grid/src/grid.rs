//! The percolation lattice.
//!
//! An n-by-n grid of sites, 1-indexed, each either open or closed. Site
//! `(row, col)` maps to the disjoint-set element `col + (row - 1) * n`, which
//! leaves element `0` for the virtual top node and `n * n + 1` for the
//! virtual bottom node.
//!
//! Both virtual nodes are wired to their boundary rows at construction,
//! regardless of whether those sites are ever opened. "Does the grid
//! percolate" is then a single connectivity query between the two virtual
//! nodes.
//!
//! # Backwash
//!
//! Because every bottom-row site shares a component with the virtual bottom
//! node, once the grid percolates any open bottom-row site looks connected to
//! the top, even if its only route there is through the virtual bottom node.
//! [`FullnessPolicy::Shared`] keeps this behavior. [`FullnessPolicy::Isolated`]
//! answers [`Percolation::is_full`] from a second disjoint-set that never
//! links the virtual bottom node.

use tracing::trace;

use crate::error::GridError;
use crate::union_find::DisjointSet;

/// Disjoint-set element reserved for the virtual top node.
const VIRTUAL_TOP: usize = 0;

/// Largest element count whose `usize` parent table can be allocated.
const MAX_ELEMENTS: usize = match isize::MAX
    .unsigned_abs()
    .checked_div(std::mem::size_of::<usize>())
{
    Some(limit) => limit,
    None => 0,
};

/// A 1-indexed site coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site {
    /// Row, in `[1, n]`.
    pub row: usize,
    /// Column, in `[1, n]`.
    pub col: usize,
}

impl Site {
    /// Create a site coordinate. Bounds are checked by the grid, not here.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Site {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// How [`Percolation::is_full`] decides whether a site reaches the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FullnessPolicy {
    /// Share the percolation structure. Cheap, but subject to backwash.
    #[default]
    Shared,
    /// Track fullness in a separate structure without the virtual bottom.
    Isolated,
}

/// An n-by-n percolation system.
#[derive(Debug, Clone)]
pub struct Percolation {
    /// Side length.
    n: usize,
    /// Open flag per disjoint-set element. The virtual slots stay `false`.
    open: Vec<bool>,
    /// Sites plus both virtual nodes.
    connectivity: DisjointSet,
    /// Sites plus the virtual top only. Present under [`FullnessPolicy::Isolated`].
    fullness: Option<DisjointSet>,
    /// Element index of the virtual bottom node.
    virtual_bottom: usize,
    /// Count of distinct sites opened so far.
    open_sites: usize,
}

impl Percolation {
    /// Create an n-by-n grid with every site closed.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSize`] if `n` is zero, or
    /// [`GridError::SizeOverflow`] if the `n * n + 2` elements cannot be
    /// indexed or allocated.
    pub fn new(n: usize) -> Result<Self, GridError> {
        Self::with_policy(n, FullnessPolicy::Shared)
    }

    /// Create an n-by-n grid with the given fullness policy.
    pub fn with_policy(n: usize, policy: FullnessPolicy) -> Result<Self, GridError> {
        if n == 0 {
            return Err(GridError::InvalidSize { n });
        }
        let sites = n.checked_mul(n).ok_or(GridError::SizeOverflow { n })?;
        let elements = sites
            .checked_add(2)
            .filter(|&elements| elements <= MAX_ELEMENTS)
            .ok_or(GridError::SizeOverflow { n })?;
        let virtual_bottom = elements.saturating_sub(1);

        let mut connectivity = DisjointSet::new(elements);
        let mut fullness = match policy {
            FullnessPolicy::Shared => None,
            FullnessPolicy::Isolated => Some(DisjointSet::new(sites.saturating_add(1))),
        };

        for col in 1..=n {
            let top = linear_index(n, 1, col);
            let bottom = linear_index(n, n, col);
            connectivity.union(VIRTUAL_TOP, top)?;
            connectivity.union(virtual_bottom, bottom)?;
            if let Some(fullness) = fullness.as_mut() {
                fullness.union(VIRTUAL_TOP, top)?;
            }
        }

        Ok(Self {
            n,
            open: vec![false; elements],
            connectivity,
            fullness,
            virtual_bottom,
            open_sites: 0,
        })
    }

    /// Side length of the grid.
    pub const fn size(&self) -> usize {
        self.n
    }

    /// The fullness policy this grid was built with.
    pub const fn policy(&self) -> FullnessPolicy {
        if self.fullness.is_some() {
            FullnessPolicy::Isolated
        } else {
            FullnessPolicy::Shared
        }
    }

    /// Open the site at `(row, col)` and connect it to its open neighbors.
    ///
    /// Opening an already-open site does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RowOutOfBounds`] or [`GridError::ColumnOutOfBounds`]
    /// if either coordinate is outside `[1, n]`.
    pub fn open(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let site = self.site_index(row, col)?;
        if self.is_open_index(site) {
            return Ok(());
        }

        if let Some(flag) = self.open.get_mut(site) {
            *flag = true;
        }
        self.open_sites = self.open_sites.saturating_add(1);

        for (neighbor_row, neighbor_col) in self.neighbors(row, col).into_iter().flatten() {
            let neighbor = linear_index(self.n, neighbor_row, neighbor_col);
            if !self.is_open_index(neighbor) {
                continue;
            }
            if !self.connectivity.connected(site, neighbor)? {
                self.connectivity.union(site, neighbor)?;
            }
            if let Some(fullness) = self.fullness.as_mut() {
                fullness.union(site, neighbor)?;
            }
        }

        trace!(row, col, open_sites = self.open_sites, "Site opened");
        Ok(())
    }

    /// [`open`](Self::open) taking a [`Site`].
    pub fn open_site(&mut self, site: Site) -> Result<(), GridError> {
        self.open(site.row, site.col)
    }

    /// Whether the site at `(row, col)` is open.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let site = self.site_index(row, col)?;
        Ok(self.is_open_index(site))
    }

    /// Whether the site at `(row, col)` is open and connected to the top row.
    ///
    /// Under [`FullnessPolicy::Shared`] this may report bottom-row sites as
    /// full through backwash once the grid percolates.
    pub fn is_full(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let site = self.site_index(row, col)?;
        if !self.is_open_index(site) {
            return Ok(false);
        }
        let structure = self.fullness.as_ref().unwrap_or(&self.connectivity);
        Ok(structure.same_component(site, VIRTUAL_TOP)?)
    }

    /// Number of distinct sites opened so far.
    pub const fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    /// Whether an open path connects the top row to the bottom row.
    pub fn percolates(&self) -> bool {
        let connected = self
            .connectivity
            .same_component(VIRTUAL_TOP, self.virtual_bottom);
        debug_assert!(connected.is_ok(), "virtual nodes are always in range");
        self.open_sites > 0 && connected.unwrap_or(false)
    }

    fn is_open_index(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    /// Validate `(row, col)` and return its disjoint-set element.
    fn site_index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row == 0 || row > self.n {
            return Err(GridError::RowOutOfBounds { row, n: self.n });
        }
        if col == 0 || col > self.n {
            return Err(GridError::ColumnOutOfBounds { col, n: self.n });
        }
        Ok(linear_index(self.n, row, col))
    }

    /// In-bounds orthogonal neighbors in up, right, down, left order.
    const fn neighbors(&self, row: usize, col: usize) -> [Option<(usize, usize)>; 4] {
        let n = self.n;
        [
            if row > 1 { Some((row.saturating_sub(1), col)) } else { None },
            if col < n { Some((row, col.saturating_add(1))) } else { None },
            if row < n { Some((row.saturating_add(1), col)) } else { None },
            if col > 1 { Some((row, col.saturating_sub(1))) } else { None },
        ]
    }
}

/// `col + (row - 1) * n` for coordinates already known to be in bounds.
const fn linear_index(n: usize, row: usize, col: usize) -> usize {
    row.saturating_sub(1).saturating_mul(n).saturating_add(col)
}
