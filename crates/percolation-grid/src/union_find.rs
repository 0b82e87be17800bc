//! Weighted quick-union with path compression.
//!
//! [`DisjointSet`] partitions the elements `0..len` into components. Merges
//! attach the root of the smaller tree beneath the root of the larger one
//! (union by size), and every [`find`](DisjointSet::find) rewrites the walked
//! path to point straight at the root. Together these keep each operation
//! amortized near-constant.
//!
//! Which element ends up as a component's representative is an internal
//! detail: it is deterministic for a given operation sequence, but callers
//! should only ever compare roots with each other.

/// Errors returned by [`DisjointSet`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DisjointSetError {
    /// An element index was not in `0..len`.
    #[error("element {element} is outside the disjoint set of {len} elements")]
    ElementOutOfRange {
        /// The rejected element.
        element: usize,
        /// Number of elements in the set.
        len: usize,
    },
}

/// A disjoint-set forest over the elements `0..len`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Parent link for each element. Roots point at themselves.
    parent: Vec<usize>,
    /// Tree size, only meaningful at roots.
    size: Vec<usize>,
    /// Number of distinct components.
    components: usize,
}

impl DisjointSet {
    /// Create `len` singleton components.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            components: len,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct components.
    pub const fn components(&self) -> usize {
        self.components
    }

    /// Return the canonical root of `element`'s component.
    ///
    /// Compresses the path from `element` to its root as a side effect.
    pub fn find(&mut self, element: usize) -> Result<usize, DisjointSetError> {
        let root = self.root(element)?;

        let mut current = element;
        while current != root {
            let Some(slot) = self.parent.get_mut(current) else {
                break;
            };
            current = std::mem::replace(slot, root);
        }

        Ok(root)
    }

    /// Return the root of `element` without compressing the path.
    ///
    /// Union by size bounds tree height by `log2(len)`, so this stays cheap
    /// for read-only queries.
    pub fn root(&self, element: usize) -> Result<usize, DisjointSetError> {
        self.check(element)?;
        let mut root = element;
        while let Some(&parent) = self.parent.get(root) {
            if parent == root {
                break;
            }
            root = parent;
        }
        Ok(root)
    }

    /// Read-only variant of [`connected`](Self::connected).
    pub fn same_component(&self, a: usize, b: usize) -> Result<bool, DisjointSetError> {
        Ok(self.root(a)? == self.root(b)?)
    }

    /// Whether `a` and `b` are in the same component.
    pub fn connected(&mut self, a: usize, b: usize) -> Result<bool, DisjointSetError> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Merge the components containing `a` and `b`.
    ///
    /// Returns `true` if two components were merged, `false` if `a` and `b`
    /// were already connected (in which case nothing changes).
    pub fn union(&mut self, a: usize, b: usize) -> Result<bool, DisjointSetError> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a == root_b {
            return Ok(false);
        }

        let size_a = self.size.get(root_a).copied().unwrap_or(1);
        let size_b = self.size.get(root_b).copied().unwrap_or(1);
        let (child, parent) = if size_a < size_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        if let Some(slot) = self.parent.get_mut(child) {
            *slot = parent;
        }
        if let Some(slot) = self.size.get_mut(parent) {
            *slot = size_a.saturating_add(size_b);
        }
        self.components = self.components.saturating_sub(1);
        Ok(true)
    }

    fn check(&self, element: usize) -> Result<(), DisjointSetError> {
        if element < self.parent.len() {
            Ok(())
        } else {
            Err(DisjointSetError::ElementOutOfRange {
                element,
                len: self.parent.len(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_set_has_singletons() {
        let mut set = DisjointSet::new(5);
        assert_eq!(set.len(), 5);
        assert_eq!(set.components(), 5);
        for element in 0..5 {
            assert_eq!(set.find(element).unwrap(), element);
        }
    }

    #[test]
    fn union_merges_components() {
        let mut set = DisjointSet::new(6);
        assert!(set.union(0, 1).unwrap());
        assert!(set.union(2, 3).unwrap());
        assert!(!set.connected(1, 2).unwrap());
        assert!(set.union(1, 3).unwrap());
        assert!(set.connected(0, 2).unwrap());
        assert_eq!(set.components(), 3);
    }

    #[test]
    fn redundant_union_is_a_no_op() {
        let mut set = DisjointSet::new(3);
        assert!(set.union(0, 1).unwrap());
        let root = set.find(0).unwrap();
        assert!(!set.union(1, 0).unwrap());
        assert!(!set.union(0, 0).unwrap());
        assert_eq!(set.find(1).unwrap(), root);
        assert_eq!(set.components(), 2);
    }

    #[test]
    fn smaller_tree_hangs_under_larger() {
        let mut set = DisjointSet::new(4);
        set.union(0, 1).unwrap();
        set.union(0, 2).unwrap();
        let big_root = set.find(0).unwrap();
        set.union(3, 0).unwrap();
        assert_eq!(set.find(3).unwrap(), big_root);
    }

    #[test]
    fn find_compresses_paths() {
        let mut set = DisjointSet::new(8);
        for element in 1..8 {
            set.union(element - 1, element).unwrap();
        }
        let root = set.find(7).unwrap();
        for element in 0..8 {
            assert_eq!(set.find(element).unwrap(), root);
            assert_eq!(set.parent[element], root);
        }
    }

    #[test]
    fn read_only_queries_agree_with_find() {
        let mut set = DisjointSet::new(5);
        set.union(0, 1).unwrap();
        set.union(3, 4).unwrap();
        set.union(1, 4).unwrap();
        assert!(set.same_component(0, 3).unwrap());
        assert!(!set.same_component(2, 3).unwrap());
        assert_eq!(set.root(3).unwrap(), set.find(3).unwrap());
    }

    #[test]
    fn out_of_range_elements_are_rejected() {
        let mut set = DisjointSet::new(2);
        assert_eq!(
            set.find(2),
            Err(DisjointSetError::ElementOutOfRange { element: 2, len: 2 })
        );
        assert!(set.union(0, 9).is_err());
        assert!(set.connected(7, 0).is_err());
        assert_eq!(set.components(), 2);
    }

    #[test]
    fn empty_set() {
        let mut set = DisjointSet::new(0);
        assert!(set.is_empty());
        assert!(set.find(0).is_err());
    }
}
