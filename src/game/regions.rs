//! Region tracking: union-find over flat cell indices.

/// Merge-only union-find over the cells of a board.
///
/// Each cell starts as its own singleton representative. Ordinary placement
/// only ever merges components; splitting is handled by the split detector,
/// which relabels the affected cells from scratch instead of undoing unions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RegionTracker {
    /// Parent index per cell; a root points to itself.
    parent: Vec<usize>,
}

impl RegionTracker {
    /// Create a tracker with every cell in its own singleton component.
    ///
    /// Returns `None` if the parent table cannot be allocated.
    pub(crate) fn new(cells: usize) -> Option<Self> {
        let mut parent = Vec::new();
        parent.try_reserve_exact(cells).ok()?;
        parent.extend(0..cells);
        Some(Self { parent })
    }

    /// Canonical representative of the component containing `index`.
    ///
    /// Applies path compression: the chain walked is flattened onto the
    /// root. Set membership never changes.
    pub(crate) fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = index;
        while self.parent[cur] != cur {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the components containing `a` and `b`.
    ///
    /// Links `b`'s representative under `a`'s. Returns `true` if two
    /// distinct components were joined, `false` if they were already one.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            false
        } else {
            self.parent[root_b] = root_a;
            true
        }
    }

    /// Detach `index` into its own singleton component.
    ///
    /// Only valid during golden-move surgery, where the surviving cells of
    /// the old component are immediately relabeled by the split detector.
    pub(crate) fn detach(&mut self, index: usize) {
        self.parent[index] = index;
    }

    /// Point `index` directly at `root`.
    ///
    /// Used by the split detector to rebuild a fragment under its seed cell;
    /// the caller guarantees `root` is (or becomes) a self-parented root.
    pub(crate) fn relabel(&mut self, index: usize, root: usize) {
        self.parent[index] = root;
    }

    /// Representative of `index` without mutating the structure.
    ///
    /// Slower than [`Self::find`]; used by invariant checks and tests that
    /// only hold a shared reference.
    pub(crate) fn root_of(&self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }
}
