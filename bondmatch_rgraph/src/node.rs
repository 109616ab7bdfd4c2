use std::fmt;

use bit_set::BitSet;
use contracts::*;

/// A pair of indices `(id1, id2)` into the source and target molecules.
///
/// The same record carries bond-to-bond correspondences straight out of the
/// search and atom-to-atom correspondences after conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RMap {
    /// Index on the source side.
    pub id1: usize,
    /// Index on the target side.
    pub id2: usize,
}

impl RMap {
    /// Creates a new pair.
    #[must_use]
    pub const fn new(id1: usize, id2: usize) -> Self {
        Self { id1, id2 }
    }
}

impl fmt::Display for RMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.id1, self.id2)
    }
}

/// One vertex of the resolution graph: a source bond and a target bond that
/// are individually compatible.
#[derive(Clone, Debug)]
pub struct CompatibilityNode {
    rmap: RMap,
    pub(crate) extension: BitSet,
    pub(crate) forbidden: BitSet,
}

impl CompatibilityNode {
    #[debug_ensures(ret.id1() == id1 && ret.id2() == id2)]
    pub(crate) fn new(id1: usize, id2: usize) -> Self {
        Self {
            rmap: RMap::new(id1, id2),
            extension: BitSet::new(),
            forbidden: BitSet::new(),
        }
    }

    /// Bond index in the source molecule.
    #[must_use]
    pub const fn id1(&self) -> usize {
        self.rmap.id1
    }

    /// Bond index in the target molecule.
    #[must_use]
    pub const fn id2(&self) -> usize {
        self.rmap.id2
    }

    /// The bond pair as an [`RMap`].
    #[must_use]
    pub const fn rmap(&self) -> RMap {
        self.rmap
    }

    /// Nodes that may join a partial solution together with this one.
    #[must_use]
    pub const fn extension(&self) -> &BitSet {
        &self.extension
    }

    /// Nodes that can never share a solution with this one (itself included).
    #[must_use]
    pub const fn forbidden(&self) -> &BitSet {
        &self.forbidden
    }
}
