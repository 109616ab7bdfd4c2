use std::fmt;
use std::sync::Arc;

use super::query::BondPredicate;

/// Bond multiplicity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BondOrder {
    /// Single bond.
    Single,
    /// Double bond.
    Double,
    /// Triple bond.
    Triple,
    /// Quadruple bond.
    Quadruple,
    /// Order not known (query bonds, partially specified input).
    #[default]
    Unset,
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Single => "-",
            Self::Double => "=",
            Self::Triple => "#",
            Self::Quadruple => "$",
            Self::Unset => "~",
        };
        f.write_str(s)
    }
}

/// An undirected edge between two atoms of the same molecule.
///
/// Endpoints are atom indices into the owning [`crate::Molecule`].
#[derive(Clone)]
pub struct Bond {
    begin: usize,
    end: usize,
    order: BondOrder,
    aromatic: bool,
    query: Option<Arc<dyn BondPredicate>>,
}

impl Bond {
    /// Creates a plain bond.
    #[must_use]
    pub const fn new(begin: usize, end: usize, order: BondOrder) -> Self {
        Self {
            begin,
            end,
            order,
            aromatic: false,
            query: None,
        }
    }

    /// Creates a plain aromatic bond.
    #[must_use]
    pub const fn aromatic(begin: usize, end: usize, order: BondOrder) -> Self {
        Self {
            begin,
            end,
            order,
            aromatic: true,
            query: None,
        }
    }

    /// Creates a query bond.
    pub fn query(begin: usize, end: usize, predicate: impl BondPredicate + 'static) -> Self {
        Self {
            query: Some(Arc::new(predicate)),
            ..Self::new(begin, end, BondOrder::Unset)
        }
    }

    /// First endpoint.
    #[must_use]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    /// Second endpoint.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Both endpoints, in storage order.
    #[must_use]
    pub const fn atoms(&self) -> [usize; 2] {
        [self.begin, self.end]
    }

    /// Bond order.
    #[must_use]
    pub const fn order(&self) -> BondOrder {
        self.order
    }

    /// Whether the bond is flagged aromatic.
    #[must_use]
    pub const fn is_aromatic(&self) -> bool {
        self.aromatic
    }

    /// Whether the bond carries a query predicate.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        self.query.is_some()
    }

    /// The query predicate, if any.
    #[must_use]
    pub fn predicate(&self) -> Option<&dyn BondPredicate> {
        self.query.as_deref()
    }

    /// Is `atom` one of the endpoints?
    #[must_use]
    pub const fn contains(&self, atom: usize) -> bool {
        self.begin == atom || self.end == atom
    }

    /// The endpoint opposite to `atom`, or `None` if `atom` is not an endpoint.
    #[must_use]
    pub const fn other(&self, atom: usize) -> Option<usize> {
        if self.begin == atom {
            Some(self.end)
        } else if self.end == atom {
            Some(self.begin)
        } else {
            None
        }
    }

    /// The first endpoint shared with `other`, if the two bonds are adjacent.
    #[must_use]
    pub const fn common_atom(&self, other: &Self) -> Option<usize> {
        if other.contains(self.begin) {
            Some(self.begin)
        } else if other.contains(self.end) {
            Some(self.end)
        } else {
            None
        }
    }

    /// A copy of this bond attached to different atoms.
    #[must_use]
    pub fn with_atoms(&self, begin: usize, end: usize) -> Self {
        Self {
            begin,
            end,
            ..self.clone()
        }
    }

    /// Does this bond accept `candidate`?
    ///
    /// Query bonds defer to their predicate; plain bonds compare order and
    /// aromaticity.
    #[must_use]
    pub fn matches(&self, candidate: &Self) -> bool {
        match &self.query {
            Some(predicate) => predicate.matches(candidate),
            None => self.order == candidate.order && self.aromatic == candidate.aromatic,
        }
    }
}

impl fmt::Debug for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Bond");
        s.field("begin", &self.begin)
            .field("end", &self.end)
            .field("order", &self.order);
        if self.aromatic {
            s.field("aromatic", &true);
        }
        if let Some(q) = &self.query {
            s.field("query", q);
        }
        s.finish()
    }
}
