//! Query predicates for atoms and bonds.
//!
//! A molecule holding at least one predicate is a query molecule. Query
//! molecules may only ever appear as the target of a search.

use std::fmt;

use super::{Atom, Bond, BondOrder};

/// Decides whether a query atom stands for a concrete atom.
pub trait AtomPredicate: fmt::Debug + Send + Sync {
    /// Returns true if `atom` satisfies the query.
    fn matches(&self, atom: &Atom) -> bool;
}

/// Decides whether a query bond stands for a concrete bond.
pub trait BondPredicate: fmt::Debug + Send + Sync {
    /// Returns true if `bond` satisfies the query.
    fn matches(&self, bond: &Bond) -> bool;
}

/// Matches any atom whose symbol is in the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolQuery {
    symbols: Vec<String>,
}

impl SymbolQuery {
    /// Creates a query accepting any of `symbols`.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }
}

impl AtomPredicate for SymbolQuery {
    fn matches(&self, atom: &Atom) -> bool {
        self.symbols.iter().any(|s| s == atom.symbol())
    }
}

/// Matches every atom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyAtomQuery;

impl AtomPredicate for AnyAtomQuery {
    fn matches(&self, _atom: &Atom) -> bool {
        true
    }
}

/// Matches aromatic atoms, optionally restricted to one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AromaticAtomQuery {
    symbol: Option<String>,
}

impl AromaticAtomQuery {
    /// Any aromatic atom.
    #[must_use]
    pub const fn any() -> Self {
        Self { symbol: None }
    }

    /// Aromatic atoms of one element.
    pub fn element(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
        }
    }
}

impl AtomPredicate for AromaticAtomQuery {
    fn matches(&self, atom: &Atom) -> bool {
        atom.is_aromatic() && self.symbol.as_deref().is_none_or(|s| s == atom.symbol())
    }
}

/// Matches non-aromatic atoms, optionally restricted to one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliphaticAtomQuery {
    symbol: Option<String>,
}

impl AliphaticAtomQuery {
    /// Any aliphatic atom.
    #[must_use]
    pub const fn any() -> Self {
        Self { symbol: None }
    }

    /// Aliphatic atoms of one element.
    pub fn element(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
        }
    }
}

impl AtomPredicate for AliphaticAtomQuery {
    fn matches(&self, atom: &Atom) -> bool {
        !atom.is_aromatic() && self.symbol.as_deref().is_none_or(|s| s == atom.symbol())
    }
}

/// Matches bonds of one order. Aromatic query bonds match any aromatic bond.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderQuery {
    order: BondOrder,
    aromatic: bool,
}

impl OrderQuery {
    /// A non-aromatic bond of `order`.
    #[must_use]
    pub const fn new(order: BondOrder) -> Self {
        Self {
            order,
            aromatic: false,
        }
    }

    /// Any aromatic bond, whatever its stored order.
    #[must_use]
    pub const fn aromatic() -> Self {
        Self {
            order: BondOrder::Unset,
            aromatic: true,
        }
    }
}

impl BondPredicate for OrderQuery {
    fn matches(&self, bond: &Bond) -> bool {
        if self.aromatic && bond.is_aromatic() {
            return true;
        }
        self.order == bond.order() && self.aromatic == bond.is_aromatic()
    }
}

/// Matches every bond regardless of order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyOrderQuery;

impl BondPredicate for AnyOrderQuery {
    fn matches(&self, _bond: &Bond) -> bool {
        true
    }
}

/// Matches aromatic bonds only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AromaticBondQuery;

impl BondPredicate for AromaticBondQuery {
    fn matches(&self, bond: &Bond) -> bool {
        bond.is_aromatic()
    }
}
