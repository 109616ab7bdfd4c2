//! Default atom and bond matchers.
//!
//! A matcher is built from an atom or bond of the source molecule and is then
//! asked whether a candidate from the target molecule is compatible with it.

use crate::{Atom, Bond};

/// Compares a fixed source atom against candidates.
pub trait AtomMatcher {
    /// Is `candidate` compatible with the source atom?
    fn matches(&self, candidate: &Atom) -> bool;
}

/// Compares a fixed source bond against candidates.
pub trait BondMatcher {
    /// Is `candidate` compatible with the source bond?
    fn matches(&self, candidate: &Bond) -> bool;
}

/// Symbol-equality atom matcher.
///
/// When the candidate is a query atom its predicate decides instead.
#[derive(Clone, Copy, Debug)]
pub struct DefaultAtomMatcher<'a> {
    atom: &'a Atom,
    match_bonds: bool,
}

impl<'a> DefaultAtomMatcher<'a> {
    /// Builds a matcher for `atom`.
    #[must_use]
    pub const fn new(atom: &'a Atom, match_bonds: bool) -> Self {
        Self { atom, match_bonds }
    }

    /// The bond-matching flag this matcher was built with.
    #[must_use]
    pub const fn match_bonds(&self) -> bool {
        self.match_bonds
    }
}

impl AtomMatcher for DefaultAtomMatcher<'_> {
    fn matches(&self, candidate: &Atom) -> bool {
        if candidate.is_query() {
            return candidate.matches(self.atom);
        }
        self.atom.symbol() == candidate.symbol()
    }
}

/// Bond matcher that compares type only in strict mode.
///
/// In strict mode two bonds agree when they have the same order and the same
/// aromaticity, or when both are aromatic. Outside strict mode every bond
/// agrees with every bond. Query candidates always decide through their own
/// predicate.
#[derive(Clone, Copy, Debug)]
pub struct DefaultBondMatcher<'a> {
    bond: &'a Bond,
    match_bonds: bool,
}

impl<'a> DefaultBondMatcher<'a> {
    /// Builds a matcher for `bond`.
    #[must_use]
    pub const fn new(bond: &'a Bond, match_bonds: bool) -> Self {
        Self { bond, match_bonds }
    }

    fn is_bond_type_match(&self, candidate: &Bond) -> bool {
        if self.bond.is_aromatic() && candidate.is_aromatic() {
            return true;
        }
        self.bond.order() == candidate.order() && self.bond.is_aromatic() == candidate.is_aromatic()
    }
}

impl BondMatcher for DefaultBondMatcher<'_> {
    fn matches(&self, candidate: &Bond) -> bool {
        if candidate.is_query() {
            return candidate.matches(self.bond);
        }
        !self.match_bonds || self.is_bond_type_match(candidate)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{BondOrder, SymbolQuery};

    #[rstest]
    #[case::same_order(Bond::new(0, 1, BondOrder::Double), Bond::new(4, 5, BondOrder::Double), true, true)]
    #[case::different_order_strict(Bond::new(0, 1, BondOrder::Single), Bond::new(4, 5, BondOrder::Double), true, false)]
    #[case::different_order_relaxed(Bond::new(0, 1, BondOrder::Single), Bond::new(4, 5, BondOrder::Double), false, true)]
    #[case::both_aromatic(Bond::aromatic(0, 1, BondOrder::Single), Bond::aromatic(4, 5, BondOrder::Double), true, true)]
    #[case::aromatic_vs_plain(Bond::aromatic(0, 1, BondOrder::Single), Bond::new(4, 5, BondOrder::Single), true, false)]
    fn bond_matching(
        #[case] source: Bond,
        #[case] candidate: Bond,
        #[case] match_bonds: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(
            DefaultBondMatcher::new(&source, match_bonds).matches(&candidate),
            expected
        );
    }

    #[test]
    fn atom_matcher_defers_to_query_candidate() {
        let nitrogen = Atom::new("N");
        let matcher = DefaultAtomMatcher::new(&nitrogen, true);
        assert!(matcher.matches(&Atom::new("N")));
        assert!(!matcher.matches(&Atom::new("O")));
        assert!(matcher.matches(&Atom::query("X", SymbolQuery::new(["N", "P"]))));
    }
}
