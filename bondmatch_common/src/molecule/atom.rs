use std::fmt;
use std::sync::Arc;

use super::query::AtomPredicate;

/// A vertex of a molecular graph.
///
/// An atom either carries a plain element symbol, or a query predicate that
/// decides which real atoms it stands for. Only the target side of a query
/// may hold query atoms.
#[derive(Clone)]
pub struct Atom {
    symbol: String,
    aromatic: bool,
    query: Option<Arc<dyn AtomPredicate>>,
}

impl Atom {
    /// Creates a plain (non-query) atom.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            aromatic: false,
            query: None,
        }
    }

    /// Creates a plain aromatic atom.
    pub fn aromatic(symbol: impl Into<String>) -> Self {
        Self {
            aromatic: true,
            ..Self::new(symbol)
        }
    }

    /// Creates a query atom. The symbol is only used for display and for the
    /// common-atom label comparison of the compatibility graph.
    pub fn query(symbol: impl Into<String>, predicate: impl AtomPredicate + 'static) -> Self {
        Self {
            query: Some(Arc::new(predicate)),
            ..Self::new(symbol)
        }
    }

    /// The element symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether the atom is flagged aromatic.
    #[must_use]
    pub const fn is_aromatic(&self) -> bool {
        self.aromatic
    }

    /// Whether the atom carries a query predicate.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        self.query.is_some()
    }

    /// The query predicate, if any.
    #[must_use]
    pub fn predicate(&self) -> Option<&dyn AtomPredicate> {
        self.query.as_deref()
    }

    /// Does this atom accept `candidate`?
    ///
    /// Query atoms defer to their predicate; plain atoms compare symbols.
    #[must_use]
    pub fn matches(&self, candidate: &Self) -> bool {
        match &self.query {
            Some(predicate) => predicate.matches(candidate),
            None => self.symbol == candidate.symbol,
        }
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Atom");
        s.field("symbol", &self.symbol);
        if self.aromatic {
            s.field("aromatic", &true);
        }
        if let Some(q) = &self.query {
            s.field("query", q);
        }
        s.finish()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.aromatic {
            write!(f, "{}", self.symbol.to_lowercase())
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolQuery;

    #[test]
    fn plain_atoms_match_by_symbol() {
        assert!(Atom::new("C").matches(&Atom::new("C")));
        assert!(Atom::new("C").matches(&Atom::aromatic("C")));
        assert!(!Atom::new("C").matches(&Atom::new("N")));
    }

    #[test]
    fn query_atom_defers_to_predicate() {
        let q = Atom::query("X", SymbolQuery::new(["N", "O"]));
        assert!(q.is_query());
        assert!(q.matches(&Atom::new("O")));
        assert!(!q.matches(&Atom::new("C")));
    }
}
