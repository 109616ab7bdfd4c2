//! Two-phase construction of the resolution graph.
//!
//! Phase one enumerates the compatible bond pairs (the nodes). Phase two,
//! once the node count is known, relates every pair of nodes: either they may
//! grow a solution together (extension), may never share one (forbidden), or
//! are merely independent.

use bondmatch_common::{
    Atom, AtomMatcher, Bond, BondMatcher, DefaultAtomMatcher, DefaultBondMatcher, Molecule,
};
use tracing::debug;

use crate::node::{CompatibilityNode, RMap};
use crate::rgraph::ResolutionGraph;

/// Builds the resolution graph of `source` against `target`.
#[must_use]
pub fn build_rgraph(source: &Molecule, target: &Molecule, match_bonds: bool) -> ResolutionGraph {
    CompatibilityGraphBuilder::new(source, target, match_bonds).build()
}

/// How two nodes of the resolution graph relate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    Extension,
    Forbidden,
    Independent,
}

/// Builder for [`ResolutionGraph`].
#[derive(Clone, Copy, Debug)]
pub struct CompatibilityGraphBuilder<'s, 't> {
    source: &'s Molecule,
    target: &'t Molecule,
    match_bonds: bool,
}

impl<'s, 't> CompatibilityGraphBuilder<'s, 't> {
    /// Prepares a builder; nothing is computed until [`Self::build`].
    #[must_use]
    pub const fn new(source: &'s Molecule, target: &'t Molecule, match_bonds: bool) -> Self {
        Self {
            source,
            target,
            match_bonds,
        }
    }

    /// Runs both construction phases.
    #[must_use]
    pub fn build(&self) -> ResolutionGraph {
        let mut graph =
            ResolutionGraph::new(self.source.bond_count(), self.target.bond_count());
        self.node_constructor(&mut graph);
        self.arc_constructor(&mut graph);
        debug!(
            "Built resolution graph: {} x {} bonds -> {} nodes",
            self.source.bond_count(),
            self.target.bond_count(),
            graph.len()
        );
        graph
    }

    fn node_constructor(&self, graph: &mut ResolutionGraph) {
        for (i, bond_a) in self.source.bonds().iter().enumerate() {
            for (j, bond_b) in self.target.bonds().iter().enumerate() {
                if self.bonds_compatible(bond_a, bond_b) {
                    graph.add_node(CompatibilityNode::new(i, j));
                }
            }
        }
        graph.allocate_relations();
    }

    /// Is `bond_b` (target) individually compatible with `bond_a` (source)?
    /// Endpoints are unordered, so both orientations are tried.
    fn bonds_compatible(&self, bond_a: &Bond, bond_b: &Bond) -> bool {
        let [a0, a1] = bond_a.atoms().map(|i| self.source.atom(i));
        let [b0, b1] = bond_b.atoms().map(|i| self.target.atom(i));

        if let Some(query) = bond_b.predicate() {
            return query.matches(bond_a)
                && ((b0.matches(a0) && b1.matches(a1)) || (b0.matches(a1) && b1.matches(a0)));
        }

        let bond_matcher = DefaultBondMatcher::new(bond_a, self.match_bonds);
        let atom_matcher0 = DefaultAtomMatcher::new(a0, self.match_bonds);
        let atom_matcher1 = DefaultAtomMatcher::new(a1, self.match_bonds);

        bond_matcher.matches(bond_b)
            && ((atom_matcher0.matches(b0) && atom_matcher1.matches(b1))
                || (atom_matcher0.matches(b1) && atom_matcher1.matches(b0)))
    }

    fn arc_constructor(&self, graph: &mut ResolutionGraph) {
        let n = graph.len();
        for i in 0..n {
            graph.nodes[i].forbidden.insert(i);
            for j in (i + 1)..n {
                let x = graph.nodes[i].rmap();
                let y = graph.nodes[j].rmap();
                match self.relation(x, y) {
                    Relation::Forbidden => {
                        graph.nodes[i].forbidden.insert(j);
                        graph.nodes[j].forbidden.insert(i);
                    }
                    Relation::Extension => {
                        graph.nodes[i].extension.insert(j);
                        graph.nodes[j].extension.insert(i);
                    }
                    Relation::Independent => {}
                }
            }
        }
    }

    fn relation(&self, x: RMap, y: RMap) -> Relation {
        // A bond maps to at most one counterpart.
        if x.id1 == y.id1 || x.id2 == y.id2 {
            return Relation::Forbidden;
        }

        let a1 = self.source.bond(x.id1);
        let b1 = self.source.bond(y.id1);
        let a2 = self.target.bond(x.id2);
        let b2 = self.target.bond(y.id2);

        if a2.is_query() || b2.is_query() {
            return self.query_adjacency_and_order(a1, b1, a2, b2);
        }

        if common_symbol(self.source, a1, b1) != common_symbol(self.target, a2, b2) {
            Relation::Forbidden
        } else if a1.common_atom(b1).is_some() {
            Relation::Extension
        } else {
            Relation::Independent
        }
    }

    /// Adjacency test for query bonds: both pairs must share an atom or
    /// neither may, the shared query atom must accept the shared atom, and
    /// the two far query atoms must accept the two far atoms in one of the
    /// two pairings.
    fn query_adjacency_and_order(&self, a1: &Bond, b1: &Bond, a2: &Bond, b2: &Bond) -> Relation {
        let (central, central_query) = match (a1.common_atom(b1), a2.common_atom(b2)) {
            (None, None) => return Relation::Independent,
            (Some(c), Some(q)) => (c, q),
            _ => return Relation::Forbidden,
        };

        if !self.target.atom(central_query).matches(self.source.atom(central)) {
            return Relation::Forbidden;
        }

        let (Some(far_a1), Some(far_b1), Some(far_a2), Some(far_b2)) = (
            a1.other(central),
            b1.other(central),
            a2.other(central_query),
            b2.other(central_query),
        ) else {
            return Relation::Forbidden;
        };

        let s1: &Atom = self.source.atom(far_a1);
        let s2: &Atom = self.source.atom(far_b1);
        let q1: &Atom = self.target.atom(far_a2);
        let q2: &Atom = self.target.atom(far_b2);

        if (q1.matches(s1) && q2.matches(s2)) || (q1.matches(s2) && q2.matches(s1)) {
            Relation::Extension
        } else {
            Relation::Forbidden
        }
    }
}

/// Symbol of the atom shared by two bonds, `None` when they are not adjacent.
fn common_symbol<'m>(molecule: &'m Molecule, a: &Bond, b: &Bond) -> Option<&'m str> {
    a.common_atom(b).map(|atom| molecule.atom(atom).symbol())
}

#[cfg(test)]
mod tests {
    use bondmatch_common::fixtures::{ACETALDEHYDE, ETHANOL, PROPANAL};
    use bondmatch_common::{AnyAtomQuery, AnyOrderQuery, BondOrder, OrderQuery, SymbolQuery};

    use super::*;

    fn node_pairs(graph: &ResolutionGraph) -> Vec<(usize, usize)> {
        graph.nodes().iter().map(|n| (n.id1(), n.id2())).collect()
    }

    #[test]
    fn strict_nodes_respect_bond_order() {
        let graph = build_rgraph(&PROPANAL, &ACETALDEHYDE, true);
        assert_eq!(node_pairs(&graph), vec![(0, 0), (1, 0), (2, 1)]);
        assert_eq!(graph.first_graph_size(), 3);
        assert_eq!(graph.second_graph_size(), 2);
    }

    #[test]
    fn relaxed_nodes_ignore_bond_order() {
        // C-C-O against C-C=O: only labels are compared.
        let graph = build_rgraph(&ETHANOL, &ACETALDEHYDE, false);
        assert_eq!(node_pairs(&graph), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn every_node_forbids_itself() {
        let graph = build_rgraph(&PROPANAL, &PROPANAL, false);
        for (i, node) in graph.nodes().iter().enumerate() {
            assert!(node.forbidden().contains(i));
            assert!(!node.extension().contains(i));
        }
    }

    #[test]
    fn relations_are_symmetric_and_disjoint() {
        let graph = build_rgraph(&PROPANAL, &PROPANAL, false);
        let nodes = graph.nodes();
        for i in 0..nodes.len() {
            for j in 0..nodes.len() {
                assert_eq!(nodes[i].extension().contains(j), nodes[j].extension().contains(i));
                assert_eq!(nodes[i].forbidden().contains(j), nodes[j].forbidden().contains(i));
                assert!(!(nodes[i].extension().contains(j) && nodes[i].forbidden().contains(j)));
            }
        }
    }

    #[test]
    fn adjacent_pairs_extend_and_mismatched_adjacency_is_forbidden() {
        let graph = build_rgraph(&PROPANAL, &ACETALDEHYDE, true);
        let nodes = graph.nodes();
        // (1,0) and (2,1) share C2 in propanal and C in acetaldehyde.
        assert!(nodes[1].extension().contains(2));
        // (0,0) and (2,1): disjoint in propanal, adjacent in acetaldehyde.
        assert!(nodes[0].forbidden().contains(2));
        // (0,0) and (1,0) reuse the same target bond.
        assert!(nodes[0].forbidden().contains(1));
    }

    #[test]
    fn query_bond_endpoints_match_in_either_orientation() {
        let query = Molecule::builder()
            .with_atom(Atom::query("O", SymbolQuery::new(["O"])))
            .with_atom(Atom::query("C", AnyAtomQuery))
            .with_bond(Bond::query(0, 1, OrderQuery::new(BondOrder::Double)))
            .build()
            .unwrap();
        let graph = build_rgraph(&PROPANAL, &query, true);
        assert_eq!(node_pairs(&graph), vec![(2, 0)]);
    }

    #[test]
    fn query_adjacency_checks_far_atoms() {
        // [any]~C~O against propanal: the far atoms of C1-C2 / C2=O3 are C1
        // and O3, which both accept.
        let query = Molecule::builder()
            .with_atom(Atom::query("C", AnyAtomQuery))
            .with_atom(Atom::query("C", SymbolQuery::new(["C"])))
            .with_atom(Atom::query("O", SymbolQuery::new(["O"])))
            .with_bond(Bond::query(0, 1, AnyOrderQuery))
            .with_bond(Bond::query(1, 2, AnyOrderQuery))
            .build()
            .unwrap();
        let graph = build_rgraph(&PROPANAL, &query, true);
        let pairs = node_pairs(&graph);
        let i = pairs.iter().position(|&p| p == (1, 0)).unwrap();
        let j = pairs.iter().position(|&p| p == (2, 1)).unwrap();
        assert!(graph.nodes()[i].extension().contains(j));

        // (0,0) and (2,1): disjoint in propanal, adjacent in the query.
        let k = pairs.iter().position(|&p| p == (0, 0)).unwrap();
        assert!(graph.nodes()[k].forbidden().contains(j));
    }
}
