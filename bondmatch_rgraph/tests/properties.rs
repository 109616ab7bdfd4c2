mod common;

use std::collections::HashMap;

use bondmatch_common::{BondOrder, Molecule};
use bondmatch_rgraph::{make_atoms_map_of_bonds_map, test_subgraph_heuristics};
use quickcheck::{Arbitrary, Gen, quickcheck};

use common::tester;

const SYMBOLS: [&str; 3] = ["C", "N", "O"];
const ORDERS: [BondOrder; 2] = [BondOrder::Single, BondOrder::Double];

/// A small connected acyclic molecule: atom `i > 0` hangs off an earlier
/// atom.
#[derive(Clone, Debug)]
struct Tree {
    symbols: Vec<&'static str>,
    bonds: Vec<(usize, usize, BondOrder)>,
}

impl Tree {
    fn molecule(&self) -> Molecule {
        self.relabelled(&(0..self.symbols.len()).collect::<Vec<_>>(), false)
    }

    /// The same tree with atom `i` stored at `perm[i]`. With `flip` the bonds
    /// are listed back to front with their endpoints swapped.
    fn relabelled(&self, perm: &[usize], flip: bool) -> Molecule {
        let mut symbols = vec![""; self.symbols.len()];
        for (i, s) in self.symbols.iter().enumerate() {
            symbols[perm[i]] = *s;
        }
        let mut builder = Molecule::builder();
        for s in symbols {
            builder = builder.atom(s);
        }
        let bonds: Box<dyn Iterator<Item = &(usize, usize, BondOrder)>> = if flip {
            Box::new(self.bonds.iter().rev())
        } else {
            Box::new(self.bonds.iter())
        };
        for &(a, b, order) in bonds {
            let (a, b) = if flip { (perm[b], perm[a]) } else { (perm[a], perm[b]) };
            builder = builder.bond(a, b, order);
        }
        builder.build().unwrap()
    }
}

impl Arbitrary for Tree {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = 2 + usize::arbitrary(g) % 5;
        let symbols = (0..n).map(|_| *g.choose(&SYMBOLS).unwrap()).collect();
        let bonds = (1..n)
            .map(|i| {
                let parent = usize::arbitrary(g) % i;
                (parent, i, *g.choose(&ORDERS).unwrap())
            })
            .collect();
        Self { symbols, bonds }
    }
}

/// A tree together with a renumbering of its atoms.
#[derive(Clone, Debug)]
struct Renumbered {
    tree: Tree,
    perm: Vec<usize>,
}

impl Arbitrary for Renumbered {
    fn arbitrary(g: &mut Gen) -> Self {
        let tree = Tree::arbitrary(g);
        let mut perm: Vec<usize> = (0..tree.symbols.len()).collect();
        for i in (1..perm.len()).rev() {
            let j = usize::arbitrary(g) % (i + 1);
            perm.swap(i, j);
        }
        Self { tree, perm }
    }
}

quickcheck! {
    fn prop_isomorphism_is_symmetric(a: Tree, b: Tree) -> bool {
        let tester = tester(true);
        let (a, b) = (a.molecule(), b.molecule());
        tester.is_isomorphic(&a, &b).unwrap() == tester.is_isomorphic(&b, &a).unwrap()
    }

    fn prop_renumbered_copy_is_isomorphic(r: Renumbered) -> bool {
        let tester = tester(true);
        let original = r.tree.molecule();
        let copy = r.tree.relabelled(&r.perm, true);
        tester.is_isomorphic(&original, &copy).unwrap()
    }

    fn prop_heuristic_rejection_is_sound(a: Tree, b: Tree) -> bool {
        let tester = tester(true);
        let (a, b) = (a.molecule(), b.molecule());
        test_subgraph_heuristics(&a, &b, true) || tester.subgraph_map(&a, &b).unwrap().is_none()
    }

    fn prop_equal_size_subgraph_is_isomorphism(a: Tree, b: Tree) -> bool {
        let tester = tester(true);
        let (a, b) = (a.molecule(), b.molecule());
        if a.bond_count() != b.bond_count() || !tester.is_subgraph(&a, &b).unwrap() {
            return true;
        }
        tester.is_isomorphic(&a, &b).unwrap()
    }

    fn prop_atom_maps_cover_the_bond_maps(r: Renumbered) -> bool {
        let tester = tester(true);
        let source = r.tree.molecule();
        let target = r.tree.relabelled(&r.perm, true);
        let maps = tester.isomorphism_maps(&source, &target).unwrap();
        !maps.is_empty() && maps.iter().all(|bond_map| {
            let atom_map = make_atoms_map_of_bonds_map(bond_map, &source, &target);
            let mut image = HashMap::new();
            for pair in &atom_map {
                if *image.entry(pair.id1).or_insert(pair.id2) != pair.id2 {
                    return false;
                }
            }
            bond_map.iter().all(|pair| {
                let [u, v] = source.bond(pair.id1).atoms();
                let (x, y) = (image.get(&u), image.get(&v));
                let bond = target.bond(pair.id2);
                matches!((x, y), (Some(&x), Some(&y)) if bond.contains(x) && bond.contains(y) && x != y)
            })
        })
    }

    fn prop_remove_dominated_is_idempotent(a: Tree, b: Tree) -> bool {
        let tester = tester(true);
        let (a, b) = (a.molecule(), b.molecule());
        let once = tester.overlaps(&a, &b).unwrap();
        let twice = tester.remove_dominated(once.clone()).unwrap();
        once.len() == twice.len()
            && once
                .iter()
                .zip(&twice)
                .all(|(x, y)| x.atom_count() == y.atom_count() && x.bond_count() == y.bond_count())
    }
}
