//! Cheap necessary conditions for a subgraph match.
//!
//! A target can only be embedded in a source that has at least as many atoms
//! of each screened element and, when bond types are compared, at least as
//! many bonds of each type. Query atoms and bonds of the target carry no
//! fixed label and are not counted.

use std::collections::HashMap;
use std::hash::Hash;

use bondmatch_common::{Bond, BondOrder, Molecule};
use itertools::Itertools;
use tracing::trace;

/// Elements whose counts are compared.
const SCREENED_ELEMENTS: [&str; 8] = ["S", "N", "O", "F", "Cl", "Br", "I", "C"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum BondClass {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondClass {
    fn of(bond: &Bond) -> Option<Self> {
        if bond.is_aromatic() {
            return Some(Self::Aromatic);
        }
        match bond.order() {
            BondOrder::Single => Some(Self::Single),
            BondOrder::Double => Some(Self::Double),
            BondOrder::Triple => Some(Self::Triple),
            BondOrder::Quadruple | BondOrder::Unset => None,
        }
    }
}

/// Returns `false` when `target` provably cannot be a subgraph of `source`.
///
/// A `true` answer proves nothing; the full search still has to run.
#[must_use]
pub fn test_subgraph_heuristics(source: &Molecule, target: &Molecule, match_bonds: bool) -> bool {
    if match_bonds {
        let source_bonds = bond_classes(source);
        let target_bonds = bond_classes(target);
        if let Some(class) = first_excess(&target_bonds, &source_bonds) {
            trace!("Heuristic rejects: target has more {:?} bonds", class);
            return false;
        }
    }

    let source_atoms = element_counts(source);
    let target_atoms = element_counts(target);
    if let Some(symbol) = first_excess(&target_atoms, &source_atoms) {
        trace!("Heuristic rejects: target has more {} atoms", symbol);
        return false;
    }

    true
}

fn bond_classes(molecule: &Molecule) -> HashMap<BondClass, usize> {
    molecule
        .bonds()
        .iter()
        .filter(|b| !b.is_query())
        .filter_map(BondClass::of)
        .counts()
}

fn element_counts(molecule: &Molecule) -> HashMap<&str, usize> {
    molecule
        .atoms()
        .iter()
        .filter(|a| !a.is_query())
        .map(|a| a.symbol())
        .filter(|s| SCREENED_ELEMENTS.contains(s))
        .counts()
}

/// The first key that `needed` has more of than `available`.
fn first_excess<K: Copy + Eq + Hash>(
    needed: &HashMap<K, usize>,
    available: &HashMap<K, usize>,
) -> Option<K> {
    needed
        .iter()
        .find(|(k, n)| **n > available.get(*k).copied().unwrap_or(0))
        .map(|(k, _)| *k)
}
