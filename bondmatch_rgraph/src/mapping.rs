//! Conversion of bond mappings into atom mappings.
//!
//! The search pairs bonds, never atoms. An atom correspondence is recovered by
//! looking at each matched bond's neighbours: if the source bond meets another
//! matched bond at one of its endpoints, the target bond must meet that
//! bond's partner at the corresponding endpoint.

use bondmatch_common::{Bond, Molecule};

use crate::node::RMap;

/// Atom pairs for the degenerate cases where one side is a single atom.
///
/// Returns `None` when neither molecule has exactly one atom. Otherwise every
/// atom of the larger side accepted by the lone atom yields one pair; the
/// list is empty when nothing matches.
#[must_use]
pub fn check_single_atom_cases(source: &Molecule, target: &Molecule) -> Option<Vec<RMap>> {
    if target.atom_count() == 1 {
        let query = target.atom(0);
        Some(
            source
                .atoms()
                .iter()
                .enumerate()
                .filter(|(_, atom)| query.matches(atom))
                .map(|(i, _)| RMap::new(i, 0))
                .collect(),
        )
    } else if source.atom_count() == 1 {
        let atom = source.atom(0);
        Some(
            target
                .atoms()
                .iter()
                .enumerate()
                .filter(|(_, candidate)| candidate.matches(atom))
                .map(|(i, _)| RMap::new(0, i))
                .collect(),
        )
    } else {
        None
    }
}

/// Derives the atom mapping implied by one bond mapping.
///
/// Every pair in `bond_map` contributes its two endpoint pairs. The
/// orientation comes from an adjacent matched bond when there is one, and
/// from atom matching otherwise (straight before crossed).
#[must_use]
pub fn make_atoms_map_of_bonds_map(
    bond_map: &[RMap],
    source: &Molecule,
    target: &Molecule,
) -> Vec<RMap> {
    let mut atom_map: Vec<RMap> = Vec::with_capacity(bond_map.len() * 2);

    for pair in bond_map {
        let bond1 = source.bond(pair.id1);
        let bond2 = target.bond(pair.id2);
        let [a0, a1] = bond1.atoms();
        let [b0, b1] = bond2.atoms();

        let straight = orientation_from_neighbours(bond_map, pair, bond1, bond2, source, target)
            .unwrap_or_else(|| {
                target.atom(b0).matches(source.atom(a0)) && target.atom(b1).matches(source.atom(a1))
            });

        let (b0, b1) = if straight { (b0, b1) } else { (b1, b0) };
        for atom_pair in [RMap::new(a0, b0), RMap::new(a1, b1)] {
            if !atom_map.contains(&atom_pair) {
                atom_map.push(atom_pair);
            }
        }
    }

    atom_map
}

/// [`make_atoms_map_of_bonds_map`] over every bond mapping.
#[must_use]
pub fn make_atoms_maps_of_bonds_maps(
    bond_maps: &[Vec<RMap>],
    source: &Molecule,
    target: &Molecule,
) -> Vec<Vec<RMap>> {
    bond_maps
        .iter()
        .map(|map| make_atoms_map_of_bonds_map(map, source, target))
        .collect()
}

/// `Some(true)` when `bond1`'s endpoints map onto `bond2`'s in storage order,
/// `Some(false)` when crossed, `None` when no matched neighbour decides it.
fn orientation_from_neighbours(
    bond_map: &[RMap],
    pair: &RMap,
    bond1: &Bond,
    bond2: &Bond,
    source: &Molecule,
    target: &Molecule,
) -> Option<bool> {
    let atoms1 = bond1.atoms();
    let atoms2 = bond2.atoms();

    for (j, &atom1) in atoms1.iter().enumerate() {
        for &neighbour in source.connected_bonds(atom1) {
            if neighbour == pair.id1 {
                continue;
            }
            let Some(partner) = bond_map.iter().find(|m| m.id1 == neighbour) else {
                continue;
            };
            let partner_bond = target.bond(partner.id2);
            if let Some(n) = atoms2.iter().position(|&a| partner_bond.contains(a)) {
                return Some(j == n);
            }
        }
    }
    None
}
