//! Materialising bond mappings as molecules, and reducing lists of them.

use std::collections::HashMap;

use bondmatch_common::Molecule;
use tracing::debug;

use crate::budget::TimeBudget;
use crate::error::Result;
use crate::node::RMap;
use crate::tester::IsomorphismTester;

/// Which molecule of a mapping to project onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The superstructure (`id1`).
    Source,
    /// The query (`id2`).
    Target,
}

impl Side {
    const fn pick(self, pair: RMap) -> usize {
        match self {
            Self::Source => pair.id1,
            Self::Target => pair.id2,
        }
    }
}

/// Builds the substructure of `molecule` made of the bonds `map` references
/// on `side`, together with their endpoints.
///
/// Atoms are renumbered in order of first appearance; atom and bond records
/// are cloned, so types and query predicates are kept.
///
/// # Errors
///
/// Fails only if a referenced bond has inconsistent endpoints, which cannot
/// happen for a molecule built through the public API.
pub fn project(map: &[RMap], molecule: &Molecule, side: Side) -> Result<Molecule> {
    let mut projected = Molecule::new();
    let mut renumbered: HashMap<usize, usize> = HashMap::new();

    for pair in map {
        let bond = molecule.bond(side.pick(*pair));
        let [begin, end] = bond.atoms().map(|atom| {
            *renumbered
                .entry(atom)
                .or_insert_with(|| projected.add_atom(molecule.atom(atom).clone()))
        });
        projected.add_bond(bond.with_atoms(begin, end))?;
    }

    Ok(projected)
}

/// [`project`] over a list of mappings.
///
/// # Errors
///
/// See [`project`].
pub fn project_list(maps: &[Vec<RMap>], molecule: &Molecule, side: Side) -> Result<Vec<Molecule>> {
    maps.iter().map(|map| project(map, molecule, side)).collect()
}

impl IsomorphismTester {
    /// Keeps only the molecules that are not a subgraph of another one in the
    /// list. Of two isomorphic molecules the later one is kept.
    ///
    /// # Errors
    ///
    /// Fails if any molecule in the list is a query molecule.
    pub fn remove_dominated(&self, molecules: Vec<Molecule>) -> Result<Vec<Molecule>> {
        let budget = self.begin();
        let reduced = self.remove_dominated_within(molecules, &budget);
        self.finish(&budget);
        reduced
    }

    pub(crate) fn remove_dominated_within(
        &self,
        molecules: Vec<Molecule>,
        budget: &TimeBudget,
    ) -> Result<Vec<Molecule>> {
        let n = molecules.len();
        let mut removed = vec![false; n];

        for i in 0..n {
            for j in (i + 1)..n {
                if removed[i] {
                    break;
                }
                if removed[j] {
                    continue;
                }
                if self.is_subgraph_within(&molecules[j], &molecules[i], budget)? {
                    removed[i] = true;
                } else if self.is_subgraph_within(&molecules[i], &molecules[j], budget)? {
                    removed[j] = true;
                }
            }
        }

        let kept: Vec<Molecule> = molecules
            .into_iter()
            .zip(removed)
            .filter_map(|(m, gone)| (!gone).then_some(m))
            .collect();
        debug!("Reduced {} substructures to {}", n, kept.len());
        Ok(kept)
    }
}
