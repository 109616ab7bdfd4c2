//! Public query surface: isomorphism, substructure and overlap queries.

use std::cell::Cell;

use bit_set::BitSet;
use bondmatch_common::{Config, Molecule};
use tracing::debug;

use crate::budget::TimeBudget;
use crate::builder::build_rgraph;
use crate::error::{Error, Result};
use crate::heuristics::test_subgraph_heuristics;
use crate::mapping::{
    check_single_atom_cases, make_atoms_map_of_bonds_map, make_atoms_maps_of_bonds_maps,
};
use crate::node::RMap;
use crate::project::{Side, project_list};
use crate::rgraph::{SearchMode, bond_bitset};

/// Runs substructure queries between a source (superstructure) molecule and
/// a target molecule.
///
/// Only the target may be a query molecule; every entry point rejects a
/// query source with [`Error::QuerySource`]. Each public call gets its own
/// time budget from the [`Config`]; afterwards [`Self::timed_out`] tells
/// whether the result may be incomplete.
///
/// Mappings are lists of [`RMap`]s. Bond mappings pair bond indices, atom
/// mappings pair atom indices, `id1` on the source and `id2` on the target.
#[derive(Debug, Default)]
pub struct IsomorphismTester {
    config: Config,
    timed_out: Cell<bool>,
}

impl IsomorphismTester {
    /// Creates a tester that runs every query under `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            timed_out: Cell::new(false),
        }
    }

    /// The configuration queries run under.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the last query ran out of time.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out.get()
    }

    pub(crate) fn begin(&self) -> TimeBudget {
        self.timed_out.set(false);
        TimeBudget::start(self.config.timeout)
    }

    pub(crate) fn finish(&self, budget: &TimeBudget) {
        if budget.is_expired() {
            debug!("Query timed out after {:?}", budget.elapsed());
            self.timed_out.set(true);
        }
    }

    /// Runs `f` under a fresh budget.
    fn scoped<T>(&self, f: impl FnOnce(&TimeBudget) -> T) -> T {
        let budget = self.begin();
        let ret = f(&budget);
        self.finish(&budget);
        ret
    }

    // ---- isomorphism ----

    /// Are the two molecules isomorphic?
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn is_isomorphic(&self, source: &Molecule, target: &Molecule) -> Result<bool> {
        ensure_not_query(source)?;
        if source.atom_count() != target.atom_count() {
            return Ok(false);
        }
        if target.atom_count() == 1 {
            return Ok(target.atom(0).matches(source.atom(0)));
        }
        Ok(self.isomorphism_map(source, target)?.is_some())
    }

    /// The first bond mapping covering every bond of both molecules.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn isomorphism_map(&self, source: &Molecule, target: &Molecule) -> Result<Option<Vec<RMap>>> {
        ensure_not_query(source)?;
        if source.atom_count() != target.atom_count() {
            return Ok(None);
        }
        let maps = self.scoped(|budget| {
            self.search_within(
                source,
                target,
                &bond_bitset(source),
                &bond_bitset(target),
                SearchMode::FIRST,
                budget,
            )
        });
        Ok(maps.into_iter().next())
    }

    /// Every bond mapping covering every bond of both molecules.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn isomorphism_maps(&self, source: &Molecule, target: &Molecule) -> Result<Vec<Vec<RMap>>> {
        ensure_not_query(source)?;
        if source.atom_count() != target.atom_count() {
            return Ok(Vec::new());
        }
        Ok(self.scoped(|budget| {
            self.search_within(
                source,
                target,
                &bond_bitset(source),
                &bond_bitset(target),
                SearchMode::ALL_MAPS,
                budget,
            )
        }))
    }

    /// The atom mapping of the first isomorphism.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn isomorphism_atom_map(
        &self,
        source: &Molecule,
        target: &Molecule,
    ) -> Result<Option<Vec<RMap>>> {
        ensure_not_query(source)?;
        if source.atom_count() != target.atom_count() {
            return Ok(None);
        }
        if let Some(pairs) = check_single_atom_cases(source, target) {
            return Ok(pairs.into_iter().next().map(|p| vec![p]));
        }
        Ok(self
            .isomorphism_map(source, target)?
            .map(|map| make_atoms_map_of_bonds_map(&map, source, target)))
    }

    // ---- substructure ----

    /// Is `target` a substructure of `source`?
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn is_subgraph(&self, source: &Molecule, target: &Molecule) -> Result<bool> {
        self.scoped(|budget| self.is_subgraph_within(source, target, budget))
    }

    pub(crate) fn is_subgraph_within(
        &self,
        source: &Molecule,
        target: &Molecule,
        budget: &TimeBudget,
    ) -> Result<bool> {
        ensure_not_query(source)?;
        if target.atom_count() > source.atom_count() {
            return Ok(false);
        }
        if target.atom_count() == 1 {
            let query = target.atom(0);
            return Ok(source.atoms().iter().any(|atom| query.matches(atom)));
        }
        if !test_subgraph_heuristics(source, target, self.config.match_bonds) {
            return Ok(false);
        }
        let maps = self.search_within(
            source,
            target,
            &BitSet::new(),
            &bond_bitset(target),
            SearchMode::FIRST,
            budget,
        );
        Ok(!maps.is_empty())
    }

    /// The first bond mapping that covers every bond of `target`.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn subgraph_map(&self, source: &Molecule, target: &Molecule) -> Result<Option<Vec<RMap>>> {
        ensure_not_query(source)?;
        if target.atom_count() > source.atom_count() {
            return Ok(None);
        }
        let maps = self.scoped(|budget| {
            self.search_within(
                source,
                target,
                &BitSet::new(),
                &bond_bitset(target),
                SearchMode::FIRST,
                budget,
            )
        });
        Ok(maps.into_iter().next())
    }

    /// Every bond mapping that covers every bond of `target`.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn subgraph_maps(&self, source: &Molecule, target: &Molecule) -> Result<Vec<Vec<RMap>>> {
        ensure_not_query(source)?;
        if target.atom_count() > source.atom_count() {
            return Ok(Vec::new());
        }
        Ok(self.scoped(|budget| {
            self.search_within(
                source,
                target,
                &BitSet::new(),
                &bond_bitset(target),
                SearchMode::ALL_MAPS,
                budget,
            )
        }))
    }

    /// The atom mapping of the first substructure match.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn subgraph_atom_map(
        &self,
        source: &Molecule,
        target: &Molecule,
    ) -> Result<Option<Vec<RMap>>> {
        ensure_not_query(source)?;
        if target.atom_count() > source.atom_count() {
            return Ok(None);
        }
        if let Some(pairs) = check_single_atom_cases(source, target) {
            return Ok(pairs.into_iter().next().map(|p| vec![p]));
        }
        Ok(self
            .subgraph_map(source, target)?
            .map(|map| make_atoms_map_of_bonds_map(&map, source, target)))
    }

    /// The atom mappings of every substructure match.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn subgraph_atom_maps(&self, source: &Molecule, target: &Molecule) -> Result<Vec<Vec<RMap>>> {
        ensure_not_query(source)?;
        if target.atom_count() > source.atom_count() {
            return Ok(Vec::new());
        }
        if let Some(pairs) = check_single_atom_cases(source, target) {
            return Ok(pairs.into_iter().map(|p| vec![p]).collect());
        }
        let maps = self.subgraph_maps(source, target)?;
        Ok(make_atoms_maps_of_bonds_maps(&maps, source, target))
    }

    // ---- overlaps ----

    /// The maximal common substructures of the two molecules, as fragments of
    /// `source`.
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn overlaps(&self, source: &Molecule, target: &Molecule) -> Result<Vec<Molecule>> {
        ensure_not_query(source)?;
        let budget = self.begin();
        let maps: Vec<Vec<RMap>> = self
            .search_within(
                source,
                target,
                &BitSet::new(),
                &BitSet::new(),
                SearchMode::ALL_STRUCTURES,
                &budget,
            )
            .into_iter()
            .filter(|map| !map.is_empty())
            .collect();
        let reduced = project_list(&maps, source, Side::Source)
            .and_then(|fragments| self.remove_dominated_within(fragments, &budget));
        self.finish(&budget);
        reduced
    }

    // ---- raw search ----

    /// Bond mappings of `target` onto `source` that cover `source_constraint`
    /// and `target_constraint` (bond index sets; empty means unconstrained).
    ///
    /// # Errors
    ///
    /// [`Error::QuerySource`] if `source` is a query molecule.
    pub fn search(
        &self,
        source: &Molecule,
        target: &Molecule,
        source_constraint: &BitSet,
        target_constraint: &BitSet,
        mode: SearchMode,
    ) -> Result<Vec<Vec<RMap>>> {
        ensure_not_query(source)?;
        Ok(self.scoped(|budget| {
            self.search_within(
                source,
                target,
                source_constraint,
                target_constraint,
                mode,
                budget,
            )
        }))
    }

    fn search_within(
        &self,
        source: &Molecule,
        target: &Molecule,
        source_constraint: &BitSet,
        target_constraint: &BitSet,
        mode: SearchMode,
        budget: &TimeBudget,
    ) -> Vec<Vec<RMap>> {
        // A lone atom has no bonds, so the graph would be empty and the empty
        // clique would pass for a match. Decide on the atom labels instead.
        if let Some(pairs) = check_single_atom_cases(source, target) {
            if pairs.is_empty() || !source_constraint.is_empty() || !target_constraint.is_empty() {
                return Vec::new();
            }
            return vec![Vec::new()];
        }
        let graph = build_rgraph(source, target, self.config.match_bonds);
        let outcome = graph.parse(
            source_constraint,
            target_constraint,
            mode,
            self.config.max_iterations,
            budget,
        );
        outcome
            .solutions
            .iter()
            .map(|set| graph.bitset_to_rmap(set))
            .collect()
    }
}

fn ensure_not_query(source: &Molecule) -> Result<()> {
    if source.is_query() {
        return Err(Error::QuerySource);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bondmatch_common::fixtures::{
        ACETALDEHYDE, BENZENE, CARBON, CHLORINE, CYCLOPROPANE, ETHANOL, ETHYLAMINE, FLUORINE,
        ISOBUTANE, NITROGEN, PROPANAL, PYRIDINE, TOLUENE,
    };
    use bondmatch_common::{Atom, BondOrder, SymbolQuery};

    use super::*;

    fn strict() -> IsomorphismTester {
        IsomorphismTester::new(Config::strict())
    }

    #[test]
    fn propanal_contains_acetaldehyde() {
        let tester = strict();
        assert!(tester.is_subgraph(&PROPANAL, &ACETALDEHYDE).unwrap());
        let map = tester.subgraph_map(&PROPANAL, &ACETALDEHYDE).unwrap().unwrap();
        assert_eq!(map, vec![RMap::new(1, 0), RMap::new(2, 1)]);
        assert!(!tester.timed_out());
    }

    #[test]
    fn subgraph_atom_map_follows_the_bonds() {
        let mut atoms = strict()
            .subgraph_atom_map(&PROPANAL, &ACETALDEHYDE)
            .unwrap()
            .unwrap();
        atoms.sort();
        assert_eq!(atoms, vec![RMap::new(1, 0), RMap::new(2, 1), RMap::new(3, 2)]);
    }

    #[test]
    fn single_carbons_are_isomorphic() {
        let tester = strict();
        assert!(tester.is_isomorphic(&CARBON, &CARBON).unwrap());
        assert!(!tester.is_isomorphic(&CARBON, &NITROGEN).unwrap());
        assert_eq!(
            tester.isomorphism_atom_map(&CARBON, &CARBON).unwrap(),
            Some(vec![RMap::new(0, 0)])
        );
    }

    #[test]
    fn atom_count_mismatch_is_not_isomorphic() {
        let tester = strict();
        assert!(!tester.is_isomorphic(&PROPANAL, &ACETALDEHYDE).unwrap());
        assert!(tester.isomorphism_maps(&PROPANAL, &ACETALDEHYDE).unwrap().is_empty());
    }

    #[test]
    fn benzene_has_twelve_automorphisms() {
        let maps = strict().isomorphism_maps(&BENZENE, &BENZENE).unwrap();
        assert_eq!(maps.len(), 12);
        assert!(maps.iter().all(|m| m.len() == 6));
    }

    #[test]
    fn strict_bonds_separate_ethanol_from_acetaldehyde() {
        assert!(!strict().is_isomorphic(&ETHANOL, &ACETALDEHYDE).unwrap());
        let relaxed = IsomorphismTester::new(Config::topology_only());
        assert!(relaxed.is_isomorphic(&ETHANOL, &ACETALDEHYDE).unwrap());
    }

    #[test]
    fn query_source_is_rejected() {
        let query = Molecule::builder()
            .with_atom(Atom::query("X", SymbolQuery::new(["C", "N"])))
            .atom("C")
            .bond(0, 1, BondOrder::Single)
            .build()
            .unwrap();
        let tester = strict();
        assert!(matches!(tester.is_subgraph(&query, &ETHANOL), Err(Error::QuerySource)));
        assert!(matches!(tester.is_isomorphic(&query, &ETHANOL), Err(Error::QuerySource)));
        assert!(matches!(tester.overlaps(&query, &ETHANOL), Err(Error::QuerySource)));
        // As target it is fine.
        assert!(tester.is_subgraph(&ETHYLAMINE, &query).unwrap());
    }

    #[test]
    fn single_atom_target_lists_all_positions() {
        let maps = strict().subgraph_atom_maps(&ETHANOL, &CARBON).unwrap();
        assert_eq!(maps, vec![vec![RMap::new(0, 0)], vec![RMap::new(1, 0)]]);
        assert_eq!(
            strict().subgraph_atom_map(&ETHANOL, &CARBON).unwrap(),
            Some(vec![RMap::new(0, 0)])
        );
    }

    #[test]
    fn lone_atom_search_checks_labels_and_constraints() {
        let tester = strict();
        let none = BitSet::new();
        let first_bond: BitSet = [0].into_iter().collect();
        assert_eq!(
            tester.search(&ETHANOL, &CARBON, &none, &none, SearchMode::ALL_MAPS).unwrap(),
            vec![Vec::<RMap>::new()]
        );
        assert!(tester
            .search(&ETHANOL, &NITROGEN, &none, &none, SearchMode::ALL_MAPS)
            .unwrap()
            .is_empty());
        // No bond of ethanol can be covered by a lone atom.
        assert!(tester
            .search(&ETHANOL, &CARBON, &first_bond, &none, SearchMode::FIRST)
            .unwrap()
            .is_empty());
        assert!(tester.subgraph_maps(&ETHANOL, &NITROGEN).unwrap().is_empty());
    }

    #[test]
    fn halogens_do_not_overlap() {
        assert!(strict().overlaps(&FLUORINE, &CHLORINE).unwrap().is_empty());
    }

    #[test]
    fn ethanol_and_ethylamine_share_their_carbons() {
        let overlaps = strict().overlaps(&ETHANOL, &ETHYLAMINE).unwrap();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].atom_count(), 2);
        assert_eq!(overlaps[0].bond_count(), 1);
        assert!(overlaps[0].atoms().iter().all(|a| a.symbol() == "C"));
    }

    #[test]
    fn toluene_and_pyridine_overlap_on_ring_carbons() {
        let overlaps = strict().overlaps(&TOLUENE, &PYRIDINE).unwrap();
        assert!(!overlaps.is_empty());
        // The five aromatic carbons of pyridine form a chain of four bonds.
        assert!(overlaps.iter().any(|m| m.bond_count() == 4));
    }

    #[test]
    fn line_graph_ambiguity_is_kept() {
        // Three mutually adjacent bonds look the same in both molecules.
        assert!(strict().is_subgraph(&ISOBUTANE, &CYCLOPROPANE).unwrap());
        assert!(!strict().is_isomorphic(&ISOBUTANE, &CYCLOPROPANE).unwrap());
    }

    #[test]
    fn exhausted_budget_sets_the_flag() {
        let tester = IsomorphismTester::new(
            Config::builder().timeout(Duration::ZERO).build(),
        );
        let maps = tester.isomorphism_maps(&BENZENE, &BENZENE).unwrap();
        assert!(tester.timed_out());
        assert!(maps.is_empty());

        // The flag is reset by the next query.
        let tester = IsomorphismTester::new(Config::strict());
        tester.isomorphism_maps(&BENZENE, &BENZENE).unwrap();
        assert!(!tester.timed_out());
    }

    #[test]
    fn raw_search_without_constraints_finds_maximal_structures() {
        let maps = strict()
            .search(
                &PROPANAL,
                &ACETALDEHYDE,
                &BitSet::new(),
                &BitSet::new(),
                SearchMode::ALL_STRUCTURES,
            )
            .unwrap();
        assert_eq!(maps, vec![vec![RMap::new(1, 0), RMap::new(2, 1)]]);
    }
}
