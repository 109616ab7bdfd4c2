//! The resolution graph and its constrained clique search.
//!
//! Every vertex of the resolution graph pairs a source bond with a compatible
//! target bond. A solution is a set of vertices that are pairwise allowed to
//! coexist and that grows through adjacency (`extension`) links; projected on
//! either molecule it is a set of bonds, and the projections of two distinct
//! solutions are never nested (unless all mappings are requested).

use bit_set::BitSet;
use bondmatch_common::Molecule;
use contracts::*;
use tracing::{debug, trace};

use crate::budget::TimeBudget;
use crate::node::{CompatibilityNode, RMap};

/// Controls how many solutions a parse collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchMode {
    /// Keep searching after the first solution.
    pub find_all_structures: bool,
    /// Keep solutions that cover the same bonds through different mappings.
    pub find_all_maps: bool,
}

impl SearchMode {
    /// Stop at the first solution (existence queries).
    pub const FIRST: Self = Self {
        find_all_structures: false,
        find_all_maps: false,
    };

    /// Every mapping of every maximal structure.
    pub const ALL_MAPS: Self = Self {
        find_all_structures: true,
        find_all_maps: true,
    };

    /// One mapping per maximal structure.
    pub const ALL_STRUCTURES: Self = Self {
        find_all_structures: true,
        find_all_maps: false,
    };
}

/// What a parse produced.
#[derive(Clone, Debug, Default)]
pub struct ParseOutcome {
    /// Solutions as sets of resolution-graph node indices.
    pub solutions: Vec<BitSet>,
    /// Number of extension steps taken.
    pub iterations: usize,
    /// The time budget ran out; `solutions` may be incomplete.
    pub timed_out: bool,
}

/// Compatibility graph between the bonds of a source and a target molecule.
///
/// Built by [`crate::build_rgraph`]; read-only once built.
#[derive(Clone, Debug, Default)]
pub struct ResolutionGraph {
    pub(crate) nodes: Vec<CompatibilityNode>,
    graph_bits: BitSet,
    first_graph_size: usize,
    second_graph_size: usize,
}

impl ResolutionGraph {
    pub(crate) fn new(first_graph_size: usize, second_graph_size: usize) -> Self {
        Self {
            nodes: Vec::new(),
            graph_bits: BitSet::new(),
            first_graph_size,
            second_graph_size,
        }
    }

    #[debug_ensures(self.graph_bits.contains(ret))]
    pub(crate) fn add_node(&mut self, node: CompatibilityNode) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.graph_bits.insert(idx);
        idx
    }

    /// Sizes every node's relation sets once the node count is known.
    pub(crate) fn allocate_relations(&mut self) {
        let n = self.nodes.len();
        for node in &mut self.nodes {
            node.extension = BitSet::with_capacity(n);
            node.forbidden = BitSet::with_capacity(n);
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no bond pair was compatible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in index order.
    #[must_use]
    pub fn nodes(&self) -> &[CompatibilityNode] {
        &self.nodes
    }

    /// Bond count of the source molecule.
    #[must_use]
    pub const fn first_graph_size(&self) -> usize {
        self.first_graph_size
    }

    /// Bond count of the target molecule.
    #[must_use]
    pub const fn second_graph_size(&self) -> usize {
        self.second_graph_size
    }

    /// Source bonds referenced by `set`.
    #[must_use]
    pub fn project_g1(&self, set: &BitSet) -> BitSet {
        set.iter().map(|x| self.nodes[x].id1()).collect()
    }

    /// Target bonds referenced by `set`.
    #[must_use]
    pub fn project_g2(&self, set: &BitSet) -> BitSet {
        set.iter().map(|x| self.nodes[x].id2()).collect()
    }

    /// The bond pairs referenced by `set`, in node order.
    #[must_use]
    pub fn bitset_to_rmap(&self, set: &BitSet) -> Vec<RMap> {
        set.iter().map(|x| self.nodes[x].rmap()).collect()
    }

    /// Enumerates solutions that cover every source bond in
    /// `source_constraint` and every target bond in `target_constraint`.
    ///
    /// Empty constraints impose nothing. The search stops early when `mode`
    /// asks for the first solution only, when `max_iterations` is reached, or
    /// when `budget` runs out; in the last case the outcome is flagged.
    pub fn parse(
        &self,
        source_constraint: &BitSet,
        target_constraint: &BitSet,
        mode: SearchMode,
        max_iterations: Option<usize>,
        budget: &TimeBudget,
    ) -> ParseOutcome {
        let mut search = Search {
            graph: self,
            budget,
            source_constraint,
            target_constraint,
            mode,
            max_iterations,
            iterations: 0,
            solutions: Vec::new(),
            stop: false,
        };

        let seeds: BitSet = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                (source_constraint.is_empty() || source_constraint.contains(node.id1()))
                    && (target_constraint.is_empty() || target_constraint.contains(node.id2()))
            })
            .map(|(idx, _)| idx)
            .collect();

        search.parse_rec(&BitSet::new(), &seeds, &BitSet::new());

        let timed_out = budget.is_expired();
        debug!(
            "Parse over {} nodes: {} solutions after {} iterations{}",
            self.nodes.len(),
            search.solutions.len(),
            search.iterations,
            if timed_out { " (timed out)" } else { "" }
        );

        ParseOutcome {
            solutions: search.solutions.into_iter().map(|s| s.nodes).collect(),
            iterations: search.iterations,
            timed_out,
        }
    }
}

/// `a` ⊆ `b`; the empty set is contained in everything.
pub fn is_contained_in(a: &BitSet, b: &BitSet) -> bool {
    a.is_empty() || a.is_subset(b)
}

fn is_same_set(a: &BitSet, b: &BitSet) -> bool {
    a.is_subset(b) && b.is_subset(a)
}

/// Every bond index of `molecule`.
#[must_use]
pub fn bond_bitset(molecule: &Molecule) -> BitSet {
    (0..molecule.bond_count()).collect()
}

/// A recorded solution with its projections cached.
#[derive(Debug)]
struct Solution {
    nodes: BitSet,
    proj_g1: BitSet,
    proj_g2: BitSet,
}

/// Mutable state of one parse.
struct Search<'g, 'c> {
    graph: &'g ResolutionGraph,
    budget: &'c TimeBudget,
    source_constraint: &'c BitSet,
    target_constraint: &'c BitSet,
    mode: SearchMode,
    max_iterations: Option<usize>,
    iterations: usize,
    solutions: Vec<Solution>,
    stop: bool,
}

impl Search<'_, '_> {
    fn out_of_time(&mut self) -> bool {
        if self.budget.exhausted() {
            self.stop = true;
        }
        self.stop
    }

    fn satisfies_constraints(&self, proj_g1: &BitSet, proj_g2: &BitSet) -> bool {
        is_contained_in(self.source_constraint, proj_g1)
            && is_contained_in(self.target_constraint, proj_g2)
    }

    fn parse_rec(&mut self, traversed: &BitSet, extension: &BitSet, forbidden: &BitSet) {
        if self.out_of_time() {
            return;
        }

        if extension.is_empty() {
            self.record_solution(traversed);
            return;
        }

        let mut potential = self.graph.graph_bits.clone();
        potential.difference_with(forbidden);
        potential.union_with(traversed);
        if !self.should_continue(&potential) {
            return;
        }

        self.iterations += 1;

        let graph = self.graph;
        // Nodes already branched on at this level stay forbidden for later
        // siblings.
        let mut tried = forbidden.clone();
        for x in extension.iter() {
            if self.stop {
                break;
            }
            let node = &graph.nodes[x];

            let mut new_forbidden = tried.clone();
            new_forbidden.union_with(node.forbidden());

            let mut new_extension = if traversed.is_empty() {
                node.extension().clone()
            } else {
                let mut e = extension.clone();
                e.union_with(node.extension());
                e
            };
            new_extension.difference_with(&new_forbidden);

            let mut new_traversed = traversed.clone();
            new_traversed.insert(x);

            tried.insert(x);
            self.parse_rec(&new_traversed, &new_extension, &new_forbidden);
        }
    }

    fn record_solution(&mut self, traversed: &BitSet) {
        let proj_g1 = self.graph.project_g1(traversed);
        let proj_g2 = self.graph.project_g2(traversed);
        if !self.satisfies_constraints(&proj_g1, &proj_g2) {
            return;
        }

        let mut included = false;
        let mut dominated = Vec::new();
        for (idx, sol) in self.solutions.iter().enumerate() {
            if self.budget.exhausted() {
                self.stop = true;
            }
            if is_same_set(&sol.nodes, traversed) {
                included = true;
                break;
            }
            if self.mode.find_all_maps
                && (is_same_set(&proj_g1, &sol.proj_g1) || is_same_set(&proj_g2, &sol.proj_g2))
            {
                continue;
            }
            if is_contained_in(&proj_g1, &sol.proj_g1) || is_contained_in(&proj_g2, &sol.proj_g2) {
                included = true;
                break;
            }
            if is_contained_in(&sol.proj_g1, &proj_g1) || is_contained_in(&sol.proj_g2, &proj_g2) {
                dominated.push(idx);
            }
        }

        for idx in dominated.into_iter().rev() {
            trace!("Dropping dominated solution {}", idx);
            self.solutions.remove(idx);
        }

        if !included {
            trace!("Recording solution of {} nodes", traversed.len());
            self.solutions.push(Solution {
                nodes: traversed.clone(),
                proj_g1,
                proj_g2,
            });
        }

        if !self.mode.find_all_structures {
            self.stop = true;
        }
    }

    fn should_continue(&mut self, potential: &BitSet) -> bool {
        if self
            .max_iterations
            .is_some_and(|max| self.iterations >= max)
        {
            trace!("Iteration cap reached");
            return false;
        }

        let proj_g1 = self.graph.project_g1(potential);
        let proj_g2 = self.graph.project_g2(potential);
        if !self.satisfies_constraints(&proj_g1, &proj_g2) {
            return false;
        }

        if self.mode.find_all_maps {
            return true;
        }

        for idx in 0..self.solutions.len() {
            if self.out_of_time() {
                return false;
            }
            let sol = &self.solutions[idx];
            if is_contained_in(&proj_g1, &sol.proj_g1) || is_contained_in(&proj_g2, &sol.proj_g2) {
                trace!("Branch dominated by solution {}", idx);
                return false;
            }
        }
        true
    }
}
