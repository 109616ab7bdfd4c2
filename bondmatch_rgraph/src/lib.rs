//! Resolution-graph matching of molecular graphs.
//!
//! Substructure, isomorphism and maximum-common-substructure queries are all
//! reduced to one clique search over a graph whose vertices are compatible
//! (source bond, target bond) pairs. [`IsomorphismTester`] is the entry point;
//! the lower layers are public for callers that need raw bond mappings.

mod budget;
mod builder;
mod error;
mod heuristics;
mod mapping;
mod node;
mod project;
mod rgraph;
mod tester;

pub use budget::TimeBudget;
pub use builder::{CompatibilityGraphBuilder, build_rgraph};
pub use error::{Error, Result};
pub use heuristics::test_subgraph_heuristics;
pub use mapping::{
    check_single_atom_cases, make_atoms_map_of_bonds_map, make_atoms_maps_of_bonds_maps,
};
pub use node::{CompatibilityNode, RMap};
pub use project::{Side, project, project_list};
pub use rgraph::{ParseOutcome, ResolutionGraph, SearchMode, bond_bitset, is_contained_in};
pub use tester::IsomorphismTester;
