//! Molecular graph container consumed by the matching core.

mod atom;
mod bond;
mod query;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use query::{
    AliphaticAtomQuery, AnyAtomQuery, AnyOrderQuery, AromaticAtomQuery, AromaticBondQuery,
    AtomPredicate, BondPredicate, OrderQuery, SymbolQuery,
};

use contracts::*;

use crate::MoleculeError;

/// An undirected, labelled multigraph: atoms are vertices, bonds are edges.
///
/// Atoms and bonds are addressed by their insertion index. Incident bonds are
/// tracked per atom so neighbourhood walks do not scan the bond list.
#[derive(Clone, Debug, Default)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    incident: Vec<Vec<usize>>,
}

impl Molecule {
    /// Creates an empty molecule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atoms: Vec::new(),
            bonds: Vec::new(),
            incident: Vec::new(),
        }
    }

    /// Starts a chainable builder.
    #[must_use]
    pub const fn builder() -> MoleculeBuilder {
        MoleculeBuilder {
            molecule: Self::new(),
            error: None,
        }
    }

    /// Appends an atom and returns its index.
    #[debug_ensures(ret + 1 == self.atom_count())]
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.incident.push(Vec::new());
        self.atoms.len() - 1
    }

    /// Appends a bond and returns its index.
    ///
    /// # Errors
    ///
    /// Fails if an endpoint is not an atom of this molecule, or if both
    /// endpoints are the same atom.
    #[debug_ensures(ret.is_err() || self.bond_count() == old(self.bond_count()) + 1)]
    pub fn add_bond(&mut self, bond: Bond) -> Result<usize, MoleculeError> {
        let atom_count = self.atoms.len();
        for atom in bond.atoms() {
            if atom >= atom_count {
                return Err(MoleculeError::AtomOutOfRange { atom, atom_count });
            }
        }
        if bond.begin() == bond.end() {
            return Err(MoleculeError::SelfLoop(bond.begin()));
        }

        let idx = self.bonds.len();
        self.incident[bond.begin()].push(idx);
        self.incident[bond.end()].push(idx);
        self.bonds.push(bond);
        Ok(idx)
    }

    /// Number of atoms.
    #[must_use]
    pub const fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bonds.
    #[must_use]
    pub const fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// The atom at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn atom(&self, idx: usize) -> &Atom {
        &self.atoms[idx]
    }

    /// The bond at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn bond(&self, idx: usize) -> &Bond {
        &self.bonds[idx]
    }

    /// All atoms in index order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All bonds in index order.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Indices of the bonds incident to `atom`, in insertion order.
    #[must_use]
    pub fn connected_bonds(&self, atom: usize) -> &[usize] {
        self.incident.get(atom).map_or(&[][..], Vec::as_slice)
    }

    /// True when any atom or bond carries a query predicate.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.atoms.iter().any(Atom::is_query) || self.bonds.iter().any(Bond::is_query)
    }
}

/// Chainable construction of a [`Molecule`].
///
/// The first bond error is kept and reported by [`MoleculeBuilder::build`].
#[derive(Debug)]
pub struct MoleculeBuilder {
    molecule: Molecule,
    error: Option<MoleculeError>,
}

impl MoleculeBuilder {
    /// Adds a plain atom.
    #[must_use]
    pub fn atom(self, symbol: &str) -> Self {
        self.with_atom(Atom::new(symbol))
    }

    /// Adds an arbitrary atom.
    #[must_use]
    pub fn with_atom(mut self, atom: Atom) -> Self {
        self.molecule.add_atom(atom);
        self
    }

    /// Adds a plain bond.
    #[must_use]
    pub fn bond(self, begin: usize, end: usize, order: BondOrder) -> Self {
        self.with_bond(Bond::new(begin, end, order))
    }

    /// Adds an arbitrary bond.
    #[must_use]
    pub fn with_bond(mut self, bond: Bond) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.molecule.add_bond(bond) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Finishes the molecule.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while adding bonds.
    pub fn build(self) -> Result<Molecule, MoleculeError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.molecule),
        }
    }
}
