//! Errors raised while assembling molecules.

use thiserror::Error;

/// Errors that can occur while adding bonds to a [`crate::Molecule`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoleculeError {
    /// A bond endpoint does not name an atom of the molecule.
    #[error("Bond endpoint {atom} is out of range (molecule has {atom_count} atoms)")]
    AtomOutOfRange {
        /// The offending endpoint.
        atom: usize,
        /// Number of atoms in the molecule at the time.
        atom_count: usize,
    },

    /// Both endpoints of a bond are the same atom.
    #[error("Bond would connect atom {0} to itself")]
    SelfLoop(usize),
}
