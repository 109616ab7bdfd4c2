//! Error types for matching queries.
//!
//! Only caller errors are reported here. A search that runs out of time is
//! not an error: it returns whatever it found and raises the tester's
//! time-out flag instead.

use bondmatch_common::MoleculeError;
use thiserror::Error;

/// Errors that can occur while preparing or finishing a query.
#[derive(Debug, Error)]
pub enum Error {
    /// The source (superstructure) molecule holds query atoms or bonds.
    #[error("The source molecule must not be a query molecule")]
    QuerySource,

    /// Materialising a projected substructure failed.
    #[error(transparent)]
    Molecule(#[from] MoleculeError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
