//! Small molecules shared by the test suites of the workspace.
//!
//! All fixtures are hydrogen-suppressed. Atom and bond indices follow the
//! order in which they are listed in the comments.

use crate::{Atom, Bond, BondOrder, Molecule};

/// Builds an open chain `symbols[0] - symbols[1] - ...` with the given bond
/// orders (`orders.len() == symbols.len() - 1`).
///
/// # Panics
///
/// Panics if the order list does not fit the atom list.
#[must_use]
pub fn chain(symbols: &[&str], orders: &[BondOrder]) -> Molecule {
    assert_eq!(
        orders.len() + 1,
        symbols.len().max(1),
        "a chain of n atoms needs n - 1 bond orders"
    );
    let mut builder = Molecule::builder();
    for s in symbols {
        builder = builder.atom(s);
    }
    for (i, order) in orders.iter().enumerate() {
        builder = builder.bond(i, i + 1, *order);
    }
    builder.build().expect("chain bonds are always in range")
}

/// Builds a ring of aromatic atoms joined by aromatic bonds.
#[must_use]
pub fn aromatic_ring(symbols: &[&str]) -> Molecule {
    let n = symbols.len();
    let mut builder = Molecule::builder();
    for s in symbols {
        builder = builder.with_atom(Atom::aromatic(*s));
    }
    for i in 0..n {
        builder = builder.with_bond(Bond::aromatic(i, (i + 1) % n, BondOrder::Single));
    }
    builder.build().expect("ring bonds are always in range")
}

lazy_static::lazy_static! {
    /// A lone carbon atom.
    pub static ref CARBON: Molecule = chain(&["C"], &[]);

    /// A lone nitrogen atom.
    pub static ref NITROGEN: Molecule = chain(&["N"], &[]);

    /// C0-C1=O2.
    pub static ref ACETALDEHYDE: Molecule =
        chain(&["C", "C", "O"], &[BondOrder::Single, BondOrder::Double]);

    /// C0-C1-C2=O3.
    pub static ref PROPANAL: Molecule = chain(
        &["C", "C", "C", "O"],
        &[BondOrder::Single, BondOrder::Single, BondOrder::Double],
    );

    /// C0-C1-O2.
    pub static ref ETHANOL: Molecule =
        chain(&["C", "C", "O"], &[BondOrder::Single, BondOrder::Single]);

    /// C0-C1-N2.
    pub static ref ETHYLAMINE: Molecule =
        chain(&["C", "C", "N"], &[BondOrder::Single, BondOrder::Single]);

    /// C0-C1-C2-C3.
    pub static ref BUTANE: Molecule = chain(
        &["C", "C", "C", "C"],
        &[BondOrder::Single, BondOrder::Single, BondOrder::Single],
    );

    /// F0-F1.
    pub static ref FLUORINE: Molecule = chain(&["F", "F"], &[BondOrder::Single]);

    /// Cl0-Cl1.
    pub static ref CHLORINE: Molecule = chain(&["Cl", "Cl"], &[BondOrder::Single]);

    /// Three carbons in a triangle.
    pub static ref CYCLOPROPANE: Molecule = Molecule::builder()
        .atom("C")
        .atom("C")
        .atom("C")
        .bond(0, 1, BondOrder::Single)
        .bond(1, 2, BondOrder::Single)
        .bond(2, 0, BondOrder::Single)
        .build()
        .expect("cyclopropane fixture");

    /// Central C0 bonded to C1, C2, C3.
    pub static ref ISOBUTANE: Molecule = Molecule::builder()
        .atom("C")
        .atom("C")
        .atom("C")
        .atom("C")
        .bond(0, 1, BondOrder::Single)
        .bond(0, 2, BondOrder::Single)
        .bond(0, 3, BondOrder::Single)
        .build()
        .expect("isobutane fixture");

    /// Aromatic six-ring of carbons.
    pub static ref BENZENE: Molecule = aromatic_ring(&["C", "C", "C", "C", "C", "C"]);

    /// Aromatic six-ring with N0.
    pub static ref PYRIDINE: Molecule = aromatic_ring(&["N", "C", "C", "C", "C", "C"]);

    /// Benzene ring (atoms 0..6) with a methyl carbon 6 on atom 0.
    pub static ref TOLUENE: Molecule = {
        let mut m = aromatic_ring(&["C", "C", "C", "C", "C", "C"]);
        let methyl = m.add_atom(Atom::new("C"));
        m.add_bond(Bond::new(0, methyl, BondOrder::Single))
            .expect("toluene fixture");
        m
    };
}
