//! The circuit catalogue.
//!
//! Each circuit is a plain function driving a [`NetlistBuilder`]; the
//! binary dispatches on the name and serializes whatever the function
//! built.

use ripple_netlist::{NetlistBuilder, NetlistError};

pub mod clockdiv;
pub mod cm2;
pub mod fulladder;
pub mod nadder;
pub mod ram;

/// A circuit description: populates the builder, the caller serializes.
pub type CircuitFn = fn(&mut NetlistBuilder) -> Result<(), NetlistError>;

/// Every built-in circuit, by name.
pub const CIRCUITS: &[(&str, CircuitFn)] = &[
    ("clockdiv", clockdiv::build),
    ("cm2", cm2::build),
    ("fulladder", fulladder::build),
    ("nadder", nadder::build),
    ("ram", ram::build),
];

/// Look up a built-in circuit by name.
#[must_use]
pub fn find(name: &str) -> Option<CircuitFn> {
    CIRCUITS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, build)| *build)
}
