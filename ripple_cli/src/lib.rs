//! Built-in example circuits for the ripple netlist compiler.
//!
//! The binary in this crate selects one of these by name; they double as
//! end-to-end exercises of every node kind the core library offers.

pub mod circuits;
