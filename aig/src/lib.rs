//! And-inverter graphs with named inputs, used as the circuit representation of qbfkit.
//!
//! This crate provides everything the decision layer consumes from a circuit: building and
//! structurally hashing AIGs, combining single output [formulas][formula::Formula], renaming
//! inputs, simulation, CNF encoding and the ASCII AIGER exchange format used for handing circuits
//! to external tools.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod aag;
pub mod aig;
pub mod cnf;
pub mod formula;
pub mod lit;
pub mod sim;

pub use aag::ParseError;
pub use aig::{Aig, AigError, Node};
pub use formula::Formula;
pub use lit::{Lit, Var};
