//! Deciding quantified Boolean formulas over AIGs and eliminating existential variables.
//!
//! A quantifier prefix is first brought into canonical form by [`QuantifierPrefix::normalize`].
//! The [`Dispatcher`] then decides single block prefixes using a [`SatOracle`] and two block
//! prefixes using a [`DecisionOracle`], such as the external [`Cadet`] solver. Deeper prefixes are
//! rejected. The [`Eliminator`] uses the same oracles to project formulas onto a subset of their
//! inputs.
//!
//! Oracles never see the caller's variable names unchanged: the [`Bridge`] marks the variables an
//! oracle controls with a reserved prefix, which must not occur in the formula.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bridge;
pub mod cadet;
pub mod dispatch;
pub mod eliminate;
pub mod error;
pub mod expansion;
pub mod oracle;
pub mod prefix;
pub mod process;
pub mod sat;
pub mod simplify;

pub use bridge::{Bridge, BridgeConfig, Mode};
pub use cadet::{Cadet, CadetConfig};
pub use dispatch::{Decision, Dispatcher};
pub use eliminate::Eliminator;
pub use error::Error;
pub use expansion::{Expansion, ExpansionConfig};
pub use oracle::{DecisionOracle, OracleCode, OracleOutcome, OracleQuery};
pub use prefix::{Quantifier, QuantifierBlock, QuantifierPrefix};
pub use sat::{DimacsSolver, Exhaustive, SatOracle};
pub use simplify::{Cleanup, Simplifier};

pub use qbfkit_aig as aig;
