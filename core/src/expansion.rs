//! An in-process decision oracle based on Shannon expansion.
use qbfkit_aig::{Aig, Formula, Lit};

use crate::{
    oracle::{DecisionOracle, OracleCode, OracleOutcome, OracleQuery},
    sat::{Exhaustive, SatOracle},
    Error,
};

/// Configuration of the [`Expansion`] oracle.
#[derive(Clone, Debug)]
pub struct ExpansionConfig {
    /// Queries with more controlled inputs are refused with [`Error::InputLimit`].
    pub max_controlled: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self { max_controlled: 16 }
    }
}

/// Eliminates controlled inputs one at a time using `∃y. φ = φ[y:=0] ∨ φ[y:=1]`.
///
/// The circuit size may double with every eliminated input, so this is only suitable for small
/// queries. Decisions check the validity of the projection with a [`SatOracle`].
#[derive(Debug)]
pub struct Expansion<S = Exhaustive> {
    config: ExpansionConfig,
    sat: S,
}

impl Default for Expansion {
    fn default() -> Self {
        Self::new(Exhaustive::default())
    }
}

impl<S: SatOracle> Expansion<S> {
    /// Creates an oracle using the default configuration.
    pub fn new(sat: S) -> Self {
        Self::with_config(sat, ExpansionConfig::default())
    }

    /// Creates an oracle using the given configuration.
    pub fn with_config(sat: S, config: ExpansionConfig) -> Self {
        Self { config, sat }
    }

    fn expand(&self, query: &OracleQuery) -> Result<Aig, Error> {
        let controlled: Vec<&str> = query.controlled().collect();
        if controlled.len() > self.config.max_controlled {
            return Err(Error::InputLimit {
                inputs: controlled.len(),
                limit: self.config.max_controlled,
            });
        }

        let mut current = query.circuit.clone();
        for name in controlled {
            current = eliminate_input(&current, name);
        }
        Ok(current)
    }
}

/// Existentially quantifies one input of a single output circuit.
fn eliminate_input(aig: &Aig, eliminated: &str) -> Aig {
    let mut target = Aig::new();
    for name in aig.input_names() {
        if name != eliminated {
            target.input(name);
        }
    }

    let (label, root) = aig.output(0);
    let [low, high] = [Lit::FALSE, Lit::TRUE].map(|value| {
        target.import_cone(aig, &[root], |target, name| {
            if name == eliminated {
                value
            } else {
                target.input(name)
            }
        })[0]
    });
    let projected = target.or(low, high);
    target.add_output(label, projected);
    target
}

impl<S: SatOracle> DecisionOracle for Expansion<S> {
    fn decide(&mut self, query: &OracleQuery) -> Result<OracleCode, Error> {
        let projection = Formula::from_circuit(self.expand(query)?)?;
        Ok(if self.sat.is_valid(&projection)? {
            OracleCode::True
        } else {
            OracleCode::False
        })
    }

    fn project(&mut self, query: &OracleQuery) -> Result<OracleOutcome, Error> {
        Ok(OracleOutcome {
            code: OracleCode::True,
            circuit: Some(self.expand(query)?),
        })
    }
}
