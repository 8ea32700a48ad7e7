//! Existential quantifier elimination.
use std::fmt;

use qbfkit_aig::{Aig, Formula};

use crate::{
    bridge::{Bridge, BridgeConfig, Mode},
    oracle::{DecisionOracle, OracleCode},
    simplify::Simplifier,
    Error,
};

/// Computes quantifier free circuits equivalent to `∃variables. formula`.
///
/// The projection is performed by the [`DecisionOracle`] and the result is post-processed by the
/// [`Simplifier`].
#[derive(Debug)]
pub struct Eliminator<O, P> {
    bridge: Bridge<O>,
    simplifier: P,
}

impl<O: DecisionOracle, P: Simplifier> Eliminator<O, P> {
    /// Creates an eliminator using the default bridge configuration.
    pub fn new(oracle: O, simplifier: P) -> Self {
        Self::with_bridge_config(oracle, simplifier, BridgeConfig::default())
    }

    /// Creates an eliminator using the given bridge configuration.
    pub fn with_bridge_config(oracle: O, simplifier: P, config: BridgeConfig) -> Self {
        Self {
            bridge: Bridge::with_config(oracle, config),
            simplifier,
        }
    }

    /// The bridge to the oracle.
    pub fn bridge(&mut self) -> &mut Bridge<O> {
        &mut self.bridge
    }

    /// Eliminates `variables` from `formula`.
    ///
    /// Variables that are not inputs of the formula are ignored. The result has the formula's
    /// label as its single output.
    pub fn eliminate<V: fmt::Display>(
        &mut self,
        formula: &Formula,
        variables: impl IntoIterator<Item = V>,
    ) -> Result<Aig, Error> {
        let mut controlled = vec![];
        for var in variables {
            let var = var.to_string();
            if formula.circuit().find_input(&var).is_none() {
                log::debug!("ignoring `{var}`, which is not an input of {}", formula.label());
            } else if !controlled.contains(&var) {
                controlled.push(var);
            }
        }

        log::debug!(
            "eliminating {} of {} inputs from {}",
            controlled.len(),
            formula.input_count(),
            formula.label()
        );

        let (code, circuit) = self.bridge.invoke(formula, &controlled, Mode::Project)?;
        let Some(circuit) = circuit else {
            return Err(Error::ProjectionFailed { code });
        };
        debug_assert_eq!(code, OracleCode::True);

        let simplified = self.simplifier.simplify(circuit)?;
        log::debug!("projection has {} and gates", simplified.and_count());
        Ok(simplified)
    }
}

#[cfg(test)]
mod tests {
    use qbfkit_aig::{sim, Lit};

    use super::*;
    use crate::{expansion::Expansion, simplify::Cleanup};

    #[test]
    fn eliminates_from_conjunction() {
        let formula = Formula::var("x") & Formula::var("y");
        let mut eliminator = Eliminator::new(Expansion::default(), Cleanup);
        let mut projected = eliminator.eliminate(&formula, ["x"]).unwrap();

        let y = projected.input("y");
        let (_, out) = projected.output(0);
        assert!(sim::equivalent(&mut projected, out, y));
    }

    #[test]
    fn ignores_foreign_variables() {
        let formula = Formula::var("x") | Formula::var("y");
        let mut eliminator = Eliminator::new(Expansion::default(), Cleanup);
        let projected = eliminator.eliminate(&formula, ["z", "y", "y"]).unwrap();

        assert_eq!(projected.input_names().collect::<Vec<_>>(), ["x"]);
        // (x | 0) | (x | 1)
        assert_eq!(projected.output(0).1, Lit::TRUE);
    }
}
