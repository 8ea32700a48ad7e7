//! Choosing a decision procedure for a quantified formula.
use std::fmt;

use qbfkit_aig::Formula;
use zwohash::HashSet;

use crate::{
    bridge::{Bridge, BridgeConfig, Mode},
    oracle::{DecisionOracle, OracleCode},
    prefix::{Quantifier, QuantifierPrefix},
    sat::SatOracle,
    Error,
};

/// Truth value of a closed quantified formula.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Decision {
    /// The formula is true.
    True,
    /// The formula is false.
    False,
    /// The two-level oracle gave up.
    Unknown,
}

impl Decision {
    /// Returns the truth value, if known.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Decision::True => Some(true),
            Decision::False => Some(false),
            Decision::Unknown => None,
        }
    }
}

impl From<bool> for Decision {
    fn from(value: bool) -> Self {
        if value {
            Decision::True
        } else {
            Decision::False
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::True => "true",
            Decision::False => "false",
            Decision::Unknown => "unknown",
        })
    }
}

/// Decides closed quantified formulas with at most two quantifier blocks.
///
/// A single block is decided by the [`SatOracle`], two blocks by the [`DecisionOracle`] with the
/// inner block's variables controlled.
#[derive(Debug)]
pub struct Dispatcher<O, S> {
    bridge: Bridge<O>,
    sat: S,
}

impl<O: DecisionOracle, S: SatOracle> Dispatcher<O, S> {
    /// Creates a dispatcher using the default bridge configuration.
    pub fn new(oracle: O, sat: S) -> Self {
        Self::with_bridge_config(oracle, sat, BridgeConfig::default())
    }

    /// Creates a dispatcher using the given bridge configuration.
    pub fn with_bridge_config(oracle: O, sat: S, config: BridgeConfig) -> Self {
        Self {
            bridge: Bridge::with_config(oracle, config),
            sat,
        }
    }

    /// The bridge to the two-level oracle.
    pub fn bridge(&mut self) -> &mut Bridge<O> {
        &mut self.bridge
    }

    /// The satisfiability checker.
    pub fn sat(&mut self) -> &mut S {
        &mut self.sat
    }

    /// Decides `formula` under the quantifier prefix, which is normalized first.
    ///
    /// An undecided formula is reported as [`Error::Inconclusive`], use
    /// [`decide_status`][Self::decide_status] to handle that case separately.
    pub fn decide<B, V>(
        &mut self,
        formula: &Formula,
        prefix: impl IntoIterator<Item = B>,
    ) -> Result<bool, Error>
    where
        B: Into<(Quantifier, V)>,
        V: IntoIterator,
        V::Item: fmt::Display,
    {
        self.decide_status(formula, prefix)?
            .as_bool()
            .ok_or(Error::Inconclusive)
    }

    /// Decides `formula` under the quantifier prefix, which is normalized first.
    pub fn decide_status<B, V>(
        &mut self,
        formula: &Formula,
        prefix: impl IntoIterator<Item = B>,
    ) -> Result<Decision, Error>
    where
        B: Into<(Quantifier, V)>,
        V: IntoIterator,
        V::Item: fmt::Display,
    {
        let prefix = QuantifierPrefix::normalize(prefix)?;
        self.decide_normalized(formula, &prefix)
    }

    /// Decides `formula` under an already normalized prefix.
    ///
    /// Prefixes with more than two blocks are rejected before anything else is checked.
    pub fn decide_normalized(
        &mut self,
        formula: &Formula,
        prefix: &QuantifierPrefix,
    ) -> Result<Decision, Error> {
        if prefix.len() > 2 {
            return Err(Error::UnsupportedAlternationDepth {
                blocks: prefix.len(),
            });
        }

        check_closed(formula, prefix)?;

        match prefix.blocks() {
            [block] => {
                log::debug!(
                    "deciding {} by a {} check",
                    formula.label(),
                    match block.quantifier {
                        Quantifier::Forall => "validity",
                        Quantifier::Exists => "satisfiability",
                    }
                );
                let value = match block.quantifier {
                    Quantifier::Forall => self.sat.is_valid(formula)?,
                    Quantifier::Exists => self.sat.is_satisfiable(formula)?,
                };
                Ok(value.into())
            }
            [_, inner] => {
                // the oracle answers forall-exists, the inner block is always controlled
                let controlled = &inner.variables;
                let code = match inner.quantifier {
                    Quantifier::Exists => {
                        log::debug!("deciding {} as forall-exists", formula.label());
                        self.bridge.invoke(formula, controlled, Mode::Decide)?.0
                    }
                    Quantifier::Forall => {
                        log::debug!("deciding {} as exists-forall by negation", formula.label());
                        let (code, _) = self.bridge.invoke(&!formula, controlled, Mode::Decide)?;
                        code.negate()
                    }
                };
                match code {
                    OracleCode::True => Ok(Decision::True),
                    OracleCode::False => Ok(Decision::False),
                    OracleCode::Unknown => Ok(Decision::Unknown),
                    OracleCode::Error(code) => Err(Error::ExternalProcedure { code: Some(code) }),
                }
            }
            [] => Err(Error::EmptyPrefix),
            blocks => Err(Error::UnsupportedAlternationDepth {
                blocks: blocks.len(),
            }),
        }
    }
}

/// Checks that the prefix binds exactly the inputs of the formula.
fn check_closed(formula: &Formula, prefix: &QuantifierPrefix) -> Result<(), Error> {
    let bound: HashSet<&str> = prefix.variables().collect();
    let inputs: HashSet<&str> = formula.inputs().collect();

    let unbound: Vec<String> = formula
        .inputs()
        .filter(|name| !bound.contains(name))
        .map(str::to_owned)
        .collect();
    let unknown: Vec<String> = prefix
        .variables()
        .filter(|name| !inputs.contains(name))
        .map(str::to_owned)
        .collect();

    if unbound.is_empty() && unknown.is_empty() {
        Ok(())
    } else {
        Err(Error::NotClosed { unbound, unknown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expansion::Expansion, sat::Exhaustive};
    use Quantifier::{Exists, Forall};

    fn dispatcher() -> Dispatcher<Expansion, Exhaustive> {
        Dispatcher::new(Expansion::default(), Exhaustive::default())
    }

    #[test]
    fn closedness() {
        let formula = Formula::var("x") & Formula::var("y");
        let result = dispatcher().decide(&formula, [(Exists, vec!["x", "z"])]);
        assert!(matches!(
            result,
            Err(Error::NotClosed { unbound, unknown }) if unbound == ["y"] && unknown == ["z"]
        ));
    }

    #[test]
    fn empty_prefix() {
        let formula = Formula::constant(true);
        let result = dispatcher().decide(&formula, Vec::<(Quantifier, Vec<String>)>::new());
        assert!(matches!(result, Err(Error::EmptyPrefix)));

        let result = dispatcher().decide(&formula, [(Exists, Vec::<String>::new())]);
        assert!(matches!(result, Err(Error::EmptyPrefix)));
    }

    #[test]
    fn depth_is_checked_first() {
        let formula = Formula::var("x");
        let result = dispatcher().decide(
            &formula,
            [(Exists, vec!["a"]), (Forall, vec!["b"]), (Exists, vec!["c"])],
        );
        assert!(matches!(
            result,
            Err(Error::UnsupportedAlternationDepth { blocks: 3 })
        ));
    }

    #[test]
    fn decision_display() {
        assert_eq!(Decision::from(true).to_string(), "true");
        assert_eq!(Decision::Unknown.as_bool(), None);
    }
}
