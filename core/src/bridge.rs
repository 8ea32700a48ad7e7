//! Preparing circuits for decision oracles and interpreting their answers.
use qbfkit_aig::{Aig, Formula};
use zwohash::HashSet;

use crate::{
    oracle::{DecisionOracle, OracleCode, OracleQuery},
    Error,
};

/// Prefix marking controlled inputs when no other prefix is configured.
pub const DEFAULT_RENAME_PREFIX: &str = "FbGiGjE7ol_";

/// Configuration of a [`Bridge`].
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Prefix prepended to the names of controlled inputs.
    ///
    /// No input of a formula passed to the bridge may already start with this prefix.
    pub rename_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            rename_prefix: DEFAULT_RENAME_PREFIX.to_owned(),
        }
    }
}

/// What the oracle is asked to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Decide the formula.
    Decide,
    /// Eliminate the controlled variables.
    Project,
}

/// Protocol adapter between formulas and a [`DecisionOracle`].
///
/// The bridge marks controlled variables by renaming them with a reserved prefix and hands the
/// renamed circuit to the oracle. It does no reasoning of its own.
#[derive(Debug)]
pub struct Bridge<O> {
    config: BridgeConfig,
    oracle: O,
}

impl<O: DecisionOracle> Bridge<O> {
    /// Creates a bridge using the default configuration.
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, BridgeConfig::default())
    }

    /// Creates a bridge using the given configuration.
    pub fn with_config(oracle: O, config: BridgeConfig) -> Self {
        Self { config, oracle }
    }

    /// The configuration in use.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The wrapped oracle.
    pub fn oracle(&mut self) -> &mut O {
        &mut self.oracle
    }

    /// Consumes the bridge, returning the wrapped oracle.
    pub fn into_oracle(self) -> O {
        self.oracle
    }

    /// Runs the oracle on `formula` with the given variables controlled.
    ///
    /// In [`Mode::Decide`] the oracle's answer is returned without a circuit. In
    /// [`Mode::Project`] anything but [`OracleCode::True`] is an error and the projected circuit
    /// is returned with the original variable names.
    ///
    /// Fails with [`Error::VariablePrefixCollision`] before the oracle is called if an input
    /// already starts with the reserved prefix.
    pub fn invoke(
        &mut self,
        formula: &Formula,
        controlled: &[String],
        mode: Mode,
    ) -> Result<(OracleCode, Option<Aig>), Error> {
        let prefix = self.config.rename_prefix.as_str();

        if let Some(variable) = formula.inputs().find(|name| name.starts_with(prefix)) {
            return Err(Error::VariablePrefixCollision {
                variable: variable.to_owned(),
                prefix: prefix.to_owned(),
            });
        }

        let controlled: HashSet<&str> = controlled.iter().map(String::as_str).collect();
        let renamed = formula
            .circuit()
            .rename_inputs(|name| controlled.contains(name).then(|| format!("{prefix}{name}")))?;

        let query = OracleQuery {
            circuit: &renamed,
            controlled_prefix: prefix,
        };

        log::debug!(
            "invoking oracle ({mode:?}) with {} of {} inputs controlled",
            query.controlled().count(),
            renamed.input_count()
        );

        match mode {
            Mode::Decide => match self.oracle.decide(&query)? {
                OracleCode::Error(code) => Err(Error::ExternalProcedure { code: Some(code) }),
                code => Ok((code, None)),
            },
            Mode::Project => {
                let outcome = self.oracle.project(&query)?;
                match (outcome.code, outcome.circuit) {
                    (OracleCode::Error(code), _) => {
                        Err(Error::ExternalProcedure { code: Some(code) })
                    }
                    (OracleCode::True, Some(circuit)) => {
                        let restored = circuit.rename_inputs(|name| {
                            name.strip_prefix(prefix).map(str::to_owned)
                        })?;
                        Ok((OracleCode::True, Some(restored)))
                    }
                    (code, _) => Err(Error::ProjectionFailed { code }),
                }
            }
        }
    }
}
