//! Interface to two-level QBF decision procedures.
use std::fmt;

use qbfkit_aig::Aig;

use crate::Error;

/// Exit code reporting a true formula.
pub const QBF_IS_TRUE: i32 = 10;
/// Exit code reporting a false formula.
pub const QBF_IS_FALSE: i32 = 20;
/// Exit code reporting that the procedure gave up.
pub const QBF_IS_UNKNOWN: i32 = 30;

/// Answer of a decision oracle.
///
/// Codes outside the fixed table are kept as [`OracleCode::Error`] and are never interpreted as
/// an answer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OracleCode {
    /// The formula is true.
    True,
    /// The formula is false.
    False,
    /// The oracle could not decide the formula.
    Unknown,
    /// Any other status.
    Error(i32),
}

impl OracleCode {
    /// Interprets a process exit code.
    pub fn from_exit_code(code: i32) -> Self {
        match code {
            QBF_IS_TRUE => OracleCode::True,
            QBF_IS_FALSE => OracleCode::False,
            QBF_IS_UNKNOWN => OracleCode::Unknown,
            code => OracleCode::Error(code),
        }
    }

    /// The corresponding process exit code.
    pub fn exit_code(self) -> i32 {
        match self {
            OracleCode::True => QBF_IS_TRUE,
            OracleCode::False => QBF_IS_FALSE,
            OracleCode::Unknown => QBF_IS_UNKNOWN,
            OracleCode::Error(code) => code,
        }
    }

    /// Returns the code answering the negated formula.
    pub fn negate(self) -> Self {
        match self {
            OracleCode::True => OracleCode::False,
            OracleCode::False => OracleCode::True,
            other => other,
        }
    }
}

impl fmt::Display for OracleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleCode::True => f.write_str("true"),
            OracleCode::False => f.write_str("false"),
            OracleCode::Unknown => f.write_str("unknown"),
            OracleCode::Error(code) => write!(f, "error ({code})"),
        }
    }
}

/// A query for a decision oracle.
///
/// The circuit has a single output. Every input whose name starts with `controlled_prefix` is
/// controlled by the oracle, all other inputs are uncontrolled.
#[derive(Clone, Copy, Debug)]
pub struct OracleQuery<'a> {
    /// The circuit to decide or project.
    pub circuit: &'a Aig,
    /// Marks the controlled inputs.
    pub controlled_prefix: &'a str,
}

impl<'a> OracleQuery<'a> {
    /// Returns whether the named input is controlled by the oracle.
    pub fn is_controlled(&self, name: &str) -> bool {
        name.starts_with(self.controlled_prefix)
    }

    /// Names of the controlled inputs, in input order.
    pub fn controlled(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.circuit
            .input_names()
            .filter(move |name| self.is_controlled(name))
    }
}

/// Result of a projection query.
#[derive(Clone, Debug)]
pub struct OracleOutcome {
    /// The oracle's answer.
    pub code: OracleCode,
    /// The projected circuit, present when the answer is [`OracleCode::True`].
    pub circuit: Option<Aig>,
}

/// A procedure for two-level QBF over circuits.
///
/// The native question of an oracle is whether for every assignment of the uncontrolled inputs
/// there is an assignment of the controlled inputs satisfying the circuit's output.
pub trait DecisionOracle {
    /// Decides the query.
    fn decide(&mut self, query: &OracleQuery) -> Result<OracleCode, Error>;

    /// Eliminates the controlled inputs, returning a circuit over the uncontrolled inputs that is
    /// equivalent to existentially quantifying the controlled ones.
    fn project(&mut self, query: &OracleQuery) -> Result<OracleOutcome, Error>;
}

impl<T: DecisionOracle + ?Sized> DecisionOracle for &mut T {
    fn decide(&mut self, query: &OracleQuery) -> Result<OracleCode, Error> {
        (**self).decide(query)
    }

    fn project(&mut self, query: &OracleQuery) -> Result<OracleOutcome, Error> {
        (**self).project(query)
    }
}

impl<T: DecisionOracle + ?Sized> DecisionOracle for Box<T> {
    fn decide(&mut self, query: &OracleQuery) -> Result<OracleCode, Error> {
        (**self).decide(query)
    }

    fn project(&mut self, query: &OracleQuery) -> Result<OracleOutcome, Error> {
        (**self).project(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_table() {
        assert_eq!(OracleCode::from_exit_code(10), OracleCode::True);
        assert_eq!(OracleCode::from_exit_code(20), OracleCode::False);
        assert_eq!(OracleCode::from_exit_code(30), OracleCode::Unknown);
        assert_eq!(OracleCode::from_exit_code(0), OracleCode::Error(0));
        assert_eq!(OracleCode::from_exit_code(1), OracleCode::Error(1));
        for code in [10, 20, 30, 0, 139] {
            assert_eq!(OracleCode::from_exit_code(code).exit_code(), code);
        }
    }

    #[test]
    fn negation_keeps_non_answers() {
        assert_eq!(OracleCode::True.negate(), OracleCode::False);
        assert_eq!(OracleCode::False.negate(), OracleCode::True);
        assert_eq!(OracleCode::Unknown.negate(), OracleCode::Unknown);
        assert_eq!(OracleCode::Error(3).negate(), OracleCode::Error(3));
    }

    #[test]
    fn controlled_inputs() {
        let mut aig = Aig::new();
        aig.input("x");
        aig.input("p_y");
        aig.input("z");
        let query = OracleQuery {
            circuit: &aig,
            controlled_prefix: "p_",
        };
        assert_eq!(query.controlled().collect::<Vec<_>>(), ["p_y"]);
        assert!(!query.is_controlled("x"));
    }
}
