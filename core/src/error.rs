//! Errors of the decision and elimination layer.
use std::io;

use qbfkit_aig::{AigError, ParseError};

/// Errors returned by [`Dispatcher`][crate::Dispatcher], [`Eliminator`][crate::Eliminator] and
/// the oracles they use.
///
/// Errors are local to a single call. A failed call never produces a truth value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A variable occurs more than once in a quantifier prefix.
    #[error("variable `{0}` is quantified more than once")]
    DuplicateVariable(String),
    /// The prefix does not bind exactly the inputs of the formula.
    #[error(
        "formula is not closed under the prefix (unbound inputs: {unbound:?}, \
         variables that are not inputs: {unknown:?})"
    )]
    NotClosed {
        /// Inputs of the formula that no block binds.
        unbound: Vec<String>,
        /// Bound variables that are not inputs of the formula.
        unknown: Vec<String>,
    },
    /// The prefix has no blocks after normalization.
    #[error("empty quantifier prefix, evaluate ground formulas directly")]
    EmptyPrefix,
    /// The prefix has more than two blocks after normalization.
    #[error("{blocks} quantifier blocks, at most two are supported")]
    UnsupportedAlternationDepth {
        /// Number of blocks after normalization.
        blocks: usize,
    },
    /// An input already starts with the prefix reserved for controlled variables.
    #[error("input `{variable}` collides with the reserved prefix `{prefix}`")]
    VariablePrefixCollision {
        /// The offending input.
        variable: String,
        /// The reserved prefix.
        prefix: String,
    },
    /// An external procedure exited with a status outside its code table.
    #[error("external procedure failed with {}", exit_description(.code))]
    ExternalProcedure {
        /// The exit code, `None` if the process was terminated by a signal.
        code: Option<i32>,
    },
    /// Projection did not report success.
    #[error("projection failed, oracle answered {code}")]
    ProjectionFailed {
        /// Code returned by the oracle.
        code: crate::OracleCode,
    },
    /// The two-level oracle could not decide the formula.
    #[error("oracle could not decide the formula")]
    Inconclusive,
    /// An in-process procedure refused an instance that is too large.
    #[error("{inputs} inputs exceed the limit of {limit}")]
    InputLimit {
        /// Number of inputs of the instance.
        inputs: usize,
        /// Configured limit.
        limit: usize,
    },
    /// An external program could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// The program that was run.
        program: String,
        /// The underlying error.
        source: io::Error,
    },
    /// Reading or writing exchange files failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A circuit produced by an external procedure could not be read.
    #[error("failed to read result circuit: {0}")]
    Parse(#[from] ParseError),
    /// Constructing a derived circuit failed.
    #[error(transparent)]
    Aig(#[from] AigError),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_owned(),
    }
}
