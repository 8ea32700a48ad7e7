//! Satisfiability and validity checks for single block prefixes.
use std::{fs::File, path::PathBuf, process::Command};

use qbfkit_aig::{cnf, sim, Formula};

use crate::{
    process::{self, Runner},
    Error,
};

/// A satisfiability checker for formulas.
pub trait SatOracle {
    /// Returns whether some assignment satisfies the formula.
    fn is_satisfiable(&mut self, formula: &Formula) -> Result<bool, Error>;

    /// Returns whether every assignment satisfies the formula.
    fn is_valid(&mut self, formula: &Formula) -> Result<bool, Error> {
        Ok(!self.is_satisfiable(&!formula)?)
    }
}

impl<T: SatOracle + ?Sized> SatOracle for &mut T {
    fn is_satisfiable(&mut self, formula: &Formula) -> Result<bool, Error> {
        (**self).is_satisfiable(formula)
    }

    fn is_valid(&mut self, formula: &Formula) -> Result<bool, Error> {
        (**self).is_valid(formula)
    }
}

impl<T: SatOracle + ?Sized> SatOracle for Box<T> {
    fn is_satisfiable(&mut self, formula: &Formula) -> Result<bool, Error> {
        (**self).is_satisfiable(formula)
    }

    fn is_valid(&mut self, formula: &Formula) -> Result<bool, Error> {
        (**self).is_valid(formula)
    }
}

/// Decides satisfiability by simulating all assignments, 64 at a time.
#[derive(Clone, Debug)]
pub struct Exhaustive {
    /// Formulas with more free variables are refused with [`Error::InputLimit`].
    ///
    /// Values above [`sim::MAX_SEARCH_INPUTS`] act as that limit.
    pub max_inputs: usize,
}

impl Default for Exhaustive {
    fn default() -> Self {
        Self { max_inputs: 20 }
    }
}

impl SatOracle for Exhaustive {
    fn is_satisfiable(&mut self, formula: &Formula) -> Result<bool, Error> {
        let inputs = formula.input_count();
        let limit = self.max_inputs.min(sim::MAX_SEARCH_INPUTS);
        if inputs > limit {
            return Err(Error::InputLimit { inputs, limit });
        }
        let assignment = sim::find_assignment(formula.circuit(), formula.output());
        log::debug!(
            "exhaustive check over {inputs} inputs: {}",
            if assignment.is_some() { "sat" } else { "unsat" }
        );
        Ok(assignment.is_some())
    }
}

/// Exit code of a SAT solver that found a model.
pub const SAT: i32 = 10;
/// Exit code of a SAT solver that proved unsatisfiability.
pub const UNSAT: i32 = 20;

/// Decides satisfiability using an external DIMACS SAT solver.
///
/// The formula is Tseitin encoded into a temporary DIMACS file, which is passed as the last
/// argument. The solver must report its answer using the conventional exit codes.
pub struct DimacsSolver {
    /// The solver executable.
    pub program: PathBuf,
    /// Arguments placed before the problem file.
    pub args: Vec<String>,
    runner: Box<dyn Runner>,
}

impl std::fmt::Debug for DimacsSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimacsSolver")
            .field("program", &self.program)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl Default for DimacsSolver {
    fn default() -> Self {
        Self::new("kissat")
    }
}

impl DimacsSolver {
    /// Uses the given solver executable without extra arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            runner: Box::new(process::Wait),
        }
    }

    /// Adds arguments passed before the problem file.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Uses a custom runner for the solver process.
    pub fn with_runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }
}

impl SatOracle for DimacsSolver {
    fn is_satisfiable(&mut self, formula: &Formula) -> Result<bool, Error> {
        let dir = tempfile::Builder::new().prefix("qbfkit-").tempdir()?;
        let path = dir.path().join("problem.cnf");
        cnf::write_dimacs(formula.circuit(), &[formula.output()], File::create(&path)?)?;

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(&path);
        let code = process::run_captured(&mut *self.runner, &mut command)?;

        log::debug!("sat solver exit code {code}");
        match code {
            SAT => Ok(true),
            UNSAT => Ok(false),
            code => Err(Error::ExternalProcedure { code: Some(code) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustive_sat_and_valid() {
        let a = Formula::var("a");
        let contradiction = &a & &!&a;
        let tautology = &a | &!&a;

        let mut sat = Exhaustive::default();
        assert!(!sat.is_satisfiable(&contradiction).unwrap());
        assert!(sat.is_valid(&tautology).unwrap());
        assert!(sat.is_satisfiable(&a).unwrap());
        assert!(!sat.is_valid(&a).unwrap());
    }

    #[test]
    fn exhaustive_without_inputs() {
        let mut sat = Exhaustive::default();
        assert!(sat.is_valid(&Formula::constant(true)).unwrap());
        assert!(!sat.is_satisfiable(&Formula::constant(false)).unwrap());
    }

    #[test]
    fn exhaustive_limit() {
        let mut formula = Formula::var("x0");
        for i in 1..5 {
            formula = formula ^ Formula::var(&format!("x{i}"));
        }
        let mut sat = Exhaustive { max_inputs: 4 };
        assert!(matches!(
            sat.is_satisfiable(&formula),
            Err(Error::InputLimit {
                inputs: 5,
                limit: 4
            })
        ));
    }

    #[test]
    fn exhaustive_limit_is_capped() {
        let mut formula = Formula::constant(true);
        for i in 0..70 {
            formula = formula & Formula::var(&format!("x{i}"));
        }
        let mut sat = Exhaustive { max_inputs: 100 };
        assert!(matches!(
            sat.is_satisfiable(&formula),
            Err(Error::InputLimit {
                inputs: 70,
                limit: sim::MAX_SEARCH_INPUTS
            })
        ));
    }
}
