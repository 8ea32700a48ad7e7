//! The CADET 2QBF solver as a decision oracle.
use std::{path::PathBuf, process::Command};

use qbfkit_aig::aag;

use crate::{
    oracle::{DecisionOracle, OracleCode, OracleOutcome, OracleQuery},
    process::{self, Runner},
    Error,
};

/// Configuration of the [`Cadet`] oracle.
#[derive(Clone, Debug)]
pub struct CadetConfig {
    /// The CADET executable.
    pub program: PathBuf,
    /// Arguments placed before all generated arguments.
    pub program_args: Vec<String>,
    /// Use CADET's counterexample guided abstraction refinement.
    pub cegar: bool,
    /// CADET's verbosity level.
    pub verbosity: u32,
}

impl Default for CadetConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("cadet"),
            program_args: vec![],
            cegar: true,
            verbosity: 1,
        }
    }
}

/// Runs CADET on circuits written to a temporary directory.
///
/// Each query gets a fresh directory containing `input.aag` and, for projections,
/// `result.aag`. The directory is removed when the query returns, whether it succeeds or not.
pub struct Cadet {
    config: CadetConfig,
    runner: Box<dyn Runner>,
}

impl std::fmt::Debug for Cadet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cadet")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Cadet {
    fn default() -> Self {
        Self::with_config(CadetConfig::default())
    }
}

impl Cadet {
    /// Creates an oracle using the given configuration.
    pub fn with_config(config: CadetConfig) -> Self {
        Self {
            config,
            runner: Box::new(process::Wait),
        }
    }

    /// Uses a custom runner for the CADET process, e.g. to impose a deadline.
    pub fn with_runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &CadetConfig {
        &self.config
    }

    fn run(&mut self, query: &OracleQuery, project: bool) -> Result<OracleOutcome, Error> {
        let dir = tempfile::Builder::new().prefix("qbfkit-").tempdir()?;
        let input = dir.path().join("input.aag");
        let result = dir.path().join("result.aag");

        aag::write_file(query.circuit, &input)?;

        let mut command = Command::new(&self.config.program);
        command.args(&self.config.program_args).arg("--sat_by_qbf");
        if project {
            command.arg("-e").arg(&result);
        }
        if self.config.cegar {
            command.arg("--cegar");
        }
        command
            .arg("--aiger_controllable_inputs")
            .arg(query.controlled_prefix)
            .arg("-v")
            .arg(self.config.verbosity.to_string())
            .arg(&input);

        let exit_code = process::run_captured(&mut *self.runner, &mut command)?;
        let code = OracleCode::from_exit_code(exit_code);
        log::debug!("cadet answered {code}");

        let circuit = if project && code == OracleCode::True {
            Some(aag::read_file(&result)?)
        } else {
            None
        };

        dir.close()?;
        Ok(OracleOutcome { code, circuit })
    }
}

impl DecisionOracle for Cadet {
    fn decide(&mut self, query: &OracleQuery) -> Result<OracleCode, Error> {
        Ok(self.run(query, false)?.code)
    }

    fn project(&mut self, query: &OracleQuery) -> Result<OracleOutcome, Error> {
        self.run(query, true)
    }
}
