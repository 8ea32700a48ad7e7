//! Command line interface for deciding and projecting quantified AIGER circuits.
#![deny(unsafe_code)]

use std::{ffi::OsString, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use qbfkit_aig::{aag, Formula};
use qbfkit_core::{
    BridgeConfig, Cadet, CadetConfig, Cleanup, DecisionOracle, DimacsSolver, Dispatcher,
    Eliminator, Exhaustive, Expansion, ExpansionConfig, Quantifier, QuantifierBlock, SatOracle,
};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide a closed quantified formula given as a single output ASCII AIGER file.
    Decide {
        input: OsString,
        /// Quantifier block, outermost first, e.g. `-q e:x,y -q a:z`. Without any block, all
        /// inputs are existentially quantified.
        #[clap(short = 'q', long = "quantifier")]
        quantifiers: Vec<QuantifierBlock>,
        #[clap(long)]
        jsonl_output: bool,
        #[clap(flatten)]
        procedures: Procedures,
    },
    /// Existentially quantify inputs of a single output ASCII AIGER file.
    Eliminate {
        input: OsString,
        /// Inputs to eliminate.
        #[clap(short = 'x', long = "variable", required = true)]
        variables: Vec<String>,
        /// Where to write the projected circuit, defaults to stdout.
        #[clap(short = 'o', long)]
        output: Option<PathBuf>,
        #[clap(flatten)]
        procedures: Procedures,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OracleKind {
    /// The external CADET solver.
    Cadet,
    /// In-process Shannon expansion, for small instances.
    Expansion,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SatKind {
    /// In-process enumeration of all assignments.
    Exhaustive,
    /// An external DIMACS SAT solver.
    Dimacs,
}

#[derive(clap::Args, Debug)]
struct Procedures {
    #[clap(long, value_enum, default_value = "cadet")]
    oracle: OracleKind,
    /// CADET executable.
    #[clap(long, default_value = "cadet")]
    cadet: PathBuf,
    /// Disable CADET's CEGAR mode.
    #[clap(long)]
    no_cegar: bool,
    #[clap(long, default_value = "1")]
    cadet_verbosity: u32,
    /// Limit on controlled inputs for the expansion oracle.
    #[clap(long, default_value = "16")]
    max_controlled: usize,
    /// Prefix used to mark controlled inputs.
    #[clap(long, default_value = qbfkit_core::bridge::DEFAULT_RENAME_PREFIX)]
    rename_prefix: String,
    #[clap(long, value_enum, default_value = "exhaustive")]
    sat: SatKind,
    /// DIMACS SAT solver executable.
    #[clap(long, default_value = "kissat")]
    sat_solver: PathBuf,
    /// Limit on inputs for exhaustive satisfiability checks.
    #[clap(long, default_value = "20")]
    max_inputs: usize,
}

impl Procedures {
    fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            rename_prefix: self.rename_prefix.clone(),
        }
    }

    fn sat(&self) -> Box<dyn SatOracle> {
        match self.sat {
            SatKind::Exhaustive => Box::new(Exhaustive {
                max_inputs: self.max_inputs,
            }),
            SatKind::Dimacs => Box::new(DimacsSolver::new(&self.sat_solver)),
        }
    }

    fn oracle(&self) -> Box<dyn DecisionOracle> {
        match self.oracle {
            OracleKind::Cadet => Box::new(Cadet::with_config(CadetConfig {
                program: self.cadet.clone(),
                cegar: !self.no_cegar,
                verbosity: self.cadet_verbosity,
                ..CadetConfig::default()
            })),
            OracleKind::Expansion => Box::new(Expansion::with_config(
                self.sat(),
                ExpansionConfig {
                    max_controlled: self.max_controlled,
                },
            )),
        }
    }
}

fn read_formula(input: &OsString) -> color_eyre::Result<Formula> {
    let aig = aag::read_file(input)?;
    log::info!(
        "read {} inputs, {} outputs, {} and gates",
        aig.input_count(),
        aig.output_count(),
        aig.and_count()
    );
    Ok(Formula::from_circuit(aig)?)
}

fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    qbfkit_logger::setup();

    match args.command {
        Command::Decide {
            input,
            mut quantifiers,
            jsonl_output,
            procedures,
        } => {
            let formula = read_formula(&input)?;

            if quantifiers.is_empty() {
                quantifiers.push(QuantifierBlock::new(Quantifier::Exists, formula.inputs()));
            }

            let mut dispatcher = Dispatcher::with_bridge_config(
                procedures.oracle(),
                procedures.sat(),
                procedures.bridge_config(),
            );
            let status = dispatcher.decide_status(&formula, quantifiers)?;

            log::info!("status: {status}");

            if jsonl_output {
                println!(
                    "{}",
                    serde_json::to_string(&json!({ "status": status.to_string() }))?
                );
            }
        }
        Command::Eliminate {
            input,
            variables,
            output,
            procedures,
        } => {
            let formula = read_formula(&input)?;

            let mut eliminator = Eliminator::with_bridge_config(
                procedures.oracle(),
                Cleanup,
                procedures.bridge_config(),
            );
            let projected = eliminator.eliminate(&formula, &variables)?;

            log::info!(
                "projection: {} inputs, {} and gates",
                projected.input_count(),
                projected.and_count()
            );

            match output {
                Some(path) => aag::write_file(&projected, path)?,
                None => aag::write(&projected, std::io::stdout().lock())?,
            }
        }
    }

    Ok(())
}
