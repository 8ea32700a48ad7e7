//! Reading and writing the ASCII AIGER format.
//!
//! Only combinational circuits are supported. Input and output names are stored in the AIGER
//! symbol table, which is how external tools are told which inputs they control.
use std::{
    borrow::Cow,
    fs::File,
    io::{self, Read},
    path::Path,
};

use flussab::DeferredWriter;
use flussab_aiger::{
    aig::{self as aiger, AigStructureError, AndGate, RenumberConfig, Symbol, SymbolTarget},
    ascii,
};

use crate::{
    aig::{Aig, AigError, Node},
    lit::{Lit, Var},
};

/// Errors produced while reading an ASCII AIGER file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Opening the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The input is not well-formed ASCII AIGER, or reading it failed.
    #[error(transparent)]
    Syntax(#[from] flussab_aiger::ParseError),
    /// The AND gates are cyclic, redefine a literal or use an undefined literal.
    #[error(transparent)]
    Structure(#[from] AigStructureError<Lit>),
    /// The file declares latches.
    #[error("latches are not supported, only combinational circuits can be read")]
    Latches,
    /// The file declares bad state properties, invariant constraints, justice properties or
    /// fairness constraints.
    #[error("AIGER property and constraint sections are not supported")]
    Properties,
    /// The symbol table produces an invalid circuit.
    #[error(transparent)]
    Aig(#[from] AigError),
}

/// Writes an AIG in the ASCII AIGER format.
///
/// Inputs are numbered in input order followed by the AND gates in topological order. All input
/// and output names are written to the symbol table.
pub fn write(aig: &Aig, out: impl io::Write) -> io::Result<()> {
    for name in aig.input_names().chain(aig.outputs().map(|(name, _)| name)) {
        if name.contains(['\n', '\r']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("symbol {name:?} contains a line break"),
            ));
        }
    }

    let exported = export(aig);

    let mut writer = DeferredWriter::from_write(out);
    ascii::Writer::<Lit>::new(&mut writer).write_aig(&exported);
    writer.flush_defer_err();
    writer.check_io_error()
}

/// Writes an AIG to a file in the ASCII AIGER format.
pub fn write_file(aig: &Aig, path: impl AsRef<Path>) -> io::Result<()> {
    write(aig, File::create(path)?)
}

/// Converts an AIG into AIGER numbering, naming every input and output.
fn export(aig: &Aig) -> aiger::Aig<Lit> {
    let mut aiger_from_var = vec![Var::FALSE; aig.len()];
    for (index, (_, lit)) in aig.inputs().enumerate() {
        aiger_from_var[lit.var().index()] = Var::from_index(index + 1);
    }
    let mut next_index = aig.input_count() + 1;
    for index in 1..aig.len() {
        if let Node::And(_) = aig.node(Var::from_index(index)) {
            aiger_from_var[index] = Var::from_index(next_index);
            next_index += 1;
        }
    }
    let map = |lit: Lit| lit.lookup(|var| aiger_from_var[var.index()].as_lit());

    let mut and_gates = Vec::with_capacity(aig.and_count());
    for index in 1..aig.len() {
        let var = Var::from_index(index);
        if let Node::And(inputs) = aig.node(var) {
            let [a, b] = inputs.map(map);
            and_gates.push(AndGate {
                inputs: if a >= b { [a, b] } else { [b, a] },
                output: map(var.as_lit()),
            });
        }
    }

    let input_symbols = aig.input_names().enumerate().map(|(index, name)| Symbol {
        target: SymbolTarget::Input(index),
        name: Cow::Owned(name.to_owned()),
    });
    let output_symbols = aig.outputs().enumerate().map(|(index, (name, _))| Symbol {
        target: SymbolTarget::Output(index),
        name: Cow::Owned(name.to_owned()),
    });

    aiger::Aig {
        max_var_index: next_index - 1,
        inputs: (1..=aig.input_count())
            .map(|index| Var::from_index(index).as_lit())
            .collect(),
        outputs: aig.outputs().map(|(_, lit)| map(lit)).collect(),
        and_gates,
        symbols: input_symbols.chain(output_symbols).collect(),
        comment: Some("written by qbfkit".to_owned()),
        ..aiger::Aig::default()
    }
}

/// Reads an AIG from a file in the ASCII AIGER format.
pub fn read_file(path: impl AsRef<Path>) -> Result<Aig, ParseError> {
    read(File::open(path)?)
}

/// Reads an AIG in the ASCII AIGER format.
///
/// AND gates may be defined in any order. Inputs without a symbol are named `i<index>`, outputs
/// without a symbol `o<index>`. Only the fanin cones of the outputs are kept.
pub fn read(input: impl Read) -> Result<Aig, ParseError> {
    let parser = ascii::Parser::<Lit>::from_read(input, Default::default())?;

    let header = parser.header();
    if header.latch_count != 0 {
        return Err(ParseError::Latches);
    }
    if header.bad_state_property_count != 0
        || header.invariant_constraint_count != 0
        || header.justice_property_count != 0
        || header.fairness_constraint_count != 0
    {
        return Err(ParseError::Properties);
    }

    let parsed = parser.parse()?;
    let aig = import(&parsed)?;

    log::trace!(
        "read aag with {} inputs, {} and gates",
        aig.input_count(),
        aig.and_count()
    );

    Ok(aig)
}

/// Builds an AIG from a parsed combinational AIGER file.
fn import(parsed: &aiger::Aig<Lit>) -> Result<Aig, ParseError> {
    // topologically orders the gates in the output cones, detecting cycles and undefined literals
    let config = RenumberConfig::default().trim(true);
    let (ordered, _) = aiger::Renumber::renumber_aig(config, parsed)?;

    let mut input_names: Vec<Option<&str>> = vec![None; ordered.input_count];
    let mut output_names: Vec<Option<&str>> = vec![None; ordered.outputs.len()];
    for symbol in &ordered.symbols {
        match symbol.target {
            SymbolTarget::Input(index) => input_names[index] = Some(&*symbol.name),
            SymbolTarget::Output(index) => output_names[index] = Some(&*symbol.name),
            _ => (),
        }
    }

    let mut aig = Aig::new();
    let mut lits = Vec::with_capacity(ordered.max_var_index + 1);
    lits.push(Lit::FALSE);

    for (index, name) in input_names.into_iter().enumerate() {
        let name = name.map_or_else(|| format!("i{index}"), str::to_owned);
        lits.push(aig.try_add_input(name)?);
    }

    for gate in &ordered.and_gates {
        let [a, b] = gate.inputs.map(|lit| lit.lookup(|var| lits[var.index()]));
        let output = aig.and(a, b);
        lits.push(output);
    }

    for (index, (lit, name)) in ordered.outputs.iter().zip(output_names).enumerate() {
        let name = name.map_or_else(|| format!("o{index}"), str::to_owned);
        aig.add_output(name, lit.lookup(|var| lits[var.index()]));
    }

    Ok(aig)
}
