//! Tseitin encoding of AIG cones into clauses.
use std::io;

use flussab::{write::text::ascii_digits, DeferredWriter};

use crate::{
    aig::{Aig, Node},
    lit::{Lit, Var},
};

/// Receiver for the clauses of a CNF encoding.
///
/// Literals passed to the sink use the numbering of the encoded AIG, so AIG variable `v` is CNF
/// variable `v`. [`Var::FALSE`] is only ever used in the unit clause forcing it false.
pub trait CnfSink {
    /// Error type for failing to accept a clause.
    type Error;

    /// Notifies the sink of an input within the encoded cone.
    #[allow(unused_variables)]
    fn input(&mut self, name: &str, lit: Lit) {}

    /// Adds a clause.
    fn clause(&mut self, clause: &[Lit]) -> Result<(), Self::Error>;
}

/// Encodes the cones of `roots` and asserts every root to be true.
///
/// Returns the number of variables used, i.e. one more than the largest variable index.
pub fn encode_asserted<Sink: CnfSink>(
    aig: &Aig,
    roots: &[Lit],
    sink: &mut Sink,
) -> Result<usize, Sink::Error> {
    let in_cone = aig.cone(roots.iter().copied());

    for (index, &used) in in_cone.iter().enumerate() {
        if !used {
            continue;
        }
        let output = Var::from_index(index).as_lit();
        match aig.node(Var::from_index(index)) {
            Node::False => sink.clause(&[!output])?,
            Node::Input(input) => sink.input(aig.input_name(input), output),
            Node::And([a, b]) => {
                sink.clause(&[output, !a, !b])?;
                sink.clause(&[!output, a])?;
                sink.clause(&[!output, b])?;
            }
        }
    }

    for &root in roots {
        sink.clause(&[root])?;
    }

    Ok(aig.len())
}

impl CnfSink for Vec<Vec<Lit>> {
    type Error = std::convert::Infallible;

    fn clause(&mut self, clause: &[Lit]) -> Result<(), Self::Error> {
        self.push(clause.into());
        Ok(())
    }
}

/// Writes the encoding of [`encode_asserted`] as a DIMACS CNF problem.
///
/// AIG variable `v` becomes DIMACS variable `v + 1`. Inputs are listed as `c input` comment
/// lines, which lets a model be mapped back to input names.
pub fn write_dimacs(aig: &Aig, roots: &[Lit], out: impl io::Write) -> io::Result<()> {
    let mut collected = Collected::default();
    let var_count = match encode_asserted(aig, roots, &mut collected) {
        Ok(var_count) => var_count,
        Err(never) => match never {},
    };

    let mut writer = DeferredWriter::from_write(out);

    for (name, lit) in &collected.inputs {
        writer.write_all_defer_err(b"c input ");
        ascii_digits(&mut writer, lit.var().index() + 1);
        writer.write_all_defer_err(b" ");
        writer.write_all_defer_err(name.as_bytes());
        writer.write_all_defer_err(b"\n");
    }

    writer.write_all_defer_err(b"p cnf ");
    ascii_digits(&mut writer, var_count);
    writer.write_all_defer_err(b" ");
    ascii_digits(&mut writer, collected.clauses.len());
    writer.write_all_defer_err(b"\n");

    for clause in &collected.clauses {
        for lit in clause {
            if lit.is_neg() {
                writer.write_all_defer_err(b"-");
            }
            ascii_digits(&mut writer, lit.var().index() + 1);
            writer.write_all_defer_err(b" ");
        }
        writer.write_all_defer_err(b"0\n");
    }

    writer.flush_defer_err();
    writer.check_io_error()
}

#[derive(Default)]
struct Collected {
    inputs: Vec<(String, Lit)>,
    clauses: Vec<Vec<Lit>>,
}

impl CnfSink for Collected {
    type Error = std::convert::Infallible;

    fn input(&mut self, name: &str, lit: Lit) {
        self.inputs.push((name.to_owned(), lit));
    }

    fn clause(&mut self, clause: &[Lit]) -> Result<(), Self::Error> {
        self.clauses.push(clause.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_only_the_cone() {
        let mut aig = Aig::new();
        let a = aig.input("a");
        let b = aig.input("b");
        let c = aig.input("c");
        let ab = aig.and(a, b);
        let _bc = aig.and(b, c);

        let mut clauses: Vec<Vec<Lit>> = vec![];
        let vars = encode_asserted(&aig, &[!ab], &mut clauses).unwrap();

        assert_eq!(vars, aig.len());
        // three gate clauses and the asserted root
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses.last().unwrap(), &[!ab]);
        assert!(clauses
            .iter()
            .flatten()
            .all(|lit| lit.var() != c.var()));
    }

    #[test]
    fn constant_root() {
        let aig = Aig::new();
        let mut clauses: Vec<Vec<Lit>> = vec![];
        encode_asserted(&aig, &[Lit::FALSE], &mut clauses).unwrap();
        assert_eq!(clauses, [vec![Lit::TRUE], vec![Lit::FALSE]]);
    }

    #[test]
    fn dimacs_output() {
        let mut aig = Aig::new();
        let a = aig.input("a");
        let b = aig.input("b");
        let ab = aig.and(a, !b);

        let mut out = vec![];
        write_dimacs(&aig, &[ab], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "c input 2 a\nc input 3 b\np cnf 4 4\n4 -2 3 0\n-4 2 0\n-4 -3 0\n4 0\n"
        );
    }
}
