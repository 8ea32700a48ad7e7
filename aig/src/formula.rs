//! Labeled single output Boolean formulas backed by an [`Aig`].
use std::ops;

use crate::{
    aig::{Aig, AigError},
    lit::Lit,
};

/// A Boolean formula represented by an AIG with exactly one output.
///
/// The output's name is the formula's label. The inputs of the AIG are the formula's free
/// variables, including inputs that the output does not depend on.
///
/// Combining formulas using `!`, `&`, `|` and `^` always produces a new formula. Inputs of the
/// operands are identified by name.
#[derive(Clone, Debug)]
pub struct Formula {
    aig: Aig,
}

impl Formula {
    /// Label used for formulas built from variables and constants.
    pub const DEFAULT_LABEL: &'static str = "out";

    /// A formula consisting of a single variable.
    pub fn var(name: &str) -> Self {
        let mut aig = Aig::new();
        let lit = aig.input(name);
        aig.add_output(Self::DEFAULT_LABEL, lit);
        Self { aig }
    }

    /// A constant formula without free variables.
    pub fn constant(value: bool) -> Self {
        let mut aig = Aig::new();
        aig.add_output(Self::DEFAULT_LABEL, Lit::constant(value));
        Self { aig }
    }

    /// Wraps a circuit, which must have exactly one output.
    pub fn from_circuit(aig: Aig) -> Result<Self, AigError> {
        if aig.output_count() != 1 {
            return Err(AigError::NotSingleOutput(aig.output_count()));
        }
        Ok(Self { aig })
    }

    /// The underlying circuit.
    pub fn circuit(&self) -> &Aig {
        &self.aig
    }

    /// Returns the underlying circuit.
    pub fn into_circuit(self) -> Aig {
        self.aig
    }

    /// The literal driving the formula's output.
    pub fn output(&self) -> Lit {
        self.aig.output(0).1
    }

    /// The formula's label.
    pub fn label(&self) -> &str {
        self.aig.output(0).0
    }

    /// Returns the same formula with a different label.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        let mut aig = Aig::new();
        for name in self.aig.input_names() {
            aig.input(name);
        }
        let lit = aig.import_cone(&self.aig, &[self.output()], |aig, name| aig.input(name))[0];
        aig.add_output(label, lit);
        Self { aig }
    }

    /// The names of the formula's free variables.
    pub fn inputs(&self) -> impl Iterator<Item = &str> + '_ {
        self.aig.input_names()
    }

    /// The number of free variables.
    pub fn input_count(&self) -> usize {
        self.aig.input_count()
    }

    /// Evaluates the formula under the given assignment.
    pub fn evaluate(&self, assignment: impl FnMut(&str) -> bool) -> bool {
        self.aig.evaluate(assignment)[0]
    }

    fn negate(&self) -> Formula {
        let mut aig = self.aig.clone();
        aig.set_output(0, !self.output());
        Formula { aig }
    }

    fn combine(&self, other: &Formula, op: impl FnOnce(&mut Aig, Lit, Lit) -> Lit) -> Formula {
        let mut aig = self.aig.clone();
        for name in other.inputs() {
            aig.input(name);
        }
        let rhs = aig.import_cone(&other.aig, &[other.output()], |aig, name| aig.input(name))[0];
        let lit = op(&mut aig, self.output(), rhs);
        aig.set_output(0, lit);
        Formula { aig }
    }
}

impl ops::Not for &'_ Formula {
    type Output = Formula;

    fn not(self) -> Formula {
        self.negate()
    }
}

impl ops::Not for Formula {
    type Output = Formula;

    fn not(self) -> Formula {
        self.negate()
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $aig_method:ident) => {
        impl ops::$trait<&'_ Formula> for &'_ Formula {
            type Output = Formula;

            fn $method(self, rhs: &Formula) -> Formula {
                self.combine(rhs, Aig::$aig_method)
            }
        }

        impl ops::$trait for Formula {
            type Output = Formula;

            fn $method(self, rhs: Formula) -> Formula {
                self.combine(&rhs, Aig::$aig_method)
            }
        }
    };
}

binary_op!(BitAnd, bitand, and);
binary_op!(BitOr, bitor, or);
binary_op!(BitXor, bitxor, xor);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_merge_inputs_by_name() {
        let x = Formula::var("x");
        let y = Formula::var("y");

        let f = &x & &(!&y);
        assert_eq!(f.inputs().collect::<Vec<_>>(), ["x", "y"]);
        assert!(f.evaluate(|name| name == "x"));
        assert!(!f.evaluate(|_| true));

        let g = (x.clone() | y.clone()) ^ x;
        assert_eq!(g.inputs().collect::<Vec<_>>(), ["x", "y"]);
        assert!(g.evaluate(|name| name == "y"));
        assert!(!g.evaluate(|_| true));
        assert!(!g.evaluate(|_| false));
    }

    #[test]
    fn negation_is_a_new_formula() {
        let a = Formula::var("a");
        let contradiction = &a & &!&a;
        let tautology = !&contradiction;

        assert_eq!(contradiction.output(), Lit::FALSE);
        assert_eq!(tautology.output(), Lit::TRUE);
        assert_eq!(tautology.input_count(), 1);
        assert_eq!(contradiction.output(), Lit::FALSE);
    }

    #[test]
    fn labels() {
        let f = Formula::var("a").with_label("prop");
        assert_eq!(f.label(), "prop");
        assert!(f.evaluate(|_| true));
        assert_eq!(Formula::constant(true).label(), Formula::DEFAULT_LABEL);
    }

    #[test]
    fn circuit_round_trip() {
        let f = Formula::var("a") | Formula::var("b");
        let aig = f.clone().into_circuit();
        let g = Formula::from_circuit(aig).unwrap();
        assert_eq!(g.output(), f.output());

        let mut two_outputs = Aig::new();
        two_outputs.add_output("a", Lit::TRUE);
        two_outputs.add_output("b", Lit::FALSE);
        assert!(matches!(
            Formula::from_circuit(two_outputs),
            Err(AigError::NotSingleOutput(2))
        ));
    }
}
