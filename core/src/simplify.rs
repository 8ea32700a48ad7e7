//! Post-processing of projected circuits.
use qbfkit_aig::Aig;

use crate::Error;

/// Turns a circuit into an equivalent, hopefully smaller, circuit.
///
/// Implementations must keep every input, under its name, and every output.
pub trait Simplifier {
    /// Simplifies the circuit.
    fn simplify(&mut self, aig: Aig) -> Result<Aig, Error>;
}

impl<T: Simplifier + ?Sized> Simplifier for &mut T {
    fn simplify(&mut self, aig: Aig) -> Result<Aig, Error> {
        (**self).simplify(aig)
    }
}

impl<T: Simplifier + ?Sized> Simplifier for Box<T> {
    fn simplify(&mut self, aig: Aig) -> Result<Aig, Error> {
        (**self).simplify(aig)
    }
}

/// Rebuilds the circuit through the structurally hashing builder.
///
/// See [`Aig::cleanup`].
#[derive(Clone, Copy, Default, Debug)]
pub struct Cleanup;

impl Simplifier for Cleanup {
    fn simplify(&mut self, aig: Aig) -> Result<Aig, Error> {
        Ok(aig.cleanup())
    }
}

/// Leaves circuits unchanged.
#[derive(Clone, Copy, Default, Debug)]
pub struct Keep;

impl Simplifier for Keep {
    fn simplify(&mut self, aig: Aig) -> Result<Aig, Error> {
        Ok(aig)
    }
}

#[cfg(test)]
mod tests {
    use qbfkit_aig::Lit;

    use super::*;

    #[test]
    fn cleanup_drops_unused_gates() {
        let mut aig = Aig::new();
        let a = aig.input("a");
        let b = aig.input("b");
        let _unused = aig.xor(a, b);
        aig.add_output("out", Lit::TRUE);

        let simplified = Cleanup.simplify(aig.clone()).unwrap();
        assert_eq!(simplified.and_count(), 0);
        assert_eq!(simplified.input_names().collect::<Vec<_>>(), ["a", "b"]);

        let kept = Keep.simplify(aig).unwrap();
        assert_eq!(kept.and_count(), 3);
    }
}
