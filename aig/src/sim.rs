//! Bit-parallel simulation of AIGs.
//!
//! Each node value is a `u64` holding 64 independent simulation lanes.
use crate::{
    aig::{Aig, Node},
    lit::{Lit, Var},
};

/// Lane patterns enumerating all assignments of the first six inputs within a single word.
const LANE_PATTERNS: [u64; 6] = [
    0xaaaa_aaaa_aaaa_aaaa,
    0xcccc_cccc_cccc_cccc,
    0xf0f0_f0f0_f0f0_f0f0,
    0xff00_ff00_ff00_ff00,
    0xffff_0000_ffff_0000,
    0xffff_ffff_0000_0000,
];

/// Simulates all nodes of an AIG for 64 input assignments at once.
///
/// `input_word` provides the lanes for the input at the given position. Returns the lanes of
/// every node, indexed by variable.
pub fn simulate_words(aig: &Aig, mut input_word: impl FnMut(usize) -> u64) -> Vec<u64> {
    let mut values = Vec::with_capacity(aig.len());
    for index in 0..aig.len() {
        let value = match aig.node(Var::from_index(index)) {
            Node::False => 0,
            Node::Input(input) => input_word(input),
            Node::And([a, b]) => lit_word(&values, a) & lit_word(&values, b),
        };
        values.push(value);
    }
    values
}

/// Returns the lanes of a literal given the lanes of every node.
#[inline(always)]
pub fn lit_word(values: &[u64], lit: Lit) -> u64 {
    values[lit.var().index()] ^ (lit.is_neg() as u64).wrapping_neg()
}

/// Largest number of inputs whose assignments [`find_assignment`] can enumerate.
pub const MAX_SEARCH_INPUTS: usize = LANE_PATTERNS.len() + 63;

/// Searches all assignments of the AIG's inputs for one that makes `lit` true.
///
/// Returns the values of all inputs, in input order, for the first such assignment found. The
/// search is exponential in the number of inputs, callers are expected to bound it.
///
/// Panics if the AIG has more than [`MAX_SEARCH_INPUTS`] inputs.
pub fn find_assignment(aig: &Aig, lit: Lit) -> Option<Vec<bool>> {
    let input_count = aig.input_count();
    let Some(blocks) = u32::try_from(input_count.saturating_sub(LANE_PATTERNS.len()))
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
    else {
        panic!("cannot enumerate the assignments of {input_count} inputs");
    };
    let lane_mask = if input_count >= LANE_PATTERNS.len() {
        !0
    } else {
        (1u64 << (1 << input_count)) - 1
    };

    for block in 0..blocks {
        let values = simulate_words(aig, |input| {
            if input < LANE_PATTERNS.len() {
                LANE_PATTERNS[input]
            } else if (block >> (input - LANE_PATTERNS.len())) & 1 != 0 {
                !0
            } else {
                0
            }
        });

        let hits = lit_word(&values, lit) & lane_mask;
        if hits != 0 {
            let lane = hits.trailing_zeros() as usize;
            let assignment = (0..input_count)
                .map(|input| {
                    if input < LANE_PATTERNS.len() {
                        (lane >> input) & 1 != 0
                    } else {
                        (block >> (input - LANE_PATTERNS.len())) & 1 != 0
                    }
                })
                .collect();
            return Some(assignment);
        }
    }
    None
}

/// Returns whether two literals of the same AIG agree under every input assignment.
pub fn equivalent(aig: &mut Aig, a: Lit, b: Lit) -> bool {
    let miter = aig.xor(a, b);
    find_assignment(aig, miter).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_satisfying_lane() {
        let mut aig = Aig::new();
        let a = aig.input("a");
        let b = aig.input("b");
        let out = aig.and(a, !b);

        let assignment = find_assignment(&aig, out).unwrap();
        assert_eq!(assignment, [true, false]);
        assert_eq!(find_assignment(&aig, Lit::FALSE), None);
        assert_eq!(find_assignment(&aig, Lit::TRUE).unwrap().len(), 2);
    }

    #[test]
    fn respects_lane_mask_for_few_inputs() {
        let mut aig = Aig::new();
        let a = aig.input("a");
        let contradiction = aig.and(a, !a);
        assert_eq!(find_assignment(&aig, contradiction), None);

        // lanes beyond 2^1 must not be considered for a single input
        assert_eq!(find_assignment(&aig, !a), Some(vec![false]));
    }

    #[test]
    fn many_inputs() {
        let mut aig = Aig::new();
        let lits: Vec<Lit> = (0..9).map(|i| aig.input(&format!("x{i}"))).collect();
        let mut all = Lit::TRUE;
        for &lit in &lits {
            all = aig.and(all, lit);
        }
        let assignment = find_assignment(&aig, all).unwrap();
        assert!(assignment.iter().all(|&value| value));

        let mut one_off = Lit::TRUE;
        for (i, &lit) in lits.iter().enumerate() {
            one_off = aig.and(one_off, lit ^ (i == 7));
        }
        let assignment = find_assignment(&aig, one_off).unwrap();
        assert_eq!(assignment.iter().filter(|&&value| !value).count(), 1);
        assert!(!assignment[7]);
    }

    #[test]
    #[should_panic(expected = "cannot enumerate")]
    fn too_many_inputs_to_enumerate() {
        let mut aig = Aig::new();
        for i in 0..=MAX_SEARCH_INPUTS {
            aig.input(&format!("x{i}"));
        }
        find_assignment(&aig, Lit::FALSE);
    }

    #[test]
    fn equivalence_check() {
        let mut aig = Aig::new();
        let a = aig.input("a");
        let b = aig.input("b");
        let lhs = aig.xor(a, b);
        let rhs = {
            let either = aig.or(a, b);
            let both = aig.and(a, b);
            aig.and(either, !both)
        };
        assert!(equivalent(&mut aig, lhs, rhs));
        assert!(!equivalent(&mut aig, lhs, a));
    }
}
