//! Numeric identifiers for AIG nodes and Boolean literals.
use std::{fmt, ops};

/// Numeric identifier for an AIG node.
///
/// The variable with index `0` is the constant false node present in every [`Aig`][crate::Aig].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Var(u32);

/// Numeric identifier for a Boolean literal.
///
/// A literal consists of a [variable][`Var`] and a polarity. Both are combined into a single
/// number, called the [`code`][`Self::code`], using the same encoding as the AIGER format: the
/// variable index shifted one bit to the left with the least significant bit set for negative
/// polarity literals.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Lit(u32);

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            write!(f, "0")
        } else {
            write!(f, "v{}", self.0)
        }
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const() {
            return write!(f, "{}", self.0);
        }
        let prefix = if self.is_neg() { "!" } else { "" };
        write!(f, "{}{}", prefix, self.var())
    }
}

impl Var {
    /// The variable representing constant false.
    pub const FALSE: Self = Var(0);

    /// The largest valid [`index`][`Self::index`] for a variable.
    pub const MAX_INDEX: usize = (u32::MAX >> 1) as usize;

    /// Returns the variable for a given index.
    ///
    /// Panics if `index` exceeds [`Self::MAX_INDEX`].
    #[inline(always)]
    pub fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX_INDEX, "variable index out of range");
        Var(index as u32)
    }

    /// Returns the index of the variable.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns a positive polarity literal for the variable.
    #[inline(always)]
    pub fn as_lit(self) -> Lit {
        Lit(self.0 << 1)
    }

    /// Returns a negative polarity literal for the variable.
    #[inline(always)]
    pub fn as_neg_lit(self) -> Lit {
        Lit((self.0 << 1) | 1)
    }
}

impl From<Var> for Lit {
    #[inline(always)]
    fn from(var: Var) -> Self {
        var.as_lit()
    }
}

impl Lit {
    /// The literal representing constant false.
    pub const FALSE: Self = Lit(0);
    /// The literal representing constant true.
    pub const TRUE: Self = Lit(1);

    /// The largest valid [`code`][`Self::code`] for a literal.
    pub const MAX_CODE: usize = u32::MAX as usize;

    /// Returns the literal for a given code.
    ///
    /// Panics if `code` exceeds [`Self::MAX_CODE`].
    #[inline(always)]
    pub fn from_code(code: usize) -> Self {
        assert!(code <= Self::MAX_CODE, "literal code out of range");
        Lit(code as u32)
    }

    /// Returns the literal's code.
    #[inline(always)]
    pub fn code(self) -> usize {
        self.0 as usize
    }

    /// Returns the variable of the literal.
    #[inline(always)]
    pub fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    /// Returns whether this literal has negative polarity.
    #[inline(always)]
    pub fn is_neg(self) -> bool {
        self.0 & 1 != 0
    }

    /// Returns whether this literal has positive polarity.
    #[inline(always)]
    pub fn is_pos(self) -> bool {
        !self.is_neg()
    }

    /// Returns the positive polarity literal with the same variable.
    #[inline(always)]
    pub fn as_pos(self) -> Self {
        Lit(self.0 & !1)
    }

    /// Returns whether this literal is [`Self::FALSE`] or [`Self::TRUE`].
    #[inline(always)]
    pub fn is_const(self) -> bool {
        self.0 < 2
    }

    /// Returns the constant literal for the given Boolean value.
    #[inline(always)]
    pub fn constant(value: bool) -> Self {
        Lit::FALSE ^ value
    }

    /// This is equivalent to `f(self.var()) ^ self.is_neg()`.
    #[inline(always)]
    pub fn lookup<T: ops::BitXor<bool, Output = T>>(self, f: impl FnOnce(Var) -> T) -> T {
        f(self.var()) ^ self.is_neg()
    }
}

impl ops::Not for Lit {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

impl ops::BitXor<bool> for Lit {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: bool) -> Self::Output {
        Lit(self.0 ^ rhs as u32)
    }
}

impl ops::BitXorAssign<bool> for Lit {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: bool) {
        *self = *self ^ rhs;
    }
}

impl flussab_aiger::Lit for Lit {
    const MAX_CODE: usize = u32::MAX as usize;

    #[inline(always)]
    fn from_code(code: usize) -> Self {
        Lit::from_code(code)
    }

    #[inline(always)]
    fn code(self) -> usize {
        Lit::code(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarities() {
        let v = Var::from_index(3);

        let l0 = v.as_lit();
        assert!(l0.is_pos());
        assert_eq!(l0.code(), 6);
        assert_eq!(!l0, v.as_neg_lit());
        assert_eq!((!l0).as_pos(), l0);
        assert_eq!((!l0).var(), v);
        assert_eq!(l0 ^ true, !l0);
        assert_eq!(l0 ^ false, l0);
    }

    #[test]
    fn constants() {
        assert_eq!(!Lit::FALSE, Lit::TRUE);
        assert!(Lit::TRUE.is_const());
        assert!(!Var::from_index(1).as_lit().is_const());
        assert_eq!(Lit::constant(true), Lit::TRUE);
        assert_eq!(Lit::TRUE.var(), Var::FALSE);
        assert_eq!(format!("{}", !Var::from_index(2).as_lit()), "!v2");
    }

    #[test]
    fn lookup_applies_polarity() {
        let lit = Var::from_index(5).as_neg_lit();
        assert!(!lit.lookup(|var| var.index() == 5));
        assert!(lit.lookup(|var| var.index() != 5));
        let mapped = lit.lookup(|_| Var::from_index(1).as_lit());
        assert_eq!(mapped, Var::from_index(1).as_neg_lit());
    }
}
