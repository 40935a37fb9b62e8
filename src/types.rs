//! Type-safe wrappers for CNF variables and literals.
//!
//! Variables are 1-indexed and never reused, so they map directly onto DIMACS
//! variable numbers. Literals are signed variables.
use std::fmt;
use std::ops::Neg;

/// A variable identifier (1-indexed).
///
/// # Invariants
///
/// - Variable IDs must be >= 1 (0 is the DIMACS clause terminator)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0`. Variables must be 1-indexed.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Positive literal of this variable.
    pub fn pos(self) -> Lit {
        Lit(self.0 as i32)
    }

    /// Negative literal of this variable.
    pub fn neg(self) -> Lit {
        Lit(-(self.0 as i32))
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A signed literal: positive asserts the variable, negative denies it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(i32);

impl Lit {
    /// Creates a literal from its DIMACS representation.
    ///
    /// # Panics
    ///
    /// Panics if `value == 0`.
    pub fn from_dimacs(value: i32) -> Self {
        assert_ne!(value, 0, "Literal must be non-zero");
        Lit(value)
    }

    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies the literal's polarity by a `{1, -1}` bit.
    pub fn with_sign(self, sign: i32) -> Self {
        debug_assert!(sign == 1 || sign == -1);
        Lit(self.0 * sign)
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}

impl From<Var> for Lit {
    fn from(var: Var) -> Self {
        var.pos()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A disjunction of literals.
pub type Clause = Vec<Lit>;

/// Builds clauses from DIMACS integers. Handy in tests and demos.
pub fn clauses_from_dimacs<C, I>(clauses: C) -> Vec<Clause>
where
    C: IntoIterator<Item = I>,
    I: IntoIterator<Item = i32>,
{
    clauses
        .into_iter()
        .map(|c| c.into_iter().map(Lit::from_dimacs).collect())
        .collect()
}

/// Converts clauses back into DIMACS integers.
pub fn clauses_to_dimacs<'a>(clauses: impl IntoIterator<Item = &'a Clause>) -> Vec<Vec<i32>> {
    clauses
        .into_iter()
        .map(|c| c.iter().map(|lit| lit.to_dimacs()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_creation() {
        let v1 = Var::new(1);
        let v2 = Var::new(2);
        assert_eq!(v1.id(), 1);
        assert_eq!(v2.id(), 2);
        assert!(v1 < v2);
        assert_eq!(v1.to_string(), "x1");
    }

    #[test]
    #[should_panic(expected = "Variable IDs must be >= 1")]
    fn test_var_zero_panics() {
        Var::new(0);
    }

    #[test]
    fn test_lit_polarity() {
        let x = Var::new(3);
        assert!(x.pos().is_positive());
        assert!(x.neg().is_negative());
        assert_eq!(-x.pos(), x.neg());
        assert_eq!(x.neg().var(), x);
        assert_eq!(x.neg().to_dimacs(), -3);
        assert_eq!(x.pos().with_sign(-1), x.neg());
    }

    #[test]
    fn test_dimacs_conversion() {
        let cs = clauses_from_dimacs([vec![1, -2], vec![3]]);
        assert_eq!(cs[0], vec![Var::new(1).pos(), Var::new(2).neg()]);
        assert_eq!(clauses_to_dimacs(&cs), vec![vec![1, -2], vec![3]]);
    }
}
