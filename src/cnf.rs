//! Small clause-building combinators.
//!
//! These return clause groups without touching a [`Store`](crate::store::Store);
//! callers decide when and in which order to append them.

use crate::types::{Clause, Lit};

/// `a ↔ b`, i.e. `(a ∨ ¬b) ∧ (¬a ∨ b)`.
pub fn double_implies(a: Lit, b: Lit) -> Vec<Clause> {
    vec![vec![a, -b], vec![-a, b]]
}

/// `a ∧ b`.
pub fn and_lits(a: Lit, b: Lit) -> Vec<Clause> {
    vec![vec![a], vec![b]]
}

/// `a ∨ b`.
pub fn or_lits(a: Lit, b: Lit) -> Vec<Clause> {
    vec![vec![a, b]]
}

/// `a ⊕ b`.
pub fn xor_lits(a: Lit, b: Lit) -> Vec<Clause> {
    vec![vec![a, b], vec![-a, -b]]
}

/// `¬(a ⊕ b)`.
pub fn xnor_lits(a: Lit, b: Lit) -> Vec<Clause> {
    double_implies(a, b)
}

/// Prefixes every clause with `lit`, i.e. `lit ∨ cnf`.
pub fn distribute(lit: Lit, cnf: Vec<Clause>) -> Vec<Clause> {
    cnf.into_iter()
        .map(|clause| {
            let mut out = Vec::with_capacity(clause.len() + 1);
            out.push(lit);
            out.extend(clause);
            out
        })
        .collect()
}

/// `a → (b₁ ∧ … ∧ bₖ)`.
pub fn implies_all(a: Lit, bs: &[Lit]) -> Vec<Clause> {
    bs.iter().map(|&b| vec![-a, b]).collect()
}

/// `a ↔ (b₁ ∧ … ∧ bₖ)`.
///
/// ```text
/// (¬b₁ ∨ … ∨ ¬bₖ ∨ a) ∧ (¬a ∨ b₁) ∧ … ∧ (¬a ∨ bₖ)
/// ```
pub fn iff_and(a: Lit, bs: &[Lit]) -> Vec<Clause> {
    let mut head: Clause = bs.iter().map(|&b| -b).collect();
    head.push(a);
    let mut out = vec![head];
    out.extend(implies_all(a, bs));
    out
}
