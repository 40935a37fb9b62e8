//! Exactly-one ("one-hot") encoding.

use crate::store::Store;
use crate::types::{Clause, Var};

/// Emits the pairwise encoding of "exactly one of `vars` is true".
///
/// For `n` variables this appends `C(n, 2) + 1` clauses as one group: every
/// pair `[¬vᵢ, ¬vⱼ]` (for `i < j`, in lexicographic order), followed by the
/// at-least-one clause `[v₁, …, vₙ]`.
///
/// An empty `vars` yields a single empty clause, which is unsatisfiable.
pub fn enforce_one_hot(store: &mut Store, vars: &[Var]) {
    store.append_clauses(one_hot_clauses(vars));
}

/// The clause group used by [`enforce_one_hot`].
pub fn one_hot_clauses(vars: &[Var]) -> Vec<Clause> {
    let n = vars.len();
    let mut clauses = Vec::with_capacity(n * n.saturating_sub(1) / 2 + 1);
    for (i, a) in vars.iter().enumerate() {
        for b in &vars[i + 1..] {
            clauses.push(vec![a.neg(), b.neg()]);
        }
    }
    clauses.push(vars.iter().map(|v| v.pos()).collect());
    clauses
}
