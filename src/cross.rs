//! Full crossing.
//!
//! For `T` trials and `S` combinations of crossed levels, the crossing
//! allocates `T * S` selection variables: `sel[t][c]` stands for "trial `t`
//! realizes combination `c`". Then:
//!
//! - for every combination `c`, `sel[0][c], ..., sel[T-1][c]` is one-hot, so
//!   each combination occurs in exactly one trial;
//! - every `sel[t][c]` is entangled with the level variables of trial `t`
//!   that make up combination `c`.
//!
//! Combinations are enumerated in row-major order: the last crossed factor
//! varies fastest.

use log::debug;

use crate::block::{get_shaped_levels, get_trial_vars, IlBlock};
use crate::design::fully_cross_size;
use crate::lower::LlConstraint;
use crate::store::Store;
use crate::types::Var;

/// Lowers the full-crossing requirement of `block`.
///
/// Selection variables are taken from `store`. The result lists all one-hot
/// constraints (one per combination) followed by all entanglements (trial
/// by trial).
pub fn ll_fully_cross(block: &IlBlock, store: &mut Store) -> Vec<LlConstraint> {
    let num_trials = block.num_trials();
    let num_states = fully_cross_size(block.crossing());

    let crossed: Vec<Vec<Vec<Var>>> = get_shaped_levels(block)
        .into_iter()
        .map(|factors| block.crossing_indices().iter().map(|&i| factors[i].clone()).collect())
        .collect();

    let first = store.num_vars() + 1;
    store.fresh_vars(num_trials * num_states);
    let state_vars = get_trial_vars(first, &vec![num_states; num_trials]);
    debug!(
        "ll_fully_cross: {} trials x {} states, selection vars from {}",
        num_trials, num_states, first
    );

    let mut result = Vec::with_capacity(num_states + num_trials * num_states);
    for c in 0..num_states {
        let group = state_vars.iter().map(|trial| trial[c]).collect();
        result.push(LlConstraint::OneHot(group));
    }
    for (states, levels) in state_vars.iter().zip(&crossed) {
        result.extend(entangle_fc(states, levels));
    }
    result
}

/// Pairs each state variable with one combination of level variables.
///
/// `levels[i]` holds the level variables of the `i`-th crossed factor;
/// combinations are walked in row-major order and consume `states` in order.
///
/// # Panics
///
/// Panics if `states` does not have exactly one variable per combination.
pub fn entangle_fc(states: &[Var], levels: &[Vec<Var>]) -> Vec<LlConstraint> {
    let combinations = cartesian_product(levels);
    assert_eq!(
        states.len(),
        combinations.len(),
        "Expected one state variable per combination"
    );
    states
        .iter()
        .zip(combinations)
        .map(|(&state, implied)| LlConstraint::Entangle { state, implied })
        .collect()
}

/// Row-major Cartesian product (last list varies fastest).
pub fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    if lists.iter().any(|l| l.is_empty()) {
        return Vec::new();
    }
    let total: usize = lists.iter().map(Vec::len).product();
    let mut result = Vec::with_capacity(total);
    let mut index = vec![0usize; lists.len()];
    for _ in 0..total {
        result.push(index.iter().zip(lists).map(|(&i, l)| l[i].clone()).collect());
        // Odometer increment from the last position.
        for pos in (0..lists.len()).rev() {
            index[pos] += 1;
            if index[pos] < lists[pos].len() {
                break;
            }
            index[pos] = 0;
        }
    }
    result
}
