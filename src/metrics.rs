//! Size metrics of an encoded design.

use num_bigint::BigUint;

use crate::block::{ConstraintKind, IlBlock};
use crate::design::DesignNode;
use crate::encode::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignMetrics {
    pub factor_count: usize,
    pub crossing_factor_count: usize,
    pub constraint_count: usize,
    pub block_length: usize,
    pub block_length_factorial: BigUint,
    pub variables_per_trial: usize,
    pub low_level_constraint_count: usize,
    pub cnf_total_variables: u32,
    pub cnf_total_clauses: usize,
    /// Number of distinct valid trial sequences, if the block is fully crossed.
    pub sequence_count: Option<BigUint>,
}

impl DesignMetrics {
    pub fn collect(encoding: &Encoding) -> Self {
        let il = encoding.il_block();
        DesignMetrics {
            factor_count: il.design().len(),
            crossing_factor_count: il.crossing_indices().len(),
            constraint_count: il.constraints().len(),
            block_length: il.num_trials(),
            block_length_factorial: factorial(il.num_trials()),
            variables_per_trial: il.design().iter().map(DesignNode::leaf_count).sum(),
            low_level_constraint_count: encoding.constraints().len(),
            cnf_total_variables: encoding.store().num_vars(),
            cnf_total_clauses: encoding.store().num_clauses(),
            sequence_count: sequence_count(il),
        }
    }
}

pub fn factorial(n: usize) -> BigUint {
    (1..=n).fold(BigUint::from(1u32), |acc, i| acc * BigUint::from(i))
}

/// Counts the trial sequences a fully crossed block admits.
///
/// Each ordering of the crossing is one sequence; every factor outside the
/// crossing is free in every trial:
///
/// ```text
/// T! * Π_{f ∉ crossing} |levels(f)|^T
/// ```
///
/// Returns `None` for blocks without [`ConstraintKind::FullyCross`]. Such
/// blocks are otherwise unconstrained in their trial order.
pub fn sequence_count(block: &IlBlock) -> Option<BigUint> {
    if !block.has_constraint(ConstraintKind::FullyCross) {
        return None;
    }
    let num_trials = block.num_trials();
    let free = block
        .design()
        .iter()
        .enumerate()
        .filter(|(i, _)| !block.crossing_indices().contains(i))
        .fold(BigUint::from(1u32), |acc, (_, f)| {
            acc * BigUint::from(f.leaf_count()).pow(num_trials as u32)
        });
    Some(factorial(num_trials) * free)
}
