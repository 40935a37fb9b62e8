//! Lowering of intermediate blocks into low-level constraints, and their
//! compilation into clauses.

use std::fmt;

use log::debug;

use crate::block::{get_shaped_levels, ConstraintKind, IlBlock};
use crate::cnf::{iff_and, implies_all};
use crate::cross::ll_fully_cross;
use crate::onehot::enforce_one_hot;
use crate::store::Store;
use crate::types::{Lit, Var};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LlConstraint {
    /// Exactly one of the variables is true.
    OneHot(Vec<Var>),
    /// The state variable selects the conjunction of the implied variables.
    Entangle { state: Var, implied: Vec<Var> },
}

impl fmt::Display for LlConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlConstraint::OneHot(vars) => {
                write!(f, "OneHot(")?;
                write_vars(f, vars)?;
                write!(f, ")")
            }
            LlConstraint::Entangle { state, implied } => {
                write!(f, "Entangle({} => ", state)?;
                write_vars(f, implied)?;
                write!(f, ")")
            }
        }
    }
}

fn write_vars(f: &mut fmt::Formatter<'_>, vars: &[Var]) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in vars.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "]")
}

/// How an [`LlConstraint::Entangle`] becomes clauses.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum EntangleMode {
    /// `state ↔ (v₁ ∧ … ∧ vₖ)`.
    #[default]
    Iff,
    /// `state → vᵢ` for every implied `vᵢ`.
    Implies,
}

/// Lowers `block` into its low-level constraints.
///
/// `store` must continue from the block's last address: selection variables
/// for the crossing are taken from it. Consistency constraints come first
/// (trial-major, factor-minor), followed by the crossing constraints.
pub fn il_block_to_ll_blocks(block: &IlBlock, store: &mut Store) -> Vec<LlConstraint> {
    assert!(
        store.num_vars() >= block.end_addr(),
        "Store counter {} overlaps the block's variables (end {})",
        store.num_vars(),
        block.end_addr()
    );

    let mut result: Vec<LlConstraint> = get_shaped_levels(block)
        .into_iter()
        .flatten()
        .map(LlConstraint::OneHot)
        .collect();
    debug!("il_block_to_ll_blocks: {} consistency constraints", result.len());

    if block.has_constraint(ConstraintKind::FullyCross) {
        let crossing = ll_fully_cross(block, store);
        debug!("il_block_to_ll_blocks: {} crossing constraints", crossing.len());
        result.extend(crossing);
    }
    result
}

/// Lowers `block` with a fresh store seeded at its last address.
pub fn lower_block(block: &IlBlock) -> (Vec<LlConstraint>, Store) {
    let mut store = Store::new(block.end_addr());
    let constraints = il_block_to_ll_blocks(block, &mut store);
    (constraints, store)
}

/// Compiles constraints into clauses, one clause group per constraint.
pub fn clausify(constraints: &[LlConstraint], store: &mut Store, mode: EntangleMode) {
    let before = store.num_clauses();
    for constraint in constraints {
        match constraint {
            LlConstraint::OneHot(vars) => enforce_one_hot(store, vars),
            LlConstraint::Entangle { state, implied } => {
                let implied: Vec<Lit> = implied.iter().map(|v| v.pos()).collect();
                let clauses = match mode {
                    EntangleMode::Iff => iff_and(state.pos(), &implied),
                    EntangleMode::Implies => implies_all(state.pos(), &implied),
                };
                store.append_clauses(clauses);
            }
        }
    }
    debug!(
        "clausify: {} constraints -> {} clauses",
        constraints.len(),
        store.num_clauses() - before
    );
}
