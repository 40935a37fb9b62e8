//! End-to-end encoding: HL block → IL block → LL constraints → clauses.
//!
//! # Examples
//!
//! ```
//! use design_cnf::block::HlBlock;
//! use design_cnf::design::DesignNode;
//! use design_cnf::encode::{encode, EncodeConfig};
//!
//! let color = DesignNode::factor("color", ["red", "blue"]);
//! let text = DesignNode::factor("text", ["red", "blue"]);
//! let block = HlBlock::fully_crossed(vec![color, text], &["color", "text"]).unwrap();
//!
//! let encoding = encode(&block, &EncodeConfig::default()).unwrap();
//! assert_eq!(encoding.il_block().num_trials(), 4);
//! assert_eq!(encoding.il_block().end_addr(), 16);
//! // 16 level variables plus 16 selection variables
//! assert_eq!(encoding.store().num_vars(), 32);
//! ```

use log::debug;

use crate::block::{allocate_vars, HlBlock, IlBlock};
use crate::counting::{process_requests, CountingRequest};
use crate::dimacs;
use crate::error::EncodeError;
use crate::lower::{clausify, lower_block, EntangleMode, LlConstraint};
use crate::store::Store;
use crate::types::{Lit, Var};

/// Which variables go into the Unigen sampling set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Support {
    None,
    /// All level variables of the block (`start_addr..=end_addr`).
    #[default]
    Grid,
    Explicit(Vec<Var>),
}

/// Encoder options. Use `EncodeConfig::default()` for standard settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Clausification of entanglements (default: `Iff`)
    pub entangle: EntangleMode,
    /// Last variable id already in use; allocation starts right after it (default: 0)
    pub first_var: u32,
    /// Sampling set for Unigen output (default: `Grid`)
    pub support: Support,
}

#[derive(Debug, Clone)]
pub struct Encoding {
    il: IlBlock,
    constraints: Vec<LlConstraint>,
    store: Store,
    support: Vec<Var>,
}

/// Encodes `block` into CNF.
pub fn encode(block: &HlBlock, config: &EncodeConfig) -> Result<Encoding, EncodeError> {
    let mut alloc = Store::new(config.first_var);
    let il = allocate_vars(block, &mut alloc);

    let (constraints, mut store) = lower_block(&il);
    clausify(&constraints, &mut store, config.entangle);

    let support = match &config.support {
        Support::None => Vec::new(),
        Support::Grid => (il.start_addr()..=il.end_addr()).map(Var::new).collect(),
        Support::Explicit(vars) => vars.clone(),
    };
    debug!(
        "encode: {} LL constraints, {} vars, {} clauses",
        constraints.len(),
        store.num_vars(),
        store.num_clauses()
    );

    Ok(Encoding {
        il,
        constraints,
        store,
        support,
    })
}

impl Encoding {
    pub fn il_block(&self) -> &IlBlock {
        &self.il
    }

    pub fn constraints(&self) -> &[LlConstraint] {
        &self.constraints
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn support(&self) -> &[Var] {
        &self.support
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    /// Adds cardinality constraints on top of the encoding.
    pub fn add_requests(&mut self, requests: &[CountingRequest]) -> Result<(), EncodeError> {
        process_requests(&mut self.store, requests)
    }

    pub fn to_dimacs(&self) -> Result<String, EncodeError> {
        Ok(dimacs::to_dimacs(&self.store)?)
    }

    pub fn to_unigen(&self) -> Result<String, EncodeError> {
        Ok(dimacs::to_unigen(&self.store, &self.support)?)
    }

    /// Level names per trial for a satisfying assignment.
    pub fn decode(&self, model: &[Lit]) -> Result<Vec<Vec<&str>>, EncodeError> {
        self.il.decode(model)
    }
}
