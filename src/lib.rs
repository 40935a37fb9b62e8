//! # design-cnf: CNF encoding of factorial experiment designs
//!
//! **`design-cnf`** translates a hierarchical description of experimental factors and levels
//! into a boolean satisfiability problem whose models are exactly the valid trial sequences.
//!
//! ## Lowering stages
//!
//! 1. **HL**: a [`HlBlock`][crate::block::HlBlock] holds the design tree, the crossed factors
//!    and the requested constraints.
//! 2. **IL**: [`allocate_vars`][crate::block::allocate_vars] commits to a variable layout,
//!    one variable per trial, factor and level, producing an [`IlBlock`][crate::block::IlBlock].
//! 3. **LL**: [`il_block_to_ll_blocks`][crate::lower::il_block_to_ll_blocks] produces
//!    one-hot and entanglement constraints, which [`clausify`][crate::lower::clausify] turns
//!    into clauses.
//!
//! Variables are 1-indexed and issued by a single [`Store`][crate::store::Store] per stage,
//! so they map directly onto DIMACS numbering.
//!
//! ## Basic Usage
//!
//! ```rust
//! use design_cnf::block::HlBlock;
//! use design_cnf::design::DesignNode;
//! use design_cnf::encode::{encode, EncodeConfig};
//!
//! let color = DesignNode::factor("color", ["red", "blue"]);
//! let block = HlBlock::fully_crossed(vec![color], &["color"]).unwrap();
//!
//! let encoding = encode(&block, &EncodeConfig::default()).unwrap();
//! let dimacs = encoding.to_dimacs().unwrap();
//! assert!(dimacs.starts_with("p cnf 8 "));
//! ```
//!
//! ## Core Components
//!
//! - **[`block`]**: HL and IL blocks, variable allocation and layout projections.
//! - **[`cross`]**: the full-crossing engine.
//! - **[`lower`]**: low-level constraints and their clausification.
//! - **[`counting`]**: cardinality constraints via pop-count adders.
//! - **[`dimacs`]**: DIMACS and Unigen output.

pub mod block;
pub mod cnf;
pub mod counting;
pub mod cross;
pub mod design;
pub mod dimacs;
pub mod encode;
pub mod error;
pub mod lower;
pub mod metrics;
pub mod onehot;
pub mod store;
pub mod types;
