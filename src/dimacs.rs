//! DIMACS rendering of accumulated clauses.
//!
//! ```text
//! p cnf <vars> <clauses>
//! c ind 1 2 3 ... 10 0      (Unigen only: sampling set, 10 per line)
//! 1 -2 0
//! ...
//! ```
//!
//! Clauses are written in emission order, i.e. the reverse of
//! [`Store::clauses`](crate::store::Store::clauses).
//!
//! # Examples
//!
//! ```
//! use design_cnf::dimacs::to_dimacs;
//! use design_cnf::onehot::enforce_one_hot;
//! use design_cnf::store::Store;
//!
//! let mut store = Store::default();
//! let xs = store.fresh_vars(2);
//! enforce_one_hot(&mut store, &xs);
//!
//! let dimacs = to_dimacs(&store).unwrap();
//! assert_eq!(dimacs, "p cnf 2 2\n1 2 0\n-1 -2 0\n");
//! ```

use std::fmt::Write as _;

use crate::store::Store;
use crate::types::{Clause, Var};

/// Maximum number of variables per `c ind` line.
pub const IND_CHUNK: usize = 10;

pub fn to_dimacs(store: &Store) -> Result<String, std::fmt::Error> {
    render(store.num_vars(), store.emitted(), &[])
}

/// Renders the store in Unigen's DIMACS dialect with the given sampling set.
pub fn to_unigen(store: &Store, support: &[Var]) -> Result<String, std::fmt::Error> {
    render(store.num_vars(), store.emitted(), support)
}

/// Renders `clauses` (in the given order) as DIMACS.
pub fn render<'a>(
    num_vars: u32,
    clauses: impl ExactSizeIterator<Item = &'a Clause>,
    support: &[Var],
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "p cnf {} {}", num_vars, clauses.len())?;
    for chunk in support.chunks(IND_CHUNK) {
        write!(out, "c ind")?;
        for v in chunk {
            write!(out, " {}", v.id())?;
        }
        writeln!(out, " 0")?;
    }
    for clause in clauses {
        for lit in clause {
            write!(out, "{} ", lit)?;
        }
        writeln!(out, "0")?;
    }
    Ok(out)
}
