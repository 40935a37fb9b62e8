//! Fresh-variable counter and clause accumulator.
//!
//! Every encoding stage threads a [`Store`] through its operations. The store
//! owns the last issued variable id and the clauses emitted so far.
//!
//! # Clause order
//!
//! Clause groups are *prepended*: the most recently appended group always
//! comes first in [`Store::clauses`], while the order inside a group is kept.
//!
//! ```
//! use design_cnf::store::Store;
//! use design_cnf::types::{clauses_from_dimacs, clauses_to_dimacs};
//!
//! let mut store = Store::default();
//! store.append_clauses(clauses_from_dimacs([vec![1, 2, -3]]));
//! store.append_clauses(clauses_from_dimacs([vec![-4, 5], vec![4]]));
//! assert_eq!(
//!     clauses_to_dimacs(store.clauses()),
//!     vec![vec![-4, 5], vec![4], vec![1, 2, -3]],
//! );
//! ```

use crate::types::{Clause, Var};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    /// Last issued variable id (0 when nothing has been issued).
    last: u32,
    /// Clauses in emission order, each group pushed back-to-front.
    /// Reading it backwards yields the prepend-ordered view.
    rev: Vec<Clause>,
}

impl Store {
    /// Creates a store whose next fresh variable is `start + 1`.
    pub fn new(start: u32) -> Self {
        Self { last: start, rev: Vec::new() }
    }

    /// Number of variables issued so far (the last issued id).
    pub fn num_vars(&self) -> u32 {
        self.last
    }

    pub fn num_clauses(&self) -> usize {
        self.rev.len()
    }

    /// Overwrites the fresh-variable counter.
    pub fn put_fresh(&mut self, last: u32) {
        self.last = last;
    }

    pub fn fresh_var(&mut self) -> Var {
        self.last += 1;
        Var::new(self.last)
    }

    /// Returns `n` consecutive fresh variables in ascending order.
    pub fn fresh_vars(&mut self, n: usize) -> Vec<Var> {
        (0..n).map(|_| self.fresh_var()).collect()
    }

    /// Prepends a group of clauses, keeping their relative order.
    pub fn append_clauses(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        let mut group: Vec<Clause> = clauses.into_iter().collect();
        group.reverse();
        self.rev.extend(group);
    }

    /// Appends a unit clause `[-v]` for each variable, as one group.
    pub fn force_false(&mut self, vars: &[Var]) {
        self.append_clauses(vars.iter().map(|v| vec![v.neg()]));
    }

    /// Appends the unit clause `[v]`.
    pub fn force_true(&mut self, var: Var) {
        self.append_clauses([vec![var.pos()]]);
    }

    /// Appends the unit clause `[-v]`.
    pub fn set_to_zero(&mut self, var: Var) {
        self.append_clauses([vec![var.neg()]]);
    }

    /// Clauses with the most recently appended group first.
    pub fn clauses(&self) -> impl DoubleEndedIterator<Item = &Clause> + ExactSizeIterator {
        self.rev.iter().rev()
    }

    /// Clauses in the order they were emitted, i.e. the reverse of [`Store::clauses`].
    pub fn emitted(&self) -> impl DoubleEndedIterator<Item = &Clause> + ExactSizeIterator {
        self.rev.iter()
    }

    /// Consumes the store, returning the counter and the prepend-ordered clauses.
    pub fn into_parts(self) -> (u32, Vec<Clause>) {
        let mut clauses = self.rev;
        clauses.reverse();
        (self.last, clauses)
    }
}
