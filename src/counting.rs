//! Cardinality constraints over boolean variables.
//!
//! The number of true variables is computed by a tree of ripple-carry adders
//! (a "pop count" circuit); every adder output is a fresh variable fully
//! defined by the clauses emitted for it. Comparisons against a constant `k`
//! are then asserted on the output bits.
//!
//! Bit vectors are MSB-first unless noted otherwise.

use log::debug;

use crate::cnf::{and_lits, distribute, double_implies, or_lits, xnor_lits, xor_lits};
use crate::error::EncodeError;
use crate::store::Store;
use crate::types::{Clause, Var};

/// Binary digits of `value` over `{1, -1}` (`-1` is a zero bit), MSB first.
///
/// ```
/// use design_cnf::counting::to_binary;
///
/// assert_eq!(to_binary(2), vec![1, -1]);
/// assert_eq!(to_binary(11), vec![1, -1, 1, 1]);
/// assert!(to_binary(0).is_empty());
/// ```
pub fn to_binary(mut value: usize) -> Vec<i32> {
    let mut bits = Vec::new();
    while value != 0 {
        bits.push(if value & 1 == 1 { 1 } else { -1 });
        value >>= 1;
    }
    bits.reverse();
    bits
}

/// Returns `(carry, sum)` of `a + b`.
pub fn half_adder(store: &mut Store, a: Var, b: Var) -> (Var, Var) {
    let c = store.fresh_var();
    let s = store.fresh_var();
    let (a, b) = (a.pos(), b.pos());

    let mut computed_c = distribute(c.neg(), and_lits(a, b));
    computed_c.extend(distribute(c.pos(), or_lits(-a, -b)));
    store.append_clauses(computed_c);

    let mut computed_s = distribute(s.neg(), xor_lits(a, b));
    computed_s.extend(distribute(s.pos(), xnor_lits(a, b)));
    store.append_clauses(computed_s);

    (c, s)
}

/// Returns `(carry, sum)` of `a + b + cin`.
pub fn full_adder(store: &mut Store, a: Var, b: Var, cin: Var) -> (Var, Var) {
    let cout = store.fresh_var();
    let s = store.fresh_var();
    let (a, b, c) = (a.pos(), b.pos(), cin.pos());

    // Majority.
    let c_val: Vec<Clause> = vec![vec![a, b], vec![a, c], vec![b, c]];
    let c_neg_val: Vec<Clause> = vec![vec![-a, -b], vec![-a, -c], vec![-b, -c]];
    let mut computed_c = distribute(cout.neg(), c_val);
    computed_c.extend(distribute(cout.pos(), c_neg_val));
    store.append_clauses(computed_c);

    // Parity.
    let s_val: Vec<Clause> = vec![vec![-a, -b, c], vec![-a, b, -c], vec![a, -b, -c], vec![a, b, c]];
    let s_neg_val: Vec<Clause> = vec![vec![-a, -b, -c], vec![-a, b, c], vec![a, -b, c], vec![a, b, -c]];
    let mut computed_s = distribute(s.neg(), s_val);
    computed_s.extend(distribute(s.pos(), s_neg_val));
    store.append_clauses(computed_s);

    (cout, s)
}

/// Adds two equal-width numbers.
///
/// Returns the carries and the sums, both LSB-first. The initial carry-in is
/// a fresh variable forced to false.
pub fn ripple_carry(store: &mut Store, xs: &[Var], ys: &[Var]) -> (Vec<Var>, Vec<Var>) {
    assert_eq!(xs.len(), ys.len(), "Ripple-carry operands must have equal width");
    let mut cin = store.fresh_var();
    store.set_to_zero(cin);

    let mut carries = Vec::with_capacity(xs.len());
    let mut sums = Vec::with_capacity(xs.len());
    for (&x, &y) in xs.iter().rev().zip(ys.iter().rev()) {
        let (c, s) = full_adder(store, x, y, cin);
        carries.push(c);
        sums.push(s);
        cin = c;
    }
    (carries, sums)
}

/// Bits of the number of true variables in `vars`.
pub fn pop_count(store: &mut Store, vars: &[Var]) -> Result<Vec<Var>, EncodeError> {
    if vars.is_empty() {
        return Err(EncodeError::EmptyPopCount);
    }
    let padded_len = vars.len().next_power_of_two();
    let aux = store.fresh_vars(padded_len - vars.len());
    store.force_false(&aux);

    let mut layer: Vec<Vec<Var>> = vars.iter().chain(&aux).map(|&v| vec![v]).collect();
    while layer.len() > 1 {
        let (left, right) = layer.split_at(layer.len() / 2);
        let mut next = Vec::with_capacity(left.len());
        for (x, y) in left.iter().zip(right) {
            let (carries, mut sums) = ripple_carry(store, x, y);
            sums.reverse();
            let mut number = Vec::with_capacity(sums.len() + 1);
            if let Some(&top) = carries.last() {
                number.push(top);
            }
            number.extend(sums);
            next.push(number);
        }
        layer = next;
    }
    Ok(layer.pop().unwrap_or_default())
}

/// Asserts that exactly `k` of `vars` are true.
pub fn assert_k_of_n(store: &mut Store, k: usize, vars: &[Var]) -> Result<(), EncodeError> {
    let sum_bits = pop_count(store, vars)?;
    let mut k_bits = to_binary(k);
    if k_bits.len() > sum_bits.len() {
        // `k` exceeds what the counter can represent.
        debug!("assert_k_of_n: k = {} is out of range for {} vars", k, vars.len());
        store.append_clauses([Vec::new()]);
        return Ok(());
    }
    let mut padded = vec![-1; sum_bits.len() - k_bits.len()];
    padded.append(&mut k_bits);
    let assertion = padded
        .into_iter()
        .zip(&sum_bits)
        .map(|(bit, var)| vec![var.pos().with_sign(bit)]);
    store.append_clauses(assertion);
    Ok(())
}

/// Asserts that fewer than `k` of `vars` are true.
pub fn assert_k_less_than_n(store: &mut Store, k: usize, vars: &[Var]) -> Result<(), EncodeError> {
    inequality(store, true, k, vars)
}

/// Asserts that more than `k` of `vars` are true.
pub fn assert_k_greater_than_n(store: &mut Store, k: usize, vars: &[Var]) -> Result<(), EncodeError> {
    inequality(store, false, k, vars)
}

fn inequality(store: &mut Store, less_than: bool, k: usize, vars: &[Var]) -> Result<(), EncodeError> {
    let sum_bits = pop_count(store, vars)?;
    let k_binary = to_binary(k);
    let k_vars = store.fresh_vars(k_binary.len());
    store.append_clauses(k_vars.iter().zip(&k_binary).map(|(v, &bit)| vec![v.pos().with_sign(bit)]));

    let (k_vars, sum_bits) = make_same_length(store, k_vars, sum_bits);
    if less_than {
        assert_less_than(store, &sum_bits, &k_vars);
    } else {
        assert_less_than(store, &k_vars, &sum_bits);
    }
    Ok(())
}

/// Left-pads both numbers with zero bits to a common width plus one sign bit.
pub fn make_same_length(store: &mut Store, xs: Vec<Var>, ys: Vec<Var>) -> (Vec<Var>, Vec<Var>) {
    fn pad(store: &mut Store, n: usize, bits: Vec<Var>) -> Vec<Var> {
        let mut padding = store.fresh_vars(n);
        store.force_false(&padding);
        padding.extend(bits);
        padding
    }

    if xs.len() < ys.len() {
        let xs = pad(store, ys.len() - xs.len() + 1, xs);
        let ys = pad(store, 1, ys);
        (xs, ys)
    } else {
        let ys = pad(store, xs.len() - ys.len() + 1, ys);
        let xs = pad(store, 1, xs);
        (xs, ys)
    }
}

/// Asserts `a < b` for equal-width numbers whose top bits are zero.
pub fn assert_less_than(store: &mut Store, a: &[Var], b: &[Var]) {
    let neg_b = to_neg_twos_comp(store, b);
    let (_, sums) = ripple_carry(store, a, &neg_b);
    // Sign bit of `a - b`.
    if let Some(&sign) = sums.last() {
        store.force_true(sign);
    }
}

/// Two's complement negation of `bits`, MSB-first.
pub fn to_neg_twos_comp(store: &mut Store, bits: &[Var]) -> Vec<Var> {
    let flipped = store.fresh_vars(bits.len());
    store.append_clauses(
        flipped
            .iter()
            .zip(bits)
            .flat_map(|(f, b)| double_implies(f.pos(), b.neg())),
    );

    let one = store.fresh_vars(bits.len());
    if let Some((&low, high)) = one.split_last() {
        store.force_false(high);
        store.force_true(low);
    }

    let (_, mut sums) = ripple_carry(store, &flipped, &one);
    sums.reverse();
    sums
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Comparison {
    Exactly,
    LessThan,
    GreaterThan,
}

/// A request to constrain how many of `vars` are true, relative to `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountingRequest {
    pub comparison: Comparison,
    pub k: usize,
    pub vars: Vec<Var>,
}

impl CountingRequest {
    pub fn exactly(k: usize, vars: Vec<Var>) -> Self {
        Self {
            comparison: Comparison::Exactly,
            k,
            vars,
        }
    }

    pub fn less_than(k: usize, vars: Vec<Var>) -> Self {
        Self {
            comparison: Comparison::LessThan,
            k,
            vars,
        }
    }

    pub fn greater_than(k: usize, vars: Vec<Var>) -> Self {
        Self {
            comparison: Comparison::GreaterThan,
            k,
            vars,
        }
    }

    pub fn apply(&self, store: &mut Store) -> Result<(), EncodeError> {
        match self.comparison {
            Comparison::Exactly => assert_k_of_n(store, self.k, &self.vars),
            Comparison::LessThan => assert_k_less_than_n(store, self.k, &self.vars),
            Comparison::GreaterThan => assert_k_greater_than_n(store, self.k, &self.vars),
        }
    }
}

/// Applies the requests in order.
pub fn process_requests(store: &mut Store, requests: &[CountingRequest]) -> Result<(), EncodeError> {
    for request in requests {
        debug!(
            "process_requests: {:?} {} of {} vars",
            request.comparison,
            request.k,
            request.vars.len()
        );
        request.apply(store)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::clauses_to_dimacs;

    #[test]
    fn test_to_binary() {
        assert_eq!(to_binary(1), vec![1]);
        assert_eq!(to_binary(4), vec![1, -1, -1]);
        assert_eq!(to_binary(5), vec![1, -1, 1]);
    }

    #[test]
    fn test_half_adder_clauses() {
        let mut store = Store::new(2);
        let (c, s) = half_adder(&mut store, Var::new(1), Var::new(2));
        assert_eq!((c.id(), s.id()), (3, 4));
        assert_eq!(
            clauses_to_dimacs(store.clauses()),
            vec![
                vec![-4, 1, 2],
                vec![-4, -1, -2],
                vec![4, 1, -2],
                vec![4, -1, 2],
                vec![-3, 1],
                vec![-3, 2],
                vec![3, -1, -2],
            ]
        );
    }

    #[test]
    fn test_full_adder_allocates_two_vars() {
        let mut store = Store::new(3);
        let (c, s) = full_adder(&mut store, Var::new(1), Var::new(2), Var::new(3));
        assert_eq!((c.id(), s.id()), (4, 5));
        assert_eq!(store.num_clauses(), 6 + 8);
    }

    #[test]
    fn test_ripple_carry_shape() {
        let mut store = Store::new(4);
        let xs = [Var::new(1), Var::new(2)];
        let ys = [Var::new(3), Var::new(4)];
        let (carries, sums) = ripple_carry(&mut store, &xs, &ys);
        assert_eq!(carries.len(), 2);
        assert_eq!(sums.len(), 2);
        // carry-in 5, then (6, 7) for the low bits, (8, 9) for the high bits
        assert_eq!(carries, vec![Var::new(6), Var::new(8)]);
        assert_eq!(sums, vec![Var::new(7), Var::new(9)]);
    }

    #[test]
    fn test_pop_count_single() {
        let mut store = Store::new(1);
        let bits = pop_count(&mut store, &[Var::new(1)]).unwrap();
        assert_eq!(bits, vec![Var::new(1)]);
        assert_eq!(store.num_vars(), 1);
    }

    #[test]
    fn test_pop_count_width() {
        let mut store = Store::new(5);
        let vars: Vec<Var> = (1..=5).map(Var::new).collect();
        let bits = pop_count(&mut store, &vars).unwrap();
        // 5 inputs padded to 8, so the count takes 4 bits.
        assert_eq!(bits.len(), 4);
    }

    #[test]
    fn test_pop_count_empty() {
        let mut store = Store::default();
        assert_eq!(pop_count(&mut store, &[]), Err(EncodeError::EmptyPopCount));
    }

    #[test]
    fn test_make_same_length() {
        let mut store = Store::new(3);
        let (xs, ys) = make_same_length(&mut store, vec![Var::new(1)], vec![Var::new(2), Var::new(3)]);
        assert_eq!(xs.len(), 3);
        assert_eq!(ys.len(), 3);
        assert_eq!(xs.last(), Some(&Var::new(1)));
        assert_eq!(&ys[1..], &[Var::new(2), Var::new(3)]);
        assert_eq!(store.num_clauses(), 3);
    }

    #[test]
    fn test_k_out_of_range_is_unsat() {
        let mut store = Store::new(2);
        assert_k_of_n(&mut store, 4, &[Var::new(1), Var::new(2)]).unwrap();
        assert_eq!(store.clauses().next(), Some(&Vec::new()));
    }
}
