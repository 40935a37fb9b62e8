//! Tiny reference solvers for checking encodings.

#![allow(dead_code)]

use design_cnf::store::Store;
use design_cnf::types::Lit;

fn clauses(store: &Store) -> Vec<Vec<i32>> {
    store.clauses().map(|c| c.iter().map(|l| l.to_dimacs()).collect()).collect()
}

fn satisfied(clause: &[i32], mask: u64) -> bool {
    clause.iter().any(|&lit| {
        let bit = (mask >> (lit.unsigned_abs() - 1)) & 1 == 1;
        (lit > 0) == bit
    })
}

/// Enumerates all assignments and returns the satisfying ones as models.
pub fn all_models(store: &Store) -> Vec<Vec<Lit>> {
    let n = store.num_vars();
    assert!(n <= 24, "Too many variables for brute force: {}", n);
    let clauses = clauses(store);
    (0..1u64 << n)
        .filter(|&mask| clauses.iter().all(|c| satisfied(c, mask)))
        .map(|mask| {
            (1..=n as i32)
                .map(|v| {
                    if (mask >> (v - 1)) & 1 == 1 {
                        Lit::from_dimacs(v)
                    } else {
                        Lit::from_dimacs(-v)
                    }
                })
                .collect()
        })
        .collect()
}

/// Unit propagation from `assumptions`.
///
/// Returns `None` on conflict, otherwise the (possibly partial) assignment
/// indexed by variable id.
pub fn propagate(store: &Store, assumptions: &[i32]) -> Option<Vec<Option<bool>>> {
    let clauses = clauses(store);
    let mut value: Vec<Option<bool>> = vec![None; store.num_vars() as usize + 1];
    for &lit in assumptions {
        let v = lit.unsigned_abs() as usize;
        match value[v] {
            Some(b) if b != (lit > 0) => return None,
            _ => value[v] = Some(lit > 0),
        }
    }

    loop {
        let mut changed = false;
        for clause in &clauses {
            let mut unassigned = None;
            let mut free = 0;
            let mut sat = false;
            for &lit in clause {
                match value[lit.unsigned_abs() as usize] {
                    Some(b) if b == (lit > 0) => {
                        sat = true;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        free += 1;
                        unassigned = Some(lit);
                    }
                }
            }
            if sat {
                continue;
            }
            match (free, unassigned) {
                (0, _) => return None,
                (1, Some(lit)) => {
                    value[lit.unsigned_abs() as usize] = Some(lit > 0);
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            return Some(value);
        }
    }
}
