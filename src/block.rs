//! High-level and intermediate-level blocks.
//!
//! An [`HlBlock`] is the user-facing description: factors, the crossed subset
//! and requested constraints. [`allocate_vars`] commits it to a variable
//! layout, producing an [`IlBlock`]:
//!
//! ```text
//! trial 0: [factor 0 levels][factor 1 levels]...
//! trial 1: [factor 0 levels][factor 1 levels]...
//! ...
//! ```
//!
//! Addresses are not stored per node; [`get_shaped_levels`] recomputes the
//! layout from `start_addr`, `num_trials` and the leaf counts.

use std::collections::HashSet;

use log::debug;

use crate::design::{fully_cross_size, DesignNode};
use crate::error::EncodeError;
use crate::store::Store;
use crate::types::{Lit, Var};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ConstraintKind {
    /// Each factor takes exactly one level in every trial.
    Consistency,
    /// Every combination of crossed levels occurs in exactly one trial.
    FullyCross,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HlBlock {
    num_trials: usize,
    design: Vec<DesignNode>,
    crossing: Vec<usize>,
    constraints: Vec<ConstraintKind>,
}

impl HlBlock {
    /// Builds a block, resolving crossed factor names against the design.
    ///
    /// With [`ConstraintKind::FullyCross`], `num_trials` must equal the
    /// crossing size.
    pub fn new(
        num_trials: usize,
        design: Vec<DesignNode>,
        crossing: &[&str],
        constraints: impl IntoIterator<Item = ConstraintKind>,
    ) -> Result<Self, EncodeError> {
        let crossing = resolve_crossing(&design, crossing)?;

        let mut kinds = Vec::new();
        for kind in constraints {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        check_full_crossing(num_trials, &design, &crossing, &kinds)?;

        Ok(Self {
            num_trials,
            design,
            crossing,
            constraints: kinds,
        })
    }

    /// A fully crossed block whose trial count is the crossing size.
    pub fn fully_crossed(design: Vec<DesignNode>, crossing: &[&str]) -> Result<Self, EncodeError> {
        let indices = resolve_crossing(&design, crossing)?;
        let num_trials = fully_cross_size(indices.iter().map(|&i| &design[i]));
        Self::new(num_trials, design, crossing, [ConstraintKind::FullyCross])
    }

    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    pub fn design(&self) -> &[DesignNode] {
        &self.design
    }

    /// Crossed factors, in crossing order.
    pub fn crossing(&self) -> impl Iterator<Item = &DesignNode> + '_ {
        self.crossing.iter().map(move |&i| &self.design[i])
    }

    /// Indices of the crossed factors within the design.
    pub fn crossing_indices(&self) -> &[usize] {
        &self.crossing
    }

    pub fn constraints(&self) -> &[ConstraintKind] {
        &self.constraints
    }

    /// Variables allocated per trial (sum of leaf counts of all factors).
    pub fn variables_per_trial(&self) -> usize {
        self.design.iter().map(DesignNode::leaf_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IlBlock {
    num_trials: usize,
    start_addr: u32,
    end_addr: u32,
    design: Vec<DesignNode>,
    crossing: Vec<usize>,
    constraints: Vec<ConstraintKind>,
}

impl IlBlock {
    /// Builds an intermediate block from an explicit address range.
    ///
    /// The range `start_addr..=end_addr` must hold exactly one variable per
    /// trial, factor and level, and cannot start at 0.
    pub fn new(
        num_trials: usize,
        start_addr: u32,
        end_addr: u32,
        design: Vec<DesignNode>,
        crossing: Vec<usize>,
        constraints: Vec<ConstraintKind>,
    ) -> Result<Self, EncodeError> {
        if start_addr == 0 {
            return Err(EncodeError::ZeroStartAddress);
        }
        let expected = num_trials * design.iter().map(DesignNode::leaf_count).sum::<usize>();
        let actual = (end_addr as usize + 1).saturating_sub(start_addr as usize);
        if expected != actual {
            return Err(EncodeError::TrialGroupMismatch { expected, actual });
        }
        let mut seen = HashSet::new();
        for &index in &crossing {
            if index >= design.len() {
                return Err(EncodeError::CrossingIndexOutOfBounds {
                    index,
                    len: design.len(),
                });
            }
            if !seen.insert(index) {
                return Err(EncodeError::DuplicateCrossing {
                    name: design[index].name().to_string(),
                });
            }
        }
        check_full_crossing(num_trials, &design, &crossing, &constraints)?;
        Ok(Self {
            num_trials,
            start_addr,
            end_addr,
            design,
            crossing,
            constraints,
        })
    }

    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    pub fn start_addr(&self) -> u32 {
        self.start_addr
    }

    pub fn end_addr(&self) -> u32 {
        self.end_addr
    }

    /// Number of variables in `start_addr..=end_addr`.
    pub fn num_vars(&self) -> usize {
        (self.end_addr as usize + 1).saturating_sub(self.start_addr as usize)
    }

    pub fn design(&self) -> &[DesignNode] {
        &self.design
    }

    pub fn crossing(&self) -> impl Iterator<Item = &DesignNode> + '_ {
        self.crossing.iter().map(move |&i| &self.design[i])
    }

    pub fn crossing_indices(&self) -> &[usize] {
        &self.crossing
    }

    pub fn constraints(&self) -> &[ConstraintKind] {
        &self.constraints
    }

    pub fn has_constraint(&self, kind: ConstraintKind) -> bool {
        self.constraints.contains(&kind)
    }

    /// Maps a model back to level names: one entry per trial, one name per factor.
    ///
    /// Only the positive literals of the model matter; every level variable
    /// of the block must be covered by it.
    pub fn decode(&self, model: &[Lit]) -> Result<Vec<Vec<&str>>, EncodeError> {
        let max = model.iter().map(|lit| lit.var().id()).max().unwrap_or(0);
        if self.num_vars() > 0 && max < self.end_addr {
            return Err(EncodeError::ModelTooShort {
                needed: self.end_addr as usize,
                got: max as usize,
            });
        }
        let truth: HashSet<Var> = model.iter().filter(|lit| lit.is_positive()).map(|lit| lit.var()).collect();

        let leaves: Vec<Vec<&str>> = self.design.iter().map(DesignNode::leaves).collect();
        let mut trials = Vec::with_capacity(self.num_trials);
        for (t, groups) in get_shaped_levels(self).into_iter().enumerate() {
            let mut trial = Vec::with_capacity(groups.len());
            for (f, group) in groups.iter().enumerate() {
                let level = group
                    .iter()
                    .position(|v| truth.contains(v))
                    .ok_or_else(|| EncodeError::NoLevelSelected {
                        factor: self.design[f].name().to_string(),
                        trial: t,
                    })?;
                trial.push(leaves[f][level]);
            }
            trials.push(trial);
        }
        Ok(trials)
    }
}

/// Positions of the crossed factors in `design`, each named at most once.
fn resolve_crossing(design: &[DesignNode], crossing: &[&str]) -> Result<Vec<usize>, EncodeError> {
    let mut indices = Vec::with_capacity(crossing.len());
    for &name in crossing {
        let index = design
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| EncodeError::UnknownFactor { name: name.to_string() })?;
        if indices.contains(&index) {
            return Err(EncodeError::DuplicateCrossing { name: name.to_string() });
        }
        indices.push(index);
    }
    Ok(indices)
}

fn check_full_crossing(
    num_trials: usize,
    design: &[DesignNode],
    crossing: &[usize],
    constraints: &[ConstraintKind],
) -> Result<(), EncodeError> {
    if !constraints.contains(&ConstraintKind::FullyCross) {
        return Ok(());
    }
    if crossing.is_empty() {
        return Err(EncodeError::EmptyCrossing);
    }
    let expected = fully_cross_size(crossing.iter().map(|&i| &design[i]));
    if num_trials != expected {
        return Err(EncodeError::TrialCountMismatch {
            expected,
            actual: num_trials,
        });
    }
    Ok(())
}

/// Allocates one variable per trial, factor and level, in that nesting order.
///
/// Only fresh variables are consumed; no clauses are emitted. `Consistency`
/// is always prepended to the block's constraints.
pub fn allocate_vars(block: &HlBlock, store: &mut Store) -> IlBlock {
    let start_addr = store.num_vars() + 1;
    for _ in 0..block.num_trials {
        for factor in &block.design {
            store.fresh_vars(factor.leaf_count());
        }
    }
    let end_addr = store.num_vars();
    debug!(
        "allocate_vars: {} trials x {} vars -> [{}, {}]",
        block.num_trials,
        block.variables_per_trial(),
        start_addr,
        end_addr
    );

    let mut constraints = vec![ConstraintKind::Consistency];
    constraints.extend(block.constraints.iter().copied().filter(|&k| k != ConstraintKind::Consistency));

    IlBlock {
        num_trials: block.num_trials,
        start_addr,
        end_addr,
        design: block.design.clone(),
        crossing: block.crossing.clone(),
        constraints,
    }
}

/// Splits `start, start + 1, ...` into consecutive groups of the given sizes.
pub fn get_trial_vars(start: u32, sizes: &[usize]) -> Vec<Vec<Var>> {
    let mut next = start;
    sizes
        .iter()
        .map(|&n| {
            let group = (next..next + n as u32).map(Var::new).collect();
            next += n as u32;
            group
        })
        .collect()
}

/// Level variables indexed by trial, then factor.
pub fn get_shaped_levels(block: &IlBlock) -> Vec<Vec<Vec<Var>>> {
    let sizes: Vec<usize> = block.design.iter().map(DesignNode::leaf_count).collect();
    let per_trial: usize = sizes.iter().sum();
    let all_sizes: Vec<usize> = std::iter::repeat(sizes.iter().copied())
        .take(block.num_trials)
        .flatten()
        .collect();
    assert_eq!(
        per_trial * block.num_trials,
        block.num_vars(),
        "Address range does not match the design shape"
    );

    let groups = get_trial_vars(block.start_addr, &all_sizes);
    if sizes.is_empty() {
        return vec![Vec::new(); block.num_trials];
    }
    groups.chunks(sizes.len()).map(|chunk| chunk.to_vec()).collect()
}
