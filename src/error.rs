//! Error types for the encoder.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Factor '{name}' is not part of the design")]
    UnknownFactor { name: String },
    #[error("Full crossing requested with no crossed factors")]
    EmptyCrossing,
    #[error("Factor '{name}' is crossed more than once")]
    DuplicateCrossing { name: String },
    #[error("Crossed factor index {index} out of bounds (design has {len} factors)")]
    CrossingIndexOutOfBounds { index: usize, len: usize },
    #[error("Fully crossed block needs {expected} trials, got {actual}")]
    TrialCountMismatch { expected: usize, actual: usize },
    #[error("Block starts at variable 0, but variables are 1-indexed")]
    ZeroStartAddress,
    #[error("Trial groups cover {actual} variables, expected {expected}")]
    TrialGroupMismatch { expected: usize, actual: usize },
    #[error("Cannot take the pop count of an empty variable list")]
    EmptyPopCount,
    #[error("Model assigns {got} variables, at least {needed} required")]
    ModelTooShort { needed: usize, got: usize },
    #[error("No level of factor '{factor}' is true in trial {trial}")]
    NoLevelSelected { factor: String, trial: usize },
    #[error("Formatting failed")]
    Format(#[from] std::fmt::Error),
}
