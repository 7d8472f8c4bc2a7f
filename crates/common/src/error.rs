//! Validation errors for built programs.

use thiserror::Error;

/// Errors found when validating a program's jump-target invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// A comparison instruction still carries a label name instead of a
    /// resolved index.
    #[error("instruction {at}: unresolved jump target '{name}'")]
    UnresolvedTarget { at: usize, name: String },

    /// A comparison instruction's resolved index points past the end of
    /// the program.
    #[error("instruction {at}: jump target {target} out of bounds (program length {length})")]
    TargetOutOfBounds {
        at: usize,
        target: usize,
        length: usize,
    },

    /// A comparison instruction's jump operand slot is missing or holds a
    /// non-target operand.
    #[error("instruction {at}: comparison without a jump operand")]
    MalformedComparison { at: usize },
}
