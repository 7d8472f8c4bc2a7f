//! Construction and runtime errors for the RASM virtual machine.
//!
//! Configuration errors are the only errors allowed to abort startup.
//! Runtime faults carry the instruction index (`at`) they occurred on and
//! are returned to the caller from `run`/`step`.

use thiserror::Error;

/// Errors from validating a [`MachineConfig`](crate::MachineConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The register file length must be 1 through 10.
    #[error("invalid register count {count} (must be 1-10)")]
    InvalidRegisterCount { count: usize },

    /// The memory block must have at least one cell.
    #[error("invalid memory size 0 (must be positive)")]
    InvalidMemorySize,

    /// A step budget, when given, must be positive.
    #[error("invalid step budget 0 (must be positive or unbounded)")]
    InvalidStepBudget,
}

/// Faults that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A register operand is outside the configured register file.
    #[error("register R{index} out of range ({count} registers) at instruction {at}")]
    RegisterOutOfRange {
        at: usize,
        index: usize,
        count: usize,
    },

    /// A memory address is negative or past the end of memory.
    #[error("memory address {address} out of range (memory size {size}) at instruction {at}")]
    MemoryOutOfRange { at: usize, address: i32, size: usize },

    /// DIV or MOD with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// PRINT executed with no output sink installed.
    #[error("PRINT with no output sink at instruction {at}")]
    NoOutputSink { at: usize },

    /// An instruction's operand list does not match its opcode. Cannot
    /// happen for programs built by the assembler.
    #[error("malformed instruction at {at}")]
    MalformedInstruction { at: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::InvalidRegisterCount { count: 11 }.to_string(),
            "invalid register count 11 (must be 1-10)"
        );
        assert_eq!(
            ConfigError::InvalidMemorySize.to_string(),
            "invalid memory size 0 (must be positive)"
        );
    }

    #[test]
    fn runtime_error_display() {
        assert_eq!(
            RuntimeError::RegisterOutOfRange {
                at: 3,
                index: 7,
                count: 4
            }
            .to_string(),
            "register R7 out of range (4 registers) at instruction 3"
        );
        assert_eq!(
            RuntimeError::MemoryOutOfRange {
                at: 1,
                address: -2,
                size: 16
            }
            .to_string(),
            "memory address -2 out of range (memory size 16) at instruction 1"
        );
        assert_eq!(
            RuntimeError::DivisionByZero { at: 0 }.to_string(),
            "division by zero at instruction 0"
        );
        assert_eq!(
            RuntimeError::NoOutputSink { at: 5 }.to_string(),
            "PRINT with no output sink at instruction 5"
        );
    }
}
