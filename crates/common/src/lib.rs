//! RASM common types.
//!
//! This crate provides the foundational data structures shared by the
//! assembler and the virtual machine:
//!
//! - [`Opcode`] — the 18 RASM operations
//! - [`Operand`] — registers, immediates, and jump targets
//! - [`Instruction`] — opcode + operand list + optional label
//! - [`Program`] — an ordered instruction sequence with a validated
//!   jump-target invariant
//! - [`ProgramError`] — violations of that invariant
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::ProgramError;
pub use instruction::Instruction;
pub use instruction::Operand;
pub use opcode::Opcode;
pub use program::Program;
