//! RASM assembler — source text to resolved programs.
//!
//! The pipeline is lexer → parser → label resolution: text becomes a
//! token stream, the token stream becomes an instruction sequence, and
//! symbolic jump targets become instruction indices. The output
//! [`Program`](rasm_common::Program) is what the virtual machine executes.
//!
//! # Usage
//!
//! ```
//! use rasm_assembler::assemble;
//! use rasm_common::{Opcode, Operand};
//!
//! let program = assemble("loop: INC R0\nNEQ R0 R1 @loop\n").unwrap();
//! assert_eq!(program.len(), 2);
//! assert_eq!(program.instructions[1].operands[2], Operand::Target(0));
//! ```
//!
//! # Error policy
//!
//! Lexing and parsing are both fail-fast: the first error is returned,
//! tagged with its source line. Fix one error at a time.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use disassembler::disassemble;
pub use error::AsmError;

use rasm_common::Program;

/// Assemble source text into a resolved program.
///
/// On success every comparison instruction's jump operand is an
/// instruction index into the returned program; label names survive only
/// as the `label` field of the instructions that declared them.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let tokens = lexer::scan(text)?;
    parser::parse(tokens)
}
