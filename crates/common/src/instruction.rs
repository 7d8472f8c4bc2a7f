//! Instruction representation for the RASM instruction set.
//!
//! An instruction is an opcode plus an ordered operand list. Operand count
//! and kinds are fixed per opcode; the parser enforces the grammar, so a
//! `Program` built through the assembler only ever contains well-formed
//! operand lists.

use crate::opcode::Opcode;

/// A single instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A register index (`R0`..`R9` in source text).
    Register(u8),
    /// A signed immediate value.
    Immediate(i32),
    /// An unresolved jump target, by label name. Exists only between the
    /// structural parse and label resolution; a finished program never
    /// contains one.
    Label(String),
    /// A resolved jump target: an instruction index into the same program.
    Target(usize),
}

impl Operand {
    /// The register index, if this operand is a register.
    pub fn register(&self) -> Option<u8> {
        match self {
            Operand::Register(r) => Some(*r),
            _ => None,
        }
    }

    /// The resolved jump index, if this operand is a resolved target.
    pub fn target(&self) -> Option<usize> {
        match self {
            Operand::Target(index) => Some(*index),
            _ => None,
        }
    }
}

/// A single RASM instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Ordered operands. Count and kinds are fixed per opcode.
    pub operands: Vec<Operand>,
    /// The label declared on this instruction's statement, if any.
    pub label: Option<String>,
}

impl Instruction {
    /// Create a new unlabelled instruction.
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self {
            opcode,
            operands,
            label: None,
        }
    }

    /// Attach a label name to this instruction.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
