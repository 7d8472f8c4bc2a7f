//! Program representation for RASM instruction sequences.
//!
//! A program is an ordered sequence of instructions, immutable once built
//! and replaced wholesale on each load. After assembly, every comparison
//! instruction's jump operand is a resolved index into this same sequence;
//! [`Program::validate`] checks that invariant.

use crate::error::ProgramError;
use crate::instruction::{Instruction, Operand};

/// A RASM program: a sequence of instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The instruction sequence, in source statement order.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Check the jump-target invariant: every comparison instruction's
    /// jump operand is a resolved index within this program.
    pub fn validate(&self) -> Result<(), ProgramError> {
        let length = self.len();
        for (at, instr) in self.instructions.iter().enumerate() {
            if !instr.opcode.is_comparison() {
                continue;
            }
            match instr.operands.get(2) {
                Some(Operand::Target(target)) => {
                    if *target >= length {
                        return Err(ProgramError::TargetOutOfBounds {
                            at,
                            target: *target,
                            length,
                        });
                    }
                }
                Some(Operand::Label(name)) => {
                    return Err(ProgramError::UnresolvedTarget {
                        at,
                        name: name.clone(),
                    });
                }
                _ => return Err(ProgramError::MalformedComparison { at }),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::Opcode;

    fn inc(reg: u8) -> Instruction {
        Instruction::new(Opcode::Inc, vec![Operand::Register(reg)])
    }

    fn neq(ra: u8, rb: u8, target: Operand) -> Instruction {
        Instruction::new(
            Opcode::Neq,
            vec![Operand::Register(ra), Operand::Register(rb), target],
        )
    }

    #[test]
    fn empty_program() {
        let program = Program::new(vec![]);
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
        assert_eq!(program.validate(), Ok(()));
    }

    #[test]
    fn get_in_and_out_of_bounds() {
        let program = Program::new(vec![inc(0)]);
        assert!(program.get(0).is_some());
        assert!(program.get(1).is_none());
    }

    #[test]
    fn validate_accepts_resolved_targets() {
        let program = Program::new(vec![inc(0), neq(0, 1, Operand::Target(0))]);
        assert_eq!(program.validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_self_target() {
        let program = Program::new(vec![neq(0, 1, Operand::Target(0))]);
        assert_eq!(program.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unresolved_label() {
        let program = Program::new(vec![neq(0, 1, Operand::Label("loop".to_string()))]);
        assert_eq!(
            program.validate(),
            Err(ProgramError::UnresolvedTarget {
                at: 0,
                name: "loop".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_out_of_bounds_target() {
        let program = Program::new(vec![inc(0), neq(0, 1, Operand::Target(2))]);
        assert_eq!(
            program.validate(),
            Err(ProgramError::TargetOutOfBounds {
                at: 1,
                target: 2,
                length: 2
            })
        );
    }

    #[test]
    fn validate_rejects_missing_jump_operand() {
        let bad = Instruction::new(
            Opcode::Eq,
            vec![Operand::Register(0), Operand::Register(1)],
        );
        let program = Program::new(vec![bad]);
        assert_eq!(
            program.validate(),
            Err(ProgramError::MalformedComparison { at: 0 })
        );
    }

    #[test]
    fn non_comparison_operands_are_not_checked() {
        // SET carries an immediate, not a target; validate must not flag it.
        let set = Instruction::new(
            Opcode::Set,
            vec![Operand::Immediate(5), Operand::Register(0)],
        );
        let program = Program::new(vec![set]);
        assert_eq!(program.validate(), Ok(()));
    }
}
