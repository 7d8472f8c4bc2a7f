//! Disassembler: resolved program → canonical assembly text.
//!
//! Output is flat text, one instruction per line, no comments. Resolved
//! jump indices are turned back into labels: every distinct target index
//! gets a synthesized `L0`, `L1`, ... name in ascending index order, and
//! the declaration is emitted on the targeted instruction's line. Labels
//! that nothing jumps to are dropped.

use std::collections::HashMap;

use rasm_common::{Operand, Program};

/// Disassemble a program into canonical assembly text.
///
/// Reassembling the output yields a program with identical opcodes and
/// operands; only label names are canonicalized.
pub fn disassemble(program: &Program) -> String {
    let names = target_names(program);

    let mut text = String::new();
    for (index, instr) in program.instructions.iter().enumerate() {
        if let Some(name) = names.get(&index) {
            text.push_str(name);
            text.push_str(": ");
        }
        text.push_str(instr.opcode.mnemonic());
        for operand in &instr.operands {
            text.push(' ');
            text.push_str(&format_operand(operand, &names));
        }
        text.push('\n');
    }
    text
}

/// Name every distinct jump-target index `L0`, `L1`, ... by ascending
/// instruction index.
fn target_names(program: &Program) -> HashMap<usize, String> {
    let mut targets: Vec<usize> = program
        .instructions
        .iter()
        .filter(|instr| instr.opcode.is_comparison())
        .filter_map(|instr| instr.operands.get(2).and_then(Operand::target))
        .collect();
    targets.sort_unstable();
    targets.dedup();

    targets
        .into_iter()
        .enumerate()
        .map(|(ordinal, index)| (index, format!("L{ordinal}")))
        .collect()
}

fn format_operand(operand: &Operand, names: &HashMap<usize, String>) -> String {
    match operand {
        Operand::Register(r) => format!("R{r}"),
        Operand::Immediate(value) => value.to_string(),
        Operand::Target(index) => {
            let name = names
                .get(index)
                .expect("every target index was collected");
            format!("@{name}")
        }
        // Unresolved input is preserved verbatim; assembler output never
        // contains this variant.
        Operand::Label(name) => format!("@{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasm_common::{Instruction, Opcode};

    #[test]
    fn empty_program() {
        assert_eq!(disassemble(&Program::new(vec![])), "");
    }

    #[test]
    fn straight_line_program() {
        let program = Program::new(vec![
            Instruction::new(
                Opcode::Set,
                vec![Operand::Immediate(5), Operand::Register(0)],
            ),
            Instruction::new(Opcode::Print, vec![Operand::Register(0)]),
        ]);
        assert_eq!(disassemble(&program), "SET 5 R0\nPRINT R0\n");
    }

    #[test]
    fn negative_immediate() {
        let program = Program::new(vec![Instruction::new(
            Opcode::Set,
            vec![Operand::Immediate(-42), Operand::Register(1)],
        )]);
        assert_eq!(disassemble(&program), "SET -42 R1\n");
    }

    #[test]
    fn jump_target_gets_synthesized_label() {
        let program = Program::new(vec![
            Instruction::new(Opcode::Inc, vec![Operand::Register(0)]),
            Instruction::new(
                Opcode::Neq,
                vec![
                    Operand::Register(0),
                    Operand::Register(1),
                    Operand::Target(0),
                ],
            ),
        ]);
        assert_eq!(disassemble(&program), "L0: INC R0\nNEQ R0 R1 @L0\n");
    }

    #[test]
    fn labels_nothing_jumps_to_are_dropped() {
        let program = Program::new(vec![Instruction::new(
            Opcode::Inc,
            vec![Operand::Register(0)],
        )
        .with_label("orphan")]);
        assert_eq!(disassemble(&program), "INC R0\n");
    }

    #[test]
    fn distinct_targets_are_numbered_in_index_order() {
        let program = Program::new(vec![
            Instruction::new(Opcode::Inc, vec![Operand::Register(0)]),
            Instruction::new(Opcode::Dec, vec![Operand::Register(1)]),
            Instruction::new(
                Opcode::Lt,
                vec![
                    Operand::Register(0),
                    Operand::Register(1),
                    Operand::Target(1),
                ],
            ),
            Instruction::new(
                Opcode::Gt,
                vec![
                    Operand::Register(0),
                    Operand::Register(1),
                    Operand::Target(0),
                ],
            ),
        ]);
        assert_eq!(
            disassemble(&program),
            "L0: INC R0\nL1: DEC R1\nLT R0 R1 @L1\nGT R0 R1 @L0\n"
        );
    }

    #[test]
    fn shared_target_reuses_one_label() {
        let program = Program::new(vec![
            Instruction::new(Opcode::Inc, vec![Operand::Register(0)]),
            Instruction::new(
                Opcode::Eq,
                vec![
                    Operand::Register(0),
                    Operand::Register(1),
                    Operand::Target(0),
                ],
            ),
            Instruction::new(
                Opcode::Neq,
                vec![
                    Operand::Register(0),
                    Operand::Register(1),
                    Operand::Target(0),
                ],
            ),
        ]);
        assert_eq!(
            disassemble(&program),
            "L0: INC R0\nEQ R0 R1 @L0\nNEQ R0 R1 @L0\n"
        );
    }
}
