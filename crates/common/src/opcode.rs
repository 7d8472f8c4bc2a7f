//! Opcode definitions for the RASM instruction set.

/// Identifies the operation an instruction performs.
///
/// Mnemonics are case-sensitive uppercase in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Register arithmetic
    /// Increment a register by one.
    Inc,
    /// Decrement a register by one.
    Dec,
    /// Set a register to an immediate value.
    Set,

    // Memory traffic
    /// Load `memory[value of address register]` into a register.
    Load,
    /// Load `memory[immediate address]` into a register.
    LoadIm,
    /// Store a register's value at `memory[value of address register]`.
    Store,

    // Output
    /// Send a register's value to the output sink.
    Print,

    // Conditional jumps
    /// Jump if the two registers are equal.
    Eq,
    /// Jump if the two registers are not equal.
    Neq,
    /// Jump if the first register is less than the second.
    Lt,
    /// Jump if the first register is greater than the second.
    Gt,
    /// Jump if the first register is less than or equal to the second.
    Lte,
    /// Jump if the first register is greater than or equal to the second.
    Gte,

    // Three-register arithmetic
    /// `rdest := ra + rb` (wrapping).
    Add,
    /// `rdest := ra - rb` (wrapping).
    Sub,
    /// `rdest := ra * rb` (wrapping).
    Mul,
    /// `rdest := ra / rb`, floored. Division by zero is a runtime fault.
    Div,
    /// `rdest := ra mod rb`, floored (sign follows the divisor).
    Mod,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 18] = [
    Opcode::Inc,
    Opcode::Dec,
    Opcode::Set,
    Opcode::Load,
    Opcode::LoadIm,
    Opcode::Store,
    Opcode::Print,
    Opcode::Eq,
    Opcode::Neq,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Lte,
    Opcode::Gte,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Mod,
];

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Set => "SET",
            Opcode::Load => "LOAD",
            Opcode::LoadIm => "LOADIM",
            Opcode::Store => "STORE",
            Opcode::Print => "PRINT",
            Opcode::Eq => "EQ",
            Opcode::Neq => "NEQ",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Lte => "LTE",
            Opcode::Gte => "GTE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
        }
    }

    /// Look up an opcode by its mnemonic. Case-sensitive.
    pub fn from_mnemonic(text: &str) -> Option<Opcode> {
        ALL_OPCODES.iter().find(|op| op.mnemonic() == text).copied()
    }

    /// True for the six conditional-jump opcodes.
    ///
    /// These are the only instructions that carry a jump-target operand.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Opcode::Eq | Opcode::Neq | Opcode::Lt | Opcode::Gt | Opcode::Lte | Opcode::Gte
        )
    }

    /// True for the five three-register arithmetic opcodes.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod
        )
    }
}
