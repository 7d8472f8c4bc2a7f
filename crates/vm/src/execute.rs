//! Execution loop and opcode dispatch for the RASM machine.

use crate::error::RuntimeError;
use crate::machine::Machine;
use rasm_common::{Opcode, Operand};

impl Machine {
    /// Execute the resident program until the counter passes its end or
    /// the step budget is reached.
    ///
    /// Resets the step counter, then executes exactly one instruction per
    /// iteration. A fault aborts the loop and is returned; the counter is
    /// left at the faulting instruction.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.reset_steps();
        while self.pc() < self.program().len() && !self.budget_exhausted() {
            self.execute_instruction()?;
            self.take_step();
        }
        Ok(())
    }

    /// Execute exactly one instruction if the counter is in bounds,
    /// otherwise do nothing. Intended for interactive, stepwise use.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        if self.pc() < self.program().len() {
            self.execute_instruction()?;
            self.take_step();
        }
        Ok(())
    }

    /// Execute the instruction under the counter. Every instruction
    /// except a taken conditional jump advances the counter by exactly
    /// one; a taken jump sets it directly and skips the advance.
    fn execute_instruction(&mut self) -> Result<(), RuntimeError> {
        let at = self.pc();
        let Some(instr) = self.program().get(at).cloned() else {
            return Ok(());
        };

        match (instr.opcode, instr.operands.as_slice()) {
            (Opcode::Inc, [Operand::Register(r)]) => {
                let value = self.read_register(at, *r as usize)?;
                self.write_register(at, *r as usize, value.wrapping_add(1))?;
            }
            (Opcode::Dec, [Operand::Register(r)]) => {
                let value = self.read_register(at, *r as usize)?;
                self.write_register(at, *r as usize, value.wrapping_sub(1))?;
            }
            (Opcode::Set, [Operand::Immediate(value), Operand::Register(r)]) => {
                self.write_register(at, *r as usize, *value)?;
            }
            (Opcode::LoadIm, [Operand::Immediate(address), Operand::Register(r)]) => {
                let value = self.read_memory(at, *address)?;
                self.write_register(at, *r as usize, value)?;
            }
            (Opcode::Load, [Operand::Register(ra), Operand::Register(r)]) => {
                let address = self.read_register(at, *ra as usize)?;
                let value = self.read_memory(at, address)?;
                self.write_register(at, *r as usize, value)?;
            }
            (Opcode::Store, [Operand::Register(ra), Operand::Register(r)]) => {
                let address = self.read_register(at, *ra as usize)?;
                let value = self.read_register(at, *r as usize)?;
                self.write_memory(at, address, value)?;
            }
            (Opcode::Print, [Operand::Register(r)]) => {
                let value = self.read_register(at, *r as usize)?;
                self.emit(at, value)?;
            }

            (
                Opcode::Add,
                [Operand::Register(ra), Operand::Register(rb), Operand::Register(rd)],
            ) => self.exec_arithmetic(at, *ra, *rb, *rd, |a, b| a.wrapping_add(b))?,
            (
                Opcode::Sub,
                [Operand::Register(ra), Operand::Register(rb), Operand::Register(rd)],
            ) => self.exec_arithmetic(at, *ra, *rb, *rd, |a, b| a.wrapping_sub(b))?,
            (
                Opcode::Mul,
                [Operand::Register(ra), Operand::Register(rb), Operand::Register(rd)],
            ) => self.exec_arithmetic(at, *ra, *rb, *rd, |a, b| a.wrapping_mul(b))?,
            (
                Opcode::Div,
                [Operand::Register(ra), Operand::Register(rb), Operand::Register(rd)],
            ) => self.exec_div(at, *ra, *rb, *rd)?,
            (
                Opcode::Mod,
                [Operand::Register(ra), Operand::Register(rb), Operand::Register(rd)],
            ) => self.exec_mod(at, *ra, *rb, *rd)?,

            (
                Opcode::Eq,
                [Operand::Register(ra), Operand::Register(rb), Operand::Target(t)],
            ) => return self.exec_comparison(at, *ra, *rb, *t, |a, b| a == b),
            (
                Opcode::Neq,
                [Operand::Register(ra), Operand::Register(rb), Operand::Target(t)],
            ) => return self.exec_comparison(at, *ra, *rb, *t, |a, b| a != b),
            (
                Opcode::Lt,
                [Operand::Register(ra), Operand::Register(rb), Operand::Target(t)],
            ) => return self.exec_comparison(at, *ra, *rb, *t, |a, b| a < b),
            (
                Opcode::Gt,
                [Operand::Register(ra), Operand::Register(rb), Operand::Target(t)],
            ) => return self.exec_comparison(at, *ra, *rb, *t, |a, b| a > b),
            (
                Opcode::Lte,
                [Operand::Register(ra), Operand::Register(rb), Operand::Target(t)],
            ) => return self.exec_comparison(at, *ra, *rb, *t, |a, b| a <= b),
            (
                Opcode::Gte,
                [Operand::Register(ra), Operand::Register(rb), Operand::Target(t)],
            ) => return self.exec_comparison(at, *ra, *rb, *t, |a, b| a >= b),

            _ => return Err(RuntimeError::MalformedInstruction { at }),
        }

        self.set_pc(at + 1);
        Ok(())
    }

    fn exec_arithmetic(
        &mut self,
        at: usize,
        ra: u8,
        rb: u8,
        rd: u8,
        apply: impl Fn(i32, i32) -> i32,
    ) -> Result<(), RuntimeError> {
        let a = self.read_register(at, ra as usize)?;
        let b = self.read_register(at, rb as usize)?;
        self.write_register(at, rd as usize, apply(a, b))
    }

    fn exec_div(&mut self, at: usize, ra: u8, rb: u8, rd: u8) -> Result<(), RuntimeError> {
        let a = self.read_register(at, ra as usize)?;
        let b = self.read_register(at, rb as usize)?;
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { at });
        }
        self.write_register(at, rd as usize, div_floor(a, b))
    }

    fn exec_mod(&mut self, at: usize, ra: u8, rb: u8, rd: u8) -> Result<(), RuntimeError> {
        let a = self.read_register(at, ra as usize)?;
        let b = self.read_register(at, rb as usize)?;
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { at });
        }
        self.write_register(at, rd as usize, rem_floor(a, b))
    }

    fn exec_comparison(
        &mut self,
        at: usize,
        ra: u8,
        rb: u8,
        target: usize,
        holds: impl Fn(i32, i32) -> bool,
    ) -> Result<(), RuntimeError> {
        let a = self.read_register(at, ra as usize)?;
        let b = self.read_register(at, rb as usize)?;
        if holds(a, b) {
            // The taken jump replaces the default advance for this step.
            self.set_pc(target);
        } else {
            self.set_pc(at + 1);
        }
        Ok(())
    }
}

/// Floored division: rounds toward negative infinity for all sign
/// combinations. `i32::MIN / -1` wraps.
fn div_floor(a: i32, b: i32) -> i32 {
    let q = a.wrapping_div(b);
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

/// Floored remainder: the result's sign follows the divisor, so
/// `a == b * div_floor(a, b) + rem_floor(a, b)` holds.
fn rem_floor(a: i32, b: i32) -> i32 {
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        r.wrapping_add(b)
    } else {
        r
    }
}
