//! VM state management: configuration, register file, memory, hooks.

use crate::error::{ConfigError, RuntimeError};
use rasm_assembler::AsmError;
use rasm_common::{Instruction, Program};

/// Output sink invoked once per executed PRINT, in execution order.
pub type OutputSink = Box<dyn FnMut(i32)>;

/// Observation hook invoked with `(new value, index)` immediately after
/// every write to the watched array.
pub type WatchHook = Box<dyn FnMut(i32, usize)>;

/// Construction-time configuration, validated by [`Machine::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Register file length. Must be 1 through 10.
    pub register_count: usize,
    /// Memory block length in cells. Must be positive.
    pub memory_size: usize,
    /// Maximum instructions a single `run()` may execute. `None` is
    /// unbounded.
    pub step_budget: Option<u64>,
}

impl Default for MachineConfig {
    /// Four registers, 1024 memory cells, no step budget.
    fn default() -> Self {
        Self {
            register_count: 4,
            memory_size: 1024,
            step_budget: None,
        }
    }
}

/// The RASM virtual machine.
///
/// Owns the resident program, register file, memory, and program counter.
/// Registers and memory persist across `load` calls; only the explicit
/// erase operations reset them. A machine is long-lived and reusable
/// across many load/run cycles.
pub struct Machine {
    program: Program,
    pc: usize,
    registers: Vec<i32>,
    memory: Vec<i32>,
    steps: u64,
    step_budget: Option<u64>,
    output: Option<OutputSink>,
    register_watch: Option<WatchHook>,
    memory_watch: Option<WatchHook>,
}

impl Machine {
    /// Create a machine from a validated configuration.
    pub fn new(config: MachineConfig) -> Result<Self, ConfigError> {
        if config.register_count == 0 || config.register_count > 10 {
            return Err(ConfigError::InvalidRegisterCount {
                count: config.register_count,
            });
        }
        if config.memory_size == 0 {
            return Err(ConfigError::InvalidMemorySize);
        }
        if config.step_budget == Some(0) {
            return Err(ConfigError::InvalidStepBudget);
        }

        Ok(Self {
            program: Program::new(vec![]),
            pc: 0,
            registers: vec![0; config.register_count],
            memory: vec![0; config.memory_size],
            steps: 0,
            step_budget: config.step_budget,
            output: None,
            register_watch: None,
            memory_watch: None,
        })
    }

    /// Assemble `source` and install it as the resident program.
    ///
    /// On failure the previous program stays resident and the counter is
    /// untouched. `reset_pc` zeroes the program counter on success;
    /// passing `false` preserves it, which supports reloading mid-way
    /// through a stepwise execution.
    pub fn load(&mut self, source: &str, reset_pc: bool) -> Result<(), AsmError> {
        let program = rasm_assembler::assemble(source)?;
        self.program = program;
        if reset_pc {
            self.pc = 0;
        }
        Ok(())
    }

    /// The resident program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Directly override the program counter.
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// The instruction the counter currently points at, if in bounds.
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.program.get(self.pc)
    }

    /// Instructions executed by the current/most recent `run()` call.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Live view of the register file.
    pub fn registers(&self) -> &[i32] {
        &self.registers
    }

    /// Live view of memory.
    pub fn memory(&self) -> &[i32] {
        &self.memory
    }

    /// Zero every register. The program and counter are untouched.
    /// Bulk erase writes the backing array directly; watch hooks do not
    /// fire.
    pub fn erase_registers(&mut self) {
        self.registers.fill(0);
    }

    /// Zero every memory cell. Same contract as [`erase_registers`].
    ///
    /// [`erase_registers`]: Machine::erase_registers
    pub fn erase_memory(&mut self) {
        self.memory.fill(0);
    }

    /// Install the PRINT sink. Replaces any previous sink.
    pub fn set_output(&mut self, sink: impl FnMut(i32) + 'static) {
        self.output = Some(Box::new(sink));
    }

    /// Install a register watch hook, replacing any previous one. The
    /// hook fires synchronously after each register write, before the
    /// program counter advances for that step. It must observe only;
    /// execution never depends on anything a hook does.
    pub fn watch_registers(&mut self, hook: impl FnMut(i32, usize) + 'static) {
        self.register_watch = Some(Box::new(hook));
    }

    /// Install a memory watch hook, replacing any previous one. Same
    /// contract as [`watch_registers`](Machine::watch_registers).
    pub fn watch_memory(&mut self, hook: impl FnMut(i32, usize) + 'static) {
        self.memory_watch = Some(Box::new(hook));
    }

    pub(crate) fn read_register(&self, at: usize, index: usize) -> Result<i32, RuntimeError> {
        self.registers
            .get(index)
            .copied()
            .ok_or(RuntimeError::RegisterOutOfRange {
                at,
                index,
                count: self.registers.len(),
            })
    }

    /// Write a register, then notify the watch hook.
    pub(crate) fn write_register(
        &mut self,
        at: usize,
        index: usize,
        value: i32,
    ) -> Result<(), RuntimeError> {
        let count = self.registers.len();
        let cell = self
            .registers
            .get_mut(index)
            .ok_or(RuntimeError::RegisterOutOfRange { at, index, count })?;
        *cell = value;
        if let Some(hook) = self.register_watch.as_mut() {
            hook(value, index);
        }
        Ok(())
    }

    pub(crate) fn read_memory(&self, at: usize, address: i32) -> Result<i32, RuntimeError> {
        let index = self.memory_index(at, address)?;
        Ok(self.memory[index])
    }

    /// Write a memory cell, then notify the watch hook.
    pub(crate) fn write_memory(
        &mut self,
        at: usize,
        address: i32,
        value: i32,
    ) -> Result<(), RuntimeError> {
        let index = self.memory_index(at, address)?;
        self.memory[index] = value;
        if let Some(hook) = self.memory_watch.as_mut() {
            hook(value, index);
        }
        Ok(())
    }

    /// Bounds-check a memory address. Negative addresses are out of range.
    fn memory_index(&self, at: usize, address: i32) -> Result<usize, RuntimeError> {
        let index = usize::try_from(address).ok().filter(|i| *i < self.memory.len());
        index.ok_or(RuntimeError::MemoryOutOfRange {
            at,
            address,
            size: self.memory.len(),
        })
    }

    pub(crate) fn emit(&mut self, at: usize, value: i32) -> Result<(), RuntimeError> {
        match self.output.as_mut() {
            Some(sink) => {
                sink(value);
                Ok(())
            }
            None => Err(RuntimeError::NoOutputSink { at }),
        }
    }

    pub(crate) fn take_step(&mut self) {
        self.steps += 1;
    }

    pub(crate) fn reset_steps(&mut self) {
        self.steps = 0;
    }

    pub(crate) fn budget_exhausted(&self) -> bool {
        self.step_budget.is_some_and(|budget| self.steps >= budget)
    }
}
