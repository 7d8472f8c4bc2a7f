//! RASM virtual machine — executes assembled register programs.
//!
//! The machine owns a fixed-size register file and memory block, both of
//! signed 32-bit cells, plus the resident program and its counter. It is
//! single-threaded and fully synchronous: `run` executes instructions in
//! a tight loop bounded by the optional step budget, `step` executes one
//! at a time for interactive use, and watch hooks observe every register
//! or memory write inline.
//!
//! # Usage
//!
//! ```
//! use rasm_vm::{Machine, MachineConfig};
//! use std::{cell::RefCell, rc::Rc};
//!
//! let mut vm = Machine::new(MachineConfig::default()).unwrap();
//!
//! let output = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&output);
//! vm.set_output(move |value| sink.borrow_mut().push(value));
//!
//! vm.load("SET 1 R0\nSET 1 R1\nADD R0 R1 R2\nPRINT R2\n", true).unwrap();
//! vm.run().unwrap();
//!
//! assert_eq!(*output.borrow(), vec![2]);
//! assert_eq!(vm.registers()[2], 2);
//! ```
//!
//! # Fault policy
//!
//! Runtime faults (PRINT without a sink, out-of-range register or memory
//! access, division by zero) abort the current `run`/`step` call and are
//! returned as [`RuntimeError`]. Construction-time configuration errors
//! ([`ConfigError`]) are the only errors that abort startup; a failed
//! `load` keeps the previous program resident.

pub mod error;
pub mod execute;
pub mod machine;

pub use error::{ConfigError, RuntimeError};
pub use machine::{Machine, MachineConfig, OutputSink, WatchHook};

// Loading source text runs the assembler; its error type is part of the
// `load` signature.
pub use rasm_assembler::AsmError;
