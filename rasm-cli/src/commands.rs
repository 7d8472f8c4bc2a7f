//! CLI command implementations.

use std::fs;

use rasm_vm::{Machine, MachineConfig};

/// Assemble and execute a program; PRINT output goes to stdout.
pub fn run(args: &[String]) -> Result<(), i32> {
    let (input, config) = parse_exec_args(args, "run")?;
    let mut vm = build_machine(config)?;
    vm.set_output(|value| println!("{value}"));
    execute(&mut vm, &input)
}

/// Assemble only; report success or the first error.
pub fn check(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: check requires an input file");
        eprintln!("Usage: rasm check <input.rasm>");
        return Err(1);
    };

    let text = read_source(input)?;
    let program = rasm_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    println!("OK: {input} ({} instructions)", program.len());
    Ok(())
}

/// Assemble and print the canonical form.
pub fn fmt(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: fmt requires an input file");
        eprintln!("Usage: rasm fmt <input.rasm>");
        return Err(1);
    };

    let text = read_source(input)?;
    let program = rasm_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    print!("{}", rasm_assembler::disassemble(&program));
    Ok(())
}

/// Like `run`, but logs every register and memory write to stderr.
pub fn trace(args: &[String]) -> Result<(), i32> {
    let (input, config) = parse_exec_args(args, "trace")?;
    let mut vm = build_machine(config)?;
    vm.set_output(|value| println!("{value}"));
    vm.watch_registers(|value, index| eprintln!("R{index} = {value}"));
    vm.watch_memory(|value, index| eprintln!("mem[{index}] = {value}"));
    execute(&mut vm, &input)
}

/// Parse `<input> [--registers N] [--memory N] [--max-steps N]`.
fn parse_exec_args(args: &[String], command: &str) -> Result<(String, MachineConfig), i32> {
    let mut input = None;
    let mut config = MachineConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--registers" => config.register_count = flag_value(iter.next(), "--registers")?,
            "--memory" => config.memory_size = flag_value(iter.next(), "--memory")?,
            "--max-steps" => config.step_budget = Some(flag_value(iter.next(), "--max-steps")?),
            _ if input.is_none() && !arg.starts_with("--") => input = Some(arg.clone()),
            other => {
                eprintln!("error: unexpected argument '{other}'");
                return Err(1);
            }
        }
    }

    match input {
        Some(input) => Ok((input, config)),
        None => {
            eprintln!("error: {command} requires an input file");
            eprintln!("Usage: rasm {command} <input.rasm> [--registers N] [--memory N] [--max-steps N]");
            Err(1)
        }
    }
}

fn flag_value<T: std::str::FromStr>(arg: Option<&String>, flag: &str) -> Result<T, i32> {
    let Some(text) = arg else {
        eprintln!("error: {flag} requires a value");
        return Err(1);
    };
    text.parse().map_err(|_| {
        eprintln!("error: invalid value '{text}' for {flag}");
        1
    })
}

fn build_machine(config: MachineConfig) -> Result<Machine, i32> {
    Machine::new(config).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn execute(vm: &mut Machine, input: &str) -> Result<(), i32> {
    let text = read_source(input)?;

    vm.load(&text, true).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    vm.run().map_err(|e| {
        eprintln!("runtime fault: {e}");
        2
    })
}

fn read_source(input: &str) -> Result<String, i32> {
    fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })
}
