//! RASM CLI — assemble, execute, and trace register programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/assembly/configuration error
//! - 2: Runtime fault

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "fmt" => commands::fmt(&args[2..]),
        "trace" => commands::trace(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: rasm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <input.rasm> [options]      Assemble and execute; PRINT goes to stdout");
    eprintln!("  check <input.rasm>              Assemble only, report errors");
    eprintln!("  fmt <input.rasm>                Print canonical assembly text");
    eprintln!("  trace <input.rasm> [options]    Execute, logging every register/memory write");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --registers N                   Register file length (1-10, default 4)");
    eprintln!("  --memory N                      Memory cells (default 1024)");
    eprintln!("  --max-steps N                   Step budget for one run (default unbounded)");
}
