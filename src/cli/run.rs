use std::path::PathBuf;
use std::process;

use clap::Args;

use jackc::asm::emulator::{Cpu, StopReason};

use super::exit_with_errors;

#[derive(Args)]
pub struct RunArgs {
    /// Input .asm file
    pub input: PathBuf,
    /// Maximum number of instructions to execute
    #[arg(long, default_value_t = 1_000_000)]
    pub steps: u64,
    /// Print this many words from the top of the stack
    #[arg(long, default_value_t = 1)]
    pub stack: u16,
}

const REGISTERS: [(&str, u16); 5] = [("SP", 0), ("LCL", 1), ("ARG", 2), ("THIS", 3), ("THAT", 4)];

pub fn cmd_run(args: RunArgs) {
    if !args.input.extension().is_some_and(|e| e == "asm") {
        eprintln!("error: input must be a .asm file");
        process::exit(1);
    }
    let source = match std::fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };
    let filename = args.input.display().to_string();
    let program = match jackc::assemble(&source, &filename) {
        Ok(program) => program,
        Err(diags) => exit_with_errors(diags.len()),
    };

    let mut cpu = Cpu::new(&program);
    let reason = cpu.run(args.steps);
    let outcome = match reason {
        StopReason::Halted => "halted",
        StopReason::EndOfProgram => "ran off the end of the program",
        StopReason::Breakpoint => "stopped at breakpoint",
        StopReason::StepLimit => "step limit reached",
    };
    println!("{} after {} steps (pc = {})", outcome, cpu.steps(), cpu.pc);

    for (name, addr) in REGISTERS {
        println!("{:<5} {}", name, cpu.ram(addr));
    }
    let sp = cpu.ram(0);
    for depth in 1..=args.stack {
        let addr = i32::from(sp) - i32::from(depth);
        if addr < 0 {
            break;
        }
        println!("[SP-{}] {}", depth, cpu.ram(addr as u16));
    }
}
