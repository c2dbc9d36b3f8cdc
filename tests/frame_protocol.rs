//! The call/return round trip, checked by running the generated code.

use jackc::asm::emulator::{Cpu, StopReason};
use jackc::{CompileOptions, SourceUnit};

const SP: u16 = 0;
const LCL: u16 = 1;
const ARG: u16 = 2;
const THIS: u16 = 3;
const THAT: u16 = 4;

/// Registers set before the call, as (address, value).
const CALLER_STATE: [(u16, i16); 5] = [
    (SP, 300),
    (LCL, 300),
    (ARG, 290),
    (THIS, 3000),
    (THAT, 4000),
];

fn preamble() -> String {
    CALLER_STATE
        .iter()
        .map(|(addr, value)| format!("@{}\nD=A\n@{}\nM=D\n", value, addr))
        .collect()
}

/// Caller pushes 1..=n_args and calls a callee that returns
/// `42 + sum(args) + sum(locals)` after scribbling over THIS and THAT.
fn round_trip(n_args: u32, n_locals: u32) -> Cpu {
    let mut caller = String::new();
    for i in 1..=n_args {
        caller.push_str(&format!("push constant {}\n", i));
    }
    caller.push_str(&format!("call Callee.f {}\n", n_args));
    caller.push_str("label STOP\ngoto STOP\n");

    let mut callee = format!("function Callee.f {}\npush constant 42\n", n_locals);
    for i in 0..n_args {
        callee.push_str(&format!("push argument {}\nadd\n", i));
    }
    for i in 0..n_locals {
        callee.push_str(&format!("push local {}\nadd\n", i));
    }
    callee.push_str("push constant 7000\npop pointer 0\npush constant 7100\npop pointer 1\n");
    callee.push_str("return\n");

    let options = CompileOptions {
        bootstrap: false,
        ..CompileOptions::default()
    };
    let units = vec![
        SourceUnit::new("Caller", caller),
        SourceUnit::new("Callee", callee),
    ];
    let asm = jackc::translate_vm(&units, &options).expect("translate");
    let program = jackc::assemble(&format!("{}{}", preamble(), asm), "frame.asm")
        .expect("assemble");

    let mut cpu = Cpu::new(&program);
    assert_eq!(cpu.run(100_000), StopReason::Halted);
    cpu
}

#[test]
fn test_call_return_restores_caller_frame() {
    for (n_args, n_locals) in [(0, 0), (0, 3), (1, 0), (2, 1), (3, 2), (5, 5)] {
        let cpu = round_trip(n_args, n_locals);
        let label = format!("n_args={} n_locals={}", n_args, n_locals);

        let sp_before = CALLER_STATE[0].1;
        let expected_sp = sp_before + 1;
        assert_eq!(cpu.ram(SP), expected_sp, "SP after return, {}", label);
        for (addr, value) in &CALLER_STATE[1..] {
            assert_eq!(cpu.ram(*addr), *value, "register {} restored, {}", addr, label);
        }

        // The arguments were pushed above the caller's SP, so the return
        // value lands where the first argument was.
        let sum_args = (n_args * (n_args + 1) / 2) as i16;
        assert_eq!(cpu.ram(sp_before as u16), 42 + sum_args, "return value, {}", label);
    }
}

#[test]
fn test_locals_start_at_zero_even_over_dirty_stack() {
    // Leave garbage where the callee's locals will live.
    let dirty: String = (0..10)
        .map(|i| format!("@{}\nD=A\n@{}\nM=-1\n", i, 305 + i))
        .collect();
    let callee = "function Callee.f 4\npush local 0\npush local 3\nadd\nreturn\n";
    let caller = "call Callee.f 0\nlabel STOP\ngoto STOP\n";
    let options = CompileOptions {
        bootstrap: false,
        ..CompileOptions::default()
    };
    let asm = jackc::translate_vm(
        &[
            SourceUnit::new("Caller", caller),
            SourceUnit::new("Callee", callee),
        ],
        &options,
    )
    .expect("translate");
    let program =
        jackc::assemble(&format!("{}{}{}", preamble(), dirty, asm), "dirty.asm").expect("assemble");

    let mut cpu = Cpu::new(&program);
    assert_eq!(cpu.run(10_000), StopReason::Halted);
    assert_eq!(cpu.ram(SP), 301);
    assert_eq!(cpu.ram(300), 0);
}

#[test]
fn test_nested_calls_unwind_in_order() {
    let units = vec![
        SourceUnit::new(
            "Caller",
            "push constant 5\ncall Outer.f 1\nlabel STOP\ngoto STOP\n",
        ),
        SourceUnit::new(
            "Outer",
            "function Outer.f 1\npush argument 0\npush constant 10\ncall Inner.g 2\npop local 0\npush local 0\npush constant 1\nadd\nreturn\n",
        ),
        SourceUnit::new(
            "Inner",
            "function Inner.g 0\npush argument 0\npush argument 1\nsub\nreturn\n",
        ),
    ];
    let options = CompileOptions {
        bootstrap: false,
        ..CompileOptions::default()
    };
    let asm = jackc::translate_vm(&units, &options).expect("translate");
    let program = jackc::assemble(&format!("{}{}", preamble(), asm), "nested.asm").expect("assemble");

    let mut cpu = Cpu::new(&program);
    assert_eq!(cpu.run(10_000), StopReason::Halted);
    assert_eq!(cpu.ram(SP), 301);
    assert_eq!(cpu.ram(300), -4);
    for (addr, value) in &CALLER_STATE[1..] {
        assert_eq!(cpu.ram(*addr), *value);
    }
}

#[test]
fn test_comparison_labels_do_not_collide_across_units() {
    let unit = |name: &str| {
        SourceUnit::new(
            name,
            "push constant 3\npush constant 3\neq\npush constant 1\npush constant 2\nlt\nand\npop temp 0\n",
        )
    };
    let options = CompileOptions {
        bootstrap: false,
        ..CompileOptions::default()
    };
    let asm = jackc::translate_vm(&[unit("A"), unit("B")], &options).expect("translate");
    assert!(asm.contains("(A$cmp$0)"));
    assert!(asm.contains("(B$cmp$0)"));
    let program =
        jackc::assemble(&format!("@256\nD=A\n@SP\nM=D\n{}", asm), "cmp.asm").expect("assemble");

    let mut cpu = Cpu::new(&program);
    assert_eq!(cpu.run(10_000), StopReason::Halted);
    assert_eq!(cpu.ram(5), -1);
    assert_eq!(cpu.ram(SP), 256);
}
