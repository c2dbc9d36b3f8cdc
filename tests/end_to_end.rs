use jackc::asm::emulator::{Cpu, StopReason};
use jackc::{CompileOptions, SourceUnit};

/// Minimal OS: just enough of Memory, Array, Math and String for the
/// programs below.
const MEMORY: &str = "class Memory {
    static int free;

    function int alloc(int size) {
        var int block;
        if (free = 0) {
            let free = 2048;
        }
        let block = free;
        let free = free + size;
        return block;
    }
}";

const ARRAY: &str = "class Array {
    function Array new(int size) {
        return Memory.alloc(size);
    }
}";

const MATH: &str = "class Math {
    function int multiply(int x, int y) {
        var int sum;
        var boolean neg;
        let neg = y < 0;
        if (neg) {
            let y = -y;
        }
        let sum = 0;
        while (y > 0) {
            let sum = sum + x;
            let y = y - 1;
        }
        if (neg) {
            return -sum;
        }
        return sum;
    }

    /** Non-negative operands only. */
    function int divide(int x, int y) {
        var int q;
        let q = 0;
        while (~(x < y)) {
            let x = x - y;
            let q = q + 1;
        }
        return q;
    }
}";

const STRING: &str = "class String {
    field Array chars;
    field int size;

    constructor String new(int capacity) {
        let chars = Array.new(capacity);
        let size = 0;
        return this;
    }

    method String appendChar(int c) {
        let chars[size] = c;
        let size = size + 1;
        return this;
    }

    method int charAt(int i) {
        return chars[i];
    }

    method int length() {
        return size;
    }
}";

const SYS_VM: &str = "function Sys.init 0
call Main.main 0
pop temp 0
label HALT
goto HALT
";

/// Compile `classes` plus the OS classes, translate with the VM `Sys`,
/// assemble, and run to the halt loop.
fn run_program(classes: &[(&str, &str)]) -> (Cpu, jackc::asm::Program) {
    let mut jack: Vec<SourceUnit> = classes
        .iter()
        .map(|(name, source)| SourceUnit::new(*name, *source))
        .collect();
    for (name, source) in [
        ("Memory", MEMORY),
        ("Array", ARRAY),
        ("Math", MATH),
        ("String", STRING),
    ] {
        jack.push(SourceUnit::new(name, source));
    }

    let options = CompileOptions::default();
    let mut vm_units: Vec<SourceUnit> = jack
        .iter()
        .zip(jackc::compile_units(&jack, &options))
        .map(|(unit, result)| {
            let vm = result.unwrap_or_else(|diags| {
                panic!(
                    "{} should compile, got {:?}",
                    unit.name,
                    diags.iter().map(|d| &d.message).collect::<Vec<_>>()
                )
            });
            SourceUnit::new(unit.name.clone(), vm)
        })
        .collect();
    vm_units.push(SourceUnit::new("Sys", SYS_VM));

    let asm = jackc::translate_vm(&vm_units, &options).expect("translate");
    let program = jackc::assemble(&asm, "program.asm").expect("assemble");
    let mut cpu = Cpu::new(&program);
    assert_eq!(cpu.run(2_000_000), StopReason::Halted);
    (cpu, program)
}

fn static_value(cpu: &Cpu, program: &jackc::asm::Program, name: &str) -> i16 {
    let addr = program
        .symbol(name)
        .unwrap_or_else(|| panic!("no symbol {}", name));
    cpu.ram(addr)
}

#[test]
fn test_arithmetic_and_logic() {
    let main = "class Main {
        static int sum, product, quotient, neg, flag, prec;

        function void main() {
            let sum = 1 + 2 - 10;
            let product = 6 * 7;
            let quotient = 100 / 7;
            let neg = -7 * 3;
            let flag = (3 < 5) & ~(2 = 3);
            let prec = 2 + 3 * 4;
            return;
        }
    }";
    let (cpu, program) = run_program(&[("Main", main)]);
    assert_eq!(static_value(&cpu, &program, "Main.0"), -7);
    assert_eq!(static_value(&cpu, &program, "Main.1"), 42);
    assert_eq!(static_value(&cpu, &program, "Main.2"), 14);
    assert_eq!(static_value(&cpu, &program, "Main.3"), -21);
    assert_eq!(static_value(&cpu, &program, "Main.4"), -1);
    assert_eq!(static_value(&cpu, &program, "Main.5"), 14);
}

#[test]
fn test_objects_methods_and_recursion() {
    let point = "class Point {
        field int x, y;

        constructor Point new(int ax, int ay) {
            let x = ax;
            let y = ay;
            return this;
        }

        method int sum() {
            return x + y;
        }

        method int scaled(int k) {
            return sum() * k;
        }
    }";
    let main = "class Main {
        static int scaled, fact, count;

        function void main() {
            var Point p, q;
            let p = Point.new(3, 4);
            let q = Point.new(10, 20);
            let scaled = p.scaled(5) + q.sum();
            let fact = Main.fact(6);
            let count = Main.countDown(9);
            return;
        }

        function int fact(int n) {
            if (n < 2) {
                return 1;
            }
            return n * Main.fact(n - 1);
        }

        function int countDown(int n) {
            var int steps;
            while (n > 0) {
                let n = n - 1;
                let steps = steps + 1;
            }
            return steps;
        }
    }";
    let (cpu, program) = run_program(&[("Point", point), ("Main", main)]);
    assert_eq!(static_value(&cpu, &program, "Main.0"), 65);
    assert_eq!(static_value(&cpu, &program, "Main.1"), 720);
    assert_eq!(static_value(&cpu, &program, "Main.2"), 9);
}

#[test]
fn test_arrays_and_strings() {
    let main = "class Main {
        static int total, second, len, nested;

        function void main() {
            var Array a;
            var String s;
            var int i;
            let a = Array.new(5);
            let i = 0;
            while (i < 5) {
                let a[i] = i * i;
                let i = i + 1;
            }
            let a[a[1]] = 100;
            let total = a[0] + a[1] + a[2] + a[3] + a[4];
            let nested = a[1];
            let s = \"Hi!\";
            let second = s.charAt(1);
            let len = s.length();
            return;
        }
    }";
    let (cpu, program) = run_program(&[("Main", main)]);
    // a = [0, 100, 4, 9, 16] after a[a[1]] = a[1] = 100
    assert_eq!(static_value(&cpu, &program, "Main.0"), 129);
    assert_eq!(static_value(&cpu, &program, "Main.1"), i16::from(b'i'));
    assert_eq!(static_value(&cpu, &program, "Main.2"), 3);
    assert_eq!(static_value(&cpu, &program, "Main.3"), 100);
}

#[test]
fn test_statics_are_per_class() {
    let counter = "class Counter {
        static int value;

        function void bump() {
            let value = value + 1;
            return;
        }

        function int get() {
            return value;
        }
    }";
    let main = "class Main {
        static int value;

        function void main() {
            let value = 50;
            do Counter.bump();
            do Counter.bump();
            let value = value + Counter.get();
            return;
        }
    }";
    let (cpu, program) = run_program(&[("Counter", counter), ("Main", main)]);
    assert_eq!(static_value(&cpu, &program, "Counter.0"), 2);
    assert_eq!(static_value(&cpu, &program, "Main.0"), 52);
}

#[test]
fn test_build_program_writes_assemblable_output() {
    let main = "class Main {
        function void main() {
            return;
        }
    }";
    let sys = "class Sys {
        function void init() {
            do Main.main();
            return;
        }
    }";
    let units = vec![SourceUnit::new("Main", main), SourceUnit::new("Sys", sys)];
    let asm = jackc::build_program(&units, &CompileOptions::default()).expect("build");
    let program = jackc::assemble(&asm, "out.asm").expect("assemble");
    assert_eq!(program.to_hack().lines().count(), program.words.len());
    assert!(program.symbol("Sys.init").is_some());
    assert!(program.symbol("Main.main").is_some());
}
