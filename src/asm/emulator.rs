//! Hack CPU emulator.
//!
//! Executes assembled words against a 32K-word RAM. Used by `jackc run`
//! and by tests that check generated code by running it.

use super::Program;

pub const RAM_SIZE: usize = 0x8000;

/// Why `run` stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Reached a `(L) @L 0;JMP` self-loop.
    Halted,
    /// Program counter ran past the last instruction.
    EndOfProgram,
    /// Hit the requested program counter.
    Breakpoint,
    StepLimit,
}

#[derive(Clone, Debug)]
pub struct Cpu {
    rom: Vec<u16>,
    ram: Vec<u16>,
    pub a: u16,
    pub d: u16,
    pub pc: u16,
    steps: u64,
    halted: bool,
}

impl Cpu {
    pub fn new(program: &Program) -> Self {
        Self::from_words(program.words.clone())
    }

    pub fn from_words(rom: Vec<u16>) -> Self {
        Self {
            rom,
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
            steps: 0,
            halted: false,
        }
    }

    /// RAM cell as a signed word.
    pub fn ram(&self, addr: u16) -> i16 {
        self.ram[usize::from(addr) % RAM_SIZE] as i16
    }

    pub fn set_ram(&mut self, addr: u16, value: i16) {
        self.ram[usize::from(addr) % RAM_SIZE] = value as u16;
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    fn at_end(&self) -> bool {
        usize::from(self.pc) >= self.rom.len()
    }

    /// Execute one instruction. Returns false when there is nothing to run.
    pub fn step(&mut self) -> bool {
        if self.halted || self.at_end() {
            return false;
        }
        let word = self.rom[usize::from(self.pc)];
        self.steps += 1;

        if word & 0x8000 == 0 {
            self.a = word;
            self.pc += 1;
            return true;
        }

        let a_bit = word >> 12 & 1;
        let comp = word >> 6 & 0b11_1111;
        let dest = word >> 3 & 0b111;
        let jump = word & 0b111;

        let address = self.a;
        let cell = usize::from(address) % RAM_SIZE;
        let y = if a_bit == 1 {
            self.ram[cell]
        } else {
            address
        };
        let out = alu(self.d, y, comp);

        if dest & 0b001 != 0 {
            self.ram[cell] = out;
        }
        if dest & 0b100 != 0 {
            self.a = out;
        }
        if dest & 0b010 != 0 {
            self.d = out;
        }

        let value = out as i16;
        let taken = (jump & 0b100 != 0 && value < 0)
            || (jump & 0b010 != 0 && value == 0)
            || (jump & 0b001 != 0 && value > 0);
        if taken {
            if jump == 0b111 && address.wrapping_add(1) == self.pc {
                self.halted = true;
            }
            self.pc = address;
        } else {
            self.pc += 1;
        }
        true
    }

    /// Run until halt, end of program, or `max_steps` more instructions.
    pub fn run(&mut self, max_steps: u64) -> StopReason {
        self.run_until(None, max_steps)
    }

    /// `run`, also stopping when the program counter reaches `stop_pc`.
    pub fn run_until(&mut self, stop_pc: Option<u16>, max_steps: u64) -> StopReason {
        for _ in 0..max_steps {
            if self.halted {
                return StopReason::Halted;
            }
            if self.at_end() {
                return StopReason::EndOfProgram;
            }
            if stop_pc == Some(self.pc) {
                return StopReason::Breakpoint;
            }
            self.step();
        }
        if self.halted {
            StopReason::Halted
        } else {
            StopReason::StepLimit
        }
    }
}

/// Hack ALU. `comp` bits are zx nx zy ny f no.
fn alu(x: u16, y: u16, comp: u16) -> u16 {
    let bit = |n: u16| comp >> (5 - n) & 1 == 1;
    let mut x = if bit(0) { 0 } else { x };
    if bit(1) {
        x = !x;
    }
    let mut y = if bit(2) { 0 } else { y };
    if bit(3) {
        y = !y;
    }
    let out = if bit(4) { x.wrapping_add(y) } else { x & y };
    if bit(5) {
        !out
    } else {
        out
    }
}
