//! `function`, `call`, and `return`: the frame protocol.
//!
//! A frame is five words pushed by the caller above its arguments:
//!
//! ```text
//! ARG ->  arg 0 .. arg n-1
//!         return address
//!         saved LCL
//!         saved ARG
//!         saved THIS
//!         saved THAT
//! LCL ->  local 0 .. local k-1
//! ```

use super::Translator;

/// Caller registers saved by `call`, in push order. `return` restores
/// them in reverse.
const SAVED_REGISTERS: [&str; 4] = ["LCL", "ARG", "THIS", "THAT"];

/// Return address plus the saved registers.
pub(super) const FRAME_SIZE: u32 = 1 + SAVED_REGISTERS.len() as u32;

impl Translator<'_> {
    /// Entry label, then zero-initialized locals.
    pub(super) fn function(&mut self, name: &str, n_locals: u32) {
        self.function = Some(name.to_string());
        self.emit_label(name);
        for _ in 0..n_locals {
            for line in ["@SP", "A=M", "M=0", "@SP", "M=M+1"] {
                self.emit(line);
            }
        }
    }

    pub(super) fn call(&mut self, name: &str, n_args: u32) {
        let return_label = self.generated_label("ret", self.return_counter);
        self.return_counter += 1;

        self.emit_at(&return_label);
        self.emit("D=A");
        self.push_d();
        for register in SAVED_REGISTERS {
            self.emit_at(register);
            self.emit("D=M");
            self.push_d();
        }

        // ARG = SP - 5 - n_args
        self.emit("@SP");
        self.emit("D=M");
        self.emit_at(&(FRAME_SIZE + n_args).to_string());
        self.emit("D=D-A");
        self.emit("@ARG");
        self.emit("M=D");
        // LCL = SP
        self.emit("@SP");
        self.emit("D=M");
        self.emit("@LCL");
        self.emit("M=D");

        self.emit_at(name);
        self.emit("0;JMP");
        self.emit_label(&return_label);
    }

    pub(super) fn ret(&mut self) {
        let frame = self.machine.frame_register.clone();
        let return_address = self.machine.return_register.clone();

        // frame = LCL
        self.emit("@LCL");
        self.emit("D=M");
        self.emit_at(&frame);
        self.emit("M=D");
        // Read the return address before *ARG is overwritten: with no
        // arguments they share a cell.
        self.emit_at(&FRAME_SIZE.to_string());
        self.emit("A=D-A");
        self.emit("D=M");
        self.emit_at(&return_address);
        self.emit("M=D");
        // *ARG = pop()
        self.pop_d();
        self.emit("@ARG");
        self.emit("A=M");
        self.emit("M=D");
        // SP = ARG + 1
        self.emit("@ARG");
        self.emit("D=M+1");
        self.emit("@SP");
        self.emit("M=D");
        // THAT, THIS, ARG, LCL = *(frame - 1) .. *(frame - 4)
        for register in SAVED_REGISTERS.iter().rev() {
            self.emit_at(&frame);
            self.emit("AM=M-1");
            self.emit("D=M");
            self.emit_at(register);
            self.emit("M=D");
        }
        self.emit_at(&return_address);
        self.emit("A=M");
        self.emit("0;JMP");
    }
}
