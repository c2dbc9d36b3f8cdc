//! Arithmetic and branching.

use crate::vm::ArithOp;

use super::Translator;

impl Translator<'_> {
    pub(super) fn arithmetic(&mut self, op: ArithOp) {
        match op {
            _ if op.is_comparison() => self.compare(op),
            _ if op.is_unary() => {
                self.emit("@SP");
                self.emit("A=M-1");
                self.emit(if op == ArithOp::Neg { "M=-M" } else { "M=!M" });
            }
            _ => {
                // D = y, A -> x; result overwrites x.
                self.pop_d();
                self.emit("A=A-1");
                self.emit(match op {
                    ArithOp::Add => "M=D+M",
                    ArithOp::Sub => "M=M-D",
                    ArithOp::And => "M=D&M",
                    _ => "M=D|M",
                });
            }
        }
    }

    /// Leave -1 if `x op y` holds, else 0. Decided on the sign of `x - y`.
    fn compare(&mut self, op: ArithOp) {
        let jump = match op {
            ArithOp::Eq => "D;JEQ",
            ArithOp::Gt => "D;JGT",
            _ => "D;JLT",
        };
        let done = self.generated_label("cmp", self.compare_counter);
        self.compare_counter += 1;

        self.pop_d();
        self.emit("A=A-1");
        self.emit("D=M-D");
        self.emit("M=-1");
        self.emit_at(&done);
        self.emit(jump);
        self.emit("@SP");
        self.emit("A=M-1");
        self.emit("M=0");
        self.emit_label(&done);
    }

    pub(super) fn label(&mut self, name: &str) {
        let label = self.scoped_label(name);
        self.emit_label(&label);
    }

    pub(super) fn goto(&mut self, name: &str) {
        let label = self.scoped_label(name);
        self.emit_at(&label);
        self.emit("0;JMP");
    }

    /// Jump if the popped value is non-zero.
    pub(super) fn if_goto(&mut self, name: &str) {
        let label = self.scoped_label(name);
        self.pop_d();
        self.emit_at(&label);
        self.emit("D;JNE");
    }
}
