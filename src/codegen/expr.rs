//! Expression compilation. Every expression leaves exactly one word on
//! the stack.

use crate::ast::*;
use crate::error::CompileResult;
use crate::span::Spanned;
use crate::vm::{ArithOp, Segment};

use super::scope::resolve;
use super::ClassCompiler;

impl ClassCompiler<'_> {
    pub(crate) fn compile_expr(&mut self, expr: &Spanned<Expr>) -> CompileResult<()> {
        let before = self.depth();
        match &expr.node {
            Expr::BinOp { op, lhs, rhs } => {
                self.compile_expr(lhs)?;
                self.compile_expr(rhs)?;
                self.compile_binop(*op);
            }
            Expr::UnaryOp { op, operand } => {
                self.compile_expr(operand)?;
                self.arith(match op {
                    UnaryOp::Neg => ArithOp::Neg,
                    UnaryOp::Not => ArithOp::Not,
                });
            }
            Expr::IntConst(n) => self.push(Segment::Constant, u32::from(*n)),
            Expr::StringConst(s) => self.compile_string(s),
            Expr::BoolConst(true) => {
                self.push(Segment::Constant, 1);
                self.arith(ArithOp::Neg);
            }
            Expr::BoolConst(false) | Expr::NullConst => self.push(Segment::Constant, 0),
            Expr::ThisRef => self.push(Segment::Pointer, 0),
            Expr::VarRef(name) => {
                let name = Spanned::new(name.clone(), expr.span);
                let sym = resolve(&name, &self.routine, &self.class)?;
                let (segment, ordinal) = (sym.kind.segment(), sym.ordinal);
                self.push(segment, ordinal);
            }
            Expr::ArrayAccess { name, index } => {
                self.compile_expr(index)?;
                let sym = resolve(name, &self.routine, &self.class)?;
                let (segment, ordinal) = (sym.kind.segment(), sym.ordinal);
                self.push(segment, ordinal);
                self.arith(ArithOp::Add);
                self.pop(Segment::Pointer, 1);
                self.push(Segment::That, 0);
            }
            Expr::Call(call) => self.compile_call(call)?,
            Expr::Group(inner) => self.compile_expr(inner)?,
        }
        debug_assert_eq!(self.depth(), before + 1, "expression must push one value");
        Ok(())
    }

    fn compile_binop(&mut self, op: BinOp) {
        let arith = match op {
            BinOp::Add => ArithOp::Add,
            BinOp::Sub => ArithOp::Sub,
            BinOp::And => ArithOp::And,
            BinOp::Or => ArithOp::Or,
            BinOp::Lt => ArithOp::Lt,
            BinOp::Gt => ArithOp::Gt,
            BinOp::Eq => ArithOp::Eq,
            // No native instruction: both operands are already pushed.
            BinOp::Mul => {
                let name = self.runtime.multiply.clone();
                return self.call(name, 2);
            }
            BinOp::Div => {
                let name = self.runtime.divide.clone();
                return self.call(name, 2);
            }
        };
        self.arith(arith);
    }

    /// `String.new(len)` then one `appendChar` per character; each call
    /// returns the string, so it stays on the stack throughout.
    fn compile_string(&mut self, s: &str) {
        let new = self.runtime.string_new.clone();
        let append = self.runtime.string_append.clone();
        let len = s.chars().count() as u32;
        self.push(Segment::Constant, len);
        self.call(new, 1);
        for c in s.chars() {
            self.push(Segment::Constant, c as u32);
            self.call(append.clone(), 2);
        }
    }
}
