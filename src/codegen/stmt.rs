//! Statement compilation. Every statement is stack-neutral.

use crate::ast::*;
use crate::error::CompileResult;
use crate::span::Spanned;
use crate::vm::{ArithOp, Segment, VmCommand};

use super::scope::resolve;
use super::ClassCompiler;

impl ClassCompiler<'_> {
    pub(crate) fn compile_statements(&mut self, stmts: &[Spanned<Stmt>]) -> CompileResult<()> {
        for stmt in stmts {
            self.compile_stmt(stmt)?;
        }
        Ok(())
    }

    fn compile_stmt(&mut self, stmt: &Spanned<Stmt>) -> CompileResult<()> {
        let before = self.depth();
        match &stmt.node {
            Stmt::Let {
                target,
                index: None,
                value,
            } => {
                self.compile_expr(value)?;
                let sym = resolve(target, &self.routine, &self.class)?;
                let (segment, ordinal) = (sym.kind.segment(), sym.ordinal);
                self.pop(segment, ordinal);
            }
            Stmt::Let {
                target,
                index: Some(index),
                value,
            } => {
                let sym = resolve(target, &self.routine, &self.class)?;
                let (segment, ordinal) = (sym.kind.segment(), sym.ordinal);
                self.push(segment, ordinal);
                self.compile_expr(index)?;
                self.arith(ArithOp::Add);
                // `value` may move pointer 1 itself; park it in temp 0
                // and set the address only after it is computed.
                self.compile_expr(value)?;
                self.pop(Segment::Temp, 0);
                self.pop(Segment::Pointer, 1);
                self.push(Segment::Temp, 0);
                self.pop(Segment::That, 0);
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                let false_label = self.fresh_label("IF_FALSE");
                let end_label = self.fresh_label("IF_END");
                self.compile_expr(cond)?;
                self.arith(ArithOp::Not);
                self.emit(VmCommand::IfGoto(false_label.clone()));
                self.compile_statements(then_body)?;
                self.emit(VmCommand::Goto(end_label.clone()));
                self.emit(VmCommand::Label(false_label));
                self.compile_statements(else_body)?;
                self.emit(VmCommand::Label(end_label));
            }
            Stmt::While { cond, body } => {
                let top_label = self.fresh_label("WHILE_TOP");
                let end_label = self.fresh_label("WHILE_END");
                self.emit(VmCommand::Label(top_label.clone()));
                self.compile_expr(cond)?;
                self.arith(ArithOp::Not);
                self.emit(VmCommand::IfGoto(end_label.clone()));
                self.compile_statements(body)?;
                self.emit(VmCommand::Goto(top_label));
                self.emit(VmCommand::Label(end_label));
            }
            Stmt::Do(call) => {
                self.compile_call(call)?;
                // Discard the result every call leaves behind.
                self.pop(Segment::Temp, 0);
            }
            Stmt::Return(value) => {
                match value {
                    Some(value) => self.compile_expr(value)?,
                    None => self.push(Segment::Constant, 0),
                }
                self.emit(VmCommand::Return);
            }
        }
        debug_assert_eq!(self.depth(), before, "statement must be stack-neutral");
        Ok(())
    }
}
