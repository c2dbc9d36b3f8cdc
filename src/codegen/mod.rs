//! Stage 1: lowers a Jack `Class` into stack-VM commands.
//!
//! `ClassCompiler` owns everything one compilation unit needs: the class
//! scope (built before any body), the scope of the subroutine being
//! compiled, the label counter, and a simulated stack depth used to
//! check that every statement is stack-neutral.

mod call;
mod expr;
pub mod scope;
mod stmt;

use crate::ast::{Class, Subroutine, SubroutineKind};
use crate::config::RuntimeNames;
use crate::error::CompileResult;
use crate::vm::{ArithOp, Segment, VmCommand};

use self::scope::{ClassScope, RoutineScope, SymbolTable};

/// Compile one class to stack-VM commands.
pub fn compile_class(class: &Class, runtime: &RuntimeNames) -> CompileResult<Vec<VmCommand>> {
    ClassCompiler::new(class, runtime)?.compile(class)
}

// ─── ClassCompiler ────────────────────────────────────────────────

pub struct ClassCompiler<'a> {
    /// Accumulated commands for the whole class.
    pub(crate) ops: Vec<VmCommand>,
    pub(crate) class: ClassScope,
    /// Scope of the subroutine currently being compiled.
    pub(crate) routine: RoutineScope,
    pub(crate) runtime: &'a RuntimeNames,
    /// Monotonic per-class label counter.
    label_counter: u32,
    /// Simulated stack depth relative to the start of the current body.
    depth: i32,
}

impl<'a> ClassCompiler<'a> {
    pub fn new(class: &Class, runtime: &'a RuntimeNames) -> CompileResult<Self> {
        let scope = ClassScope::build(class)?;
        let routine = RoutineScope {
            symbols: SymbolTable::new(scope.name.clone()),
        };
        Ok(Self {
            ops: Vec::new(),
            class: scope,
            routine,
            runtime,
            label_counter: 0,
            depth: 0,
        })
    }

    pub fn compile(mut self, class: &Class) -> CompileResult<Vec<VmCommand>> {
        tracing::debug!(
            class = %self.class.name,
            fields = self.class.field_count,
            subroutines = class.subroutines.len(),
            "compiling class"
        );
        for sub in &class.subroutines {
            self.compile_subroutine(sub)?;
        }
        Ok(self.ops)
    }

    fn compile_subroutine(&mut self, sub: &Subroutine) -> CompileResult<()> {
        self.routine = RoutineScope::build(&self.class, sub)?;
        self.depth = 0;

        let name = format!("{}.{}", self.class.name, sub.name.node);
        tracing::debug!(subroutine = %name, kind = %sub.kind, "compiling subroutine");
        self.emit(VmCommand::Function {
            name,
            n_locals: self.routine.local_count(),
        });

        match sub.kind {
            SubroutineKind::Constructor => {
                self.push(Segment::Constant, self.class.field_count);
                let alloc = self.runtime.alloc.clone();
                self.call(alloc, 1);
                self.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.push(Segment::Argument, 0);
                self.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => {}
        }

        self.compile_statements(&sub.statements)
    }

    // ── Emit helpers ──────────────────────────────────────────────

    pub(crate) fn emit(&mut self, cmd: VmCommand) {
        tracing::trace!(command = %cmd, "emit");
        self.depth += cmd.stack_effect();
        self.ops.push(cmd);
    }

    pub(crate) fn push(&mut self, segment: Segment, index: u32) {
        self.emit(VmCommand::Push(segment, index));
    }

    pub(crate) fn pop(&mut self, segment: Segment, index: u32) {
        self.emit(VmCommand::Pop(segment, index));
    }

    pub(crate) fn arith(&mut self, op: ArithOp) {
        self.emit(VmCommand::Arithmetic(op));
    }

    pub(crate) fn call(&mut self, name: String, n_args: u32) {
        self.emit(VmCommand::Call { name, n_args });
    }

    pub(crate) fn fresh_label(&mut self, prefix: &str) -> String {
        let label = format!("{}_{}", prefix, self.label_counter);
        self.label_counter += 1;
        label
    }

    pub(crate) fn depth(&self) -> i32 {
        self.depth
    }
}
