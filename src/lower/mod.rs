//! Stage 2: lowers stack-VM commands to Hack assembly.
//!
//! `Lowering::lower` translates one compilation unit. Labels, static
//! cells, and return addresses are qualified by the unit's namespace or
//! the enclosing function, and counters start fresh for every call, so
//! units translate independently and reproducibly.

mod command;
mod frame;
mod segment;

use crate::config::MachineConfig;
use crate::error::{CompileError, CompileResult};
use crate::span::Spanned;
use crate::vm::VmCommand;

pub use segment::{Location, SegmentResolver};

/// Label of the terminal loop appended when there is no bootstrap.
pub const HALT_LABEL: &str = "END";

/// Lowers stack-VM commands into target assembly lines.
pub trait Lowering {
    /// Translate one unit. `namespace` qualifies its static cells.
    fn lower(&self, namespace: &str, commands: &[Spanned<VmCommand>])
        -> CompileResult<Vec<String>>;

    /// Program prologue: initialize the stack and call the entry routine.
    fn bootstrap(&self) -> Vec<String>;

    /// Program epilogue for code that runs straight through.
    fn halt(&self) -> Vec<String>;
}

// ─── HackLowering ─────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct HackLowering {
    machine: MachineConfig,
    /// Emit `// <command>` before each translated command.
    comments: bool,
}

impl HackLowering {
    pub fn new(machine: MachineConfig) -> Self {
        Self {
            machine,
            comments: false,
        }
    }

    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}

impl Lowering for HackLowering {
    fn lower(
        &self,
        namespace: &str,
        commands: &[Spanned<VmCommand>],
    ) -> CompileResult<Vec<String>> {
        tracing::debug!(namespace, commands = commands.len(), "lowering unit");
        let mut translator = Translator::new(namespace, &self.machine, self.comments);
        for cmd in commands {
            translator.translate(cmd)?;
        }
        Ok(translator.out)
    }

    fn bootstrap(&self) -> Vec<String> {
        let mut translator = Translator::new("Bootstrap", &self.machine, self.comments);
        if self.comments {
            translator.out.push("// bootstrap".to_string());
        }
        translator.emit_at(&self.machine.stack_base.to_string());
        translator.emit("D=A");
        translator.emit("@SP");
        translator.emit("M=D");
        let entry = self.machine.entry.clone();
        translator.call(&entry, 0);
        translator.out
    }

    fn halt(&self) -> Vec<String> {
        vec![
            format!("({})", HALT_LABEL),
            format!("@{}", HALT_LABEL),
            "0;JMP".to_string(),
        ]
    }
}

// ─── Translator ───────────────────────────────────────────────────

/// Per-unit translation state.
pub(crate) struct Translator<'a> {
    pub(crate) out: Vec<String>,
    namespace: &'a str,
    machine: &'a MachineConfig,
    comments: bool,
    /// Function whose body is being translated, if any.
    function: Option<String>,
    compare_counter: u32,
    return_counter: u32,
}

impl<'a> Translator<'a> {
    fn new(namespace: &'a str, machine: &'a MachineConfig, comments: bool) -> Self {
        Self {
            out: Vec::new(),
            namespace,
            machine,
            comments,
            function: None,
            compare_counter: 0,
            return_counter: 0,
        }
    }

    fn translate(&mut self, cmd: &Spanned<VmCommand>) -> CompileResult<()> {
        tracing::trace!(command = %cmd.node, "lower");
        if self.comments {
            self.out.push(format!("// {}", cmd.node));
        }
        // `call` emits `@{n + FRAME_SIZE}`, which must stay a literal.
        let bound = match &cmd.node {
            VmCommand::Function { n_locals, .. } => Some((*n_locals, self.machine.max_constant)),
            VmCommand::Call { n_args, .. } => Some((
                *n_args,
                self.machine.max_constant.saturating_sub(frame::FRAME_SIZE),
            )),
            _ => None,
        };
        if let Some((n, max)) = bound {
            if n > max {
                return Err(Spanned::new(
                    CompileError::syntax(format!(
                        "count {} in `{}` is out of range (maximum is {})",
                        n, cmd.node, max
                    )),
                    cmd.span,
                ));
            }
        }
        match &cmd.node {
            VmCommand::Arithmetic(op) => self.arithmetic(*op),
            VmCommand::Push(segment, index) => self
                .push(*segment, *index, &cmd.node)
                .map_err(|err| Spanned::new(err, cmd.span))?,
            VmCommand::Pop(segment, index) => self
                .pop(*segment, *index, &cmd.node)
                .map_err(|err| Spanned::new(err, cmd.span))?,
            VmCommand::Label(name) => self.label(name),
            VmCommand::Goto(name) => self.goto(name),
            VmCommand::IfGoto(name) => self.if_goto(name),
            VmCommand::Function { name, n_locals } => self.function(name, *n_locals),
            VmCommand::Call { name, n_args } => self.call(name, *n_args),
            VmCommand::Return => self.ret(),
        }
        Ok(())
    }

    // ── Emit helpers ──────────────────────────────────────────────

    fn emit(&mut self, line: &str) {
        self.out.push(line.to_string());
    }

    /// `@symbol` A-instruction.
    fn emit_at(&mut self, symbol: &str) {
        self.out.push(format!("@{}", symbol));
    }

    fn emit_label(&mut self, label: &str) {
        self.out.push(format!("({})", label));
    }

    /// Push D onto the stack.
    fn push_d(&mut self) {
        for line in ["@SP", "A=M", "M=D", "@SP", "M=M+1"] {
            self.emit(line);
        }
    }

    /// Pop the stack into D.
    fn pop_d(&mut self) {
        for line in ["@SP", "AM=M-1", "D=M"] {
            self.emit(line);
        }
    }

    /// Labels are scoped by the enclosing function, or by the unit when
    /// outside any function.
    fn scope(&self) -> &str {
        self.function.as_deref().unwrap_or(self.namespace)
    }

    fn scoped_label(&self, name: &str) -> String {
        format!("{}${}", self.scope(), name)
    }

    /// `{scope}${kind}${n}`. VM label names cannot contain `$`, so these
    /// never collide with `scoped_label`.
    fn generated_label(&self, kind: &str, n: u32) -> String {
        format!("{}${}${}", self.scope(), kind, n)
    }
}
