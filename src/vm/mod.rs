//! Stack-VM instruction set: the textual contract between the two stages.
//!
//! Stage 1 (`codegen`) produces `Vec<VmCommand>`; stage 2 (`lower`)
//! consumes it. `Display` prints the canonical one-command-per-line text
//! and `parse` reads it back.

mod parse;
#[cfg(test)]
mod tests;

use std::fmt;

pub use parse::{parse_command, parse_program};

// ─── Segments ─────────────────────────────────────────────────────

/// Named logical memory region addressed by a non-negative index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Local,
    Argument,
    This,
    That,
    Constant,
    Static,
    Pointer,
    Temp,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Constant => "constant",
            Segment::Static => "static",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }

    pub fn from_name(name: &str) -> Option<Segment> {
        let segment = match name {
            "local" => Segment::Local,
            "argument" => Segment::Argument,
            "this" => Segment::This,
            "that" => Segment::That,
            "constant" => Segment::Constant,
            "static" => Segment::Static,
            "pointer" => Segment::Pointer,
            "temp" => Segment::Temp,
            _ => return None,
        };
        Some(segment)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Arithmetic ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithOp {
    pub const ALL: [ArithOp; 9] = [
        ArithOp::Add,
        ArithOp::Sub,
        ArithOp::Neg,
        ArithOp::Eq,
        ArithOp::Gt,
        ArithOp::Lt,
        ArithOp::And,
        ArithOp::Or,
        ArithOp::Not,
    ];

    pub fn is_unary(&self) -> bool {
        matches!(self, ArithOp::Neg | ArithOp::Not)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, ArithOp::Eq | ArithOp::Gt | ArithOp::Lt)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Neg => "neg",
            ArithOp::Eq => "eq",
            ArithOp::Gt => "gt",
            ArithOp::Lt => "lt",
            ArithOp::And => "and",
            ArithOp::Or => "or",
            ArithOp::Not => "not",
        }
    }

    pub fn from_name(name: &str) -> Option<ArithOp> {
        ArithOp::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

// ─── Commands ─────────────────────────────────────────────────────

/// One stack-VM instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VmCommand {
    Arithmetic(ArithOp),
    Push(Segment, u32),
    Pop(Segment, u32),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function { name: String, n_locals: u32 },
    Call { name: String, n_args: u32 },
    Return,
}

impl VmCommand {
    /// Net change in stack depth when this command executes, seen from
    /// the code that contains it. A call consumes its arguments and
    /// leaves one result; `return` hands the callee's top value back.
    pub fn stack_effect(&self) -> i32 {
        match self {
            VmCommand::Arithmetic(op) if op.is_unary() => 0,
            VmCommand::Arithmetic(_) => -1,
            VmCommand::Push(..) => 1,
            VmCommand::Pop(..) => -1,
            VmCommand::IfGoto(_) => -1,
            VmCommand::Call { n_args, .. } => 1 - *n_args as i32,
            VmCommand::Return => -1,
            VmCommand::Label(_) | VmCommand::Goto(_) | VmCommand::Function { .. } => 0,
        }
    }
}

impl fmt::Display for VmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmCommand::Arithmetic(op) => f.write_str(op.as_str()),
            VmCommand::Push(seg, i) => write!(f, "push {} {}", seg, i),
            VmCommand::Pop(seg, i) => write!(f, "pop {} {}", seg, i),
            VmCommand::Label(name) => write!(f, "label {}", name),
            VmCommand::Goto(name) => write!(f, "goto {}", name),
            VmCommand::IfGoto(name) => write!(f, "if-goto {}", name),
            VmCommand::Function { name, n_locals } => write!(f, "function {} {}", name, n_locals),
            VmCommand::Call { name, n_args } => write!(f, "call {} {}", name, n_args),
            VmCommand::Return => f.write_str("return"),
        }
    }
}

/// Render commands as stack-VM text, one per line, newline-terminated.
pub fn render(commands: &[VmCommand]) -> String {
    let mut out = String::new();
    for cmd in commands {
        out.push_str(&cmd.to_string());
        out.push('\n');
    }
    out
}

/// Sum of `stack_effect` over a straight-line sequence.
pub fn net_stack_effect(commands: &[VmCommand]) -> i32 {
    commands.iter().map(VmCommand::stack_effect).sum()
}
