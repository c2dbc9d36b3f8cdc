//! Error taxonomy shared by both compilation stages.
//!
//! Every variant is fatal to the unit being compiled. Stage functions
//! return the first error they hit, wrapped in `Spanned` so the driver
//! can point at the offending source line.

use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::span::Spanned;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Malformed source text (Jack tokens/grammar, VM or assembly lines).
    #[error("syntax error: {message}")]
    Syntax { message: String },

    #[error("undeclared variable '{name}' in {scope}")]
    UndeclaredVariable { scope: String, name: String },

    #[error("unknown subroutine '{name}' in class {class}")]
    UnknownSubroutine { class: String, name: String },

    #[error("invalid index {index} for segment '{segment}' in `{instruction}`")]
    InvalidSegmentIndex {
        segment: String,
        index: u32,
        instruction: String,
    },

    #[error("'{name}' is already declared in {scope}")]
    DuplicateDeclaration { scope: String, name: String },

    /// A node or opcode with no defined translation.
    #[error("unsupported instruction `{instruction}`")]
    UnsupportedInstruction { instruction: String },
}

impl CompileError {
    pub fn syntax(message: impl Into<String>) -> Self {
        CompileError::Syntax {
            message: message.into(),
        }
    }

    pub fn unsupported(instruction: impl ToString) -> Self {
        CompileError::UnsupportedInstruction {
            instruction: instruction.to_string(),
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Syntax { .. } => "SyntaxError",
            CompileError::UndeclaredVariable { .. } => "UndeclaredVariable",
            CompileError::UnknownSubroutine { .. } => "UnknownSubroutine",
            CompileError::InvalidSegmentIndex { .. } => "InvalidSegmentIndex",
            CompileError::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            CompileError::UnsupportedInstruction { .. } => "UnsupportedInstruction",
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            CompileError::InvalidSegmentIndex { segment, .. } if segment == "temp" => {
                Some("the temp segment has indices 0..=7".to_string())
            }
            CompileError::InvalidSegmentIndex { segment, .. } if segment == "pointer" => {
                Some("pointer 0 is the current object, pointer 1 the array cursor".to_string())
            }
            CompileError::UnknownSubroutine { class, .. } => Some(format!(
                "calls without a receiver must name a subroutine declared in {}",
                class
            )),
            _ => None,
        }
    }
}

/// Result type used throughout both stages.
pub type CompileResult<T> = Result<T, Spanned<CompileError>>;

impl From<Spanned<CompileError>> for Diagnostic {
    fn from(err: Spanned<CompileError>) -> Self {
        let mut diag = Diagnostic::error(err.node.to_string(), err.span)
            .with_note(format!("error kind: {}", err.node.kind()));
        if let Some(help) = err.node.help() {
            diag = diag.with_help(help);
        }
        diag
    }
}
