use crate::error::{CompileError, CompileResult};
use crate::span::{Span, Spanned};

use super::{ArithOp, Segment, VmCommand};

/// Parse stack-VM text. Blank lines and `//` comments are skipped; each
/// command carries the span of its line.
pub fn parse_program(source: &str) -> CompileResult<Vec<Spanned<VmCommand>>> {
    let mut commands = Vec::new();
    let mut offset = 0usize;

    for raw in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len();

        let code = match raw.find("//") {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        let trimmed = code.trim();
        if trimmed.is_empty() {
            continue;
        }

        let lead = code.len() - code.trim_start().len();
        let start = line_start + lead;
        let span = Span::new(start as u32, (start + trimmed.len()) as u32);

        let cmd = parse_command(trimmed).map_err(|err| Spanned::new(err, span))?;
        commands.push(Spanned::new(cmd, span));
    }

    Ok(commands)
}

/// Parse a single command line (no comment, already trimmed).
pub fn parse_command(line: &str) -> Result<VmCommand, CompileError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&opcode, args)) = parts.split_first() else {
        return Err(CompileError::syntax("empty command"));
    };

    if let Some(op) = ArithOp::from_name(opcode) {
        expect_arity(line, args, 0)?;
        return Ok(VmCommand::Arithmetic(op));
    }

    let cmd = match opcode {
        "push" | "pop" => {
            expect_arity(line, args, 2)?;
            let segment = Segment::from_name(args[0]).ok_or_else(|| {
                CompileError::syntax(format!("unknown segment '{}' in `{}`", args[0], line))
            })?;
            let index = parse_number(line, args[1])?;
            if opcode == "push" {
                VmCommand::Push(segment, index)
            } else {
                VmCommand::Pop(segment, index)
            }
        }
        "label" | "goto" | "if-goto" => {
            expect_arity(line, args, 1)?;
            let name = parse_symbol(line, args[0])?;
            match opcode {
                "label" => VmCommand::Label(name),
                "goto" => VmCommand::Goto(name),
                _ => VmCommand::IfGoto(name),
            }
        }
        "function" => {
            expect_arity(line, args, 2)?;
            VmCommand::Function {
                name: parse_symbol(line, args[0])?,
                n_locals: parse_number(line, args[1])?,
            }
        }
        "call" => {
            expect_arity(line, args, 2)?;
            VmCommand::Call {
                name: parse_symbol(line, args[0])?,
                n_args: parse_number(line, args[1])?,
            }
        }
        "return" => {
            expect_arity(line, args, 0)?;
            VmCommand::Return
        }
        _ => return Err(CompileError::unsupported(line)),
    };
    Ok(cmd)
}

fn expect_arity(line: &str, args: &[&str], n: usize) -> Result<(), CompileError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(CompileError::syntax(format!(
            "expected {} operand{} in `{}`, found {}",
            n,
            if n == 1 { "" } else { "s" },
            line,
            args.len()
        )))
    }
}

fn parse_number(line: &str, text: &str) -> Result<u32, CompileError> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CompileError::syntax(format!(
            "expected a non-negative index, found '{}' in `{}`",
            text, line
        )));
    }
    text.parse::<u32>()
        .map_err(|_| CompileError::syntax(format!("index '{}' out of range in `{}`", text, line)))
}

/// Labels and function names: letters, digits, `_ . :`, not starting
/// with a digit. `$` is left to the translator's own labels.
fn parse_symbol(line: &str, text: &str) -> Result<String, CompileError> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':');
    let starts_ok = text.chars().next().is_some_and(|c| !c.is_ascii_digit());
    if starts_ok && text.chars().all(valid_char) {
        Ok(text.to_string())
    } else {
        Err(CompileError::syntax(format!(
            "invalid symbol '{}' in `{}`",
            text, line
        )))
    }
}
