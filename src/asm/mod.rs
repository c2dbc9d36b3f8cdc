//! Hack assembler: assembly text → 16-bit machine words.
//!
//! Two passes. The first binds each `(LABEL)` to the address of the next
//! instruction; the second encodes, allocating unknown `@symbols` as
//! variables from RAM 16 upward in first-use order.

pub mod emulator;
mod encode;
pub mod symbols;

use std::collections::HashMap;
use std::fmt;

use crate::error::{CompileError, CompileResult};
use crate::span::{Span, Spanned};

use self::symbols::SymbolTable;

/// Largest value an A-instruction can load.
pub const MAX_ADDRESS: u16 = 0x7fff;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `@value`.
    Address(u16),
    /// `@symbol`.
    Symbol(String),
    /// `dest=comp;jump`, fields kept as written.
    Compute {
        dest: String,
        comp: String,
        jump: String,
    },
    /// `(LABEL)`.
    Label(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Address(v) => write!(f, "@{}", v),
            Instruction::Symbol(s) => write!(f, "@{}", s),
            Instruction::Compute { dest, comp, jump } => {
                if !dest.is_empty() {
                    write!(f, "{}=", dest)?;
                }
                f.write_str(comp)?;
                if !jump.is_empty() {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
            Instruction::Label(l) => write!(f, "({})", l),
        }
    }
}

/// An assembled program.
#[derive(Clone, Debug)]
pub struct Program {
    pub words: Vec<u16>,
    /// Final symbol table: predefined names, labels, and variables.
    pub symbols: HashMap<String, u16>,
}

impl Program {
    /// `.hack` text: one 16-character binary word per line.
    pub fn to_hack(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 17);
        for word in &self.words {
            out.push_str(&format!("{:016b}\n", word));
        }
        out
    }

    pub fn symbol(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }
}

/// Parse assembly text. Comments (`//`) and blank lines are skipped.
pub fn parse(source: &str) -> CompileResult<Vec<Spanned<Instruction>>> {
    let mut instructions = Vec::new();
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

        let inst = parse_instruction(trimmed).map_err(|err| Spanned::new(err, span))?;
        instructions.push(Spanned::new(inst, span));
    }
    Ok(instructions)
}

fn parse_instruction(line: &str) -> Result<Instruction, CompileError> {
    if let Some(rest) = line.strip_prefix('@') {
        if rest.bytes().all(|b| b.is_ascii_digit()) && !rest.is_empty() {
            return match rest.parse::<u16>() {
                Ok(v) if v <= MAX_ADDRESS => Ok(Instruction::Address(v)),
                _ => Err(CompileError::syntax(format!(
                    "address '{}' does not fit in 15 bits",
                    rest
                ))),
            };
        }
        return Ok(Instruction::Symbol(parse_symbol(line, rest)?));
    }

    if let Some(rest) = line.strip_prefix('(') {
        let Some(name) = rest.strip_suffix(')') else {
            return Err(CompileError::syntax(format!("unterminated label `{}`", line)));
        };
        return Ok(Instruction::Label(parse_symbol(line, name)?));
    }

    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let (dest, rest) = match compact.split_once('=') {
        Some((d, r)) => (d.to_string(), r),
        None => (String::new(), compact.as_str()),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((c, j)) => (c.to_string(), j.to_string()),
        None => (rest.to_string(), String::new()),
    };
    if comp.is_empty() {
        return Err(CompileError::syntax(format!("missing computation in `{}`", line)));
    }
    Ok(Instruction::Compute { dest, comp, jump })
}

fn parse_symbol(line: &str, name: &str) -> Result<String, CompileError> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':');
    let starts_ok = name.chars().next().is_some_and(|c| !c.is_ascii_digit());
    if starts_ok && name.chars().all(valid_char) {
        Ok(name.to_string())
    } else {
        Err(CompileError::syntax(format!(
            "invalid symbol '{}' in `{}`",
            name, line
        )))
    }
}

/// Assemble text into machine words.
pub fn assemble(source: &str) -> CompileResult<Program> {
    let instructions = parse(source)?;
    assemble_instructions(&instructions)
}

pub fn assemble_instructions(instructions: &[Spanned<Instruction>]) -> CompileResult<Program> {
    let mut symbols = SymbolTable::new();

    // Pass 1: labels.
    let mut address: u32 = 0;
    for inst in instructions {
        match &inst.node {
            Instruction::Label(name) => {
                if symbols.contains(name) {
                    return Err(Spanned::new(
                        CompileError::DuplicateDeclaration {
                            scope: "program".to_string(),
                            name: name.clone(),
                        },
                        inst.span,
                    ));
                }
                symbols.insert(name.clone(), address as u16);
            }
            _ => address += 1,
        }
    }
    if address > u32::from(MAX_ADDRESS) + 1 {
        return Err(Spanned::new(
            CompileError::syntax(format!(
                "program has {} instructions; ROM holds {}",
                address,
                u32::from(MAX_ADDRESS) + 1
            )),
            Span::dummy(),
        ));
    }

    // Pass 2: encode.
    let mut words = Vec::with_capacity(address as usize);
    for inst in instructions {
        let word = match &inst.node {
            Instruction::Label(_) => continue,
            Instruction::Address(v) => *v,
            Instruction::Symbol(name) => symbols.resolve_or_allocate(name),
            Instruction::Compute { dest, comp, jump } => {
                let unsupported =
                    || Spanned::new(CompileError::unsupported(&inst.node), inst.span);
                let comp = encode::comp_bits(comp).ok_or_else(unsupported)?;
                let dest = encode::dest_bits(dest).ok_or_else(unsupported)?;
                let jump = encode::jump_bits(jump).ok_or_else(unsupported)?;
                encode::encode_c(comp, dest, jump)
            }
        };
        words.push(word);
    }

    tracing::debug!(words = words.len(), "assembled program");
    Ok(Program {
        words,
        symbols: symbols.into_map(),
    })
}
