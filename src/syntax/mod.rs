//! Jack front end: tokens, spans and the recursive-descent parser.

pub mod lexeme;
pub mod lexer;
pub mod parser;
pub mod span;

use crate::ast::Class;
use crate::error::CompileResult;

/// Tokenize and parse one Jack compilation unit.
pub fn parse_class(source: &str) -> CompileResult<Class> {
    let tokens = lexer::Lexer::new(source).tokenize()?;
    parser::Parser::new(tokens).parse_class()
}
