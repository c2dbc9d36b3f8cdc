mod expr;
mod items;

use crate::ast::Class;
use crate::error::{CompileError, CompileResult};
use crate::lexeme::Lexeme;
use crate::span::{Span, Spanned};

const MAX_NESTING_DEPTH: u32 = 256;

/// Recursive-descent parser over a token stream ending in `Eof`.
/// Stops at the first error.
pub(crate) struct Parser {
    tokens: Vec<Spanned<Lexeme>>,
    pos: usize,
    depth: u32,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Spanned<Lexeme>>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    pub(crate) fn parse_class(mut self) -> CompileResult<Class> {
        let class = self.parse_class_decl()?;
        if !self.at(&Lexeme::Eof) {
            return Err(self.error_at_current(&format!(
                "expected end of file after class '{}', found {}",
                class.name.node,
                self.peek().description()
            )));
        }
        Ok(class)
    }

    fn enter_nesting(&mut self) -> CompileResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.error_at_current("nesting depth exceeded (maximum 256 levels)"));
        }
        Ok(())
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    // --- Utility methods ---

    fn peek(&self) -> &Lexeme {
        &self.tokens[self.pos].node
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn prev_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    fn advance(&mut self) -> &Spanned<Lexeme> {
        let tok = &self.tokens[self.pos];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, token: &Lexeme) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    fn eat(&mut self, token: &Lexeme) -> bool {
        if self.at(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Lexeme) -> CompileResult<Span> {
        if self.at(token) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.error_at_current(&format!(
                "expected {}, found {}",
                token.description(),
                self.peek().description()
            )))
        }
    }

    fn expect_ident(&mut self) -> CompileResult<Spanned<String>> {
        if let Lexeme::Ident(name) = self.peek().clone() {
            let span = self.current_span();
            self.advance();
            Ok(Spanned::new(name, span))
        } else {
            Err(self.error_at_current(&format!(
                "expected identifier, found {}",
                self.peek().description()
            )))
        }
    }

    fn error_at_current(&self, msg: &str) -> Spanned<CompileError> {
        Spanned::new(CompileError::syntax(msg), self.current_span())
    }
}

#[cfg(test)]
mod tests;
