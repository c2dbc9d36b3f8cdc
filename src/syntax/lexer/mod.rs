use crate::error::{CompileError, CompileResult};
use crate::lexeme::Lexeme;
use crate::span::{Span, Spanned};

/// Largest integer constant the target word can hold.
pub const MAX_INT_CONST: u32 = 32767;

pub(crate) struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
        }
    }

    /// Tokenize the whole unit. The last token is always `Eof`.
    pub(crate) fn tokenize(mut self) -> CompileResult<Vec<Spanned<Lexeme>>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.node == Lexeme::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> CompileResult<Spanned<Lexeme>> {
        self.skip_whitespace_and_comments()?;

        if self.pos >= self.source.len() {
            return Ok(self.make_token(Lexeme::Eof, self.pos, self.pos));
        }

        let start = self.pos;
        let ch = self.source[self.pos];

        if is_ident_start(ch) {
            return Ok(self.scan_ident_or_keyword());
        }
        if ch.is_ascii_digit() {
            return self.scan_number();
        }
        if ch == b'"' {
            return self.scan_string();
        }

        self.pos += 1;
        match Lexeme::from_symbol(ch) {
            Some(symbol) => Ok(self.make_token(symbol, start, self.pos)),
            None => Err(self.error(
                format!("unexpected character '{}' (U+{:04X})", ch as char, ch),
                start,
            )),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> CompileResult<()> {
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }

            if self.starts_with(b"//") {
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }

            // Covers `/** doc */` too.
            if self.starts_with(b"/*") {
                let start = self.pos;
                self.pos += 2;
                loop {
                    if self.pos >= self.source.len() {
                        return Err(self.error("unterminated block comment".to_string(), start));
                    }
                    if self.starts_with(b"*/") {
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
                continue;
            }

            return Ok(());
        }
    }

    fn scan_ident_or_keyword(&mut self) -> Spanned<Lexeme> {
        let start = self.pos;
        while self.pos < self.source.len() && is_ident_continue(self.source[self.pos]) {
            self.pos += 1;
        }
        let text = String::from_utf8_lossy(&self.source[start..self.pos]);
        let token = Lexeme::from_keyword(&text).unwrap_or_else(|| Lexeme::Ident(text.into_owned()));
        self.make_token(token, start, self.pos)
    }

    fn scan_number(&mut self) -> CompileResult<Spanned<Lexeme>> {
        let start = self.pos;
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos < self.source.len() && is_ident_start(self.source[self.pos]) {
            return Err(self.error(
                format!(
                    "unexpected character '{}' in integer literal",
                    self.source[self.pos] as char
                ),
                self.pos,
            ));
        }
        let text = String::from_utf8_lossy(&self.source[start..self.pos]);
        match text.parse::<u32>() {
            Ok(n) if n <= MAX_INT_CONST => {
                Ok(self.make_token(Lexeme::Integer(n as u16), start, self.pos))
            }
            _ => Err(Spanned::new(
                CompileError::syntax(format!(
                    "integer literal '{}' is too large (maximum is {})",
                    text, MAX_INT_CONST
                )),
                Span::new(start as u32, self.pos as u32),
            )),
        }
    }

    fn scan_string(&mut self) -> CompileResult<Spanned<Lexeme>> {
        let start = self.pos;
        self.pos += 1; // opening quote
        let content_start = self.pos;
        loop {
            match self.source.get(self.pos) {
                None | Some(b'\n') => {
                    return Err(self.error("unterminated string literal".to_string(), start));
                }
                Some(b'"') => break,
                Some(_) => self.pos += 1,
            }
        }
        let text = String::from_utf8_lossy(&self.source[content_start..self.pos]).into_owned();
        // Each character becomes a `push constant`.
        if let Some((offset, ch)) = text
            .char_indices()
            .find(|&(_, ch)| ch as u32 > MAX_INT_CONST)
        {
            let at = content_start + offset;
            return Err(Spanned::new(
                CompileError::syntax(format!(
                    "character U+{:04X} in string literal is out of range (maximum is {})",
                    ch as u32, MAX_INT_CONST
                )),
                Span::new(at as u32, (at + ch.len_utf8()) as u32),
            ));
        }
        self.pos += 1; // closing quote
        Ok(self.make_token(Lexeme::Str(text), start, self.pos))
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.source[self.pos..].starts_with(prefix)
    }

    fn error(&self, message: String, at: usize) -> Spanned<CompileError> {
        Spanned::new(
            CompileError::syntax(message),
            Span::new(at as u32, (at + 1) as u32),
        )
    }

    fn make_token(&self, token: Lexeme, start: usize, end: usize) -> Spanned<Lexeme> {
        Spanned::new(token, Span::new(start as u32, end as u32))
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

#[cfg(test)]
mod tests;
