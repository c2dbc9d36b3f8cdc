use std::fmt;

/// All lexemes in the Jack language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lexeme {
    // Keywords
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,

    // Symbols
    LBrace,    // {
    RBrace,    // }
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    Dot,       // .
    Comma,     // ,
    Semicolon, // ;
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Amp,       // &
    Pipe,      // |
    Lt,        // <
    Gt,        // >
    Eq,        // =
    Tilde,     // ~

    // Literals
    Integer(u16),
    Str(String),
    Ident(String),

    // End of file
    Eof,
}

impl Lexeme {
    /// Try to match an identifier string to a keyword lexeme.
    pub fn from_keyword(s: &str) -> Option<Lexeme> {
        match s {
            "class" => Some(Lexeme::Class),
            "constructor" => Some(Lexeme::Constructor),
            "function" => Some(Lexeme::Function),
            "method" => Some(Lexeme::Method),
            "field" => Some(Lexeme::Field),
            "static" => Some(Lexeme::Static),
            "var" => Some(Lexeme::Var),
            "int" => Some(Lexeme::Int),
            "char" => Some(Lexeme::Char),
            "boolean" => Some(Lexeme::Boolean),
            "void" => Some(Lexeme::Void),
            "true" => Some(Lexeme::True),
            "false" => Some(Lexeme::False),
            "null" => Some(Lexeme::Null),
            "this" => Some(Lexeme::This),
            "let" => Some(Lexeme::Let),
            "do" => Some(Lexeme::Do),
            "if" => Some(Lexeme::If),
            "else" => Some(Lexeme::Else),
            "while" => Some(Lexeme::While),
            "return" => Some(Lexeme::Return),
            _ => None,
        }
    }

    pub fn from_symbol(ch: u8) -> Option<Lexeme> {
        let lexeme = match ch {
            b'{' => Lexeme::LBrace,
            b'}' => Lexeme::RBrace,
            b'(' => Lexeme::LParen,
            b')' => Lexeme::RParen,
            b'[' => Lexeme::LBracket,
            b']' => Lexeme::RBracket,
            b'.' => Lexeme::Dot,
            b',' => Lexeme::Comma,
            b';' => Lexeme::Semicolon,
            b'+' => Lexeme::Plus,
            b'-' => Lexeme::Minus,
            b'*' => Lexeme::Star,
            b'/' => Lexeme::Slash,
            b'&' => Lexeme::Amp,
            b'|' => Lexeme::Pipe,
            b'<' => Lexeme::Lt,
            b'>' => Lexeme::Gt,
            b'=' => Lexeme::Eq,
            b'~' => Lexeme::Tilde,
            _ => return None,
        };
        Some(lexeme)
    }

    /// Human-readable description for error messages.
    pub fn description(&self) -> String {
        match self {
            Lexeme::Integer(n) => format!("integer literal '{}'", n),
            Lexeme::Str(s) => format!("string literal \"{}\"", s),
            Lexeme::Ident(name) => format!("identifier '{}'", name),
            Lexeme::Eof => "end of file".to_string(),
            other => format!("'{}'", other),
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Lexeme::Class => "class",
            Lexeme::Constructor => "constructor",
            Lexeme::Function => "function",
            Lexeme::Method => "method",
            Lexeme::Field => "field",
            Lexeme::Static => "static",
            Lexeme::Var => "var",
            Lexeme::Int => "int",
            Lexeme::Char => "char",
            Lexeme::Boolean => "boolean",
            Lexeme::Void => "void",
            Lexeme::True => "true",
            Lexeme::False => "false",
            Lexeme::Null => "null",
            Lexeme::This => "this",
            Lexeme::Let => "let",
            Lexeme::Do => "do",
            Lexeme::If => "if",
            Lexeme::Else => "else",
            Lexeme::While => "while",
            Lexeme::Return => "return",
            Lexeme::LBrace => "{",
            Lexeme::RBrace => "}",
            Lexeme::LParen => "(",
            Lexeme::RParen => ")",
            Lexeme::LBracket => "[",
            Lexeme::RBracket => "]",
            Lexeme::Dot => ".",
            Lexeme::Comma => ",",
            Lexeme::Semicolon => ";",
            Lexeme::Plus => "+",
            Lexeme::Minus => "-",
            Lexeme::Star => "*",
            Lexeme::Slash => "/",
            Lexeme::Amp => "&",
            Lexeme::Pipe => "|",
            Lexeme::Lt => "<",
            Lexeme::Gt => ">",
            Lexeme::Eq => "=",
            Lexeme::Tilde => "~",
            Lexeme::Integer(n) => return write!(f, "{}", n),
            Lexeme::Str(s) => return write!(f, "\"{}\"", s),
            Lexeme::Ident(name) => return f.write_str(name),
            Lexeme::Eof => "<eof>",
        };
        f.write_str(text)
    }
}
