use super::*;

fn lex(source: &str) -> Vec<Lexeme> {
    Lexer::new(source)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.node)
        .collect()
}

fn lex_err(source: &str) -> String {
    Lexer::new(source).tokenize().unwrap_err().node.to_string()
}

#[test]
fn test_keywords_and_identifiers() {
    let tokens = lex("class Main { field int count; }");
    assert_eq!(
        tokens,
        vec![
            Lexeme::Class,
            Lexeme::Ident("Main".to_string()),
            Lexeme::LBrace,
            Lexeme::Field,
            Lexeme::Int,
            Lexeme::Ident("count".to_string()),
            Lexeme::Semicolon,
            Lexeme::RBrace,
            Lexeme::Eof,
        ]
    );
}

#[test]
fn test_all_symbols() {
    let tokens = lex("{}()[].,;+-*/&|<>=~");
    assert_eq!(tokens.len(), 20);
    assert_eq!(tokens[0], Lexeme::LBrace);
    assert_eq!(tokens[18], Lexeme::Tilde);
    assert_eq!(tokens[19], Lexeme::Eof);
}

#[test]
fn test_integer_bounds() {
    assert_eq!(lex("32767"), vec![Lexeme::Integer(32767), Lexeme::Eof]);
    assert!(lex_err("32768").contains("too large"));
}

#[test]
fn test_string_literal() {
    let tokens = lex("\"hello, world\"");
    assert_eq!(tokens[0], Lexeme::Str("hello, world".to_string()));
}

#[test]
fn test_string_characters_must_fit_a_constant() {
    // Latin-1 and BMP characters below the limit pass through.
    assert_eq!(lex("\"é\"")[0], Lexeme::Str("é".to_string()));

    let source = "let s = \"ok😀\";";
    let err = Lexer::new(source).tokenize().unwrap_err();
    assert_eq!(err.node.kind(), "SyntaxError");
    assert!(err.node.to_string().contains("U+1F600"));
    let at = source.find('😀').unwrap() as u32;
    assert_eq!(err.span, Span::new(at, at + 4));
}

#[test]
fn test_unterminated_string() {
    assert!(lex_err("\"abc\nlet").contains("unterminated string"));
}

#[test]
fn test_comments_are_skipped() {
    let source = "// line\n/* block */ /** doc\n comment */ let";
    assert_eq!(lex(source), vec![Lexeme::Let, Lexeme::Eof]);
}

#[test]
fn test_unterminated_block_comment() {
    assert!(lex_err("let /* never closed").contains("unterminated block comment"));
}

#[test]
fn test_unexpected_character() {
    let err = Lexer::new("let x = #;").tokenize().unwrap_err();
    assert_eq!(err.node.kind(), "SyntaxError");
    assert_eq!(err.span.start, 8);
}

#[test]
fn test_spans_cover_lexemes() {
    let tokens = Lexer::new("let  total").tokenize().unwrap();
    assert_eq!(tokens[1].span, Span::new(5, 10));
}

#[test]
fn test_slash_is_a_symbol_outside_comments() {
    assert_eq!(
        lex("a / b"),
        vec![
            Lexeme::Ident("a".to_string()),
            Lexeme::Slash,
            Lexeme::Ident("b".to_string()),
            Lexeme::Eof,
        ]
    );
}
