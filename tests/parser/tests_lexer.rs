//! Lexer classification and line tracking through the public API.

use rstest::rstest;
use tilelisp::error::LexError;
use tilelisp::parser::{Lexer, TokenKind, tokenize};

/// Helper to lex a single token and check its category
fn assert_single_token(input: &str, kind: TokenKind) {
    let tokens = tokenize(input).unwrap_or_else(|err| panic!("failed to lex {input:?}: {err}"));
    assert_eq!(tokens.len(), 1, "expected one token for {input:?}, got {tokens:?}");
    assert_eq!(tokens[0].kind, kind, "wrong kind for {input:?}");
}

// =============================================================================
// Atom classification
// =============================================================================

#[rstest]
#[case("123", TokenKind::Integer)]
#[case("-5", TokenKind::Integer)]
#[case("0", TokenKind::Integer)]
#[case("12.5", TokenKind::Real)]
#[case("-0.25", TokenKind::Real)]
#[case("12.5.3", TokenKind::Symbol)]
#[case("3rd", TokenKind::Symbol)]
#[case("-", TokenKind::Symbol)]
#[case("abc", TokenKind::Symbol)]
#[case("slope-type", TokenKind::Symbol)]
#[case("_", TokenKind::Symbol)]
#[case("#t", TokenKind::True)]
#[case("#f", TokenKind::False)]
#[case(r#""text""#, TokenKind::String)]
fn test_atom_classification(#[case] input: &str, #[case] kind: TokenKind) {
    assert_single_token(input, kind);
}

#[rstest]
#[case("#x", "x")]
#[case("#true", "true")]
#[case("#", "")]
fn test_unknown_constants(#[case] input: &str, #[case] constant: &str) {
    assert_eq!(
        tokenize(input),
        Err(LexError::UnknownConstant {
            line: 1,
            constant: constant.to_owned(),
        })
    );
}

// =============================================================================
// Strings
// =============================================================================

#[rstest]
#[case(r#""plain""#, "plain")]
#[case(r#""say \"hi\"""#, r#"say "hi""#)]
#[case(r#""a\nb""#, "a\nb")]
#[case(r#""a\tb""#, "a\tb")]
#[case(r#""back\\slash""#, r"back\slash")]
#[case(r#""odd\qescape""#, "oddqescape")]
fn test_string_unescaping(#[case] input: &str, #[case] expected: &str) {
    let tokens = tokenize(input).unwrap();
    assert_eq!(tokens[0].text, expected);
}

#[test]
fn test_unterminated_string_ends_stream() {
    let mut lexer = Lexer::new("(name \"never closed");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::OpenParen);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Symbol);
    assert!(lexer.next_token().unwrap().is_eof());
    assert!(lexer.next_token().unwrap().is_eof());
}

// =============================================================================
// Lines
// =============================================================================

#[test]
fn test_lines_skip_comments_and_multiline_strings() {
    let source = "; header\n(tile\n  \"two\nlines\" ; trailing\n  (id 5))";
    let lines: Vec<_> = tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.line))
        .collect();
    assert_eq!(
        lines,
        vec![
            (TokenKind::OpenParen, 2),
            (TokenKind::Symbol, 2),
            (TokenKind::String, 3),
            (TokenKind::OpenParen, 5),
            (TokenKind::Symbol, 5),
            (TokenKind::Integer, 5),
            (TokenKind::CloseParen, 5),
            (TokenKind::CloseParen, 5),
        ]
    );
}

#[test]
fn test_error_reports_line() {
    let err = tokenize("(a\n b\n #z)").unwrap_err();
    assert_eq!(
        err,
        LexError::UnknownConstant {
            line: 3,
            constant: "z".into(),
        }
    );
}
