//! Logos-based lexer for the tile definition format
//!
//! Produces parentheses, strings, symbols, integers, reals and the `#t` / `#f`
//! constants. Whitespace and `;` comments are skipped. Newlines are counted in
//! the logos extras so every token carries the line it started on.

use std::borrow::Cow;

use logos::{Logos, Skip};

use crate::error::LexError;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    OpenParen,
    CloseParen,
    Symbol,
    String,
    Integer,
    Real,
    True,
    False,
}

impl TokenKind {
    /// Human-readable name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::Eof => "end of stream",
            Self::OpenParen => "'('",
            Self::CloseParen => "')'",
            Self::Symbol => "symbol",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::True => "#t",
            Self::False => "#f",
        }
    }
}

/// A token with its kind, text and line
///
/// For strings `text` is the unescaped content without quotes; for constants
/// it is the letter after `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    pub line: u32,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: impl Into<Cow<'a, str>>, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken<'a>>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer_with_extras(input, 1),
            done: false,
        }
    }

    /// Current line, 1-based. Counts every newline consumed so far.
    pub fn line(&self) -> u32 {
        self.inner.extras
    }

    /// Return the next token. Once the input is exhausted this keeps
    /// returning [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        loop {
            let Some(result) = self.inner.next() else {
                return Ok(Token::new(TokenKind::Eof, "", self.line()));
            };
            let slice = self.inner.slice();
            let line = self.line() - newlines(slice);

            let token = match result {
                Ok(LogosToken::OpenParen) => Token::new(TokenKind::OpenParen, slice, line),
                Ok(LogosToken::CloseParen) => Token::new(TokenKind::CloseParen, slice, line),
                Ok(LogosToken::String(text)) => Token::new(TokenKind::String, text, line),
                // an unterminated string runs into the end of the input
                Ok(LogosToken::UnterminatedString) => Token::new(TokenKind::Eof, "", self.line()),
                Ok(LogosToken::Constant(true)) => Token::new(TokenKind::True, &slice[1..], line),
                Ok(LogosToken::Constant(false)) => Token::new(TokenKind::False, &slice[1..], line),
                Ok(LogosToken::Number(class)) => Token::new(class.into(), slice, line),
                Ok(LogosToken::Symbol) => Token::new(TokenKind::Symbol, slice, line),
                // trivia; the callbacks skip these before they get here
                Ok(LogosToken::Newline | LogosToken::Comment) => continue,
                Err(LogosError::UnknownConstant) => {
                    return Err(LexError::UnknownConstant {
                        line,
                        constant: slice[1..].to_owned(),
                    });
                }
                Err(LogosError::Unrecognized) => {
                    return Err(LexError::Unrecognized {
                        line,
                        text: slice.to_owned(),
                    });
                }
            };
            return Ok(token);
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    /// Yields tokens up to (not including) end of stream, or up to the first
    /// error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).collect()
}

fn newlines(text: &str) -> u32 {
    text.bytes().filter(|&b| b == b'\n').count() as u32
}

/// Error raised inside logos callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LogosError {
    #[default]
    Unrecognized,
    UnknownConstant,
}

/// Classification of a token that starts with a digit or `-`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberClass {
    Integer,
    Real,
    Symbol,
}

impl From<NumberClass> for TokenKind {
    fn from(class: NumberClass) -> Self {
        match class {
            NumberClass::Integer => TokenKind::Integer,
            NumberClass::Real => TokenKind::Real,
            NumberClass::Symbol => TokenKind::Symbol,
        }
    }
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = u32)]
#[logos(error = LogosError)]
#[logos(skip r"[ \t\r\f\x0B]+")]
enum LogosToken<'s> {
    #[token("\n", newline)]
    Newline,

    #[regex(r";[^\n]*", logos::skip)]
    Comment,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r#""([^"\\]|\\(.|\n))*""#, string_literal)]
    String(Cow<'s, str>),

    #[regex(r#""([^"\\]|\\(.|\n))*\\?"#, count_newlines)]
    UnterminatedString,

    #[regex(r"#[A-Za-z0-9_]*", constant)]
    Constant(bool),

    #[regex(r#"[0-9\-][^ \t\r\n\f\x0B"();]*"#, classify_number)]
    Number(NumberClass),

    #[regex(r#"[^ \t\r\n\f\x0B"();#0-9\-][^ \t\r\n\f\x0B"();]*"#)]
    Symbol,
}

fn newline<'s>(lex: &mut logos::Lexer<'s, LogosToken<'s>>) -> Skip {
    lex.extras += 1;
    Skip
}

fn count_newlines<'s>(lex: &mut logos::Lexer<'s, LogosToken<'s>>) {
    lex.extras += newlines(lex.slice());
}

fn string_literal<'s>(lex: &mut logos::Lexer<'s, LogosToken<'s>>) -> Cow<'s, str> {
    count_newlines(lex);
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// `\n` and `\t` are escapes; a backslash before anything else yields that
/// character as is.
fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Cow::Owned(out)
}

fn constant<'s>(lex: &mut logos::Lexer<'s, LogosToken<'s>>) -> Result<bool, LogosError> {
    match &lex.slice()[1..] {
        "t" => Ok(true),
        "f" => Ok(false),
        _ => Err(LogosError::UnknownConstant),
    }
}

fn classify_number<'s>(lex: &mut logos::Lexer<'s, LogosToken<'s>>) -> NumberClass {
    let mut digits = false;
    let mut letters = false;
    let mut dots = 0;
    for c in lex.slice().chars() {
        if c.is_ascii_digit() {
            digits = true;
        } else if c == '.' {
            dots += 1;
        } else if c.is_alphabetic() || c == '_' {
            letters = true;
        }
    }

    if letters || !digits || dots > 1 {
        NumberClass::Symbol
    } else if dots == 1 {
        NumberClass::Real
    } else {
        NumberClass::Integer
    }
}
