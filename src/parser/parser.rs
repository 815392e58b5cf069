//! Depth-tracked event parser
//!
//! Turns the token stream into a flat sequence of [`Event`]s. No tree is
//! built: records read themselves by consuming events while the depth stays
//! inside them.
//!
//! Depth rules:
//! - a start-list event carries the depth it was opened at,
//! - its children are one level deeper,
//! - its matching end-list event carries the same depth as the start-list.

use std::borrow::Cow;

use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{Result, SchemaError, StructuralError};

/// The typed value of a parse event
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    StartList,
    EndList,
    Symbol(Cow<'a, str>),
    String(Cow<'a, str>),
    Integer(i64),
    Real(f64),
    Boolean(bool),
}

impl<'a> Value<'a> {
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Reals, and integers widened to reals.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Category name used in "expected X, found Y" messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::StartList => "'('",
            Self::EndList => "')'",
            Self::Symbol(_) => "symbol",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Boolean(_) => "boolean",
        }
    }

    /// Short description including the value, e.g. `symbol 'id'`
    pub fn describe(&self) -> String {
        match self {
            Self::StartList | Self::EndList => self.kind_name().to_owned(),
            Self::Symbol(s) => format!("symbol '{s}'"),
            Self::String(s) => format!("string \"{s}\""),
            Self::Integer(n) => format!("integer {n}"),
            Self::Real(r) => format!("real {r}"),
            Self::Boolean(b) => format!("boolean {}", if *b { "#t" } else { "#f" }),
        }
    }
}

/// One step of the parse
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'a> {
    pub depth: usize,
    pub line: u32,
    pub value: Value<'a>,
}

impl Event<'_> {
    pub fn is_end_of(&self, depth: usize) -> bool {
        self.value == Value::EndList && self.depth == depth
    }
}

/// Cursor over the events of one input
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::from_lexer(Lexer::new(input))
    }

    pub fn from_lexer(lexer: Lexer<'a>) -> Self {
        Self { lexer, depth: 0 }
    }

    /// Number of lists currently open
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Line the lexer has reached
    pub fn line(&self) -> u32 {
        self.lexer.line()
    }

    /// Advance to the next event. Returns `None` at end of stream, at which
    /// point the depth is reset to 0.
    pub fn next_event(&mut self) -> Result<Option<Event<'a>>> {
        let token = self.lexer.next_token()?;
        let line = token.line;

        let (depth, value) = match token.kind {
            TokenKind::Eof => {
                self.depth = 0;
                return Ok(None);
            }
            TokenKind::OpenParen => {
                let depth = self.depth;
                self.depth += 1;
                (depth, Value::StartList)
            }
            TokenKind::CloseParen => {
                if self.depth == 0 {
                    return Err(StructuralError::UnexpectedClose { line }.into());
                }
                self.depth -= 1;
                (self.depth, Value::EndList)
            }
            TokenKind::Symbol => (self.depth, Value::Symbol(token.text)),
            TokenKind::String => (self.depth, Value::String(token.text)),
            TokenKind::Integer => (self.depth, Value::Integer(parse_number(&token)?)),
            TokenKind::Real => (self.depth, Value::Real(parse_number(&token)?)),
            TokenKind::True => (self.depth, Value::Boolean(true)),
            TokenKind::False => (self.depth, Value::Boolean(false)),
        };

        Ok(Some(Event { depth, line, value }))
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Event<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

fn parse_number<T: std::str::FromStr>(token: &Token<'_>) -> Result<T> {
    token.text.parse().map_err(|_| {
        SchemaError::InvalidNumber {
            line: token.line,
            text: token.text.clone().into_owned(),
        }
        .into()
    })
}
