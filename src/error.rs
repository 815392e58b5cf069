//! Error types for lexing, parsing, writing and tileset editing.
//!
//! Lex, structural and schema errors are terminal: the whole document is
//! unusable once one is raised. Recoverable conditions (unknown keys,
//! duplicate ids) are reported as [`crate::codec::Warning`]s instead.

use std::borrow::Cow;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure that aborts a parse or a write.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed token.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Unbalanced lists on either side of the codec.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// A token of the wrong category at a grammar position.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A real with no written form, such as NaN or an infinity.
    #[error("cannot write non-finite real {0}")]
    NonFiniteReal(f64),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `#` constant other than `#t` or `#f`.
    #[error("line {line}: unknown constant '#{constant}'")]
    UnknownConstant { line: u32, constant: String },

    /// Input no token rule accepts.
    #[error("line {line}: unrecognized input '{text}'")]
    Unrecognized { line: u32, text: String },
}

/// Errors about list nesting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A `)` with no list open.
    #[error("line {line}: unexpected ')'")]
    UnexpectedClose { line: u32 },

    /// `end_list` named a list other than the innermost open one.
    #[error("tried to close list '{found}' while '{expected}' is open")]
    ListMismatch { expected: String, found: String },

    /// `end_list` with no list open.
    #[error("tried to close list '{name}' but no list is open")]
    NothingOpen { name: String },

    /// The writer was finished with lists still open.
    #[error("lists still open: {}", .open.join(", "))]
    Unclosed { open: Vec<String> },
}

/// Errors about what appears at a given grammar position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Found a token of another category than the one required.
    #[error("line {line}: expected {expected}, found {found}")]
    Expected {
        line: u32,
        expected: Cow<'static, str>,
        found: String,
    },

    /// The stream ended inside a record.
    #[error("line {line}: unexpected end of stream, expected {expected}")]
    UnexpectedEof {
        line: u32,
        expected: Cow<'static, str>,
    },

    /// A numeric token whose text does not convert.
    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { line: u32, text: String },

    /// A record whose fields contradict each other.
    #[error("line {line}: {message}")]
    Invalid { line: u32, message: String },
}

impl SchemaError {
    /// Create an "expected X, found Y" error.
    pub fn expected(
        line: u32,
        expected: impl Into<Cow<'static, str>>,
        found: impl Into<String>,
    ) -> Self {
        Self::Expected {
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an end-of-stream error.
    pub fn eof(line: u32, expected: impl Into<Cow<'static, str>>) -> Self {
        Self::UnexpectedEof {
            line,
            expected: expected.into(),
        }
    }

    /// Create a record validation error.
    pub fn invalid(line: u32, message: impl Into<String>) -> Self {
        Self::Invalid {
            line,
            message: message.into(),
        }
    }
}

/// Errors from editing operations on a [`crate::model::TileSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TileSetError {
    /// No tile has this id.
    #[error("no tile with id {0}")]
    UnknownTile(u32),

    /// Another tile already uses this id.
    #[error("tile id {0} is already in use")]
    IdInUse(u32),

    /// Renumbering ran past the largest id.
    #[error("tile id range overflows")]
    IdOverflow,
}
