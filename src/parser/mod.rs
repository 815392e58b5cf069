//! Lexer and depth-tracked event parser for the tile definition format
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind and line
//!     ↓
//! Parser → Events tagged with nesting depth (no tree)
//!     ↓
//! codec → Tile / TileGroup / TileSet
//! ```
//!
//! The grammar is data only:
//!
//! ```text
//! document := record*
//! record   := '(' NAME field* ')'
//! field    := value | record
//! value    := STRING | INTEGER | REAL | '#t' | '#f' | SYMBOL
//! ```

#[allow(clippy::module_inception)]
mod parser;

mod lexer;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{Event, Parser, Value};
