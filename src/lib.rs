//! # tilelisp
//!
//! Reading and writing of the parenthesized tile definition format, plus
//! the tileset model it describes.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! codec     → TileSet ⇄ (supertux-tiles (tile …) (tilegroup …))
//!   ↓
//! writer    → Indenting list writer, value formatting
//!   ↓
//! parser    → Logos lexer, depth-tracked event parser
//!   ↓
//! model     → Tile, TileGroup, TileSet, ImageRegion
//!
//! error     → Error types shared by every layer
//! ```
//!
//! ## Example
//!
//! ```
//! use tilelisp::{parse_document, write_document};
//!
//! let source = r#"(tile (id 5) (images "box.png") (solid #t))"#;
//! let tileset = parse_document(source.as_bytes()).unwrap();
//! assert!(tileset.get(5).unwrap().attributes.solid);
//!
//! let out = write_document(&tileset, Vec::new()).unwrap();
//! let again = parse_document(out.as_slice()).unwrap();
//! assert_eq!(tileset, again);
//! ```

// ============================================================================
// MODULES (dependency order: model → parser → writer → codec)
// ============================================================================

/// Error types for lexing, structure, schema and tileset edits
pub mod error;

/// Tile data model: tiles, groups, tilesets, image regions
pub mod model;

/// Parser: Logos lexer and depth-tracked event stream
pub mod parser;

/// Writer: indented `(name value…)` output
pub mod writer;

/// Codec: tilesets to and from the tile definition format
pub mod codec;

// Re-export commonly needed items
pub use codec::{
    ParseOptions, Parsed, Warning, WriteOptions, parse_document, parse_document_with, parse_str,
    write_document, write_document_with,
};
pub use error::{Error, Result};
pub use model::{ImageRegion, Rect, Tile, TileData, TileGroup, TileId, TileSet};
pub use parser::{Event, Parser, Value};
pub use writer::Writer;
