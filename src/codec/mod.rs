//! Tileset codec
//!
//! Maps [`TileSet`]s onto the parenthesized format and back:
//!
//! ```text
//! (supertux-tiles
//!   (tilegroup
//!     (name "Snow")
//!     (tiles 1 2 3)
//!   )
//!   (tile
//!     (id 1)
//!     (images
//!       (region "snow.png" 0 0 32 32)
//!     )
//!     (solid #t)
//!   )
//! )
//! ```
//!
//! Reading accepts the records with or without the `supertux-tiles`
//! wrapper, plus the legacy `(tiles …)` grid block, which is expanded into
//! individual tiles. Writing always produces individual `tile` records.

mod options;
mod read;
mod warning;
mod write;


use std::io::{Read, Write};

use crate::error::Result;
use crate::model::TileSet;
use crate::writer::Writer;
pub use options::{ParseOptions, WriteOptions};
use read::RecordReader;
pub use warning::Warning;
pub use write::{write_group, write_tile};

/// Name of the record wrapping a whole tileset file
pub const ROOT_RECORD: &str = "supertux-tiles";

/// A tileset together with the problems recovered from while reading it
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub tileset: TileSet,
    pub warnings: Vec<Warning>,
}

/// Read a tileset with default options. Warnings are logged and dropped.
pub fn parse_document<R: Read>(stream: R) -> Result<TileSet> {
    Ok(parse_document_with(stream, &ParseOptions::default())?.tileset)
}

/// Read a tileset, keeping the warnings
pub fn parse_document_with<R: Read>(mut stream: R, options: &ParseOptions) -> Result<Parsed> {
    let mut source = String::new();
    stream.read_to_string(&mut source)?;
    parse_str(&source, options)
}

/// Read a tileset from text
pub fn parse_str(source: &str, options: &ParseOptions) -> Result<Parsed> {
    RecordReader::new(source, options).read_document()
}

/// Write a tileset with default options and hand back the stream
pub fn write_document<W: Write>(tileset: &TileSet, stream: W) -> Result<W> {
    write_document_with(tileset, stream, &WriteOptions::default())
}

pub fn write_document_with<W: Write>(
    tileset: &TileSet,
    stream: W,
    options: &WriteOptions,
) -> Result<W> {
    let mut writer = Writer::with_options(stream, options.writer.clone());
    if let Some(header) = &options.header_comment {
        writer.write_comment(header)?;
    }
    write::write_tileset(&mut writer, tileset)?;
    writer.finish()
}
