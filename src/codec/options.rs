//! Codec options

use crate::writer::WriterOptions;

/// Options for reading a tileset document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Read the file as a worldmap tileset: accept the `north`, `south`,
    /// `east`, `west` and `stop` keys and read `data` as direction bits.
    pub worldmap: bool,
}

impl ParseOptions {
    pub fn worldmap() -> Self {
        Self { worldmap: true }
    }
}

/// Options for writing a tileset document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Comment written above the root record
    pub header_comment: Option<String>,
    pub writer: WriterOptions,
}
