//! Conditions the reader recovers from

use std::fmt;

use crate::model::TileId;

/// A recovered problem in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A record or field name the reader does not know; its content was
    /// skipped.
    UnknownKey {
        record: &'static str,
        key: String,
        line: u32,
    },
    /// A second tile with an id already in use; the later tile was dropped.
    DuplicateTileId { id: TileId, line: u32 },
    /// A tile group entry that cannot be a tile id; it was dropped.
    InvalidTileReference { group: String, value: i64, line: u32 },
    /// A `data` value disagreeing with the tile's `slope-type`; the slope
    /// type was kept.
    ConflictingData {
        id: Option<TileId>,
        slope: i32,
        data: i32,
        line: u32,
    },
}

impl Warning {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnknownKey { line, .. }
            | Self::DuplicateTileId { line, .. }
            | Self::InvalidTileReference { line, .. }
            | Self::ConflictingData { line, .. } => *line,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey { record, key, line } => {
                write!(f, "line {line}: unknown {record} element '{key}'")
            }
            Self::DuplicateTileId { id, line } => {
                write!(f, "line {line}: tile id {id} already in use, tile skipped")
            }
            Self::InvalidTileReference { group, value, line } => {
                write!(f, "line {line}: tilegroup '{group}' has invalid tile id {value}")
            }
            Self::ConflictingData {
                id,
                slope,
                data,
                line,
            } => match id {
                Some(id) => write!(
                    f,
                    "line {line}: tile {id} has data {data} but slope-type {slope}"
                ),
                None => write!(f, "line {line}: tile has data {data} but slope-type {slope}"),
            },
        }
    }
}
