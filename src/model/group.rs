//! Named groups of tile references

use super::tile::TileId;

/// A named, ordered list of tile ids
///
/// Entries refer to tiles of the owning [`super::TileSet`] by id and may
/// outlive the tile they point at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileGroup {
    pub name: String,
    pub tiles: Vec<TileId>,
}

impl TileGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiles: Vec::new(),
        }
    }

    pub fn with_tiles(name: impl Into<String>, tiles: impl IntoIterator<Item = TileId>) -> Self {
        Self {
            name: name.into(),
            tiles: tiles.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains(&id)
    }

    /// Replace every occurrence of `old` with `new`; returns how many
    /// entries changed.
    pub fn replace(&mut self, old: TileId, new: TileId) -> usize {
        let mut count = 0;
        for entry in self.tiles.iter_mut().filter(|entry| **entry == old) {
            *entry = new;
            count += 1;
        }
        count
    }
}
