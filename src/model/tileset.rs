//! The tileset: tiles indexed by id plus tile groups
//!
//! ```text
//! TileSet
//! ├── tiles: BTreeMap<TileId, Tile>   (sparse, id order)
//! ├── unassigned: Vec<Tile>           (id -1, never looked up)
//! └── groups: Vec<TileGroup>          (ids as weak references)
//! ```

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use super::group::TileGroup;
use super::image::{ImageRegion, Rect};
use super::tile::{Tile, TileId};
use crate::error::TileSetError;

/// Width of one grid cell in tile images
pub const TILE_WIDTH: u32 = 32;
/// Height of one grid cell in tile images
pub const TILE_HEIGHT: u32 = 32;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileSet {
    tiles: BTreeMap<TileId, Tile>,
    unassigned: Vec<Tile>,
    groups: Vec<TileGroup>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tile. Assigned tiles replace any tile with the same id, which
    /// is returned; unassigned tiles are appended to [`Self::unassigned`].
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        match tile.id {
            Some(id) => self.tiles.insert(id, tile),
            None => {
                self.unassigned.push(tile);
                None
            }
        }
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Mutable access to a tile. Ids change only through
    /// [`Self::remap_tile`] so groups stay consistent.
    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(&id)
    }

    /// Delete a tile. Group entries pointing at it are left in place and
    /// resolve to nothing.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        self.tiles.remove(&id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    /// Number of assigned tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.unassigned.is_empty()
    }

    /// Assigned tiles in id order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.keys().copied()
    }

    /// Tiles with id -1
    pub fn unassigned(&self) -> &[Tile] {
        &self.unassigned
    }

    pub fn unassigned_mut(&mut self) -> &mut Vec<Tile> {
        &mut self.unassigned
    }

    pub fn groups(&self) -> &[TileGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [TileGroup] {
        &mut self.groups
    }

    pub fn add_group(&mut self, group: TileGroup) {
        self.groups.push(group);
    }

    /// First group with this name
    pub fn group(&self, name: &str) -> Option<&TileGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Resolve the entries of `group`. Entries whose tile no longer exists
    /// yield `None` and are logged.
    pub fn group_tiles<'s>(
        &'s self,
        group: &'s TileGroup,
    ) -> impl Iterator<Item = (TileId, Option<&'s Tile>)> + 's {
        group.tiles.iter().map(move |&id| {
            let tile = self.tiles.get(&id);
            if tile.is_none() {
                warn!(group = %group.name, id, "tilegroup contains deleted tile");
            }
            (id, tile)
        })
    }

    /// Smallest id above every assigned id; 1 for an empty set. `None` once
    /// the id space is exhausted.
    pub fn next_free_id(&self) -> Option<TileId> {
        match self.tiles.last_key_value() {
            Some((&last, _)) => last.checked_add(1),
            None => Some(1),
        }
    }

    /// Give tile `old` the id `new`, rewriting every group entry and
    /// `next_tile` link that pointed at `old`.
    pub fn remap_tile(&mut self, old: TileId, new: TileId) -> Result<(), TileSetError> {
        self.apply_remap(&[(old, new)])
    }

    /// Renumber `selection` to consecutive ids starting at `start`, in
    /// selection order. All ids move at once, so a selection may be shifted
    /// onto itself.
    pub fn remap_tiles(&mut self, selection: &[TileId], start: TileId) -> Result<(), TileSetError> {
        let mapping = selection
            .iter()
            .enumerate()
            .map(|(offset, &old)| {
                u32::try_from(offset)
                    .ok()
                    .and_then(|offset| start.checked_add(offset))
                    .map(|new| (old, new))
                    .ok_or(TileSetError::IdOverflow)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_remap(&mapping)
    }

    fn apply_remap(&mut self, mapping: &[(TileId, TileId)]) -> Result<(), TileSetError> {
        let map: FxHashMap<TileId, TileId> = mapping.iter().copied().collect();

        let mut targets = FxHashSet::default();
        for (&old, &new) in &map {
            if !self.tiles.contains_key(&old) {
                return Err(TileSetError::UnknownTile(old));
            }
            let taken_by_other = self.tiles.contains_key(&new) && !map.contains_key(&new);
            if taken_by_other || !targets.insert(new) {
                return Err(TileSetError::IdInUse(new));
            }
        }

        let moved: Vec<(TileId, Tile)> = map
            .iter()
            .filter_map(|(&old, &new)| self.tiles.remove(&old).map(|tile| (new, tile)))
            .collect();
        for (new, mut tile) in moved {
            tile.id = Some(new);
            self.tiles.insert(new, tile);
        }

        for tile in self.tiles.values_mut().chain(self.unassigned.iter_mut()) {
            if let Some(new) = tile.next_tile.and_then(|next| map.get(&next)) {
                tile.next_tile = Some(*new);
            }
        }

        for group in &mut self.groups {
            for entry in &mut group.tiles {
                if let Some(&new) = map.get(entry) {
                    *entry = new;
                }
            }
        }

        debug!(count = map.len(), "remapped tiles");
        Ok(())
    }

    /// Add one tile per [`TILE_WIDTH`]×[`TILE_HEIGHT`] cell of an image,
    /// row by row, skipping cells some tile already crops from `file`.
    /// Returns the ids of the new tiles.
    pub fn import_image_grid(
        &mut self,
        file: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<TileId>, TileSetError> {
        if width % TILE_WIDTH != 0 || height % TILE_HEIGHT != 0 {
            warn!(file, width, height, "image width or height is not a multiple of the tile size");
        }

        let mut next = self.next_free_id();
        let mut added = Vec::new();
        for row in 0..height / TILE_HEIGHT {
            for col in 0..width / TILE_WIDTH {
                let x = (col * TILE_WIDTH) as i32;
                let y = (row * TILE_HEIGHT) as i32;
                let covered = self
                    .tiles
                    .values()
                    .any(|tile| tile.images.iter().any(|r| r.crops_at(file, x, y)));
                if covered {
                    continue;
                }

                let id = next.ok_or(TileSetError::IdOverflow)?;
                next = id.checked_add(1);

                let mut tile = Tile::with_id(id);
                tile.images.push(ImageRegion::cropped(
                    file,
                    Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT),
                ));
                self.tiles.insert(id, tile);
                added.push(id);
            }
        }
        debug!(file, count = added.len(), "imported image grid");
        Ok(added)
    }
}
