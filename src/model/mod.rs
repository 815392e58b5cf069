//! Tile data model
//!
//! Tiles, tile groups and the tileset that owns them. Groups refer to tiles
//! by id only; [`TileSet::remap_tile`] keeps them consistent when ids change.

mod group;
mod image;
mod tile;
mod tileset;

pub use group::TileGroup;
pub use image::{ImageRegion, Rect};
pub use tile::{Attributes, Directions, Tile, TileData, TileId, bits};
pub use tileset::{TILE_HEIGHT, TILE_WIDTH, TileSet};
