//! Helpers for building and round-tripping tilesets.

use tilelisp::{ImageRegion, ParseOptions, Parsed, Tile, TileId, TileSet, parse_str, write_document};

/// Parse with default options, panicking on failure
pub fn parse_ok(source: &str) -> Parsed {
    parse_str(source, &ParseOptions::default())
        .unwrap_or_else(|err| panic!("failed to parse: {err}\nInput: {source}"))
}

/// Write a tileset and return the text
pub fn write_to_string(tileset: &TileSet) -> String {
    let bytes = write_document(tileset, Vec::new()).expect("write failed");
    String::from_utf8(bytes).expect("writer produced invalid UTF-8")
}

/// A tile with one whole-image entry
pub fn tile(id: TileId, file: &str) -> Tile {
    let mut tile = Tile::with_id(id);
    tile.images.push(ImageRegion::whole(file));
    tile
}

/// A tileset holding one single-image tile per id
pub fn tileset_with(ids: &[TileId]) -> TileSet {
    let mut set = TileSet::new();
    for &id in ids {
        set.insert(tile(id, &format!("tile-{id}.png")));
    }
    set
}
