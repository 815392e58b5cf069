//! Writing tilesets
//!
//! Fields are written only when they differ from their defaults, so the
//! reader must never rely on a field being present.

use std::io::Write;

use tracing::warn;

use super::ROOT_RECORD;
use crate::error::Result;
use crate::model::{ImageRegion, Tile, TileData, TileGroup, TileSet};
use crate::writer::{Writer, quote};

pub(crate) fn write_tileset<W: Write>(writer: &mut Writer<W>, tileset: &TileSet) -> Result<()> {
    writer.start_list(ROOT_RECORD)?;
    for group in tileset.groups() {
        write_group(writer, group)?;
    }
    for tile in tileset.tiles().chain(tileset.unassigned()) {
        write_tile(writer, tile)?;
    }
    writer.end_list(ROOT_RECORD)
}

/// Write one `(tilegroup …)` record
pub fn write_group<W: Write>(writer: &mut Writer<W>, group: &TileGroup) -> Result<()> {
    writer.start_list("tilegroup")?;
    writer.write("name", &group.name)?;
    writer.write("tiles", &group.tiles)?;
    writer.end_list("tilegroup")
}

/// Write one `(tile …)` record
pub fn write_tile<W: Write>(writer: &mut Writer<W>, tile: &Tile) -> Result<()> {
    writer.start_list("tile")?;
    writer.write("id", &tile.id().map_or(-1, i64::from))?;

    if tile.images.is_empty() {
        warn!(id = ?tile.id(), "no images on tile");
    } else {
        write_images(writer, "images", &tile.images)?;
    }

    let attrs = &tile.attributes;
    write_flags(
        writer,
        &[
            ("solid", attrs.solid),
            ("unisolid", attrs.unisolid),
            ("ice", attrs.ice),
            ("water", attrs.water),
        ],
    )?;
    if let TileData::Slope(slope) = tile.data {
        writer.write("slope-type", &slope)?;
    }
    write_flags(
        writer,
        &[
            ("hurts", attrs.hurts),
            ("fire", attrs.fire),
            ("coin", attrs.coin),
            ("fullbox", tile.is_fullbox()),
            ("brick", attrs.brick),
            ("goal", attrs.goal),
            ("hidden", tile.hidden),
        ],
    )?;

    if let Some(next) = tile.next_tile {
        writer.write("next-tile", &next)?;
    }
    if !tile.editor_images.is_empty() {
        write_images(writer, "editor-images", &tile.editor_images)?;
    }
    // slope-type already carries the value
    if !tile.is_slope() && tile.data.raw() != 0 {
        writer.write("data", &tile.data.raw())?;
    }
    if let Some(fps) = tile.written_anim_fps() {
        writer.write("anim-fps", &fps)?;
    }
    if let Some(one_way) = &tile.one_way {
        writer.write("one-way", one_way)?;
    }
    writer.end_list("tile")
}

fn write_flags<W: Write>(writer: &mut Writer<W>, flags: &[(&str, bool)]) -> Result<()> {
    for &(key, set) in flags {
        if set {
            writer.write(key, &true)?;
        }
    }
    Ok(())
}

fn write_images<W: Write>(writer: &mut Writer<W>, key: &str, images: &[ImageRegion]) -> Result<()> {
    writer.start_list(key)?;
    for image in images {
        match image.rect {
            Some(rect) => writer.write_verbatim_line(&format!(
                "(region {} {} {} {} {})",
                quote(&image.file),
                rect.x,
                rect.y,
                rect.width,
                rect.height
            ))?,
            None => writer.write_verbatim_line(&quote(&image.file))?,
        }
    }
    writer.end_list(key)
}
