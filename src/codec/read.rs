//! Reading tilesets from parse events
//!
//! Every record reads itself with the same loop: take the next field list
//! while the events stay inside the record, dispatch on the field name, and
//! require the field list to close afterwards. Unknown names are logged and
//! skipped so newer files still load.

use std::borrow::Cow;

use tracing::{debug, warn};

use super::options::ParseOptions;
use super::warning::Warning;
use super::{Parsed, ROOT_RECORD};
use crate::error::{Result, SchemaError};
use crate::model::{
    Attributes, Directions, ImageRegion, Rect, TILE_HEIGHT, TILE_WIDTH, Tile, TileData, TileGroup,
    TileId, TileSet,
};
use crate::parser::{Event, Parser, Value};

/// Default animation rate of tiles expanded from a `tiles` block
const TILE_BLOCK_FPS: f32 = 10.0;

/// A `(key …)` list inside a record
struct Field<'a> {
    key: Cow<'a, str>,
    line: u32,
    /// Depth of the field's own start-list event
    depth: usize,
}

/// Raw `data` related keys of a tile, reconciled once the record closes
#[derive(Default)]
struct RawData {
    data: Option<i32>,
    slope: Option<i32>,
    fullbox: bool,
    directions: Directions,
}

pub(crate) struct RecordReader<'a> {
    parser: Parser<'a>,
    options: ParseOptions,
    tileset: TileSet,
    warnings: Vec<Warning>,
}

impl<'a> RecordReader<'a> {
    pub(crate) fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            parser: Parser::new(source),
            options: options.clone(),
            tileset: TileSet::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn read_document(mut self) -> Result<Parsed> {
        while let Some(event) = self.parser.next_event()? {
            match event.value {
                Value::StartList => self.read_record(event.depth)?,
                other => {
                    let found = other.describe();
                    return Err(SchemaError::expected(event.line, "record", found).into());
                }
            }
        }
        debug!(
            tiles = self.tileset.len(),
            groups = self.tileset.groups().len(),
            warnings = self.warnings.len(),
            "parsed tileset"
        );
        Ok(Parsed {
            tileset: self.tileset,
            warnings: self.warnings,
        })
    }

    // =========================================================================
    // RECORDS
    // =========================================================================

    /// Read one record whose start-list event was at `depth`
    fn read_record(&mut self, depth: usize) -> Result<()> {
        let (name, line) = self.expect_symbol("record name")?;
        match name.as_ref() {
            ROOT_RECORD => self.read_records(depth),
            "tile" => {
                let tile = self.read_tile(depth, line)?;
                self.add_tile(tile, line);
                Ok(())
            }
            "tilegroup" => {
                let group = self.read_group(depth)?;
                self.tileset.add_group(group);
                Ok(())
            }
            "tiles" => self.read_tile_block(depth, line),
            _ => {
                self.warn(Warning::UnknownKey {
                    record: "tileset",
                    key: name.to_string(),
                    line,
                });
                self.skip_rest(depth)
            }
        }
    }

    /// Read nested records until the list opened at `depth` closes
    fn read_records(&mut self, depth: usize) -> Result<()> {
        loop {
            let event = self.next("record or ')'")?;
            if event.is_end_of(depth) {
                return Ok(());
            }
            match event.value {
                Value::StartList => self.read_record(event.depth)?,
                other => {
                    let found = other.describe();
                    return Err(SchemaError::expected(event.line, "record", found).into());
                }
            }
        }
    }

    fn read_tile(&mut self, depth: usize, line: u32) -> Result<Tile> {
        let mut tile = Tile::new(None);
        let mut raw = RawData::default();
        let worldmap = self.options.worldmap;

        while let Some(field) = self.next_field(depth)? {
            match field.key.as_ref() {
                "id" => tile.id = self.id_field(&field)?,
                "images" => tile.images = self.read_images(field.depth)?,
                "editor-images" => tile.editor_images = self.read_images(field.depth)?,
                "anim-fps" | "fps" => tile.anim_fps = self.fps_field(&field)?,
                "one-way" => tile.one_way = Some(self.string_field(&field)?),
                "data" => raw.data = Some(self.i32_field(&field)?),
                "next-tile" => tile.next_tile = self.id_field(&field)?,
                "hidden" => tile.hidden = self.bool_field(&field)?,
                "solid" => tile.attributes.solid = self.bool_field(&field)?,
                "unisolid" => tile.attributes.unisolid = self.bool_field(&field)?,
                "brick" => tile.attributes.brick = self.bool_field(&field)?,
                "goal" => tile.attributes.goal = self.bool_field(&field)?,
                "coin" => tile.attributes.coin = self.bool_field(&field)?,
                "ice" => tile.attributes.ice = self.bool_field(&field)?,
                "water" => tile.attributes.water = self.bool_field(&field)?,
                "hurts" => tile.attributes.hurts = self.bool_field(&field)?,
                "fire" => tile.attributes.fire = self.bool_field(&field)?,
                "slope-type" => raw.slope = Some(self.i32_field(&field)?),
                "fullbox" => raw.fullbox = self.bool_field(&field)?,
                "north" if worldmap => raw.directions.north = self.bool_field(&field)?,
                "south" if worldmap => raw.directions.south = self.bool_field(&field)?,
                "east" if worldmap => raw.directions.east = self.bool_field(&field)?,
                "west" if worldmap => raw.directions.west = self.bool_field(&field)?,
                "stop" if worldmap => raw.directions.stop = self.bool_field(&field)?,
                _ => self.unknown_key("tile", &field)?,
            }
        }

        tile.data = self.reconcile_data(raw, tile.id, line)?;
        Ok(tile)
    }

    fn reconcile_data(&mut self, raw: RawData, id: Option<TileId>, line: u32) -> Result<TileData> {
        let data = raw.data.unwrap_or(0);
        let has_directions = raw.directions != Directions::default();

        match (raw.slope, raw.fullbox) {
            (Some(_), true) => {
                Err(SchemaError::invalid(line, "tile is both a slope and a bonus box").into())
            }
            (Some(_), false) | (None, true) if has_directions => Err(SchemaError::invalid(
                line,
                "worldmap directions on a slope or bonus box tile",
            )
            .into()),
            (Some(slope), false) => {
                // slope tiles traditionally repeat the slope type in `data`
                if data != 0 && data != slope {
                    self.warn(Warning::ConflictingData {
                        id,
                        slope,
                        data,
                        line,
                    });
                }
                Ok(TileData::Slope(slope))
            }
            (None, true) => Ok(TileData::BoxContent(data)),
            (None, false) if self.options.worldmap => Ok(TileData::Worldmap(
                Directions::from_bits(data as u32).union(raw.directions),
            )),
            (None, false) => Ok(TileData::Plain(data)),
        }
    }

    fn read_group(&mut self, depth: usize) -> Result<TileGroup> {
        let mut group = TileGroup::default();
        while let Some(field) = self.next_field(depth)? {
            match field.key.as_ref() {
                "name" => group.name = self.string_field(&field)?,
                "tiles" => {
                    for (value, line) in self.integer_list(field.depth)? {
                        match TileId::try_from(value) {
                            Ok(id) => group.tiles.push(id),
                            Err(_) => self.warn(Warning::InvalidTileReference {
                                group: group.name.clone(),
                                value,
                                line,
                            }),
                        }
                    }
                }
                _ => self.unknown_key("tilegroup", &field)?,
            }
        }
        Ok(group)
    }

    /// Legacy block describing a grid of tiles cut from shared images:
    /// `(tiles (ids …) (attributes …) (datas …) (image …) (width W) (height H))`
    fn read_tile_block(&mut self, depth: usize, line: u32) -> Result<()> {
        let mut ids = Vec::new();
        let mut attributes: Option<Vec<u32>> = None;
        let mut datas: Option<Vec<i32>> = None;
        let mut images = Vec::new();
        let mut editor_images = Vec::new();
        let mut width = 0u32;
        let mut height = 0u32;
        let mut fps = TILE_BLOCK_FPS;

        while let Some(field) = self.next_field(depth)? {
            match field.key.as_ref() {
                "ids" => {
                    ids = self
                        .integer_list(field.depth)?
                        .into_iter()
                        .map(|(value, line)| convert::<TileId>(value, line, "tile id"))
                        .collect::<Result<_>>()?;
                }
                "attributes" => {
                    attributes = Some(
                        self.integer_list(field.depth)?
                            .into_iter()
                            .map(|(value, line)| convert::<u32>(value, line, "attribute mask"))
                            .collect::<Result<_>>()?,
                    );
                }
                "datas" => {
                    datas = Some(
                        self.integer_list(field.depth)?
                            .into_iter()
                            .map(|(value, line)| convert::<i32>(value, line, "32-bit integer"))
                            .collect::<Result<_>>()?,
                    );
                }
                "image" | "images" => images = self.read_images(field.depth)?,
                "editor-images" => editor_images = self.read_images(field.depth)?,
                "width" => width = self.u32_field(&field)?,
                "height" => height = self.u32_field(&field)?,
                "anim-fps" | "fps" => fps = self.fps_field(&field)?,
                // every cell gets its own crop either way
                "shared-surface" => {
                    self.bool_field(&field)?;
                }
                _ => self.unknown_key("tiles", &field)?,
            }
        }

        if ids.is_empty() {
            return Err(SchemaError::invalid(line, "no ids specified").into());
        }
        if width == 0 {
            return Err(SchemaError::invalid(line, "width is zero").into());
        }
        if height == 0 {
            return Err(SchemaError::invalid(line, "height is zero").into());
        }
        if ids.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(SchemaError::invalid(
                line,
                format!(
                    "number of ids ({}) and dimensions of image ({width}x{height}) differ",
                    ids.len()
                ),
            )
            .into());
        }
        if let Some(attributes) = &attributes {
            if attributes.len() != ids.len() {
                return Err(SchemaError::invalid(
                    line,
                    format!(
                        "number of ids ({}) and attributes ({}) mismatch",
                        ids.len(),
                        attributes.len()
                    ),
                )
                .into());
            }
        }
        if let Some(datas) = &datas {
            if datas.len() != ids.len() {
                return Err(SchemaError::invalid(
                    line,
                    format!(
                        "number of ids ({}) and datas ({}) mismatch",
                        ids.len(),
                        datas.len()
                    ),
                )
                .into());
            }
        }

        let columns = width as usize;
        for (i, &id) in ids.iter().enumerate() {
            // id 0 marks an empty cell
            if id == 0 {
                continue;
            }
            let x = cell_offset(i % columns, TILE_WIDTH, line)?;
            let y = cell_offset(i / columns, TILE_HEIGHT, line)?;
            let mask = attributes.as_ref().map_or(0, |a| a[i]);
            let data = datas.as_ref().map_or(0, |d| d[i]);

            let mut tile = Tile::with_id(id);
            tile.attributes = Attributes::from_bits(mask);
            tile.data = TileData::from_bits(mask, data, self.options.worldmap).ok_or_else(|| {
                SchemaError::invalid(line, format!("tile {id} is both a slope and a bonus box"))
            })?;
            tile.anim_fps = fps;
            tile.images = images
                .iter()
                .map(|r| grid_cell(r, x, y, line))
                .collect::<Result<_>>()?;
            tile.editor_images = editor_images
                .iter()
                .map(|r| grid_cell(r, x, y, line))
                .collect::<Result<_>>()?;
            self.add_tile(tile, line);
        }
        Ok(())
    }

    fn add_tile(&mut self, tile: Tile, line: u32) {
        match tile.id() {
            Some(id) if self.tileset.contains(id) => {
                self.warn(Warning::DuplicateTileId { id, line });
            }
            Some(_) => {
                self.tileset.insert(tile);
            }
            None => {
                debug!(line, "tile without id kept unassigned");
                self.tileset.insert(tile);
            }
        }
    }

    // =========================================================================
    // IMAGES
    // =========================================================================

    /// Read `"file.png"` and `(region "file.png" x y w h)` entries until the
    /// list opened at `depth` closes
    fn read_images(&mut self, depth: usize) -> Result<Vec<ImageRegion>> {
        let mut images = Vec::new();
        loop {
            let event = self.next("image or ')'")?;
            if event.is_end_of(depth) {
                return Ok(images);
            }
            match event.value {
                Value::String(file) => images.push(ImageRegion::whole(file)),
                Value::StartList => images.push(self.read_region(event.depth)?),
                other => {
                    return Err(SchemaError::expected(
                        event.line,
                        "image file or region",
                        other.describe(),
                    )
                    .into());
                }
            }
        }
    }

    fn read_region(&mut self, depth: usize) -> Result<ImageRegion> {
        let (name, line) = self.expect_symbol("'region'")?;
        if name != "region" {
            return Err(SchemaError::expected(line, "'region'", format!("symbol '{name}'")).into());
        }
        let file = self.expect_string("image file")?;
        let x = self.expect_converted::<i32>("region x")?;
        let y = self.expect_converted::<i32>("region y")?;
        let width = self.expect_converted::<u32>("region width")?;
        let height = self.expect_converted::<u32>("region height")?;
        self.expect_end(depth)?;
        Ok(ImageRegion::cropped(file, Rect::new(x, y, width, height)))
    }

    // =========================================================================
    // FIELDS
    // =========================================================================

    /// Next `(key` of the record opened at `depth`, or `None` once the
    /// record closes
    fn next_field(&mut self, depth: usize) -> Result<Option<Field<'a>>> {
        let event = self.next("field or ')'")?;
        if event.is_end_of(depth) {
            return Ok(None);
        }
        if event.value != Value::StartList {
            let found = event.value.describe();
            return Err(SchemaError::expected(event.line, "field list", found).into());
        }
        let (key, line) = self.expect_symbol("field name")?;
        Ok(Some(Field {
            key,
            line,
            depth: event.depth,
        }))
    }

    fn unknown_key(&mut self, record: &'static str, field: &Field<'a>) -> Result<()> {
        self.warn(Warning::UnknownKey {
            record,
            key: field.key.to_string(),
            line: field.line,
        });
        self.skip_rest(field.depth)
    }

    fn bool_field(&mut self, field: &Field<'a>) -> Result<bool> {
        let value = self.expect_bool()?;
        self.expect_end(field.depth)?;
        Ok(value)
    }

    fn i32_field(&mut self, field: &Field<'a>) -> Result<i32> {
        let value = self.expect_converted::<i32>("32-bit integer")?;
        self.expect_end(field.depth)?;
        Ok(value)
    }

    fn u32_field(&mut self, field: &Field<'a>) -> Result<u32> {
        let value = self.expect_converted::<u32>("non-negative integer")?;
        self.expect_end(field.depth)?;
        Ok(value)
    }

    /// A tile id; negative values mean "none"
    fn id_field(&mut self, field: &Field<'a>) -> Result<Option<TileId>> {
        let (value, line) = self.expect_integer("tile id")?;
        let id = if value < 0 {
            None
        } else {
            Some(convert::<TileId>(value, line, "tile id")?)
        };
        self.expect_end(field.depth)?;
        Ok(id)
    }

    fn real_field(&mut self, field: &Field<'a>) -> Result<f64> {
        let event = self.next("real")?;
        let value = event
            .value
            .as_real()
            .ok_or_else(|| SchemaError::expected(event.line, "real", event.value.describe()))?;
        self.expect_end(field.depth)?;
        Ok(value)
    }

    /// An animation rate: finite, non-negative and within `f32` range
    fn fps_field(&mut self, field: &Field<'a>) -> Result<f32> {
        let fps = self.real_field(field)?;
        if !fps.is_finite() || fps < 0.0 || fps > f64::from(f32::MAX) {
            let message = format!("invalid animation rate {fps}");
            return Err(SchemaError::invalid(field.line, message).into());
        }
        Ok(fps as f32)
    }

    /// A string, or a translatable `(_ "string")`
    fn string_field(&mut self, field: &Field<'a>) -> Result<String> {
        let event = self.next("string")?;
        let text = match event.value {
            Value::String(text) => text.into_owned(),
            Value::StartList => {
                let (marker, line) = self.expect_symbol("'_'")?;
                if marker != "_" {
                    let found = format!("symbol '{marker}'");
                    return Err(SchemaError::expected(line, "'_'", found).into());
                }
                let text = self.expect_string("string")?;
                self.expect_end(event.depth)?;
                text
            }
            other => {
                return Err(SchemaError::expected(event.line, "string", other.describe()).into());
            }
        };
        self.expect_end(field.depth)?;
        Ok(text)
    }

    /// Integers until the list opened at `depth` closes, with their lines
    fn integer_list(&mut self, depth: usize) -> Result<Vec<(i64, u32)>> {
        let mut values = Vec::new();
        loop {
            let event = self.next("integer or ')'")?;
            if event.is_end_of(depth) {
                return Ok(values);
            }
            match event.value {
                Value::Integer(n) => values.push((n, event.line)),
                other => {
                    let found = other.describe();
                    return Err(SchemaError::expected(event.line, "integer", found).into());
                }
            }
        }
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Next event; the stream must not end here
    fn next(&mut self, expected: &'static str) -> Result<Event<'a>> {
        match self.parser.next_event()? {
            Some(event) => Ok(event),
            None => Err(SchemaError::eof(self.parser.line(), expected).into()),
        }
    }

    fn expect_symbol(&mut self, expected: &'static str) -> Result<(Cow<'a, str>, u32)> {
        let event = self.next(expected)?;
        match event.value {
            Value::Symbol(symbol) => Ok((symbol, event.line)),
            other => Err(SchemaError::expected(event.line, expected, other.describe()).into()),
        }
    }

    fn expect_string(&mut self, expected: &'static str) -> Result<String> {
        let event = self.next(expected)?;
        match event.value {
            Value::String(text) => Ok(text.into_owned()),
            other => Err(SchemaError::expected(event.line, expected, other.describe()).into()),
        }
    }

    fn expect_integer(&mut self, expected: &'static str) -> Result<(i64, u32)> {
        let event = self.next(expected)?;
        match event.value {
            Value::Integer(n) => Ok((n, event.line)),
            other => Err(SchemaError::expected(event.line, expected, other.describe()).into()),
        }
    }

    fn expect_converted<T: TryFrom<i64>>(&mut self, expected: &'static str) -> Result<T> {
        let (value, line) = self.expect_integer(expected)?;
        convert(value, line, expected)
    }

    fn expect_bool(&mut self) -> Result<bool> {
        let event = self.next("boolean")?;
        event
            .value
            .as_bool()
            .ok_or_else(|| {
                SchemaError::expected(event.line, "boolean", event.value.describe()).into()
            })
    }

    fn expect_end(&mut self, depth: usize) -> Result<()> {
        let event = self.next("')'")?;
        if event.is_end_of(depth) {
            Ok(())
        } else {
            Err(SchemaError::expected(event.line, "')'", event.value.describe()).into())
        }
    }

    /// Discard events until the list opened at `depth` closes
    fn skip_rest(&mut self, depth: usize) -> Result<()> {
        while !self.next("')'")?.is_end_of(depth) {}
        Ok(())
    }

    fn warn(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

fn convert<T: TryFrom<i64>>(value: i64, line: u32, expected: &'static str) -> Result<T> {
    T::try_from(value)
        .map_err(|_| SchemaError::expected(line, expected, format!("integer {value}")).into())
}

/// Pixel offset of grid column or row `index`
fn cell_offset(index: usize, size: u32, line: u32) -> Result<i32> {
    index
        .checked_mul(size as usize)
        .and_then(|offset| i32::try_from(offset).ok())
        .ok_or_else(|| {
            SchemaError::invalid(line, "tile grid exceeds the image coordinate range").into()
        })
}

/// Crop one grid cell out of an image entry of a `tiles` block
fn grid_cell(region: &ImageRegion, x: i32, y: i32, line: u32) -> Result<ImageRegion> {
    let (origin_x, origin_y) = region.rect.map_or((0, 0), |r| (r.x, r.y));
    match (origin_x.checked_add(x), origin_y.checked_add(y)) {
        (Some(x), Some(y)) => Ok(ImageRegion::cropped(
            region.file.clone(),
            Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT),
        )),
        _ => Err(SchemaError::invalid(
            line,
            format!("grid cell of '{}' lies outside the image coordinate range", region.file),
        )
        .into()),
    }
}
