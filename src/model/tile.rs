//! Tile definitions
//!
//! The legacy format packs attributes into one bit mask and reuses a single
//! `data` integer for slope types, bonus box contents and worldmap
//! directions. Here the attributes are named flags and the reinterpretations
//! of `data` are variants of [`TileData`], so a tile can never claim two of
//! them at once.

use super::image::ImageRegion;

/// Identifier of an assigned tile
pub type TileId = u32;

/// Legacy attribute bit values
pub mod bits {
    pub const SOLID: u32 = 0x0001;
    pub const UNISOLID: u32 = 0x0002;
    pub const BRICK: u32 = 0x0004;
    pub const GOAL: u32 = 0x0008;
    pub const SLOPE: u32 = 0x0010;
    pub const FULLBOX: u32 = 0x0020;
    pub const COIN: u32 = 0x0040;
    pub const ICE: u32 = 0x0100;
    pub const WATER: u32 = 0x0200;
    pub const HURTS: u32 = 0x0400;
    pub const FIRE: u32 = 0x0800;

    pub const WORLDMAP_NORTH: u32 = 0x0001;
    pub const WORLDMAP_SOUTH: u32 = 0x0002;
    pub const WORLDMAP_EAST: u32 = 0x0004;
    pub const WORLDMAP_WEST: u32 = 0x0008;
    pub const WORLDMAP_STOP: u32 = 0x0010;
}

/// Independent tile flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attributes {
    /// Indestructible solid tile
    pub solid: bool,
    /// Solid from one direction only
    pub unisolid: bool,
    /// Destroyed by jumping under it
    pub brick: bool,
    /// Finishes the level; `data` 0 plays the end sequence, 1 ends at once
    pub goal: bool,
    pub coin: bool,
    /// Makes the player slide more than usual
    pub ice: bool,
    /// The player swims in it
    pub water: bool,
    pub hurts: bool,
    /// Lava is water + hurts + fire
    pub fire: bool,
}

impl Attributes {
    /// Decode a legacy bit mask. The slope and full-box bits are ignored;
    /// see [`TileData::from_bits`].
    pub fn from_bits(mask: u32) -> Self {
        Self {
            solid: mask & bits::SOLID != 0,
            unisolid: mask & bits::UNISOLID != 0,
            brick: mask & bits::BRICK != 0,
            goal: mask & bits::GOAL != 0,
            coin: mask & bits::COIN != 0,
            ice: mask & bits::ICE != 0,
            water: mask & bits::WATER != 0,
            hurts: mask & bits::HURTS != 0,
            fire: mask & bits::FIRE != 0,
        }
    }

    pub fn bits(&self) -> u32 {
        [
            (self.solid, bits::SOLID),
            (self.unisolid, bits::UNISOLID),
            (self.brick, bits::BRICK),
            (self.goal, bits::GOAL),
            (self.coin, bits::COIN),
            (self.ice, bits::ICE),
            (self.water, bits::WATER),
            (self.hurts, bits::HURTS),
            (self.fire, bits::FIRE),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(0, |mask, (_, bit)| mask | bit)
    }

    pub fn is_empty(&self) -> bool {
        self.bits() == 0
    }
}

/// Worldmap walking directions and stop flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Directions {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
    pub stop: bool,
}

impl Directions {
    pub fn from_bits(mask: u32) -> Self {
        Self {
            north: mask & bits::WORLDMAP_NORTH != 0,
            south: mask & bits::WORLDMAP_SOUTH != 0,
            east: mask & bits::WORLDMAP_EAST != 0,
            west: mask & bits::WORLDMAP_WEST != 0,
            stop: mask & bits::WORLDMAP_STOP != 0,
        }
    }

    pub fn bits(&self) -> u32 {
        let mut mask = 0;
        if self.north {
            mask |= bits::WORLDMAP_NORTH;
        }
        if self.south {
            mask |= bits::WORLDMAP_SOUTH;
        }
        if self.east {
            mask |= bits::WORLDMAP_EAST;
        }
        if self.west {
            mask |= bits::WORLDMAP_WEST;
        }
        if self.stop {
            mask |= bits::WORLDMAP_STOP;
        }
        mask
    }

    pub fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits() | other.bits())
    }
}

/// The meaning of a tile's `data` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileData {
    /// No reinterpretation; 0 when unused
    Plain(i32),
    /// Slope tile with its slope type
    Slope(i32),
    /// Bonus box with its content id
    BoxContent(i32),
    /// Worldmap tile with its directions
    Worldmap(Directions),
}

impl Default for TileData {
    fn default() -> Self {
        Self::Plain(0)
    }
}

impl TileData {
    /// Decode the legacy attribute mask plus data pair. Returns `None` when
    /// both the slope and the full-box bit are set.
    pub fn from_bits(attributes: u32, data: i32, worldmap: bool) -> Option<Self> {
        let slope = attributes & bits::SLOPE != 0;
        let fullbox = attributes & bits::FULLBOX != 0;
        match (slope, fullbox) {
            (true, true) => None,
            (true, false) => Some(Self::Slope(data)),
            (false, true) => Some(Self::BoxContent(data)),
            (false, false) if worldmap => Some(Self::Worldmap(Directions::from_bits(data as u32))),
            (false, false) => Some(Self::Plain(data)),
        }
    }

    /// The integer stored in the legacy `data` field
    pub fn raw(&self) -> i32 {
        match *self {
            Self::Plain(n) | Self::Slope(n) | Self::BoxContent(n) => n,
            Self::Worldmap(dirs) => dirs.bits() as i32,
        }
    }
}

/// One tile of a tileset
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub(crate) id: Option<TileId>,
    pub hidden: bool,
    /// Tile this one turns into, e.g. after being hit
    pub next_tile: Option<TileId>,
    pub attributes: Attributes,
    pub data: TileData,
    pub anim_fps: f32,
    pub images: Vec<ImageRegion>,
    /// Thumbnails shown only in the editor
    pub editor_images: Vec<ImageRegion>,
    pub one_way: Option<String>,
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Tile {
    pub const DEFAULT_ANIM_FPS: f32 = 1.0;
    /// Rate written for animated tiles that kept the default rate
    pub const ANIMATED_ANIM_FPS: f32 = 40.0;

    pub fn new(id: Option<TileId>) -> Self {
        Self {
            id,
            hidden: false,
            next_tile: None,
            attributes: Attributes::default(),
            data: TileData::default(),
            anim_fps: Self::DEFAULT_ANIM_FPS,
            images: Vec::new(),
            editor_images: Vec::new(),
            one_way: None,
        }
    }

    pub fn with_id(id: TileId) -> Self {
        Self::new(Some(id))
    }

    /// `None` for tiles excluded from id lookup
    pub fn id(&self) -> Option<TileId> {
        self.id
    }

    pub fn is_slope(&self) -> bool {
        matches!(self.data, TileData::Slope(_))
    }

    pub fn is_fullbox(&self) -> bool {
        matches!(self.data, TileData::BoxContent(_))
    }

    pub fn is_animated(&self) -> bool {
        self.images.len() > 1
    }

    /// The animation rate as it is written out: only for animated tiles, and
    /// with the default rate replaced by [`Self::ANIMATED_ANIM_FPS`].
    pub fn written_anim_fps(&self) -> Option<f32> {
        if !self.is_animated() {
            return None;
        }
        if self.anim_fps == Self::DEFAULT_ANIM_FPS {
            Some(Self::ANIMATED_ANIM_FPS)
        } else {
            Some(self.anim_fps)
        }
    }
}
