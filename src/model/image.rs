//! Image references of a tile

/// A crop rectangle in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An image file, optionally cropped to a rectangle
///
/// A `None` rect means the whole image is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRegion {
    pub file: String,
    pub rect: Option<Rect>,
}

impl ImageRegion {
    /// Reference the whole image
    pub fn whole(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            rect: None,
        }
    }

    /// Reference a crop of the image. A zero width means no crop.
    pub fn cropped(file: impl Into<String>, rect: Rect) -> Self {
        Self {
            file: file.into(),
            rect: (rect.width != 0).then_some(rect),
        }
    }

    pub fn is_cropped(&self) -> bool {
        self.rect.is_some()
    }

    /// Whether this region crops `file` starting at pixel `(x, y)`
    pub fn crops_at(&self, file: &str, x: i32, y: i32) -> bool {
        self.file == file && self.rect.is_some_and(|r| r.x == x && r.y == y)
    }
}
