use crate::error::Error;
use image::math::Rect;
use image::{GenericImageView, RgbImage};
use std::collections::HashMap;

/// The pixel-space layout of the 4x4 tile grid for one screen resolution.
///
/// All coordinates are in screenshot pixels. A `Geometry` is plain data:
/// it is registered once at startup and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Top left corner of the first tile
    pub origin_x: u32,
    pub origin_y: u32,
    /// Size of the tile sample
    pub tile_width: u32,
    pub tile_height: u32,
    /// Spacing between adjacent tiles
    pub stride_x: u32,
    pub stride_y: u32,
    /// Next-tile sample point
    pub probe_x: u32,
    pub probe_y: u32,
    /// Screen size
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Retina 4" iPhone/iPod
pub const RETINA_4IN: Geometry = Geometry {
    origin_x: 92,
    origin_y: 348,
    tile_width: 96,
    tile_height: 80,
    stride_x: 120,
    stride_y: 160,
    probe_x: 320,
    probe_y: 146,
    screen_width: 640,
    screen_height: 1136,
};

impl Geometry {
    /// Bounding rectangle of the cell at `(row, col)`, both in `0..4`.
    pub fn cell_rect(&self, row: u32, col: u32) -> Rect {
        Rect {
            x: self.origin_x + col * self.stride_x,
            y: self.origin_y + row * self.stride_y,
            width: self.tile_width,
            height: self.tile_height,
        }
    }

    /// Crop the cell at `(row, col)` out of a full screenshot.
    ///
    /// The rectangle always fits inside a screenshot of the registered
    /// size, so no further bounds checks are done here.
    pub fn extract(&self, screenshot: &RgbImage, row: u32, col: u32) -> RgbImage {
        let rect = self.cell_rect(row, col);
        screenshot
            .view(rect.x, rect.y, rect.width, rect.height)
            .to_image()
    }

    /// Directory name for this geometry's exemplars, e.g. `640x1136`.
    pub fn exemplar_dir_name(&self) -> String {
        format!("{}x{}", self.screen_width, self.screen_height)
    }
}

/// Maps a screen size to the tile layout registered for it.
///
/// There is no layout auto-detection: a screenshot from an unregistered
/// device fails with [Error::UnsupportedGeometry]. Supporting a new
/// device means registering one more [Geometry].
pub struct GeometryRegistry {
    geometries: HashMap<(u32, u32), Geometry>,
}

impl GeometryRegistry {
    /// A registry with the built-in geometries.
    pub fn new() -> GeometryRegistry {
        let mut registry = GeometryRegistry {
            geometries: HashMap::new(),
        };
        registry.register(RETINA_4IN);
        registry
    }

    /// Register a tile layout, replacing any previous one for its screen size.
    pub fn register(&mut self, geometry: Geometry) {
        self.geometries
            .insert((geometry.screen_width, geometry.screen_height), geometry);
    }

    /// Look up the tile layout for a screen size.
    ///
    /// # Errors
    /// [Error::UnsupportedGeometry] if no layout is registered for
    /// `width` x `height`.
    pub fn lookup(&self, width: u32, height: u32) -> Result<&Geometry, Error> {
        self.geometries
            .get(&(width, height))
            .ok_or(Error::UnsupportedGeometry { width, height })
    }
}

impl Default for GeometryRegistry {
    fn default() -> Self {
        GeometryRegistry::new()
    }
}
