use crate::classifier::{Classifier, Labeler};
use crate::error::Error;
use crate::geometry::{Geometry, GeometryRegistry};
use image::RgbImage;
use log::warn;
use std::fmt;
use std::path::Path;

/// Tile values in board-index order: index 0 is the empty cell, 13 the
/// highest tile the game can show.
pub const TILE_VALUES: [u32; 14] = [
    0, 1, 2, 3, 6, 12, 24, 48, 96, 192, 384, 768, 1536, 3072,
];

/// Board index of a tile value, if it is one the game can produce.
pub fn tile_index(value: u32) -> Option<u8> {
    TILE_VALUES.iter().position(|&v| v == value).map(|i| i as u8)
}

/// The tile the game will spawn next, read from the probe point color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextTile {
    /// Probe color not in the color table
    Unknown = 0,
    One = 1,
    Two = 2,
    Three = 3,
    /// A 6-or-higher tile
    Bonus = 4,
}

const NEXT_TILE_COLORS: [([u8; 3], NextTile); 4] = [
    ([102, 204, 255], NextTile::One),
    ([255, 102, 128], NextTile::Two),
    ([254, 255, 255], NextTile::Three),
    ([0, 0, 0], NextTile::Bonus),
];

/// Read the next-tile indicator at the geometry's probe point.
///
/// An unknown color is not an error: it resolves to
/// [NextTile::Unknown] and the screenshot is handed to the labeler for
/// review. Unlike cell crops, the probe point learns nothing new.
pub fn detect_next_tile<L: Labeler>(
    geometry: &Geometry,
    screenshot: &RgbImage,
    labeler: &mut L,
) -> NextTile {
    let px = screenshot.get_pixel(geometry.probe_x, geometry.probe_y).0;
    for &(color, next) in NEXT_TILE_COLORS.iter() {
        if px == color {
            return next;
        }
    }
    warn!(
        "unknown next tile color {:?} at ({}, {})",
        px, geometry.probe_x, geometry.probe_y
    );
    labeler.review_screenshot(screenshot);
    NextTile::Unknown
}

/// The recognized state of one screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Board indices, row-major
    pub tiles: [[u8; 4]; 4],
    pub next: NextTile,
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.iter() {
            writeln!(f, "{:>3} {:>3} {:>3} {:>3}", row[0], row[1], row[2], row[3])?;
        }
        write!(f, "next: {:?}", self.next)
    }
}

/// Threes board recognizer.
///
/// Owns the geometry registry and the classifier, and turns one
/// screenshot into one [BoardState].
///
/// # Basic usage
/// ```no_run
/// # use threes_ocr::{BoardRecognizer, Classifier, ConsoleLabeler, Error, GeometryRegistry};
/// let classifier = Classifier::new("exemplars", ConsoleLabeler);
/// let mut recognizer = BoardRecognizer::new(GeometryRegistry::new(), classifier);
/// let state = recognizer.recognize_file("sample/IMG_3189.PNG")?;
/// println!("{}", state);
/// # Ok::<(), Error>(())
/// ```
pub struct BoardRecognizer<L: Labeler> {
    registry: GeometryRegistry,
    classifier: Classifier<L>,
}

impl<L: Labeler> BoardRecognizer<L> {
    pub fn new(registry: GeometryRegistry, classifier: Classifier<L>) -> BoardRecognizer<L> {
        BoardRecognizer {
            registry,
            classifier,
        }
    }

    /// Recognize a full screenshot.
    ///
    /// The screen size picks the geometry, every cell crop is classified
    /// in row-major order, and the probe point is read once.
    ///
    /// # Errors
    /// * [Error::UnsupportedGeometry] for a screenshot from an
    ///   unregistered device, before anything is extracted.
    /// * [Error::UnrecognizedValue] if a classified value is not a tile
    ///   value the game can produce, which points at a mistyped label.
    /// * Any error from loading or extending the exemplar store.
    pub fn recognize(&mut self, screenshot: &RgbImage) -> Result<BoardState, Error> {
        let (width, height) = screenshot.dimensions();
        let geometry = *self.registry.lookup(width, height)?;
        let mut tiles = [[0u8; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                let crop = geometry.extract(screenshot, row, col);
                let value = self.classifier.classify(&geometry, &crop)?;
                tiles[row as usize][col as usize] = tile_index(value)
                    .ok_or_else(|| Error::UnrecognizedValue(value.to_string()))?;
            }
        }
        let next = detect_next_tile(&geometry, screenshot, self.classifier.labeler_mut());
        Ok(BoardState { tiles, next })
    }

    /// Recognize a screenshot read from `path`.
    pub fn recognize_file<P: AsRef<Path>>(&mut self, path: P) -> Result<BoardState, Error> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| Error::ImageError {
            path: path.display().to_string(),
            source,
        })?;
        self.recognize(&img.into_rgb8())
    }
}
