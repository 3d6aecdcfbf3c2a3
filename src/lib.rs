//! An OCR library that reads the state of a Threes board from a screenshot
//!
//! The board is a 4x4 grid of tiles. Each cell crop is matched byte-exact
//! against a library of labeled exemplar images; a crop never seen before
//! is shown to the operator, labeled once, and recognized on its own from
//! then on. A single probe pixel tells which tile the game will spawn
//! next.
//!
//! # Basic usage
//! ```no_run
//! # use threes_ocr::{BoardRecognizer, Classifier, ConsoleLabeler, Error, GeometryRegistry};
//! let classifier = Classifier::new("exemplars", ConsoleLabeler);
//! let mut recognizer = BoardRecognizer::new(GeometryRegistry::new(), classifier);
//! let state = recognizer.recognize_file("sample/IMG_3189.PNG")?;
//! println!("{}", state);
//! # Ok::<(), Error>(())
//! ```
//! This example would show the recognized board as a grid of board
//! indices (0 for an empty cell, 13 for the highest tile) and the
//! next-tile indicator:
//!
//! ```text
//!   0   1   1   2
//!   0   0   3   0
//!   0   0   4   0
//!   0   0   0   5
//! next: One
//! ```
//!
//! Matching is deliberately exact: the capture source renders losslessly
//! at a fixed resolution, so any pixel difference is a genuinely new
//! tile appearance and gets its own exemplar.

mod classifier;
mod error;
mod exemplar;
mod geometry;
mod recognizer;
mod utils;

pub use classifier::{Classifier, ConsoleLabeler, Labeler};
pub use error::Error;
pub use exemplar::{fingerprint, ExemplarStore};
pub use geometry::{Geometry, GeometryRegistry, RETINA_4IN};
pub use recognizer::{
    detect_next_tile, tile_index, BoardRecognizer, BoardState, NextTile, TILE_VALUES,
};
pub use utils::save_tiles;
