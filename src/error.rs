use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The screenshot size has no registered tile layout
    #[error("no tile geometry registered for screen size {width}x{height}")]
    UnsupportedGeometry { width: u32, height: u32 },
    /// An exemplar file name does not start with a tile value
    #[error("exemplar file {path} does not encode a tile value in its name")]
    CorruptExemplarName { path: PathBuf },
    /// Every disambiguation suffix for this label is already taken
    #[error("no free exemplar slot left for label '{label}'")]
    ExemplarSlotsExhausted { label: String },
    /// A label does not map to a known tile value
    #[error("'{0}' is not a known tile value")]
    UnrecognizedValue(String),
    /// Error decoding a screenshot
    #[error("image {path} could not be decoded")]
    ImageError {
        path: String,
        source: image::error::ImageError,
    },
    /// Error reading or writing an exemplar image
    #[error("exemplar image could not be read or written")]
    ExemplarImageError(#[from] image::error::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
