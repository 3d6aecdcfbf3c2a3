use crate::error::Error;
use crate::exemplar::{parse_label, ExemplarStore};
use crate::geometry::Geometry;
use image::RgbImage;
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Supplies labels for crops the classifier has never seen.
///
/// The default implementation asks a human, but the same seam fits an
/// automated strategy such as a secondary similarity classifier.
pub trait Labeler {
    /// Present `crop` to the operator and return the label typed for it.
    fn label_tile(&mut self, crop: &RgbImage) -> Result<String, Error>;

    /// Show a full screenshot for inspection. Called when the next-tile
    /// probe color is not in the color table.
    fn review_screenshot(&mut self, _image: &RgbImage) {}
}

/// Interactive labeler: shows images by writing them to the system temp
/// directory and reads one line from stdin as the label.
pub struct ConsoleLabeler;

impl ConsoleLabeler {
    fn show(&self, image: &RgbImage, name: &str) -> Result<PathBuf, Error> {
        let path = std::env::temp_dir().join(name);
        image.save(&path)?;
        Ok(path)
    }
}

impl Labeler for ConsoleLabeler {
    fn label_tile(&mut self, crop: &RgbImage) -> Result<String, Error> {
        let path = self.show(crop, "threes-unrecognized-tile.png")?;
        print!(
            "Unrecognized tile (saved to {}). Type in its value: ",
            path.display()
        );
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn review_screenshot(&mut self, image: &RgbImage) {
        match self.show(image, "threes-screenshot-review.png") {
            Ok(path) => println!("Screenshot saved for review to {}", path.display()),
            Err(err) => warn!("could not save screenshot for review: {}", err),
        }
    }
}

/// Matches cell crops against the learned exemplar library.
///
/// Stores are loaded lazily, one per screen geometry, the first time a
/// crop from that geometry is classified. A crop whose exact pixel
/// content is known resolves without interaction; anything else goes to
/// the labeler once and is persisted, so the next run recognizes it on
/// its own.
pub struct Classifier<L> {
    root: PathBuf,
    stores: HashMap<(u32, u32), ExemplarStore>,
    labeler: L,
}

impl<L: Labeler> Classifier<L> {
    /// A classifier keeping its exemplars under `root`, in one
    /// subdirectory per geometry.
    pub fn new<P: AsRef<Path>>(root: P, labeler: L) -> Classifier<L> {
        Classifier {
            root: root.as_ref().to_path_buf(),
            stores: HashMap::new(),
            labeler,
        }
    }

    pub fn labeler_mut(&mut self) -> &mut L {
        &mut self.labeler
    }

    fn store_mut(&mut self, geometry: &Geometry) -> Result<&mut ExemplarStore, Error> {
        let key = (geometry.screen_width, geometry.screen_height);
        match self.stores.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let store = ExemplarStore::load(self.root.join(geometry.exemplar_dir_name()))?;
                Ok(entry.insert(store))
            }
        }
    }

    /// Classify a cell crop into its tile value.
    ///
    /// This is the only place the system may block on the operator: an
    /// unknown crop suspends the call until a label is typed.
    ///
    /// # Errors
    /// * [Error::CorruptExemplarName] if the geometry's store cannot be
    ///   loaded.
    /// * [Error::UnrecognizedValue] if the typed label does not start
    ///   with a tile value. Nothing is persisted in that case.
    pub fn classify(&mut self, geometry: &Geometry, crop: &RgbImage) -> Result<u32, Error> {
        if let Some(value) = self.store_mut(geometry)?.get(crop) {
            return Ok(value);
        }
        let token = self.labeler.label_tile(crop)?;
        // the label is read back from the file name later, so it must
        // parse the same way the store parses file stems
        let value =
            parse_label(&token).ok_or_else(|| Error::UnrecognizedValue(token.clone()))?;
        let store = self.store_mut(geometry)?;
        match store.save(crop, &token) {
            Ok(path) => {
                debug!("saved new exemplar {}", path.display());
                store.reload()?;
            }
            Err(Error::ExemplarSlotsExhausted { label }) => {
                warn!(
                    "exemplar for label '{}' not persisted: all slots taken",
                    label
                );
                store.insert(crop, value);
            }
            Err(err) => return Err(err),
        }
        Ok(value)
    }
}
