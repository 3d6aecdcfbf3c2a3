use crate::error::Error;
use image::RgbImage;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of stored exemplars per label.
const MAX_SLOTS: u32 = 999;

/// The matching key for a crop: its raw RGB pixel buffer.
///
/// Matching is byte-exact. Two crops that differ in a single pixel get
/// distinct fingerprints and are treated as unrelated exemplars.
pub fn fingerprint(crop: &RgbImage) -> &[u8] {
    crop.as_raw()
}

/// The tile value encoded in a label token or file stem: the leading run
/// of decimal digits. `"6.2"` and `"6bonus"` both parse as 6; a stem
/// without leading digits has no value.
pub(crate) fn parse_label(stem: &str) -> Option<u32> {
    let end = stem.find(|c: char| !c.is_ascii_digit()).unwrap_or(stem.len());
    stem[..end].parse().ok()
}

/// The labeled reference crops for one screen geometry.
///
/// The on-disk files double as the labeled dataset: one PNG per known
/// crop, named `<value>.<n>.png`. The in-memory mapping is re-derived
/// from the files on every load, so the dataset can be audited or
/// corrected by editing the directory, and there is no separate index
/// to keep in sync.
pub struct ExemplarStore {
    dir: PathBuf,
    exemplars: HashMap<Vec<u8>, u32>,
}

impl ExemplarStore {
    /// Load the exemplars stored in `dir`, creating the directory if it
    /// does not exist yet.
    ///
    /// # Errors
    /// [Error::CorruptExemplarName] if a PNG in `dir` does not encode a
    /// value in its name. The offending file must be renamed or removed
    /// before the store can be used.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<ExemplarStore, Error> {
        let mut store = ExemplarStore {
            dir: dir.as_ref().to_path_buf(),
            exemplars: HashMap::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-derive the in-memory mapping from the files on disk.
    pub fn reload(&mut self) -> Result<(), Error> {
        self.exemplars.clear();
        fs::create_dir_all(&self.dir)?;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            let value = parse_label(stem).ok_or_else(|| Error::CorruptExemplarName {
                path: path.clone(),
            })?;
            let img = image::open(&path)?.into_rgb8();
            // a fingerprint keeps the first label it was loaded with
            self.exemplars.entry(img.into_raw()).or_insert(value);
        }
        debug!(
            "loaded {} exemplars from {}",
            self.exemplars.len(),
            self.dir.display()
        );
        Ok(())
    }

    /// Number of distinct exemplars currently in memory.
    pub fn len(&self) -> usize {
        self.exemplars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exemplars.is_empty()
    }

    /// The value of the exemplar with exactly this pixel content.
    pub fn get(&self, crop: &RgbImage) -> Option<u32> {
        self.exemplars.get(fingerprint(crop)).copied()
    }

    /// Record a crop in memory without persisting it. Used when a save
    /// was refused so the running session still recognizes the crop.
    pub fn insert(&mut self, crop: &RgbImage, value: u32) {
        self.exemplars
            .entry(crop.as_raw().clone())
            .or_insert(value);
    }

    /// Persist a crop under `label`, picking the first free numeric
    /// suffix. Returns the path written.
    ///
    /// Must be followed by a [reload](ExemplarStore::reload) so the
    /// in-memory mapping reflects the new file.
    ///
    /// # Errors
    /// [Error::ExemplarSlotsExhausted] if all 999 suffixes for `label`
    /// are taken. Nothing is written in that case.
    pub fn save(&self, crop: &RgbImage, label: &str) -> Result<PathBuf, Error> {
        for n in 1..=MAX_SLOTS {
            let path = self.dir.join(format!("{}.{}.png", label, n));
            if !path.exists() {
                crop.save(&path)?;
                return Ok(path);
            }
        }
        Err(Error::ExemplarSlotsExhausted {
            label: label.to_string(),
        })
    }
}
