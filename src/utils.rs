use crate::error::Error;
use crate::geometry::Geometry;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Save all 16 cell crops of a screenshot as `{base}-r{row}c{col}.png`.
///
/// Useful to bootstrap an exemplar set from a fresh screenshot: label
/// the saved crops by hand and move them into the exemplar directory.
pub fn save_tiles<P: AsRef<Path>>(
    geometry: &Geometry,
    screenshot: &RgbImage,
    base: P,
) -> Result<Vec<PathBuf>, Error> {
    let base = base.as_ref();
    let mut saved = Vec::with_capacity(16);
    for row in 0..4 {
        for col in 0..4 {
            let crop = geometry.extract(screenshot, row, col);
            let path = PathBuf::from(format!("{}-r{}c{}.png", base.display(), row, col));
            crop.save(&path)?;
            saved.push(path);
        }
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RETINA_4IN;
    use image::Rgb;

    #[test]
    fn saved_tiles_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_fn(640, 1136, |x, y| {
            Rgb([(x % 251) as u8, (y % 251) as u8, ((x + y) % 251) as u8])
        });
        let base = dir.path().join("shot");
        let saved = save_tiles(&RETINA_4IN, &img, &base).unwrap();
        assert_eq!(saved.len(), 16);
        assert_eq!(saved[0], dir.path().join("shot-r0c0.png"));
        let reread = image::open(&saved[5]).unwrap().into_rgb8();
        assert_eq!(reread, RETINA_4IN.extract(&img, 1, 1));
    }
}
