use anyhow::{Context, Result};
use std::path::Path;
use threes_ocr::{save_tiles, GeometryRegistry};

fn main() -> Result<()> {
    env_logger::init();
    let registry = GeometryRegistry::new();
    for path in std::env::args().skip(1) {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open {}", path))?
            .into_rgb8();
        let (width, height) = img.dimensions();
        let geometry = registry.lookup(width, height)?;
        let base = Path::new(&path).with_extension("");
        let saved = save_tiles(geometry, &img, &base)?;
        println!("saved {} tiles from {}", saved.len(), path);
    }
    Ok(())
}
