use anyhow::Result;
use image::{Rgb, RgbImage};
use std::path::Path;
use threes_ocr::{
    BoardRecognizer, Classifier, Error, GeometryRegistry, Labeler, NextTile, RETINA_4IN,
};

/// Labeler for tests where recognition must never have to ask.
struct NoInteraction;

impl Labeler for NoInteraction {
    fn label_tile(&mut self, _crop: &RgbImage) -> Result<String, Error> {
        panic!("interactive labeling should not be needed");
    }
}

fn tile_color(value: u32) -> Rgb<u8> {
    match value {
        0 => Rgb([205, 193, 180]),
        1 => Rgb([102, 204, 255]),
        2 => Rgb([255, 102, 128]),
        3 => Rgb([254, 255, 255]),
        6 => Rgb([255, 255, 128]),
        12 => Rgb([255, 230, 100]),
        _ => panic!("no test color for value {}", value),
    }
}

fn paint_cell(img: &mut RgbImage, row: u32, col: u32, color: Rgb<u8>) {
    let rect = RETINA_4IN.cell_rect(row, col);
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            img.put_pixel(x, y, color);
        }
    }
}

/// Write one exemplar per value, with the same solid content the painted
/// cells will have.
fn seed_exemplars(root: &Path, values: &[u32]) -> Result<()> {
    let dir = root.join("640x1136");
    std::fs::create_dir_all(&dir)?;
    for &value in values {
        let crop = RgbImage::from_pixel(96, 80, tile_color(value));
        crop.save(dir.join(format!("{}.1.png", value)))?;
    }
    Ok(())
}

fn screenshot(values: [[u32; 4]; 4]) -> RgbImage {
    let mut img = RgbImage::from_pixel(640, 1136, Rgb([30, 30, 40]));
    for row in 0..4u32 {
        for col in 0..4u32 {
            let value = values[row as usize][col as usize];
            paint_cell(&mut img, row, col, tile_color(value));
        }
    }
    img
}

#[test]
fn recognizes_a_seeded_screenshot() -> Result<()> {
    let root = tempfile::tempdir()?;
    seed_exemplars(root.path(), &[0, 1, 2, 3, 6, 12])?;

    let mut img = screenshot([[0, 1, 1, 2], [0, 0, 3, 0], [0, 0, 6, 0], [0, 0, 0, 12]]);
    img.put_pixel(RETINA_4IN.probe_x, RETINA_4IN.probe_y, Rgb([102, 204, 255]));

    let classifier = Classifier::new(root.path(), NoInteraction);
    let mut recognizer = BoardRecognizer::new(GeometryRegistry::new(), classifier);
    let state = recognizer.recognize(&img)?;
    assert_eq!(
        state.tiles,
        [[0, 1, 1, 2], [0, 0, 3, 0], [0, 0, 4, 0], [0, 0, 0, 5]]
    );
    assert_eq!(state.next, NextTile::One);
    Ok(())
}

#[test]
fn classification_is_stable_across_sessions() -> Result<()> {
    let root = tempfile::tempdir()?;
    seed_exemplars(root.path(), &[0, 1, 2, 3, 6, 12])?;
    let mut img = screenshot([[3, 0, 0, 0], [0, 6, 0, 0], [0, 0, 1, 0], [0, 0, 0, 0]]);
    img.put_pixel(RETINA_4IN.probe_x, RETINA_4IN.probe_y, Rgb([255, 102, 128]));

    // two fresh recognizers over the same exemplar directory, so each
    // loads its store from disk independently
    let mut first = BoardRecognizer::new(
        GeometryRegistry::new(),
        Classifier::new(root.path(), NoInteraction),
    );
    let mut second = BoardRecognizer::new(
        GeometryRegistry::new(),
        Classifier::new(root.path(), NoInteraction),
    );
    let a = first.recognize(&img)?;
    let b = second.recognize(&img)?;
    assert_eq!(a, b);
    assert_eq!(a.next, NextTile::Two);
    Ok(())
}

#[test]
fn unsupported_screen_size_fails_before_classification() {
    let root = tempfile::tempdir().unwrap();
    let classifier = Classifier::new(root.path(), NoInteraction);
    let mut recognizer = BoardRecognizer::new(GeometryRegistry::new(), classifier);
    let img = RgbImage::from_pixel(999, 999, Rgb([0, 0, 0]));
    match recognizer.recognize(&img) {
        Err(Error::UnsupportedGeometry {
            width: 999,
            height: 999,
        }) => {}
        other => panic!("expected UnsupportedGeometry, got {:?}", other),
    }
    // nothing was classified, so no exemplar directory was created
    assert!(!root.path().join("999x999").exists());
}

#[test]
fn mistyped_label_aborts_recognition() -> Result<()> {
    let root = tempfile::tempdir()?;
    let dir = root.path().join("640x1136");
    std::fs::create_dir_all(&dir)?;
    // a stored exemplar labeled with a value the game cannot produce
    let bad = RgbImage::from_pixel(96, 80, Rgb([66, 66, 66]));
    bad.save(dir.join("5.1.png"))?;

    let mut img = RgbImage::from_pixel(640, 1136, Rgb([20, 20, 20]));
    for row in 0..4 {
        for col in 0..4 {
            paint_cell(&mut img, row, col, Rgb([66, 66, 66]));
        }
    }
    let classifier = Classifier::new(root.path(), NoInteraction);
    let mut recognizer = BoardRecognizer::new(GeometryRegistry::new(), classifier);
    match recognizer.recognize(&img) {
        Err(Error::UnrecognizedValue(value)) => assert_eq!(value, "5"),
        other => panic!("expected UnrecognizedValue, got {:?}", other),
    }
    Ok(())
}

#[test]
fn unknown_next_tile_color_does_not_abort() -> Result<()> {
    let root = tempfile::tempdir()?;
    seed_exemplars(root.path(), &[0])?;
    // probe point keeps the background color, which is in no color table
    let img = screenshot([[0; 4]; 4]);

    let classifier = Classifier::new(root.path(), NoInteraction);
    let mut recognizer = BoardRecognizer::new(GeometryRegistry::new(), classifier);
    let state = recognizer.recognize(&img)?;
    assert_eq!(state.tiles, [[0; 4]; 4]);
    assert_eq!(state.next, NextTile::Unknown);
    Ok(())
}
