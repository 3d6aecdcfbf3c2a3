use anyhow::{Context, Result};
use std::time::Instant;
use threes_ocr::{BoardRecognizer, Classifier, ConsoleLabeler, GeometryRegistry};

fn main() -> Result<()> {
    env_logger::init();
    let exemplar_dir =
        std::env::var("THREES_EXEMPLAR_DIR").unwrap_or_else(|_| String::from("exemplars"));
    let classifier = Classifier::new(&exemplar_dir, ConsoleLabeler);
    let mut recognizer = BoardRecognizer::new(GeometryRegistry::new(), classifier);
    for path in std::env::args().skip(1) {
        let t0 = Instant::now();
        let state = recognizer
            .recognize_file(&path)
            .with_context(|| format!("Failed to recognize {}", path))?;
        println!("{}", path);
        println!("{}", state);
        println!("recognize took {:?}", t0.elapsed());
        println!();
    }
    Ok(())
}
