//! Templates command: prints the shape catalog.

use anyhow::Result;
use harmony_core::{HarmonicTemplate, Hue, TemplateShape};
use tracing::trace;

pub fn run(verbose: u8) -> Result<()> {
    trace!("templates::run");

    println!("{:<6} {:<12} {:<12} {:>8}", "Shape", "Sizes", "Offsets", "Coverage");
    for shape in TemplateShape::ALL {
        let covered: u16 = shape.sizes().iter().sum();
        println!(
            "{:<6} {:<12} {:<12} {:>7.1}%",
            shape.name(),
            super::list(shape.sizes()),
            super::list(shape.offsets()),
            covered as f64 / 256.0 * 100.0
        );

        if verbose > 0 {
            let template = HarmonicTemplate::new(shape, Hue::ZERO)?;
            for sector in template.sectors() {
                println!("         {} (center {})", sector, sector.center());
            }
        }
    }

    Ok(())
}
