//! Analyze command: template search without recoloring.

use crate::AnalyzeArgs;
use anyhow::{Context, Result};
use harmony_core::{Hue, HsvImage, Rect};
use harmony_ops::partition::partition;
use harmony_ops::search::search;
use harmony_ops::SearchOutcome;
use std::path::Path;
use tracing::{debug, trace};

/// Fit summary printed by the command.
struct Analysis {
    width: u32,
    height: u32,
    outcome: SearchOutcome,
    max_distance: u8,
    peak: Hue,
}

/// Searches the best template for `hsv` (or `region` of it) and measures how
/// far its hues sit from that template.
fn summarize(hsv: &HsvImage, region: Option<Rect>) -> Result<Analysis> {
    let subject = match region {
        Some(rect) => hsv.crop(rect)?,
        None => hsv.clone(),
    };
    let histogram = subject.histogram();
    let outcome = search(&histogram)?;
    let max_distance = partition(subject.hue(), &outcome.template).max_distance();
    let peak = histogram.peak();
    debug!(max_distance, %peak, "fit summary");

    Ok(Analysis {
        width: hsv.width(),
        height: hsv.height(),
        outcome,
        max_distance,
        peak,
    })
}

pub fn run(args: AnalyzeArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), region = ?args.region, "analyze::run");

    let image = super::load_image(&args.input)?;
    let hsv = image.to_hsv()?;
    let analysis = summarize(&hsv, args.region)
        .with_context(|| format!("Template search failed for {}", args.input.display()))?;

    if args.json {
        print_json(&args.input, &args, &analysis);
    } else {
        print_text(&args.input, &args, &analysis, verbose);
    }

    Ok(())
}

fn print_text(path: &Path, args: &AnalyzeArgs, analysis: &Analysis, verbose: u8) {
    let best = &analysis.outcome;
    println!("{}", path.display());
    println!("  Resolution:   {}x{}", analysis.width, analysis.height);
    if let Some(rect) = args.region {
        println!("  Region:       {},{} {}x{}", rect.x, rect.y, rect.width, rect.height);
    }
    println!(
        "  Template:     {} (alpha {}, {:.1} deg)",
        best.template.name(),
        best.template.alpha(),
        best.template.alpha().to_degrees()
    );
    println!("  Score:        {:.4}", best.score);
    println!("  Max distance: {}", analysis.max_distance);
    println!(
        "  Dominant hue: {} ({:.1} deg)",
        analysis.peak,
        analysis.peak.to_degrees()
    );

    if verbose > 0 {
        for sector in best.template.sectors() {
            println!("  Sector:       {}", sector);
        }
    }

    println!("  Per shape:");
    for s in &best.per_shape {
        let marker = if Some(s.shape) == best.template.shape() { "*" } else { " " };
        println!("   {} {:<2} alpha {:>3}  score {:.4}", marker, s.shape, s.alpha, s.score);
    }
}

fn print_json(path: &Path, args: &AnalyzeArgs, analysis: &Analysis) {
    let best = &analysis.outcome;
    println!("{{");
    println!("  \"file\": \"{}\",", super::json_escape(&path.display().to_string()));
    println!("  \"width\": {},", analysis.width);
    println!("  \"height\": {},", analysis.height);
    if let Some(rect) = args.region {
        println!(
            "  \"region\": [{}, {}, {}, {}],",
            rect.x, rect.y, rect.width, rect.height
        );
    }
    println!("  \"template\": \"{}\",", super::json_escape(best.template.name()));
    println!("  \"alpha\": {},", best.template.alpha());
    println!("  \"score\": {},", best.score);
    println!("  \"max_distance\": {},", analysis.max_distance);
    println!("  \"peak\": {},", analysis.peak);
    println!("  \"shapes\": [");
    for (idx, s) in best.per_shape.iter().enumerate() {
        let comma = if idx + 1 < best.per_shape.len() { "," } else { "" };
        println!(
            "    {{\"shape\": \"{}\", \"alpha\": {}, \"score\": {}}}{}",
            s.shape, s.alpha, s.score, comma
        );
    }
    println!("  ]");
    println!("}}");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x1 image: three saturated pixels at hue 10 and one at hue 140.
    fn two_clusters() -> HsvImage {
        HsvImage::new(4, 1, vec![10, 10, 10, 140], vec![255; 4], vec![200; 4]).unwrap()
    }

    #[test]
    fn test_summary_matches_partition() {
        let hsv = two_clusters();
        let analysis = summarize(&hsv, None).unwrap();
        let expected = partition(hsv.hue(), &analysis.outcome.template).max_distance();
        assert_eq!(analysis.max_distance, expected);
        assert_eq!(analysis.peak, hsv.histogram().peak());
        assert_eq!((analysis.width, analysis.height), (4, 1));
    }

    #[test]
    fn test_summary_of_region() {
        let hsv = two_clusters();
        let rect = Rect::new(0, 0, 2, 1);
        let analysis = summarize(&hsv, Some(rect)).unwrap();
        assert_eq!(analysis.max_distance, 0);
        assert_eq!(analysis.peak, hsv.crop(rect).unwrap().histogram().peak());
        assert!(summarize(&hsv, Some(Rect::new(3, 0, 2, 1))).is_err());
    }
}
