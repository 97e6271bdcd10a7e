//! Harmonize command: search (or take) a template and recolor the image.

use crate::HarmonizeArgs;
use anyhow::{bail, Context, Result};
use harmony_core::Hue;
use harmony_ops::harmonize::{harmonize, HarmonizeOptions, TemplateChoice};
use tracing::{info, trace};

/// Maps the template flags onto a [`TemplateChoice`].
fn template_choice(args: &HarmonizeArgs) -> Result<TemplateChoice> {
    let alpha = match (args.alpha, args.degrees) {
        (Some(a), None) => Some(Hue::from_u8(a)),
        (None, Some(d)) => Some(Hue::from_degrees(d)?),
        (None, None) => None,
        (Some(_), Some(_)) => bail!("--alpha and --degrees are mutually exclusive"),
    };

    Ok(match (args.template, alpha) {
        (None, None) => TemplateChoice::Auto,
        (Some(shape), None) => TemplateChoice::Shape(shape),
        (Some(shape), Some(alpha)) => TemplateChoice::Fixed { shape, alpha },
        (None, Some(_)) => bail!("a rotation needs --template"),
    })
}

pub fn run(args: HarmonizeArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "harmonize::run");

    let image = super::load_image(&args.input)?;
    let hsv = image.to_hsv()?;

    let mut options = HarmonizeOptions::new().with_choice(template_choice(&args)?);
    if let Some(rect) = args.region {
        options = options.with_region(rect);
    }

    let result = harmonize(&hsv, &options).with_context(|| {
        format!(
            "Cannot harmonize {} (a gray image needs --template and --alpha)",
            args.input.display()
        )
    })?;
    let report = &result.report;
    info!(
        template = %report.template,
        score = report.score,
        max_distance = report.max_distance,
        pixels = report.pixels,
        "recolored"
    );

    let output = image.with_hsv(&result.image)?;
    super::save_image(&args.output, &output, args.quality)?;

    if verbose > 0 {
        println!(
            "{} -> {}: template {} alpha {} score {:.4}",
            args.input.display(),
            args.output.display(),
            report.template.name(),
            report.template.alpha(),
            report.score
        );
    }

    Ok(())
}
