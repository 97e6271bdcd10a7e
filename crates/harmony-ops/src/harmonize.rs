//! End-to-end harmonization of HSV planes.
//!
//! ```text
//! HsvImage ──crop(region)──► histogram ──search / fixed──► template
//!                                                             │
//!   hues ──partition──► sector per pixel ──remap table──► new hues
//!                                                             │
//! HsvImage ◄──paste(region)── planes with new hues ◄──────────┘
//! ```
//!
//! Only the hue plane changes. Saturation is read as the histogram weight,
//! value is never read.
//!
//! # Example
//!
//! ```rust
//! use harmony_core::{HsvImage, Hue, TemplateShape};
//! use harmony_ops::harmonize::{harmonize, HarmonizeOptions};
//!
//! let image = HsvImage::new(2, 1, vec![10, 200], vec![255, 255], vec![255, 255]).unwrap();
//! let options = HarmonizeOptions::fixed(TemplateShape::UpperI, Hue::ZERO);
//! let result = harmonize(&image, &options).unwrap();
//! assert_eq!(result.image.saturation(), image.saturation());
//! assert_eq!(result.report.template.name(), "I");
//! ```

use crate::partition::partition;
use crate::remap::RemapTable;
use crate::search::{search, search_shapes, SearchOutcome};
use crate::OpsResult;
use harmony_core::{HarmonicTemplate, HsvImage, Hue, HueHistogram, Rect, TemplateShape};
use tracing::{debug, info};

/// How the template is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateChoice {
    /// Search every shape and rotation.
    #[default]
    Auto,
    /// Search rotations of one shape.
    Shape(TemplateShape),
    /// Use this shape and rotation; no search.
    Fixed {
        /// Template shape.
        shape: TemplateShape,
        /// Rotation offset.
        alpha: Hue,
    },
}

/// Options for [`harmonize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HarmonizeOptions {
    /// Template selection.
    pub choice: TemplateChoice,
    /// Restrict analysis and recoloring to this region.
    pub region: Option<Rect>,
}

impl HarmonizeOptions {
    /// Full search over the whole image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed template over the whole image.
    pub fn fixed(shape: TemplateShape, alpha: Hue) -> Self {
        Self::new().with_choice(TemplateChoice::Fixed { shape, alpha })
    }

    /// Sets the template choice.
    pub fn with_choice(mut self, choice: TemplateChoice) -> Self {
        self.choice = choice;
        self
    }

    /// Restricts processing to `region`.
    pub fn with_region(mut self, region: Rect) -> Self {
        self.region = Some(region);
        self
    }
}

/// Summary of one harmonization run.
#[derive(Debug, Clone)]
pub struct HarmonizeReport {
    /// Template the hues were pulled toward.
    pub template: HarmonicTemplate,
    /// Histogram score of the processed pixels against `template`.
    pub score: f64,
    /// Largest hue-to-sector distance before remapping.
    pub max_distance: u8,
    /// Number of pixels recolored.
    pub pixels: usize,
    /// Search details, when a search ran.
    pub search: Option<SearchOutcome>,
}

/// Recolored planes plus the run summary.
#[derive(Debug, Clone)]
pub struct Harmonized {
    /// Image with the new hue plane.
    pub image: HsvImage,
    /// Run summary.
    pub report: HarmonizeReport,
}

/// Resolves a [`TemplateChoice`] against a histogram.
///
/// # Errors
///
/// Search choices fail on a degenerate histogram. [`TemplateChoice::Fixed`]
/// never looks at the histogram and cannot fail that way, which makes it the
/// fallback for images without any saturated pixels.
pub fn choose_template(
    histogram: &HueHistogram,
    choice: TemplateChoice,
) -> OpsResult<(HarmonicTemplate, Option<SearchOutcome>)> {
    match choice {
        TemplateChoice::Auto => {
            let outcome = search(histogram)?;
            Ok((outcome.template.clone(), Some(outcome)))
        }
        TemplateChoice::Shape(shape) => {
            let outcome = search_shapes(histogram, &[shape])?;
            Ok((outcome.template.clone(), Some(outcome)))
        }
        TemplateChoice::Fixed { shape, alpha } => Ok((HarmonicTemplate::new(shape, alpha)?, None)),
    }
}

/// Partitions and remaps a hue sequence against `template`.
///
/// Returns the new hues and the largest pre-remap sector distance.
pub fn harmonize_hues(hues: &[u8], template: &HarmonicTemplate) -> OpsResult<(Vec<u8>, u8)> {
    let parts = partition(hues, template);
    let table = RemapTable::new(template);
    let out = table.apply(hues, &parts)?;
    Ok((out, parts.max_distance()))
}

/// Runs only the template search on an image (or a region of it).
pub fn analyze(image: &HsvImage, region: Option<Rect>) -> OpsResult<SearchOutcome> {
    let histogram = match region {
        Some(rect) => image.crop(rect)?.histogram(),
        None => image.histogram(),
    };
    search(&histogram)
}

/// Chooses a template and pulls every hue (inside the region, if any) toward it.
///
/// # Errors
///
/// - region outside the image
/// - degenerate histogram when a search is requested
pub fn harmonize(image: &HsvImage, options: &HarmonizeOptions) -> OpsResult<Harmonized> {
    let subject = match options.region {
        Some(rect) => image.crop(rect)?,
        None => image.clone(),
    };

    let histogram = subject.histogram();
    let (template, outcome) = choose_template(&histogram, options.choice)?;
    info!(
        template = %template,
        pixels = subject.len(),
        region = ?options.region,
        "harmonizing"
    );

    let (hues, max_distance) = harmonize_hues(subject.hue(), &template)?;
    let recolored = subject.with_hue(hues)?;

    let image = match options.region {
        Some(rect) => {
            let mut out = image.clone();
            out.paste(rect.x, rect.y, &recolored)?;
            out
        }
        None => recolored,
    };

    let score = template.score(&histogram);
    debug!(score, max_distance, "harmonized");

    Ok(Harmonized {
        image,
        report: HarmonizeReport {
            template,
            score,
            max_distance,
            pixels: subject.len(),
            search: outcome,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planes(hues: Vec<u8>, width: u32, height: u32) -> HsvImage {
        let n = hues.len();
        HsvImage::new(width, height, hues, vec![200; n], vec![180; n]).unwrap()
    }

    #[test]
    fn test_fixed_template_pulls_toward_centers() {
        let image = planes(vec![10, 200], 2, 1);
        let template = HarmonicTemplate::new(TemplateShape::UpperI, Hue::ZERO).unwrap();
        let result = harmonize(&image, &HarmonizeOptions::fixed(TemplateShape::UpperI, Hue::ZERO))
            .unwrap();

        assert!(result.report.search.is_none());
        assert_eq!(result.image.value(), image.value());
        for (&before, &after) in image.hue().iter().zip(result.image.hue()) {
            let (index, _) = template.nearest_sector(Hue::from_u8(before));
            let center = template.sectors()[index].center();
            assert!(center.distance(Hue::from_u8(after)) <= center.distance(Hue::from_u8(before)));
        }
    }

    #[test]
    fn test_auto_search_reports_outcome() {
        let image = planes(vec![40, 41, 42, 43, 44, 45], 3, 2);
        let result = harmonize(&image, &HarmonizeOptions::new()).unwrap();
        let search = result.report.search.expect("search ran");
        assert_eq!(search.per_shape.len(), 7);
        assert_eq!(result.report.score, 0.0);
        assert_eq!(result.report.max_distance, 0);
        assert_eq!(result.report.pixels, 6);
    }

    #[test]
    fn test_shape_choice_searches_rotation_only() {
        let image = planes(vec![100; 4], 2, 2);
        let options = HarmonizeOptions::new().with_choice(TemplateChoice::Shape(TemplateShape::X));
        let result = harmonize(&image, &options).unwrap();
        assert_eq!(result.report.template.shape(), Some(TemplateShape::X));
        assert_eq!(result.report.search.unwrap().per_shape.len(), 1);
    }

    #[test]
    fn test_region_leaves_outside_untouched() {
        let hues: Vec<u8> = (0..16).map(|i| (i * 16) as u8).collect();
        let image = planes(hues, 4, 4);
        let options = HarmonizeOptions::fixed(TemplateShape::LowerI, Hue::from_u8(64))
            .with_region(Rect::new(0, 0, 2, 2));
        let result = harmonize(&image, &options).unwrap();

        assert_eq!(result.report.pixels, 4);
        for (i, (&before, &after)) in image.hue().iter().zip(result.image.hue()).enumerate() {
            let (x, y) = (i % 4, i / 4);
            if x >= 2 || y >= 2 {
                assert_eq!(before, after, "pixel {i} outside region changed");
            }
        }
    }

    #[test]
    fn test_gray_image_needs_fixed_template() {
        let n = 4;
        let image = HsvImage::new(2, 2, vec![0; n], vec![0; n], vec![90; n]).unwrap();
        assert!(harmonize(&image, &HarmonizeOptions::new()).is_err());
        assert!(harmonize(&image, &HarmonizeOptions::fixed(TemplateShape::V, Hue::ZERO)).is_ok());
    }

    #[test]
    fn test_bad_region() {
        let image = planes(vec![1; 4], 2, 2);
        let options = HarmonizeOptions::new().with_region(Rect::new(1, 1, 2, 2));
        assert!(harmonize(&image, &options).is_err());
        assert!(analyze(&image, Some(Rect::new(5, 5, 1, 1))).is_err());
    }
}
