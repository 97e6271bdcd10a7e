//! Harmonic templates: sector arrangements bound to a rotation.
//!
//! Building a template precomputes a 256-entry distance table holding, for
//! every hue, the distance to the nearest sector (0 inside a sector). Scoring
//! a histogram is then a weighted dot product against that table.
//!
//! # Example
//!
//! ```rust
//! use harmony_core::{HarmonicTemplate, Hue, HueHistogram, TemplateShape};
//!
//! let t = HarmonicTemplate::new(TemplateShape::UpperI, Hue::from_u8(0)).unwrap();
//! assert_eq!(t.distance(Hue::from_u8(6)), 0);
//! assert_eq!(t.distance(Hue::from_u8(20)), 8);
//!
//! let mut hist = HueHistogram::new();
//! hist.add(20, 0.5).unwrap();
//! assert_eq!(t.score(&hist), 4.0);
//! ```

use crate::error::{Error, Result};
use crate::histogram::HueHistogram;
use crate::ring::{Hue, HUE_LEVELS};
use crate::sector::Sector;
use crate::shape::TemplateShape;

/// A set of sectors rotated by `alpha`, with its distance table.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicTemplate {
    name: String,
    shape: Option<TemplateShape>,
    alpha: Hue,
    sectors: Vec<Sector>,
    distances: [u8; HUE_LEVELS as usize],
}

impl HarmonicTemplate {
    /// Builds a catalog shape rotated by `alpha`.
    ///
    /// # Errors
    ///
    /// Never fails for catalog shapes in practice; the signature is fallible
    /// because construction goes through the same validation as
    /// [`HarmonicTemplate::custom`].
    pub fn new(shape: TemplateShape, alpha: Hue) -> Result<Self> {
        Self::build(
            shape.name().to_string(),
            Some(shape),
            shape.sizes(),
            shape.offsets(),
            alpha,
        )
    }

    /// Builds an arbitrary sector arrangement.
    ///
    /// Sector `k` starts at `alpha + offsets[k]` and spans `sizes[k]` hues.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTemplate`] if there are no sectors or the slices differ in length
    /// - [`Error::InvalidSector`] if a size is outside `1..=256`
    /// - [`Error::DegenerateTemplate`] if the sectors cover the whole wheel
    ///
    /// ```rust
    /// use harmony_core::{HarmonicTemplate, Hue};
    ///
    /// let err = HarmonicTemplate::custom("full", &[256], &[0], Hue::ZERO).unwrap_err();
    /// assert!(err.is_degenerate());
    /// ```
    pub fn custom(
        name: impl Into<String>,
        sizes: &[u16],
        offsets: &[u16],
        alpha: Hue,
    ) -> Result<Self> {
        Self::build(name.into(), None, sizes, offsets, alpha)
    }

    fn build(
        name: String,
        shape: Option<TemplateShape>,
        sizes: &[u16],
        offsets: &[u16],
        alpha: Hue,
    ) -> Result<Self> {
        if sizes.is_empty() {
            return Err(Error::invalid_template(name, "no sectors"));
        }
        if sizes.len() != offsets.len() {
            return Err(Error::invalid_template(
                name,
                format!("{} sizes but {} offsets", sizes.len(), offsets.len()),
            ));
        }

        let sectors = sizes
            .iter()
            .zip(offsets)
            .map(|(&size, &offset)| Sector::at(alpha.offset(offset as i32), size))
            .collect::<Result<Vec<_>>>()?;

        let mut distances = [0u8; HUE_LEVELS as usize];
        for h in Hue::all() {
            distances[h.value() as usize] = sectors
                .iter()
                .map(|s| s.distance(h))
                .min()
                .unwrap_or(0);
        }

        if distances.iter().all(|&d| d == 0) {
            return Err(Error::DegenerateTemplate {
                name,
                alpha: alpha.value(),
            });
        }

        Ok(Self {
            name,
            shape,
            alpha,
            sectors,
            distances,
        })
    }

    /// Template name (the catalog letter for catalog shapes).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog shape, or `None` for custom templates.
    #[inline]
    pub fn shape(&self) -> Option<TemplateShape> {
        self.shape
    }

    /// Rotation offset.
    #[inline]
    pub fn alpha(&self) -> Hue {
        self.alpha
    }

    /// Sectors in template order.
    #[inline]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Distance from every hue to the nearest sector.
    #[inline]
    pub fn distance_table(&self) -> &[u8; HUE_LEVELS as usize] {
        &self.distances
    }

    /// Distance from `h` to the nearest sector.
    #[inline]
    pub fn distance(&self, h: Hue) -> u8 {
        self.distances[h.value() as usize]
    }

    /// Index of the sector nearest to `h`, with its distance.
    ///
    /// Equidistant sectors resolve to the earlier one in template order.
    pub fn nearest_sector(&self, h: Hue) -> (usize, u8) {
        let mut best = (0, u8::MAX);
        for (i, sector) in self.sectors.iter().enumerate() {
            let d = sector.distance(h);
            if d < best.1 {
                best = (i, d);
            }
        }
        best
    }

    /// Weighted distance of a histogram to this template.
    ///
    /// `sum over h of distance_table[h] * histogram[h]`. Lower is a better fit.
    pub fn score(&self, histogram: &HueHistogram) -> f64 {
        self.distances
            .iter()
            .zip(histogram.weights())
            .map(|(&d, &w)| d as f64 * w)
            .sum()
    }
}

impl std::fmt::Display for HarmonicTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.name, self.alpha)
    }
}
