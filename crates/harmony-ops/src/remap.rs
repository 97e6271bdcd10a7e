//! Smooth hue remapping toward sector centers.
//!
//! For a hue `h` assigned to sector `s` with center `c` and width `w`:
//!
//! ```text
//! d  = signed distance from c to h
//! n  = d / (w / 2)
//! G  = 2 * Phi(n) - 1          (Phi: standard normal CDF, G in (-1, 1))
//! h' = c + round((w / 2) * G)  (on the wheel)
//! ```
//!
//! A hue at the center stays put, hues just inside a boundary move a little,
//! and far outliers land near the edge of the sector on the side they came
//! from. The mapping is continuous in `d`, so neighbouring hues never jump
//! apart. Targets are clamped to the sector's own span. A hue exactly
//! opposite the center takes the side of the nearer sector boundary.
//!
//! All targets are precomputed into a dense (sector x 256) table; applying
//! the remap is one lookup per pixel.

use crate::partition::Partition;
use crate::{OpsError, OpsResult};
use harmony_core::{HarmonicTemplate, Hue, Sector, HUE_LEVELS};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Abramowitz & Stegun 7.1.26, |error| < 1.5e-7
const ERF_P: f64 = 0.327_591_1;
const ERF_A: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Error function.
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ERF_A.iter().rev().fold(0.0, |acc, &a| acc * t + a) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal cumulative distribution function.
///
/// ```rust
/// use harmony_ops::remap::normal_cdf;
///
/// assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
/// assert!((normal_cdf(1.0) - 0.841_344_7).abs() < 1e-6);
/// ```
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Target hue for `h` when pulled into `sector`.
///
/// ```rust
/// use harmony_core::{Hue, Sector};
/// use harmony_ops::remap::remap_target;
///
/// let s = Sector::new(0, 13).unwrap(); // center 6
/// assert_eq!(remap_target(&s, Hue::from_u8(6)).value(), 6);
/// assert_eq!(remap_target(&s, Hue::from_u8(7)).value(), 7);
/// assert_eq!(remap_target(&s, Hue::from_u8(40)).value(), 12);
/// assert_eq!(remap_target(&s, Hue::from_u8(230)).value(), 0);
/// ```
pub fn remap_target(sector: &Sector, h: Hue) -> Hue {
    let center = sector.center();
    let half = sector.half_width();
    let mut d = center.signed_distance(h);
    // Exactly opposite the center: leave through the nearer boundary.
    if d == HALF_TURN && h.distance(sector.start()) < h.distance(sector.end()) {
        d = -HALF_TURN;
    }
    let d = d as f64;
    let g = 2.0 * normal_cdf(d / half) - 1.0;

    // Sector spans center - size/2 ..= center + (size - 1 - size/2).
    let below = (sector.width() / 2) as i32;
    let above = sector.width() as i32 - 1 - below;
    let shift = ((half * g).round() as i32).clamp(-below, above);

    center.offset(shift)
}

const HALF_TURN: i16 = (HUE_LEVELS / 2) as i16;

/// Precomputed remap targets for every (sector, hue) pair of one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    sector_count: usize,
    targets: Vec<u8>,
}

impl RemapTable {
    /// Builds the table for `template`.
    pub fn new(template: &HarmonicTemplate) -> Self {
        let sectors = template.sectors();
        let levels = HUE_LEVELS as usize;
        let target = |i: usize| {
            remap_target(&sectors[i / levels], Hue::from_u8((i % levels) as u8)).value()
        };

        #[cfg(feature = "parallel")]
        let targets = (0..sectors.len() * levels).into_par_iter().map(target).collect();
        #[cfg(not(feature = "parallel"))]
        let targets = (0..sectors.len() * levels).map(target).collect();

        Self {
            sector_count: sectors.len(),
            targets,
        }
    }

    /// Number of sectors (table rows).
    #[inline]
    pub fn sector_count(&self) -> usize {
        self.sector_count
    }

    /// Target hue for `h` assigned to `sector`.
    ///
    /// # Panics
    ///
    /// If `sector >= self.sector_count()`.
    #[inline]
    pub fn target(&self, sector: usize, h: Hue) -> Hue {
        Hue::from_u8(self.targets[sector * HUE_LEVELS as usize + h.value() as usize])
    }

    /// Remaps each hue using its assigned sector.
    ///
    /// # Errors
    ///
    /// - [`OpsError::SizeMismatch`] if `partition` was built for a different number of hues
    /// - [`OpsError::InvalidParameter`] if the partition references a sector this table lacks
    pub fn apply(&self, hues: &[u8], partition: &Partition) -> OpsResult<Vec<u8>> {
        if hues.len() != partition.len() {
            return Err(OpsError::SizeMismatch(format!(
                "{} hues but {} sector assignments",
                hues.len(),
                partition.len()
            )));
        }
        if let Some(&bad) = partition
            .sectors()
            .iter()
            .find(|&&s| s as usize >= self.sector_count)
        {
            return Err(OpsError::InvalidParameter(format!(
                "sector {} out of range for a {}-sector table",
                bad, self.sector_count
            )));
        }

        let lookup = |(&h, &s): (&u8, &u8)| self.target(s as usize, Hue::from_u8(h)).value();

        #[cfg(feature = "parallel")]
        let out = hues.par_iter().zip(partition.sectors()).map(lookup).collect();
        #[cfg(not(feature = "parallel"))]
        let out = hues.iter().zip(partition.sectors()).map(lookup).collect();

        Ok(out)
    }
}
