//! Assigns every pixel hue to its nearest template sector.
//!
//! The nearest sector depends only on the hue, so a 256-entry lookup is built
//! from the template first and each pixel is then a single table read.

use harmony_core::{HarmonicTemplate, Hue, HUE_LEVELS};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sector assignment for a sequence of hues.
///
/// `sectors()[i]` is the index (in template order) of the sector nearest to
/// input hue `i`. A template has at most 256 sectors, so indices fit a byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    sectors: Vec<u8>,
    max_distance: u8,
}

impl Partition {
    /// Sector index per input hue.
    #[inline]
    pub fn sectors(&self) -> &[u8] {
        &self.sectors
    }

    /// Largest hue-to-sector distance seen. Diagnostic only.
    #[inline]
    pub fn max_distance(&self) -> u8 {
        self.max_distance
    }

    /// Number of assigned hues.
    #[inline]
    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    /// Returns `true` if no hues were assigned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

/// Assigns each hue to the nearest sector of `template`.
///
/// A hue inside a sector has distance 0 to it. Equidistant sectors resolve to
/// the earlier one in template order.
///
/// # Example
///
/// ```rust
/// use harmony_core::{HarmonicTemplate, Hue, TemplateShape};
/// use harmony_ops::partition::partition;
///
/// let t = HarmonicTemplate::new(TemplateShape::UpperI, Hue::ZERO).unwrap();
/// let p = partition(&[5, 130, 100], &t);
/// assert_eq!(p.sectors(), &[0, 1, 1]);
/// assert_eq!(p.max_distance(), 28);
/// ```
pub fn partition(hues: &[u8], template: &HarmonicTemplate) -> Partition {
    let mut lookup = [(0u8, 0u8); HUE_LEVELS as usize];
    for h in Hue::all() {
        let (index, distance) = template.nearest_sector(h);
        lookup[h.value() as usize] = (index as u8, distance);
    }

    #[cfg(feature = "parallel")]
    let (sectors, max_distance) = (
        hues.par_iter()
            .map(|&h| lookup[h as usize].0)
            .collect::<Vec<u8>>(),
        hues.par_iter()
            .map(|&h| lookup[h as usize].1)
            .max()
            .unwrap_or(0),
    );
    #[cfg(not(feature = "parallel"))]
    let (sectors, max_distance) = (
        hues.iter()
            .map(|&h| lookup[h as usize].0)
            .collect::<Vec<u8>>(),
        hues.iter()
            .map(|&h| lookup[h as usize].1)
            .max()
            .unwrap_or(0),
    );

    Partition {
        sectors,
        max_distance,
    }
}
