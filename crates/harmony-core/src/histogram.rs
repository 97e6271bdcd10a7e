//! Saturation-weighted hue histograms.
//!
//! Each pixel adds `saturation / 256` to the bin of its hue, so strongly
//! saturated pixels dominate the template fit and near-gray pixels (whose hue
//! is mostly noise) barely count.

use crate::error::{Error, Result};
use crate::ring::{Hue, HUE_LEVELS};

/// Per-hue accumulated weight.
///
/// # Example
///
/// ```rust
/// use harmony_core::HueHistogram;
///
/// let hist = HueHistogram::from_pixels(&[10, 10, 200], &[255, 128, 0]).unwrap();
/// assert!((hist.weight(10).unwrap() - (255.0 + 128.0) / 256.0).abs() < 1e-12);
/// assert_eq!(hist.weight(200).unwrap(), 0.0);
/// assert!(hist.weight(256).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HueHistogram {
    bins: [f64; HUE_LEVELS as usize],
}

impl Default for HueHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl HueHistogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self {
            bins: [0.0; HUE_LEVELS as usize],
        }
    }

    /// Builds a histogram from index-aligned hue and saturation planes.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the slices differ in length.
    pub fn from_pixels(hues: &[u8], saturations: &[u8]) -> Result<Self> {
        if hues.len() != saturations.len() {
            return Err(Error::LengthMismatch {
                hue: hues.len(),
                saturation: saturations.len(),
                value: hues.len(),
            });
        }
        let mut hist = Self::new();
        for (&h, &s) in hues.iter().zip(saturations) {
            hist.bins[h as usize] += s as f64 / HUE_LEVELS as f64;
        }
        Ok(hist)
    }

    /// Adds `weight` to the bin of raw hue `hue`.
    ///
    /// # Errors
    ///
    /// [`Error::DomainRange`] if `hue >= 256` or `weight` is negative or not finite.
    pub fn add(&mut self, hue: u16, weight: f64) -> Result<()> {
        let h = Hue::new(hue)?;
        check_weight(weight)?;
        self.bins[h.value() as usize] += weight;
        Ok(())
    }

    /// Adds one pixel with the given saturation.
    #[inline]
    pub fn add_pixel(&mut self, hue: Hue, saturation: u8) {
        self.bins[hue.value() as usize] += saturation as f64 / HUE_LEVELS as f64;
    }

    /// Weight accumulated at raw hue `hue`.
    ///
    /// # Errors
    ///
    /// [`Error::DomainRange`] if `hue >= 256`.
    #[inline]
    pub fn weight(&self, hue: u16) -> Result<f64> {
        Ok(self.bins[Hue::new(hue)?.value() as usize])
    }

    /// All 256 weights in hue order.
    #[inline]
    pub fn weights(&self) -> &[f64; HUE_LEVELS as usize] {
        &self.bins
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Hue with the largest weight (lowest hue on ties).
    pub fn peak(&self) -> Hue {
        let mut best = 0usize;
        for (i, &w) in self.bins.iter().enumerate() {
            if w > self.bins[best] {
                best = i;
            }
        }
        Hue::from_u8(best as u8)
    }

    /// Checks that the histogram can be scored.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateHistogram`] if any bin is negative or not finite, or
    /// every bin is zero.
    pub fn validate(&self) -> Result<()> {
        if let Some((hue, w)) = self
            .bins
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(Error::degenerate_histogram(format!(
                "weight {w} at hue {hue} is not a non-negative number"
            )));
        }
        if self.bins.iter().all(|&w| w == 0.0) {
            return Err(Error::degenerate_histogram("all weights are zero"));
        }
        Ok(())
    }
}

fn check_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::domain_range("weight", weight, "[0, inf)"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_saturation_weighting() {
        let hues = [0u8, 0, 128, 255];
        let sats = [128u8, 64, 255, 0];
        let hist = HueHistogram::from_pixels(&hues, &sats).unwrap();
        assert_relative_eq!(hist.weight(0).unwrap(), 0.75);
        assert_relative_eq!(hist.weight(128).unwrap(), 255.0 / 256.0);
        assert_eq!(hist.weight(255).unwrap(), 0.0);
        assert_eq!(hist.peak().value(), 128);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(HueHistogram::from_pixels(&[1, 2], &[3]).is_err());
    }

    #[test]
    fn test_weight_rejects_out_of_range() {
        let mut hist = HueHistogram::new();
        hist.add(255, 2.0).unwrap();
        assert_relative_eq!(hist.weight(255).unwrap(), 2.0);
        assert!(hist.weight(256).unwrap_err().is_domain_error());
        assert!(hist.weight(u16::MAX).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut hist = HueHistogram::new();
        assert!(hist.add(256, 1.0).unwrap_err().is_domain_error());
        assert!(hist.add(3, -0.1).unwrap_err().is_domain_error());
        assert!(hist.add(3, f64::NAN).is_err());
        hist.add(3, 0.5).unwrap();
        assert_relative_eq!(hist.total(), 0.5);
    }

    #[test]
    fn test_validate() {
        assert!(HueHistogram::new().validate().unwrap_err().is_degenerate());

        let mut hist = HueHistogram::new();
        hist.add(7, 1.0).unwrap();
        assert!(hist.validate().is_ok());
        assert!(hist.add(9, -1.0).is_err());
        assert!(hist.validate().is_ok());
    }
}
