//! 8-bit HSV conversion and hue/saturation/value planes.
//!
//! Hue uses the full byte range for one turn of the wheel (256 steps), so it
//! plugs directly into [`crate::ring`]:
//!
//! | Color   | Hue |
//! |---------|-----|
//! | Red     | 0   |
//! | Yellow  | 43  |
//! | Green   | 85  |
//! | Cyan    | 128 |
//! | Blue    | 171 |
//! | Magenta | 213 |
//!
//! Saturation and value are scaled to `[0, 255]`.
//!
//! # Usage
//!
//! ```rust
//! use harmony_core::HsvImage;
//!
//! // 2x1 image: red, blue
//! let rgb = [255, 0, 0, 0, 0, 255];
//! let hsv = HsvImage::from_rgb8(2, 1, 3, &rgb).unwrap();
//! assert_eq!(hsv.hue(), &[0, 171]);
//! assert_eq!(hsv.saturation(), &[255, 255]);
//! ```

use crate::error::{Error, Result};
use crate::histogram::HueHistogram;
use crate::rect::Rect;
use crate::ring::{Hue, HUE_LEVELS};
use rayon::prelude::*;

/// Converts an 8-bit RGB triple to `[hue, saturation, value]`.
///
/// Gray pixels (including black) get hue 0 and saturation 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return [0, 0, max];
    }

    let delta = (max - min) as f32;
    let s = (delta * 255.0 / max as f32).round() as u8;

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let h6 = if max == r {
        (gf - bf) / delta
    } else if max == g {
        (bf - rf) / delta + 2.0
    } else {
        (rf - gf) / delta + 4.0
    };
    let turns = (h6 / 6.0).rem_euclid(1.0);
    let h = Hue::wrap((turns * HUE_LEVELS as f32).round() as i32);

    [h.value(), s, max]
}

/// Converts an 8-bit `[hue, saturation, value]` triple back to RGB.
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
    if s == 0 {
        return [v, v, v];
    }

    let vf = v as f32 / 255.0;
    let sf = s as f32 / 255.0;
    let h6 = h as f32 / HUE_LEVELS as f32 * 6.0;

    let c = vf * sf;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let m = vf - c;

    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [to_u8(r + m), to_u8(g + m), to_u8(b + m)]
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue, saturation and value planes of an image, row-major.
///
/// # Invariants
///
/// All three planes have exactly `width * height` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvImage {
    width: u32,
    height: u32,
    hue: Vec<u8>,
    saturation: Vec<u8>,
    value: Vec<u8>,
}

impl HsvImage {
    /// Wraps existing planes.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] if the planes differ in length
    /// - [`Error::InvalidDimensions`] if the length is not `width * height`
    pub fn new(
        width: u32,
        height: u32,
        hue: Vec<u8>,
        saturation: Vec<u8>,
        value: Vec<u8>,
    ) -> Result<Self> {
        if hue.len() != saturation.len() || hue.len() != value.len() {
            return Err(Error::LengthMismatch {
                hue: hue.len(),
                saturation: saturation.len(),
                value: value.len(),
            });
        }
        let expected = pixel_count(width, height)?;
        if hue.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, hue.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            hue,
            saturation,
            value,
        })
    }

    /// Converts interleaved 8-bit RGB or RGBA data. Alpha is ignored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for channel counts other than 3 or 4, or
    /// a buffer whose length does not match the dimensions.
    pub fn from_rgb8(width: u32, height: u32, channels: u32, data: &[u8]) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("{channels} channels, expected 3 or 4"),
            ));
        }
        let pixels = pixel_count(width, height)?;
        if data.len() != pixels * channels as usize {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!(
                    "expected {} bytes, got {}",
                    pixels * channels as usize,
                    data.len()
                ),
            ));
        }

        let hsv: Vec<[u8; 3]> = data
            .par_chunks_exact(channels as usize)
            .map(|px| rgb_to_hsv(px[0], px[1], px[2]))
            .collect();

        let mut hue = Vec::with_capacity(pixels);
        let mut saturation = Vec::with_capacity(pixels);
        let mut value = Vec::with_capacity(pixels);
        for [h, s, v] in hsv {
            hue.push(h);
            saturation.push(s);
            value.push(v);
        }

        Ok(Self {
            width,
            height,
            hue,
            saturation,
            value,
        })
    }

    /// Converts back to interleaved 8-bit RGB.
    pub fn to_rgb8(&self) -> Vec<u8> {
        (0..self.len())
            .into_par_iter()
            .flat_map_iter(|i| hsv_to_rgb(self.hue[i], self.saturation[i], self.value[i]))
            .collect()
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.hue.len()
    }

    /// Returns `true` for a zero-sized image.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hue.is_empty()
    }

    /// Hue plane.
    #[inline]
    pub fn hue(&self) -> &[u8] {
        &self.hue
    }

    /// Saturation plane.
    #[inline]
    pub fn saturation(&self) -> &[u8] {
        &self.saturation
    }

    /// Value plane.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns a copy with the hue plane replaced; saturation and value are kept.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if `hue` has the wrong length.
    pub fn with_hue(&self, hue: Vec<u8>) -> Result<Self> {
        if hue.len() != self.len() {
            return Err(Error::LengthMismatch {
                hue: hue.len(),
                saturation: self.saturation.len(),
                value: self.value.len(),
            });
        }
        Ok(Self {
            hue,
            ..self.clone()
        })
    }

    /// Saturation-weighted hue histogram of every pixel.
    pub fn histogram(&self) -> HueHistogram {
        let mut hist = HueHistogram::new();
        for (&h, &s) in self.hue.iter().zip(&self.saturation) {
            hist.add_pixel(Hue::from_u8(h), s);
        }
        hist
    }

    /// Copies out a sub-region.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRegion`] if `rect` is empty or extends past the image.
    pub fn crop(&self, rect: Rect) -> Result<Self> {
        self.check_region(rect)?;
        let n = rect.area() as usize;
        let mut hue = Vec::with_capacity(n);
        let mut saturation = Vec::with_capacity(n);
        let mut value = Vec::with_capacity(n);
        for (x, y) in rect.iter_coords() {
            let i = self.index(x, y);
            hue.push(self.hue[i]);
            saturation.push(self.saturation[i]);
            value.push(self.value[i]);
        }
        Ok(Self {
            width: rect.width,
            height: rect.height,
            hue,
            saturation,
            value,
        })
    }

    /// Writes `src` into this image with its top-left corner at (x, y).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRegion`] if `src` does not fit at that position.
    pub fn paste(&mut self, x: u32, y: u32, src: &HsvImage) -> Result<()> {
        let rect = Rect::new(x, y, src.width, src.height);
        self.check_region(rect)?;
        for (j, (px, py)) in rect.iter_coords().enumerate() {
            let i = self.index(px, py);
            self.hue[i] = src.hue[j];
            self.saturation[i] = src.saturation[j];
            self.value[i] = src.value[j];
        }
        Ok(())
    }

    fn check_region(&self, rect: Rect) -> Result<()> {
        if rect.is_empty() || !rect.fits_within(self.width, self.height) {
            return Err(Error::invalid_region(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                self.width,
                self.height,
            ));
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [85, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [171, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 255), [128, 255, 255]);
        assert_eq!(rgb_to_hsv(90, 90, 90), [0, 0, 90]);
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_roundtrip_close() {
        let colors = [
            [255u8, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [255, 255, 0],
            [200, 100, 50],
            [12, 180, 240],
            [128, 128, 128],
        ];
        for [r, g, b] in colors {
            let [h, s, v] = rgb_to_hsv(r, g, b);
            let back = hsv_to_rgb(h, s, v);
            for (a, b) in [r, g, b].iter().zip(back) {
                assert!((*a as i16 - b as i16).abs() <= 4, "{:?} -> {:?}", [r, g, b], back);
            }
        }
    }

    #[test]
    fn test_new_validates() {
        assert!(HsvImage::new(2, 1, vec![0, 0], vec![0, 0], vec![0]).is_err());
        assert!(HsvImage::new(3, 1, vec![0, 0], vec![0, 0], vec![0, 0]).is_err());
        assert!(HsvImage::new(2, 1, vec![0, 0], vec![0, 0], vec![0, 0]).is_ok());
    }

    #[test]
    fn test_from_rgba_ignores_alpha() {
        let data = [255, 0, 0, 10, 0, 255, 0, 200];
        let hsv = HsvImage::from_rgb8(2, 1, 4, &data).unwrap();
        assert_eq!(hsv.hue(), &[0, 85]);
        assert_eq!(hsv.to_rgb8().len(), 6);
        assert!(HsvImage::from_rgb8(2, 1, 2, &data[..4]).is_err());
        assert!(HsvImage::from_rgb8(3, 1, 4, &data).is_err());
    }

    #[test]
    fn test_crop_and_paste() {
        let hue: Vec<u8> = (0..16).collect();
        let img = HsvImage::new(4, 4, hue, vec![100; 16], vec![200; 16]).unwrap();
        let sub = img.crop(Rect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(sub.hue(), &[5, 6, 9, 10]);

        let mut out = img.clone();
        let shifted = sub.with_hue(vec![50, 51, 52, 53]).unwrap();
        out.paste(1, 1, &shifted).unwrap();
        assert_eq!(out.hue()[5], 50);
        assert_eq!(out.hue()[10], 53);
        assert_eq!(out.hue()[0], 0);
        assert_eq!(out.saturation(), img.saturation());

        assert!(img.crop(Rect::new(3, 3, 2, 2)).is_err());
        assert!(img.crop(Rect::new(0, 0, 0, 2)).is_err());
    }

    #[test]
    fn test_histogram() {
        let img = HsvImage::new(2, 1, vec![3, 3], vec![128, 128], vec![1, 1]).unwrap();
        approx::assert_relative_eq!(img.histogram().weight(3).unwrap(), 1.0);
    }
}
