//! # harmony-io
//!
//! Image I/O for hue harmonization.
//!
//! Reads and writes 8-bit images and bridges them to the HSV planes the
//! harmonizer works on:
//!
//! - **PNG** - lossless, alpha preserved
//! - **JPEG** - lossy, quality setting, no alpha
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use harmony_io::{read, write};
//!
//! let image = read("input.png")?;
//! let hsv = image.to_hsv()?;
//! // ... recolor hsv ...
//! write("output.png", &image.with_hsv(&hsv)?)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};

use harmony_core::HsvImage;
use std::path::Path;
use tracing::trace;

/// Interleaved 8-bit pixels.
///
/// `channels` is 3 (RGB) or 4 (RGBA) for everything the readers produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Samples per pixel.
    pub channels: u32,
    /// Row-major interleaved samples.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Wraps raw 8-bit samples. Lengths are checked when the data is used.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Returns `true` if the image carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Converts the color channels to HSV planes. Alpha is ignored.
    pub fn to_hsv(&self) -> IoResult<HsvImage> {
        Ok(HsvImage::from_rgb8(
            self.width,
            self.height,
            self.channels,
            &self.data,
        )?)
    }

    /// Rebuilds the color channels from `hsv`, keeping this image's alpha.
    ///
    /// # Errors
    ///
    /// [`IoError::DimensionMismatch`] if `hsv` has a different size.
    pub fn with_hsv(&self, hsv: &HsvImage) -> IoResult<ImageData> {
        if hsv.width() != self.width || hsv.height() != self.height {
            return Err(IoError::DimensionMismatch {
                expected: format!("{}x{}", self.width, self.height),
                actual: format!("{}x{}", hsv.width(), hsv.height()),
            });
        }
        self.check_len()?;

        let rgb = hsv.to_rgb8();
        let data = if self.has_alpha() {
            rgb.chunks_exact(3)
                .zip(self.data.chunks_exact(4))
                .flat_map(|(c, src)| [c[0], c[1], c[2], src[3]])
                .collect()
        } else {
            rgb
        };

        Ok(ImageData::from_u8(self.width, self.height, self.channels, data))
    }

    pub(crate) fn check_len(&self) -> IoResult<()> {
        let expected = self.width as u64 * self.height as u64 * self.channels as u64;
        if self.data.len() as u64 != expected {
            return Err(IoError::DimensionMismatch {
                expected: format!("{} samples", expected),
                actual: format!("{} samples", self.data.len()),
            });
        }
        Ok(())
    }
}

/// Reads an image from a file, auto-detecting the format.
///
/// # Example
///
/// ```rust,ignore
/// use harmony_io::read;
///
/// let image = read("input.jpg")?;
/// println!("Size: {}x{}", image.width, image.height);
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    trace!(path = %path.display(), %format, "read");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(unsupported(path)),
    }
}

/// Writes an image to a file, choosing the format from the extension.
///
/// # Example
///
/// ```rust,ignore
/// use harmony_io::write;
///
/// write("output.png", &image)?;
/// ```
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    trace!(path = %path.display(), %format, "write");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_bridge_keeps_alpha() {
        let image = ImageData::from_u8(2, 1, 4, vec![255, 0, 0, 17, 0, 0, 255, 200]);
        let hsv = image.to_hsv().unwrap();
        assert_eq!(hsv.hue(), &[0, 171]);

        let back = image.with_hsv(&hsv).unwrap();
        assert_eq!(back.channels, 4);
        assert_eq!(back.data[3], 17);
        assert_eq!(back.data[7], 200);
        assert_eq!(&back.data[0..3], &[255, 0, 0]);
    }

    #[test]
    fn test_with_hsv_size_mismatch() {
        let image = ImageData::from_u8(2, 1, 3, vec![0; 6]);
        let other = ImageData::from_u8(1, 1, 3, vec![0; 3]).to_hsv().unwrap();
        assert!(matches!(
            image.with_hsv(&other),
            Err(IoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_bad_channel_count() {
        let image = ImageData::from_u8(1, 1, 2, vec![0; 2]);
        assert!(matches!(image.to_hsv(), Err(IoError::Core(_))));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = ImageData::from_u8(1, 1, 3, vec![0; 3]);
        assert!(matches!(
            write(dir.path().join("out.exr"), &image),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
