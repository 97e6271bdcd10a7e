//! JPEG format support.
//!
//! Decoding yields 8-bit RGB (grayscale and CMYK are converted). Encoding
//! drops alpha, since JPEG cannot carry it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use harmony_io::jpeg;
//!
//! let image = jpeg::read("photo.jpg")?;
//! jpeg::write("output.jpg", &image)?;
//! ```
//!
//! With quality control:
//! ```rust,ignore
//! use harmony_io::jpeg::{JpegWriter, JpegWriterOptions};
//!
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 95 });
//! writer.write("highq.jpg", &image)?;
//! ```

use crate::{ImageData, IoError, IoResult};
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::debug;

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    /// Default: 90.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// JPEG file reader.
#[derive(Debug, Clone, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Reads a JPEG file from disk.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<ImageData> {
        let file = std::fs::File::open(path.as_ref())?;
        self.read_impl(file)
    }

    /// Reads a JPEG from a byte slice.
    pub fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        self.read_impl(Cursor::new(data))
    }

    fn read_impl<R: std::io::Read>(&self, reader: R) -> IoResult<ImageData> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let data: Vec<u8> = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels,
            jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            jpeg_decoder::PixelFormat::L16 => pixels
                .chunks_exact(2)
                .flat_map(|l16| [l16[0], l16[0], l16[0]])
                .collect(),
            jpeg_decoder::PixelFormat::CMYK32 => pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 1.0 - cmyk[3] as f32 / 255.0;
                    let channel = |c: u8| ((1.0 - c as f32 / 255.0) * k * 255.0) as u8;
                    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
                })
                .collect(),
        };

        debug!(width, height, format = ?info.pixel_format, "decoded JPEG");
        Ok(ImageData::from_u8(width, height, 3, data))
    }
}

/// JPEG file writer.
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a new writer with default options (quality 90).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with custom options.
    pub fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }

    /// Writes a JPEG file to disk.
    pub fn write<P: AsRef<Path>>(&self, path: P, image: &ImageData) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }

    /// Encodes a JPEG into a byte vector.
    pub fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        image.check_len()?;
        if !(1..=100).contains(&self.options.quality) {
            return Err(IoError::EncodeError(format!(
                "quality {} outside 1..=100",
                self.options.quality
            )));
        }
        let (width, height) = match (u16::try_from(image.width), u16::try_from(image.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(IoError::EncodeError(format!(
                    "{}x{} exceeds the JPEG size limit",
                    image.width, image.height
                )));
            }
        };

        let rgb: Vec<u8> = match image.channels {
            3 => image.data.clone(),
            4 => image
                .data
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect(),
            n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
        };

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, self.options.quality);
        encoder
            .encode(&rgb, width, height, ColorType::Rgb)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        debug!(width, height, quality = self.options.quality, "encoded JPEG");
        Ok(buffer)
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    JpegReader::new().read(path)
}

/// Writes a JPEG file with default options (quality 90).
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    JpegWriter::new().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> ImageData {
        let (width, height) = (32u32, 32u32);
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 128]);
            }
        }
        ImageData::from_u8(width, height, 3, data)
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.jpg");

        write(&path, &gradient()).expect("Write failed");
        let loaded = read(&path).expect("Read failed");

        assert_eq!(loaded.width, 32);
        assert_eq!(loaded.height, 32);
        assert_eq!(loaded.channels, 3);
    }

    #[test]
    fn test_quality_options() {
        let image = gradient();
        let low = JpegWriter::with_options(JpegWriterOptions { quality: 20 })
            .write_to_memory(&image)
            .unwrap();
        let high = JpegWriter::with_options(JpegWriterOptions { quality: 100 })
            .write_to_memory(&image)
            .unwrap();
        assert!(high.len() >= low.len());

        let zero = JpegWriter::with_options(JpegWriterOptions { quality: 0 });
        assert!(zero.write_to_memory(&image).is_err());
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let image = ImageData::from_u8(8, 8, 4, vec![90; 8 * 8 * 4]);
        let bytes = JpegWriter::new().write_to_memory(&image).unwrap();
        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.channels, 3);
        assert_eq!(loaded.data.len(), 8 * 8 * 3);
    }
}
