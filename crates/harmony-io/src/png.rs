//! PNG format support.
//!
//! Palette and low-bit images are expanded on decode, 16-bit samples keep
//! their high byte, and grayscale is widened to RGB. Output is always 8-bit
//! RGB or RGBA.
//!
//! # Example
//!
//! ```rust,ignore
//! use harmony_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{ImageData, IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let raw = &buf[..info.buffer_size()];

    let samples = match info.bit_depth {
        png::BitDepth::Eight => raw.to_vec(),
        png::BitDepth::Sixteen => high_bytes(raw),
        depth => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, depth
            )));
        }
    };

    let (channels, data) = match info.color_type {
        png::ColorType::Rgb => (3, samples),
        png::ColorType::Rgba => (4, samples),
        png::ColorType::Grayscale => (3, samples.iter().flat_map(|&g| [g, g, g]).collect()),
        png::ColorType::GrayscaleAlpha => (
            4,
            samples
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
        ),
        color_type => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, info.bit_depth
            )));
        }
    };

    debug!(width = info.width, height = info.height, channels, "decoded PNG");
    Ok(ImageData::from_u8(info.width, info.height, channels, data))
}

/// Writes an 8-bit RGB or RGBA image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    image.check_len()?;
    let color_type = match image.channels {
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let file = File::create(path.as_ref())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .write_image_data(&image.data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(width = image.width, height = image.height, "encoded PNG");
    Ok(())
}

/// Keeps the most significant byte of each big-endian 16-bit sample.
fn high_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.chunks_exact(2).map(|chunk| chunk[0]).collect()
}
