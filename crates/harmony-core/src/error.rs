//! Error types for harmony-core operations.
//!
//! Every error here is a precondition violation detected at an entry point.
//! Nothing is clamped or repaired: a hue of 300 or a negative weight is
//! rejected, and the caller decides whether to abort or fall back to a
//! caller-specified template.
//!
//! # Usage
//!
//! ```rust
//! use harmony_core::{Error, Result};
//!
//! fn check_hue(value: u16) -> Result<u8> {
//!     if value >= 256 {
//!         return Err(Error::domain_range("hue", value as f64, "[0, 256)"));
//!     }
//!     Ok(value as u8)
//! }
//!
//! assert!(check_hue(12).is_ok());
//! assert!(check_hue(256).unwrap_err().is_domain_error());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by ring geometry, templates, histograms and HSV buffers.
///
/// # Categories
///
/// - **Domain errors**: [`DomainRange`](Error::DomainRange)
/// - **Degenerate inputs**: [`DegenerateTemplate`](Error::DegenerateTemplate),
///   [`DegenerateHistogram`](Error::DegenerateHistogram)
/// - **Construction errors**: [`InvalidSector`](Error::InvalidSector),
///   [`InvalidTemplate`](Error::InvalidTemplate), [`UnknownShape`](Error::UnknownShape)
/// - **Buffer errors**: [`LengthMismatch`](Error::LengthMismatch),
///   [`InvalidRegion`](Error::InvalidRegion), [`InvalidDimensions`](Error::InvalidDimensions)
#[derive(Debug, Error)]
pub enum Error {
    /// A hue or weight lies outside its valid range.
    ///
    /// Hues must be in `[0, 256)`; weights must be finite and non-negative.
    ///
    /// # Example
    ///
    /// ```rust
    /// use harmony_core::Error;
    ///
    /// let err = Error::domain_range("hue", 300.0, "[0, 256)");
    /// assert!(err.to_string().contains("300"));
    /// ```
    #[error("{quantity} {value} outside valid range {range}")]
    DomainRange {
        /// What was being validated ("hue", "weight", ...)
        quantity: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable valid range
        range: &'static str,
    },

    /// A template's distance table sums to zero.
    ///
    /// A template whose sectors cover the whole wheel scores every
    /// histogram as zero and cannot discriminate between images.
    #[error("template '{name}' at alpha {alpha} covers the whole hue wheel")]
    DegenerateTemplate {
        /// Template name
        name: String,
        /// Rotation offset
        alpha: u8,
    },

    /// A histogram is all-zero or carries a negative weight.
    #[error("degenerate histogram: {0}")]
    DegenerateHistogram(String),

    /// A sector has an out-of-range start or size.
    #[error("invalid sector (start {start}, size {size}): need size in 1..=256, start < 256")]
    InvalidSector {
        /// Requested start hue
        start: u16,
        /// Requested size
        size: u16,
    },

    /// Template parts are inconsistent (no sectors, size/offset count mismatch).
    #[error("invalid template '{name}': {reason}")]
    InvalidTemplate {
        /// Template name
        name: String,
        /// Why construction was rejected
        reason: String,
    },

    /// A template name does not match any catalog shape.
    #[error("unknown template shape '{0}' (expected one of i, V, L, I, T, Y, X)")]
    UnknownShape(String),

    /// Hue, saturation and value planes have different lengths.
    #[error("plane length mismatch: hue {hue}, saturation {saturation}, value {value}")]
    LengthMismatch {
        /// Hue plane length
        hue: usize,
        /// Saturation plane length
        saturation: usize,
        /// Value plane length
        value: usize,
    },

    /// Region of interest extends beyond image bounds.
    #[error("region ({rx}, {ry}, {rw}x{rh}) exceeds image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: u32,
        /// Region Y origin
        ry: u32,
        /// Region width
        rw: u32,
        /// Region height
        rh: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions or channel layout.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::DomainRange`] error.
    #[inline]
    pub fn domain_range(quantity: &'static str, value: f64, range: &'static str) -> Self {
        Self::DomainRange {
            quantity,
            value,
            range,
        }
    }

    /// Creates an [`Error::DegenerateHistogram`] error.
    #[inline]
    pub fn degenerate_histogram(reason: impl Into<String>) -> Self {
        Self::DegenerateHistogram(reason.into())
    }

    /// Creates an [`Error::InvalidTemplate`] error.
    #[inline]
    pub fn invalid_template(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(rx: u32, ry: u32, rw: u32, rh: u32, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            rx,
            ry,
            rw,
            rh,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a range violation on a hue or weight.
    #[inline]
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::DomainRange { .. })
    }

    /// Returns `true` if a template or histogram was rejected as degenerate.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::DegenerateTemplate { .. } | Self::DegenerateHistogram(_)
        )
    }
}
