//! # harmony-core
//!
//! Core types for hue harmony analysis and recoloring.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`Hue`] and the [`ring`] functions - circular geometry over the 256-step hue wheel
//! - [`Sector`] - a contiguous arc of hues
//! - [`TemplateShape`] - the fixed catalog of seven harmonic templates
//! - [`HarmonicTemplate`] - a shape bound to a rotation, with a precomputed distance table
//! - [`HueHistogram`] - saturation-weighted hue distribution
//! - [`HsvImage`] - hue/saturation/value planes and 8-bit HSV conversion
//! - [`Rect`] - pixel regions for partial analysis
//!
//! ## Hue Wheel
//!
//! Hues are integers in `[0, 256)`. The wheel wraps, so hue 255 is adjacent to hue 0.
//! All modulo-256 arithmetic lives in [`ring`]; other modules go through [`Hue::wrap`]
//! and [`Hue::offset`] instead of reducing values themselves.
//!
//! ```rust
//! use harmony_core::{Hue, ring};
//!
//! let a = Hue::new(250).unwrap();
//! let b = Hue::new(4).unwrap();
//! assert_eq!(a.distance(b), 10);
//! assert_eq!(ring::ring_distance(250, 4).unwrap(), 10);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! harmony-core (this crate)
//!    ^
//!    |
//!    +-- harmony-ops (search, partition, remap, pipeline)
//!    +-- harmony-io (PNG/JPEG I/O)
//!    +-- harmony-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod histogram;
pub mod hsv;
pub mod rect;
pub mod ring;
pub mod sector;
pub mod shape;
pub mod template;

// Re-exports for convenience
pub use error::*;
pub use histogram::HueHistogram;
pub use hsv::{hsv_to_rgb, rgb_to_hsv, HsvImage};
pub use rect::Rect;
pub use ring::{Hue, HUE_LEVELS};
pub use sector::Sector;
pub use shape::TemplateShape;
pub use template::HarmonicTemplate;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use harmony_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::histogram::HueHistogram;
    pub use crate::hsv::HsvImage;
    pub use crate::rect::Rect;
    pub use crate::ring::{Hue, HUE_LEVELS};
    pub use crate::sector::Sector;
    pub use crate::shape::TemplateShape;
    pub use crate::template::HarmonicTemplate;
}
