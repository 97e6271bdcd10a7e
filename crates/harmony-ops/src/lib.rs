//! # harmony-ops
//!
//! Hue harmonization operations.
//!
//! Given the hue and saturation planes of an image, this crate finds the
//! harmonic template that best fits the image's hue distribution and pulls
//! every hue toward the nearest sector of that template.
//!
//! # Modules
//!
//! - [`search`] - Brute-force template search over all shapes and rotations
//! - [`partition`] - Nearest-sector assignment per pixel
//! - [`remap`] - Gaussian-CDF hue remapping inside a sector
//! - [`harmonize`] - The full pipeline, optionally restricted to a region
//!
//! # Example
//!
//! ```rust
//! use harmony_core::HsvImage;
//! use harmony_ops::harmonize::{harmonize, HarmonizeOptions};
//!
//! let image = HsvImage::new(
//!     3, 1,
//!     vec![10, 20, 140],
//!     vec![255, 200, 120],
//!     vec![255, 255, 255],
//! ).unwrap();
//!
//! let result = harmonize(&image, &HarmonizeOptions::new()).unwrap();
//! println!("{} scored {}", result.report.template, result.report.score);
//! ```
//!
//! # Common Operations
//!
//! ## Search only
//!
//! ```rust,ignore
//! use harmony_ops::search::search;
//!
//! let outcome = search(&image.histogram())?;
//! for s in &outcome.per_shape {
//!     println!("{}: alpha {} score {}", s.shape, s.alpha, s.score);
//! }
//! ```
//!
//! ## Fixed template
//!
//! ```rust,ignore
//! use harmony_ops::harmonize::{harmonize, HarmonizeOptions};
//!
//! let options = HarmonizeOptions::fixed(TemplateShape::V, Hue::from_u8(30));
//! let result = harmonize(&image, &options)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod harmonize;
pub mod partition;
pub mod remap;
pub mod search;

pub use error::{OpsError, OpsResult};
pub use harmonize::{HarmonizeOptions, HarmonizeReport, Harmonized, TemplateChoice};
pub use partition::Partition;
pub use remap::RemapTable;
pub use search::{SearchOutcome, ShapeScore};
