//! Hue sectors: contiguous arcs on the hue wheel.
//!
//! A sector is described by its first hue and its size. Its last hue is
//! `start + size - 1` on the wheel, so a sector may cross hue 0:
//!
//! ```text
//! start = 250, size = 13
//!
//!   250 251 ... 255 | 0 1 ... 6
//!   ^start                    ^end
//! ```

use crate::error::{Error, Result};
use crate::ring::{Hue, HUE_LEVELS};

/// A contiguous arc of hues.
///
/// # Invariants
///
/// - `1 <= size <= 256`
/// - exactly `size` hues satisfy [`Sector::contains`]
///
/// # Example
///
/// ```rust
/// use harmony_core::{Hue, Sector};
///
/// let s = Sector::new(250, 13).unwrap();
/// assert_eq!(s.end().value(), 6);
/// assert_eq!(s.center().value(), 0);
/// assert!(s.contains(Hue::from_u8(3)));
/// assert!(!s.contains(Hue::from_u8(7)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sector {
    start: Hue,
    size: u16,
}

impl Sector {
    /// Creates a sector from a raw start hue and size.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSector`] if `start >= 256` or `size` is outside `1..=256`.
    pub fn new(start: u16, size: u16) -> Result<Self> {
        if start >= HUE_LEVELS || size == 0 || size > HUE_LEVELS {
            return Err(Error::InvalidSector { start, size });
        }
        Ok(Self {
            start: Hue::from_u8(start as u8),
            size,
        })
    }

    /// Creates a sector starting at an already-validated hue.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSector`] if `size` is outside `1..=256`.
    pub fn at(start: Hue, size: u16) -> Result<Self> {
        Self::new(start.value() as u16, size)
    }

    /// First hue of the arc.
    #[inline]
    pub const fn start(&self) -> Hue {
        self.start
    }

    /// Last hue of the arc (inclusive).
    #[inline]
    pub const fn end(&self) -> Hue {
        self.start.offset(self.size as i32 - 1)
    }

    /// Middle hue, `start + size / 2` (integer halving).
    #[inline]
    pub const fn center(&self) -> Hue {
        self.start.offset((self.size / 2) as i32)
    }

    /// Number of hues covered.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.size
    }

    /// Half the width as a real number, used to normalize remap offsets.
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.size as f64 / 2.0
    }

    /// Returns `true` if `h` lies on the arc from `start` to `end`.
    ///
    /// When the arc crosses hue 0 (`start > end`) the test becomes
    /// `h >= start || h <= end`.
    #[inline]
    pub const fn contains(&self, h: Hue) -> bool {
        let start = self.start.value();
        let end = self.end().value();
        let h = h.value();
        if start <= end {
            h >= start && h <= end
        } else {
            h >= start || h <= end
        }
    }

    /// Distance from `h` to this sector: 0 inside, otherwise the distance to
    /// the nearer boundary.
    #[inline]
    pub const fn distance(&self, h: Hue) -> u8 {
        if self.contains(h) {
            return 0;
        }
        let to_start = h.distance(self.start);
        let to_end = h.distance(self.end());
        if to_start < to_end { to_start } else { to_end }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..={}] (w={})", self.start, self.end(), self.size)
    }
}
