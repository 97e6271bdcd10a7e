//! Pixel rectangles for region-restricted analysis.
//!
//! A region limits both the histogram (which pixels vote for a template) and
//! the recoloring (which pixels get new hues). Pixels outside the region are
//! left untouched.
//!
//! # Coordinate System
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use harmony_core::Rect;
//!
//! let rect: Rect = "10,20,100,50".parse().unwrap();
//! assert_eq!(rect.right(), 110);
//! assert!(rect.contains(15, 25));
//! assert!(rect.fits_within(200, 100));
//! ```

use crate::error::Error;
use std::str::FromStr;

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// Left/top edges are inclusive, right/bottom edges exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns `true` if the rectangle lies entirely inside a
    /// `width x height` image.
    #[inline]
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        match (self.x.checked_add(self.width), self.y.checked_add(self.height)) {
            (Some(r), Some(b)) => r <= width && b <= height,
            _ => false,
        }
    }

    /// Iterates over all (x, y) coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Rect {
    type Err = Error;

    /// Parses `x,y,w,h`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|e| Error::invalid_dimensions(0, 0, format!("bad region '{s}': {e}")))?;
        match parts.as_slice() {
            &[x, y, w, h] => Ok(Self::new(x, y, w, h)),
            _ => Err(Error::invalid_dimensions(
                0,
                0,
                format!("region '{s}' must be x,y,w,h"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(10, 10, 100, 100);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(109, 109));
        assert!(!rect.contains(110, 110));
    }

    #[test]
    fn test_fits_within() {
        assert!(Rect::new(0, 0, 4, 4).fits_within(4, 4));
        assert!(!Rect::new(1, 0, 4, 4).fits_within(4, 4));
        assert!(!Rect::new(u32::MAX, 0, 2, 1).fits_within(4, 4));
    }

    #[test]
    fn test_iter_coords() {
        let rect = Rect::new(0, 0, 2, 2);
        let coords: Vec<_> = rect.iter_coords().collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("1, 2, 3, 4".parse::<Rect>().unwrap(), Rect::new(1, 2, 3, 4));
        assert!("1,2,3".parse::<Rect>().is_err());
        assert!("a,b,c,d".parse::<Rect>().is_err());
    }
}
