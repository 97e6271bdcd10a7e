//! Circular geometry over the discrete hue wheel.
//!
//! The wheel has [`HUE_LEVELS`] steps and wraps: hue 255 is one step away
//! from hue 0. This module is the only place that reduces values modulo 256.
//! Sector construction, sector centers and remap targets all go through
//! [`Hue::wrap`] or [`Hue::offset`].
//!
//! # Distance
//!
//! ```text
//!            0
//!        .-'''-.
//!   192 |       | 64        ring_distance(250, 4) = 10
//!        '-...-'            ring_distance(0, 128) = 128 (maximum)
//!           128
//! ```
//!
//! The checked free functions ([`ring_distance`], [`ring_distance_signed`],
//! [`contains`]) accept wide integers and fail with
//! [`Error::DomainRange`](crate::Error::DomainRange) on anything outside
//! `[0, 256)`. The [`Hue`] methods are infallible because a `Hue` can only
//! hold a valid value.

use crate::error::{Error, Result};
use crate::sector::Sector;

/// Number of discrete hue steps in one full turn of the wheel.
pub const HUE_LEVELS: u16 = 256;

/// Largest possible ring distance (half a turn).
pub const HALF_TURN: u16 = HUE_LEVELS / 2;

/// A position on the hue wheel, always in `[0, 256)`.
///
/// # Example
///
/// ```rust
/// use harmony_core::Hue;
///
/// let h = Hue::new(200).unwrap();
/// assert_eq!(h.offset(100).value(), 44);
/// assert!(Hue::new(256).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hue(u8);

impl Hue {
    /// Hue 0 (red in the 8-bit HSV encoding).
    pub const ZERO: Hue = Hue(0);

    /// Creates a hue from a raw value, rejecting anything `>= 256`.
    #[inline]
    pub fn new(value: u16) -> Result<Self> {
        if value >= HUE_LEVELS {
            return Err(Error::domain_range("hue", value as f64, "[0, 256)"));
        }
        Ok(Self(value as u8))
    }

    /// Creates a hue from a byte. Every byte is a valid hue.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        Self(value)
    }

    /// Reduces any integer onto the wheel.
    ///
    /// Negative values wrap backwards: `wrap(-1)` is hue 255.
    #[inline]
    pub const fn wrap(value: i32) -> Self {
        Self(value.rem_euclid(HUE_LEVELS as i32) as u8)
    }

    /// Returns the raw hue value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Moves along the wheel by `delta` steps (negative moves backwards).
    #[inline]
    pub const fn offset(self, delta: i32) -> Self {
        Self::wrap(self.0 as i32 + delta)
    }

    /// Shortest distance to `other` in either direction, in `[0, 128]`.
    #[inline]
    pub const fn distance(self, other: Hue) -> u8 {
        let d = (self.0 as i16 - other.0 as i16).unsigned_abs();
        let around = HUE_LEVELS - d;
        if d < around { d as u8 } else { around as u8 }
    }

    /// Signed steps to travel from `self` to `to` along the shorter arc.
    ///
    /// Positive values travel in increasing hue direction. The result is in
    /// `(-128, 128]`; when both arcs are equally long the positive direction
    /// is chosen, so the exactly-opposite hue yields `+128`.
    ///
    /// ```rust
    /// use harmony_core::Hue;
    ///
    /// assert_eq!(Hue::from_u8(250).signed_distance(Hue::from_u8(4)), 10);
    /// assert_eq!(Hue::from_u8(4).signed_distance(Hue::from_u8(250)), -10);
    /// assert_eq!(Hue::from_u8(0).signed_distance(Hue::from_u8(128)), 128);
    /// assert_eq!(Hue::from_u8(128).signed_distance(Hue::from_u8(0)), 128);
    /// ```
    #[inline]
    pub const fn signed_distance(self, to: Hue) -> i16 {
        let d = (to.0 as i16 - self.0 as i16).rem_euclid(HUE_LEVELS as i16);
        if d > HALF_TURN as i16 {
            d - HUE_LEVELS as i16
        } else {
            d
        }
    }

    /// Converts an angle in degrees to the nearest hue step.
    ///
    /// Any finite angle is accepted and wrapped; NaN and infinities are rejected.
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        if !degrees.is_finite() {
            return Err(Error::domain_range("angle", degrees, "finite degrees"));
        }
        let steps = (degrees / 360.0 * HUE_LEVELS as f64).round();
        Ok(Self::wrap(steps.rem_euclid(HUE_LEVELS as f64) as i32))
    }

    /// Returns the hue as an angle in `[0, 360)` degrees.
    #[inline]
    pub fn to_degrees(self) -> f64 {
        self.0 as f64 * 360.0 / HUE_LEVELS as f64
    }

    /// Iterates over every hue on the wheel in ascending order.
    pub fn all() -> impl Iterator<Item = Hue> + Clone {
        (0..=u8::MAX).map(Hue)
    }
}

impl From<u8> for Hue {
    #[inline]
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Hue> for u8 {
    #[inline]
    fn from(hue: Hue) -> Self {
        hue.0
    }
}

impl TryFrom<u16> for Hue {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Hue {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        if !(0..HUE_LEVELS as i32).contains(&value) {
            return Err(Error::domain_range("hue", value as f64, "[0, 256)"));
        }
        Ok(Self(value as u8))
    }
}

impl std::fmt::Display for Hue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Shortest circular distance between two raw hues, in `[0, 128]`.
///
/// # Errors
///
/// [`Error::DomainRange`] if either hue is `>= 256`.
///
/// ```rust
/// use harmony_core::ring::ring_distance;
///
/// assert_eq!(ring_distance(10, 20).unwrap(), 10);
/// assert_eq!(ring_distance(5, 250).unwrap(), 11);
/// assert!(ring_distance(5, 256).is_err());
/// ```
pub fn ring_distance(a: u16, b: u16) -> Result<u16> {
    Ok(Hue::new(a)?.distance(Hue::new(b)?) as u16)
}

/// Signed circular distance travelling from `a` to `b`.
///
/// See [`Hue::signed_distance`] for the sign convention.
///
/// # Errors
///
/// [`Error::DomainRange`] if either hue is `>= 256`.
pub fn ring_distance_signed(a: u16, b: u16) -> Result<i16> {
    Ok(Hue::new(a)?.signed_distance(Hue::new(b)?))
}

/// Returns `true` if raw hue `h` lies on `sector`'s arc.
///
/// # Errors
///
/// [`Error::DomainRange`] if `h >= 256`.
pub fn contains(sector: &Sector, h: u16) -> Result<bool> {
    Ok(sector.contains(Hue::new(h)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetric_and_bounded() {
        for a in Hue::all() {
            assert_eq!(a.distance(a), 0);
            for b in Hue::all() {
                let d = a.distance(b);
                assert_eq!(d, b.distance(a));
                assert!(d <= 128);
            }
        }
    }

    #[test]
    fn test_signed_matches_unsigned() {
        for a in Hue::all() {
            for b in Hue::all() {
                let s = a.signed_distance(b);
                assert!(s > -128 && s <= 128);
                assert_eq!(s.unsigned_abs() as u8, a.distance(b));
                assert_eq!(a.offset(s as i32), b);
            }
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(Hue::wrap(-1).value(), 255);
        assert_eq!(Hue::wrap(256).value(), 0);
        assert_eq!(Hue::wrap(-513).value(), 255);
        assert_eq!(Hue::from_u8(250).offset(10).value(), 4);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Hue::new(256).unwrap_err().is_domain_error());
        assert!(Hue::try_from(-1i32).is_err());
        assert!(Hue::try_from(300i32).is_err());
        assert!(ring_distance(0, 999).is_err());
        assert!(ring_distance_signed(1000, 0).is_err());
    }

    #[test]
    fn test_contains_raw_hue() {
        let s = Sector::new(250, 13).unwrap();
        assert!(contains(&s, 255).unwrap());
        assert!(contains(&s, 6).unwrap());
        assert!(!contains(&s, 7).unwrap());
        assert!(contains(&s, 256).unwrap_err().is_domain_error());
        assert!(contains(&Sector::new(0, 10).unwrap(), 999).is_err());
    }

    #[test]
    fn test_degrees() {
        assert_eq!(Hue::from_degrees(0.0).unwrap().value(), 0);
        assert_eq!(Hue::from_degrees(180.0).unwrap().value(), 128);
        assert_eq!(Hue::from_degrees(-90.0).unwrap().value(), 192);
        assert_eq!(Hue::from_degrees(720.0).unwrap().value(), 0);
        assert!(Hue::from_degrees(f64::NAN).is_err());
        approx::assert_relative_eq!(Hue::from_u8(64).to_degrees(), 90.0);
    }
}
