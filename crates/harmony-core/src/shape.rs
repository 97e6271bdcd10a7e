//! The catalog of harmonic template shapes.
//!
//! Sizes and offsets are in 256ths of the wheel. Offsets are relative to the
//! template rotation `alpha`, so sector `k` of a template starts at
//! `alpha + offsets[k]`.
//!
//! | Shape | Sizes      | Offsets    |
//! |-------|------------|------------|
//! | `i`   | `[13]`     | `[0]`      |
//! | `V`   | `[67]`     | `[0]`      |
//! | `L`   | `[57, 13]` | `[0, 86]`  |
//! | `I`   | `[13, 13]` | `[0, 128]` |
//! | `T`   | `[128]`    | `[0]`      |
//! | `Y`   | `[67, 13]` | `[0, 174]` |
//! | `X`   | `[67, 67]` | `[0, 128]` |

use crate::error::Error;
use std::str::FromStr;

/// One of the seven canonical harmonic template shapes.
///
/// Declaration order is catalog order, which is also the tie-break order
/// during template search.
///
/// # Example
///
/// ```rust
/// use harmony_core::TemplateShape;
///
/// let shape: TemplateShape = "Y".parse().unwrap();
/// assert_eq!(shape.sizes(), &[67, 13]);
/// assert_eq!(shape.offsets(), &[0, 174]);
/// assert_eq!(shape.name(), "Y");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateShape {
    /// `i`: one narrow sector.
    LowerI,
    /// `V`: one wide sector.
    V,
    /// `L`: a wide and a narrow sector a quarter turn apart.
    L,
    /// `I`: two narrow opposite sectors.
    UpperI,
    /// `T`: half of the wheel.
    T,
    /// `Y`: a wide sector with a narrow one roughly opposite.
    Y,
    /// `X`: two wide opposite sectors.
    X,
}

impl TemplateShape {
    /// All shapes in catalog order.
    pub const ALL: [TemplateShape; 7] = [
        TemplateShape::LowerI,
        TemplateShape::V,
        TemplateShape::L,
        TemplateShape::UpperI,
        TemplateShape::T,
        TemplateShape::Y,
        TemplateShape::X,
    ];

    /// Single-letter catalog name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LowerI => "i",
            Self::V => "V",
            Self::L => "L",
            Self::UpperI => "I",
            Self::T => "T",
            Self::Y => "Y",
            Self::X => "X",
        }
    }

    /// Sector sizes in 256ths of the wheel.
    pub const fn sizes(self) -> &'static [u16] {
        match self {
            Self::LowerI => &[13],
            Self::V => &[67],
            Self::L => &[57, 13],
            Self::UpperI => &[13, 13],
            Self::T => &[128],
            Self::Y => &[67, 13],
            Self::X => &[67, 67],
        }
    }

    /// Sector offsets relative to the template rotation.
    pub const fn offsets(self) -> &'static [u16] {
        match self {
            Self::LowerI | Self::V | Self::T => &[0],
            Self::L => &[0, 86],
            Self::UpperI | Self::X => &[0, 128],
            Self::Y => &[0, 174],
        }
    }

    /// Position in [`TemplateShape::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of sectors.
    pub const fn sector_count(self) -> usize {
        self.sizes().len()
    }
}

impl std::fmt::Display for TemplateShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for TemplateShape {
    type Err = Error;

    /// Parses a catalog name. Case matters: `i` and `I` are different shapes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name() == s.trim())
            .ok_or_else(|| Error::UnknownShape(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_consistent() {
        for (i, shape) in TemplateShape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
            assert_eq!(shape.sizes().len(), shape.offsets().len());
            assert!(shape.sizes().iter().all(|&s| s > 0 && s < 256));
            assert!(shape.offsets().iter().all(|&o| o < 256));
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for shape in TemplateShape::ALL {
            assert_eq!(shape.name().parse::<TemplateShape>().unwrap(), shape);
        }
        assert_eq!("i".parse::<TemplateShape>().unwrap(), TemplateShape::LowerI);
        assert_eq!("I".parse::<TemplateShape>().unwrap(), TemplateShape::UpperI);
        assert!("v".parse::<TemplateShape>().is_err());
        assert!("Z".parse::<TemplateShape>().is_err());
    }
}
