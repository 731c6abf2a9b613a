#![forbid(unsafe_code)]

//! Geometric primitives in surface coordinates.
//!
//! Surface coordinates originate at the top-left corner of the visible
//! surface, grow right and down, and are measured in surface units (CSS
//! pixels on the web, cells in a terminal). All values are `f64`.

use std::fmt;
use std::str::FromStr;

/// An axis-aligned rectangle in surface coordinates.
///
/// Width and height are never negative; [`Region::new`] clamps them to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in surface units.
    pub width: f64,
    /// Height in surface units.
    pub height: f64,
}

impl Region {
    /// Create a new region. Negative sizes are clamped to zero.
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Region covering a whole surface, anchored at the origin.
    #[inline]
    pub fn from_size(size: SurfaceSize) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal centre.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical centre.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Check if the region has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside the region (edges inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Rectangle intersection test with inclusive edges.
    ///
    /// Two regions that merely touch count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Region) -> bool {
        !(self.right() < other.left
            || self.left > other.right()
            || self.bottom() < other.top
            || self.top > other.bottom())
    }

    /// Grow the region by `pad` on every side.
    ///
    /// A negative `pad` shrinks it; the size never drops below zero.
    pub fn inflate(&self, pad: f64) -> Region {
        Region::new(
            self.left - pad,
            self.top - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }

    /// Shift the region by the given offsets.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Region {
        Region {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    /// True when the region lies within `[inset, dim - inset]` of `surface`
    /// on both axes.
    pub fn within(&self, surface: SurfaceSize, inset: f64) -> bool {
        self.left >= inset
            && self.top >= inset
            && self.right() <= surface.width - inset
            && self.bottom() <= surface.height - inset
    }
}

/// Measured size of the info panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

impl PanelSize {
    /// Create a panel size. Negative values are clamped to zero.
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Region this panel would occupy with its top-left corner at `at`.
    #[inline]
    pub fn at(&self, at: Position) -> Region {
        Region::new(at.left, at.top, self.width, self.height)
    }
}

/// Dimensions of the visible surface (the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    /// Create a surface size. Negative values are clamped to zero.
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Top-left corner of a placed panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    #[inline]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Side of the target the panel is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Below the target.
    Bottom,
    /// Above the target.
    Top,
    /// Right of the target.
    Right,
    /// Left of the target.
    Left,
    /// Centred on the surface; used for panels with no anchor.
    Center,
}

impl Side {
    /// Anchored candidates in evaluation order. Earlier entries win ties.
    pub const CANDIDATES: [Side; 4] = [Side::Bottom, Side::Top, Side::Right, Side::Left];

    /// Lowercase name, as used in class names and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Right => "right",
            Self::Left => "left",
            Self::Center => "center",
        }
    }

    /// Whether the panel grows along the vertical axis from this side.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a side name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSideError(pub String);

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side: {:?}", self.0)
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom" => Ok(Self::Bottom),
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}
