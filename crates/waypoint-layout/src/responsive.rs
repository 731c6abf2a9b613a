#![forbid(unsafe_code)]

//! Surface width classes.
//!
//! The info panel's width is itself responsive to the surface width, so a
//! measured [`PanelSize`](crate::PanelSize) is only valid while the surface
//! stays inside the same [`WidthClass`]. The controller re-measures the panel
//! when a resize crosses a breakpoint and reuses the cached size otherwise.
//!
//! # Invariants
//!
//! 1. Classification is monotonic: a wider surface never yields a smaller
//!    class.
//! 2. Breakpoints are lower-inclusive for the larger class.

/// Lower bound of [`WidthClass::Regular`].
pub const REGULAR_MIN_WIDTH: f64 = 640.0;
/// Lower bound of [`WidthClass::Wide`].
pub const WIDE_MIN_WIDTH: f64 = 1024.0;

/// Coarse width tier of the visible surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidthClass {
    /// Phones and narrow panes.
    Compact,
    /// Tablets and split windows.
    Regular,
    /// Desktop-sized surfaces.
    Wide,
}

impl WidthClass {
    /// All classes in ascending order.
    pub const ALL: [WidthClass; 3] = [Self::Compact, Self::Regular, Self::Wide];

    /// Classify a surface width.
    #[must_use]
    pub fn from_width(width: f64) -> Self {
        if width >= WIDE_MIN_WIDTH {
            Self::Wide
        } else if width >= REGULAR_MIN_WIDTH {
            Self::Regular
        } else {
            Self::Compact
        }
    }

    /// Lowercase name, suitable for a class-name suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Regular => "regular",
            Self::Wide => "wide",
        }
    }
}
