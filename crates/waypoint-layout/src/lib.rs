#![forbid(unsafe_code)]

//! Layout primitives for guided tours.
//!
//! - [`placement`]: positions an info panel next to a single target region.
//! - [`responsive`]: width classes that decide when a cached panel
//!   measurement has gone stale.

pub mod placement;
pub mod responsive;

pub use placement::{Candidate, Placement, PlacementRequest, center, clamp_position, place};
pub use responsive::WidthClass;
pub use waypoint_core::geometry::{PanelSize, Position, Region, Side, SurfaceSize};
