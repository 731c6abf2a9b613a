#![forbid(unsafe_code)]

//! Core: geometry, input events, and debounce timers.
//!
//! # Role in Waypoint
//! `waypoint-core` is the vocabulary layer. It owns the surface-space
//! geometry types every other crate speaks ([`Region`], [`PanelSize`],
//! [`SurfaceSize`], [`Side`]), the canonical input events the host forwards
//! to a running tour, and the [`Debouncer`] used to coalesce resize and
//! scroll storms.
//!
//! # How it fits in the system
//! The placement engine (`waypoint-layout`) is a pure function over these
//! types. The runtime (`waypoint-runtime`) consumes [`Event`] values from the
//! host and uses the debouncers to decide when to recompute geometry.

pub mod debounce;
pub mod event;
pub mod geometry;

pub use debounce::Debouncer;
pub use event::{Event, FocusContext, KeyCode, KeyEvent, Modifiers, PanelAction};
pub use geometry::{PanelSize, Position, Region, Side, SurfaceSize};
