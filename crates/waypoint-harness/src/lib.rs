#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Waypoint.
//!
//! - [`MemorySurface`]: an in-memory [`Surface`](waypoint_backend::Surface)
//!   with a manual clock and scripted scroll motion, so tours can be driven
//!   frame by frame without a browser.
//! - [`log_capture`]: a `tracing` layer that records emitted events, for
//!   asserting on diagnostics.

pub mod log_capture;
pub mod memory_surface;

pub use log_capture::{CapturedEvent, LogCapture, with_captured_events};
pub use memory_surface::{ElementRecord, FRAME, MemorySurface};
