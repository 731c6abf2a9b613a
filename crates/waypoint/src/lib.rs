#![forbid(unsafe_code)]

//! Waypoint public facade crate.
//!
//! Re-exports the types a host needs to run a guided tour and offers a
//! prelude for day-to-day usage. A host implements
//! [`Surface`] for its rendering environment, builds a [`StepStore`], and
//! drives a [`Tour`] by forwarding events and calling [`Tour::tick`] once
//! per frame.
//!
//! # Example
//!
//! ```
//! use waypoint::prelude::*;
//! use waypoint_harness::MemorySurface;
//!
//! let surface = MemorySurface::new(1024.0, 768.0)
//!     .with_target("#search", Region::new(40.0, 20.0, 200.0, 32.0));
//! let steps = StepStore::new(vec![
//!     WelcomeStep::new().title("Welcome").into(),
//!     AnchoredStep::new("#search").title("Find anything here").into(),
//! ]);
//! let mut tour = Tour::new(surface, steps, TourConfig::default());
//! tour.start();
//! assert!(tour.is_active());
//! ```

pub mod error;

#[cfg(feature = "tour-config")]
use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use waypoint_core::{
    Debouncer, Event, FocusContext, KeyCode, KeyEvent, Modifiers, PanelAction, PanelSize,
    Position, Region, Side, SurfaceSize,
};

// --- Layout re-exports -----------------------------------------------------

pub use waypoint_layout::{Placement, PlacementRequest, WidthClass};

// --- Backend re-exports ----------------------------------------------------

pub use waypoint_backend::{
    ElementId, ElementRole, GeometryProvider, ListenerId, ListenerKind, ListenerOptions,
    MonotonicClock, PanelContent, PanelKind, Surface, SurfaceClock, Target,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "tour-config")]
pub use waypoint_runtime::TourDocument;
pub use waypoint_runtime::{
    AnchoredStep, ConfigError, Content, Gate, StepError, StepSpec, StepStore, Step, Tour,
    TourConfig, TourHooks, TourState, TourStatus, WelcomeStep,
};

pub use error::{Error, Result};

// --- Loading ---------------------------------------------------------------

/// Load a tour document (settings plus steps) from a file.
///
/// `.json` files are read as JSON; anything else is read as TOML.
#[cfg(feature = "tour-config")]
pub fn load_tour(path: impl AsRef<Path>) -> Result<(TourConfig, StepStore)> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        TourDocument::from_json_file(path)
    } else {
        TourDocument::from_toml_file(path)
    };
    let loaded = document.map_err(Error::from).and_then(split_document);
    if let Err(err) = &loaded {
        tracing::warn!(
            target: "waypoint.config",
            path = %path.display(),
            error_type = err.error_type(),
            "tour document rejected: {err}"
        );
    }
    loaded
}

/// Parse a tour document from a TOML string.
#[cfg(feature = "tour-config")]
pub fn load_tour_toml(source: &str) -> Result<(TourConfig, StepStore)> {
    split_document(TourDocument::from_toml_str(source)?)
}

/// Parse a tour document from a JSON string.
#[cfg(feature = "tour-config")]
pub fn load_tour_json(source: &str) -> Result<(TourConfig, StepStore)> {
    split_document(TourDocument::from_json_str(source)?)
}

#[cfg(feature = "tour-config")]
fn split_document(document: TourDocument) -> Result<(TourConfig, StepStore)> {
    let steps = waypoint_runtime::step_spec::into_store(document.steps)?;
    Ok((document.config, steps))
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnchoredStep, Content, Error, Event, Gate, KeyCode, KeyEvent, PanelAction, Region,
        Result, Side, Step, StepStore, Surface, Tour, TourConfig, TourHooks, TourStatus,
        WelcomeStep,
    };

    pub use crate::{backend, core, layout, runtime};
}

pub use waypoint_backend as backend;
pub use waypoint_core as core;
pub use waypoint_layout as layout;
pub use waypoint_runtime as runtime;
