#![forbid(unsafe_code)]

//! Waypoint Runtime
//!
//! Steps, configuration, and the tour controller.
//!
//! # Key Components
//!
//! - [`Tour`] - Step-transition state machine driven by host events and ticks
//! - [`StepStore`] - Ordered, read-only step list
//! - [`Step`] - Welcome or anchored step descriptor
//! - [`TourConfig`] - Timing, paddings, navigation flags, settle policy
//! - [`TourHooks`] - Optional lifecycle callbacks
//!
//! # Role in Waypoint
//! `waypoint-runtime` is the orchestrator. It resolves targets through the
//! host's [`Surface`](waypoint_backend::Surface), asks `waypoint-layout` where
//! the panel goes, and toggles visibility on the elements it created.
//!
//! # Feature Flags
//!
//! - `tour-config`: load [`TourConfig`] and step lists from TOML or JSON.

pub mod config;
pub mod controller;
pub mod hooks;
pub mod keyboard;
pub mod settle;
pub mod step;
pub mod step_spec;
pub mod store;
pub mod theme;

#[cfg(feature = "tour-config")]
pub use config::TourDocument;
pub use config::{ConfigError, TourConfig};
pub use controller::{Tour, TourState, TourStatus};
pub use hooks::{Gate, TourHooks};
pub use keyboard::NavCommand;
pub use settle::{ScrollSettle, SettlePolicy, SettleState};
pub use step::{AnchoredStep, Content, Step, WelcomeStep};
pub use step_spec::{StepError, StepSpec};
pub use store::StepStore;
