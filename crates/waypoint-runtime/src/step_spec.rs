#![forbid(unsafe_code)]

//! Data-only step descriptions.
//!
//! [`StepSpec`] is the literal-only form of a [`Step`] that can be written in
//! a config file. Computed content and visibility predicates only exist in
//! code, so they have no spec counterpart.
//!
//! ```
//! use waypoint_runtime::step_spec::{StepSpec, into_store};
//!
//! let store = into_store(vec![
//!     StepSpec::welcome("Welcome"),
//!     StepSpec::anchored("#nav", "Navigation"),
//! ])
//! .unwrap();
//! assert_eq!(store.len(), 2);
//! ```

use std::fmt;

#[cfg(feature = "tour-config")]
use serde::{Deserialize, Serialize};

use waypoint_core::Side;

use crate::step::{AnchoredStep, Step, WelcomeStep};
use crate::store::StepStore;

/// Serialisable step description.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "tour-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "tour-config", serde(tag = "kind", rename_all = "lowercase"))]
pub enum StepSpec {
    Welcome {
        title: Option<String>,
        body: Option<String>,
        image: Option<String>,
        confirm_label: Option<String>,
    },
    Anchored {
        target: String,
        title: Option<String>,
        body: Option<String>,
        placement: Option<Side>,
        class: Option<String>,
        corner_radius: Option<f64>,
    },
}

impl StepSpec {
    /// Welcome step with only a title.
    #[must_use]
    pub fn welcome(title: impl Into<String>) -> Self {
        Self::Welcome {
            title: Some(title.into()),
            body: None,
            image: None,
            confirm_label: None,
        }
    }

    /// Anchored step with only a target and a title.
    #[must_use]
    pub fn anchored(target: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Anchored {
            target: target.into(),
            title: Some(title.into()),
            body: None,
            placement: None,
            class: None,
            corner_radius: None,
        }
    }

    /// Convert into a [`Step`]; `index` is only used for error reporting.
    pub fn into_step(self, index: usize) -> Result<Step, StepError> {
        match self {
            Self::Welcome {
                title,
                body,
                image,
                confirm_label,
            } => Ok(Step::Welcome(WelcomeStep {
                title,
                body,
                image,
                confirm_label,
            })),
            Self::Anchored {
                target,
                title,
                body,
                placement,
                class,
                corner_radius,
            } => {
                let target = target.trim();
                if target.is_empty() {
                    return Err(StepError::EmptyTarget { index });
                }
                if let Some(radius) = corner_radius.filter(|r| !(r.is_finite() && *r >= 0.0)) {
                    return Err(StepError::InvalidCornerRadius { index, radius });
                }
                let mut step = AnchoredStep::new(target);
                step.title = title.map(Into::into);
                step.body = body.map(Into::into);
                step.placement = placement;
                step.class = class.filter(|c| !c.trim().is_empty());
                step.corner_radius = corner_radius;
                Ok(Step::Anchored(step))
            }
        }
    }
}

/// Convert a list of specs into a [`StepStore`], failing on the first
/// invalid entry.
pub fn into_store(specs: impl IntoIterator<Item = StepSpec>) -> Result<StepStore, StepError> {
    specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| spec.into_step(index))
        .collect::<Result<Vec<_>, _>>()
        .map(StepStore::new)
}

/// Errors converting a [`StepSpec`] into a [`Step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    /// Anchored step with a blank target selector.
    EmptyTarget { index: usize },
    /// Corner radius that is negative or not finite.
    InvalidCornerRadius { index: usize, radius: f64 },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTarget { index } => {
                write!(f, "step {index}: anchored step has an empty target selector")
            }
            Self::InvalidCornerRadius { index, radius } => {
                write!(f, "step {index}: invalid corner radius {radius}")
            }
        }
    }
}

impl std::error::Error for StepError {}
