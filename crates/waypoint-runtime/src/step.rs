#![forbid(unsafe_code)]

//! Step descriptors.
//!
//! A tour is an ordered list of [`Step`]s. Each step is either a
//! free-floating [`WelcomeStep`] or an [`AnchoredStep`] pointing at a target
//! selector. Steps are immutable once handed to the controller.
//!
//! Title and body of anchored steps are [`Content`]: either a literal string
//! or a function of the resolved [`Target`], evaluated at render time and
//! never cached.
//!
//! ```
//! use waypoint_core::Side;
//! use waypoint_runtime::step::{AnchoredStep, Step, WelcomeStep};
//!
//! let steps: Vec<Step> = vec![
//!     WelcomeStep::new().title("Welcome").body("A quick tour.").into(),
//!     AnchoredStep::new("#search")
//!         .title("Search")
//!         .computed_body(|target| format!("Found {}", target.selector))
//!         .placement(Side::Bottom)
//!         .into(),
//! ];
//! assert_eq!(steps[1].selector(), Some("#search"));
//! ```

use std::fmt;
use std::sync::Arc;

use waypoint_backend::Target;
use waypoint_core::Side;

/// Function of the resolved target producing text.
pub type ContentFn = Arc<dyn Fn(&Target) -> String + Send + Sync>;

/// Predicate deciding whether an anchored step is shown for a target.
pub type VisibilityFn = Arc<dyn Fn(&Target) -> bool + Send + Sync>;

/// Text that is either fixed or computed from the resolved target.
#[derive(Clone)]
pub enum Content {
    Literal(String),
    Computed(ContentFn),
}

impl Content {
    /// Computed content.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Target) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Resolve against the current target.
    #[must_use]
    pub fn resolve(&self, target: &Target) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Computed(f) => f(target),
        }
    }

    /// The literal text, if this content does not depend on the target.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Computed(_) => None,
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

/// Free-floating welcome message, centred on the surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WelcomeStep {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Image reference passed through to the surface.
    pub image: Option<String>,
    /// Label of the confirm control; falls back to the configured
    /// next label.
    pub confirm_label: Option<String>,
}

impl WelcomeStep {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }
}

/// Message anchored next to a target element.
#[derive(Clone)]
pub struct AnchoredStep {
    /// Selector the geometry provider resolves.
    pub target: String,
    pub title: Option<Content>,
    pub body: Option<Content>,
    /// Force the panel onto this side instead of scoring candidates.
    pub placement: Option<Side>,
    /// Extra class applied to the highlight and panel while shown.
    pub class: Option<String>,
    /// Step is skipped when this returns `false`.
    pub visible: Option<VisibilityFn>,
    /// Corner radius of the highlight cutout.
    pub corner_radius: Option<f64>,
}

impl AnchoredStep {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            title: None,
            body: None,
            placement: None,
            class: None,
            visible: None,
            corner_radius: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Content>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Content>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn computed_title<F>(mut self, f: F) -> Self
    where
        F: Fn(&Target) -> String + Send + Sync + 'static,
    {
        self.title = Some(Content::computed(f));
        self
    }

    #[must_use]
    pub fn computed_body<F>(mut self, f: F) -> Self
    where
        F: Fn(&Target) -> String + Send + Sync + 'static,
    {
        self.body = Some(Content::computed(f));
        self
    }

    #[must_use]
    pub fn placement(mut self, side: Side) -> Self {
        self.placement = Some(side);
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Target) -> bool + Send + Sync + 'static,
    {
        self.visible = Some(Arc::new(predicate));
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    /// Whether the step should be shown for `target`.
    #[must_use]
    pub fn is_visible_for(&self, target: &Target) -> bool {
        self.visible.as_ref().is_none_or(|predicate| predicate(target))
    }
}

impl fmt::Debug for AnchoredStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchoredStep")
            .field("target", &self.target)
            .field("title", &self.title)
            .field("body", &self.body)
            .field("placement", &self.placement)
            .field("class", &self.class)
            .field("visible", &self.visible.as_ref().map(|_| ".."))
            .field("corner_radius", &self.corner_radius)
            .finish()
    }
}

/// One unit of a tour.
#[derive(Debug, Clone)]
pub enum Step {
    Welcome(WelcomeStep),
    Anchored(AnchoredStep),
}

impl Step {
    /// Target selector of an anchored step.
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::Welcome(_) => None,
            Self::Anchored(step) => Some(&step.target),
        }
    }

    #[must_use]
    pub fn is_welcome(&self) -> bool {
        matches!(self, Self::Welcome(_))
    }

    /// Extra visual class, if any.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Welcome(_) => None,
            Self::Anchored(step) => step.class.as_deref(),
        }
    }
}

impl From<WelcomeStep> for Step {
    fn from(step: WelcomeStep) -> Self {
        Self::Welcome(step)
    }
}

impl From<AnchoredStep> for Step {
    fn from(step: AnchoredStep) -> Self {
        Self::Anchored(step)
    }
}
