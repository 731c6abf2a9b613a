#![forbid(unsafe_code)]

//! Tour configuration.
//!
//! [`TourConfig`] gathers every tunable of a tour: animation timing, overlay
//! look, paddings, navigation flags, debounce windows, and the scroll-settle
//! policy. It can be built in code or, with the `tour-config` feature,
//! loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # tour.toml
//! animation_duration_ms = 250
//! allow_close = false
//! theme = "midnight"
//!
//! [[steps]]
//! kind = "welcome"
//! title = "Welcome"
//!
//! [[steps]]
//! kind = "anchored"
//! target = "#search"
//! title = "Search"
//! placement = "bottom"
//! ```
//!
//! ```rust,ignore
//! let config = TourConfig::from_toml_file("tour.toml")?;
//! let document = TourDocument::from_toml_file("tour.toml")?;
//! ```
//!
//! Durations are written as integer milliseconds. Every loader validates
//! the result and reports [`ConfigError::Validation`] with the full list of
//! problems.

#[cfg(feature = "tour-config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "tour-config")]
use serde::{Deserialize, Serialize};

use crate::settle::SettlePolicy;
use crate::theme::is_class_token;
#[cfg(feature = "tour-config")]
use crate::step_spec::StepSpec;

// ---------------------------------------------------------------------------
// TourConfig
// ---------------------------------------------------------------------------

/// Configuration of a tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "tour-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "tour-config", serde(default))]
pub struct TourConfig {
    /// Length of show/hide transitions. Also delays element teardown after
    /// exit. The settle delay between steps is half of it.
    #[cfg_attr(
        feature = "tour-config",
        serde(rename = "animation_duration_ms", with = "duration_ms")
    )]
    pub animation_duration: Duration,

    /// Easing token handed to the stylesheet (`ease`, `linear`,
    /// `cubic-bezier(0.4, 0, 0.2, 1)`, ...).
    pub easing: String,

    /// Overlay colour handed to the stylesheet.
    pub overlay_color: String,

    /// Space between the target and the highlight outline.
    pub highlight_padding: f64,

    /// Space between the target and the panel.
    pub panel_gap: f64,

    /// Allow leaving via Escape, the close control, or an overlay click.
    pub allow_close: bool,

    /// Forward arrow/Enter/Escape keys to navigation.
    pub keyboard_navigation: bool,

    /// Padding kept around a target when scrolling it into view.
    pub scroll_padding: f64,

    /// Minimum inset the panel keeps from the surface edges.
    pub safe_area: f64,

    /// Theme applied at start; see `Tour::set_theme`.
    pub theme: String,

    /// Include an "i of n" label in panel content.
    pub show_progress: bool,

    pub next_label: String,
    pub prev_label: String,
    /// Label of the forward control on the last step.
    pub done_label: String,

    #[cfg_attr(
        feature = "tour-config",
        serde(rename = "resize_debounce_ms", with = "duration_ms")
    )]
    pub resize_debounce: Duration,

    #[cfg_attr(
        feature = "tour-config",
        serde(rename = "scroll_debounce_ms", with = "duration_ms")
    )]
    pub scroll_debounce: Duration,

    /// Consecutive still frames that count as "scroll settled".
    pub settle_samples: u32,

    /// Per-frame movement below which a frame counts as still.
    pub settle_threshold: f64,

    /// Frames after which a settle wait gives up and places anyway.
    pub settle_max_frames: u32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(300),
            easing: "ease-in-out".to_string(),
            overlay_color: "rgba(0, 0, 0, 0.55)".to_string(),
            highlight_padding: 8.0,
            panel_gap: 12.0,
            allow_close: true,
            keyboard_navigation: true,
            scroll_padding: 40.0,
            safe_area: 16.0,
            theme: "default".to_string(),
            show_progress: true,
            next_label: "Next".to_string(),
            prev_label: "Back".to_string(),
            done_label: "Done".to_string(),
            resize_debounce: Duration::from_millis(100),
            scroll_debounce: Duration::from_millis(50),
            settle_samples: SettlePolicy::DEFAULT.samples,
            settle_threshold: SettlePolicy::DEFAULT.threshold,
            settle_max_frames: SettlePolicy::DEFAULT.max_frames,
        }
    }
}

impl TourConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    #[must_use]
    pub fn easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    #[must_use]
    pub fn overlay_color(mut self, color: impl Into<String>) -> Self {
        self.overlay_color = color.into();
        self
    }

    #[must_use]
    pub fn highlight_padding(mut self, padding: f64) -> Self {
        self.highlight_padding = padding;
        self
    }

    #[must_use]
    pub fn panel_gap(mut self, gap: f64) -> Self {
        self.panel_gap = gap;
        self
    }

    #[must_use]
    pub fn allow_close(mut self, allow: bool) -> Self {
        self.allow_close = allow;
        self
    }

    #[must_use]
    pub fn keyboard_navigation(mut self, enabled: bool) -> Self {
        self.keyboard_navigation = enabled;
        self
    }

    #[must_use]
    pub fn scroll_padding(mut self, padding: f64) -> Self {
        self.scroll_padding = padding;
        self
    }

    #[must_use]
    pub fn safe_area(mut self, padding: f64) -> Self {
        self.safe_area = padding;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    #[must_use]
    pub fn settle_policy(mut self, policy: SettlePolicy) -> Self {
        self.settle_samples = policy.samples;
        self.settle_threshold = policy.threshold;
        self.settle_max_frames = policy.max_frames;
        self
    }

    /// Delay between hiding one step and showing the next.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.animation_duration / 2
    }

    /// Scroll-settle policy derived from the `settle_*` fields.
    #[must_use]
    pub fn to_settle_policy(&self) -> SettlePolicy {
        SettlePolicy {
            samples: self.settle_samples,
            threshold: self.settle_threshold,
            max_frames: self.settle_max_frames,
        }
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("highlight_padding", self.highlight_padding),
            ("panel_gap", self.panel_gap),
            ("scroll_padding", self.scroll_padding),
            ("safe_area", self.safe_area),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        if !is_easing_token(&self.easing) {
            errors.push(format!("easing is not a valid easing token: {:?}", self.easing));
        }
        if self.overlay_color.trim().is_empty() {
            errors.push("overlay_color must not be empty".to_string());
        }
        if !is_class_token(&self.theme) {
            errors.push(format!(
                "theme must be non-empty and use only [A-Za-z0-9_-], got {:?}",
                self.theme
            ));
        }
        if self.settle_samples == 0 {
            errors.push("settle_samples must be > 0".to_string());
        }
        if !self.settle_threshold.is_finite() || self.settle_threshold <= 0.0 {
            errors.push(format!(
                "settle_threshold must be finite and > 0, got {}",
                self.settle_threshold
            ));
        }
        if self.settle_max_frames == 0 {
            errors.push("settle_max_frames must be > 0".to_string());
        }
        if self.settle_max_frames < self.settle_samples {
            errors.push(format!(
                "settle_max_frames ({}) must be >= settle_samples ({})",
                self.settle_max_frames, self.settle_samples
            ));
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "tour-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "tour-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "tour-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "tour-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a pretty TOML string.
    #[cfg(feature = "tour-config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }

    /// Return `self` if it validates, otherwise the collected errors.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            tracing::warn!(
                target: "waypoint.config",
                count = errors.len(),
                "rejected tour configuration"
            );
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Keyword (`ease-in-out`) or function call (`cubic-bezier(...)`,
/// `steps(4, end)`).
fn is_easing_token(token: &str) -> bool {
    let token = token.trim();
    let (name, args) = match token.split_once('(') {
        Some((name, rest)) => match rest.strip_suffix(')') {
            Some(args) => (name, Some(args)),
            None => return false,
        },
        None => (token, None),
    };
    let name_ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    let args_ok = args.is_none_or(|args| {
        !args.trim().is_empty()
            && args.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, '.' | ',' | ' ' | '-' | '%')
            })
    });
    name_ok && args_ok
}

// ---------------------------------------------------------------------------
// TourDocument
// ---------------------------------------------------------------------------

/// A config file holding both settings and the step list.
#[cfg(feature = "tour-config")]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TourDocument {
    #[serde(flatten)]
    pub config: TourConfig,
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

#[cfg(feature = "tour-config")]
impl TourDocument {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let doc: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        doc.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let doc: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        doc.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let config = self.config.validated()?;
        Ok(Self {
            config,
            steps: self.steps,
        })
    }
}

// ---------------------------------------------------------------------------
// Duration <-> milliseconds
// ---------------------------------------------------------------------------

#[cfg(feature = "tour-config")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors loading or validating a tour configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "tour-config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "tour-config")]
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "tour-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "tour-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "tour-config")]
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "tour-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "tour-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "tour-config")]
            Self::TomlSerialize(e) => Some(e),
            #[cfg(feature = "tour-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
