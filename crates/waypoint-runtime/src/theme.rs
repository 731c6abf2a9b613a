#![forbid(unsafe_code)]

//! Class names and the injected base stylesheet.
//!
//! The runtime only toggles classes and assigns geometry styles. Colours,
//! fonts, and panel chrome belong to theme stylesheets the host ships; the
//! base stylesheet here carries just the transition timing and overlay
//! colour from [`TourConfig`].

use crate::config::TourConfig;

/// Key of the injected base stylesheet.
pub const STYLE_KEY: &str = "waypoint-base-style";

pub const OVERLAY_CLASS: &str = "waypoint-overlay";
pub const HIGHLIGHT_CLASS: &str = "waypoint-highlight";
pub const PANEL_CLASS: &str = "waypoint-panel";
/// Toggled to fade an element in or out.
pub const VISIBLE_CLASS: &str = "waypoint-visible";
/// Set on the panel while it shows a welcome step.
pub const WELCOME_CLASS: &str = "waypoint-welcome";

const THEME_PREFIX: &str = "waypoint-theme-";

/// Class carrying theme `name`.
#[must_use]
pub fn theme_class(name: &str) -> String {
    format!("{THEME_PREFIX}{name}")
}

/// Whether `token` can be used verbatim inside a class name.
#[must_use]
pub fn is_class_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Base stylesheet for `config`.
#[must_use]
pub fn base_stylesheet(config: &TourConfig) -> String {
    let ms = config.animation_duration.as_millis();
    let easing = &config.easing;
    format!(
        ".{OVERLAY_CLASS}{{position:fixed;inset:0;background:{overlay};opacity:0;\
         pointer-events:none;transition:opacity {ms}ms {easing};}}\n\
         .{HIGHLIGHT_CLASS},.{PANEL_CLASS}{{position:absolute;opacity:0;\
         pointer-events:none;transition:opacity {ms}ms {easing},top {ms}ms {easing},\
         left {ms}ms {easing};}}\n\
         .{HIGHLIGHT_CLASS}{{box-shadow:0 0 0 9999px {overlay};}}\n\
         .{VISIBLE_CLASS}{{opacity:1;pointer-events:auto;}}\n",
        overlay = config.overlay_color,
    )
}
