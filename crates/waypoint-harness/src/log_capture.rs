#![forbid(unsafe_code)]

//! Capture `tracing` events emitted while a closure runs.
//!
//! ```
//! use waypoint_harness::with_captured_events;
//!
//! let logs = with_captured_events(|| {
//!     tracing::warn!(target: "waypoint.tour", index = 3u64, "step skipped");
//! });
//! assert_eq!(logs.warnings().len(), 1);
//! assert_eq!(logs.warnings()[0].field("index"), Some("3"));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::{Context, SubscriberExt};

/// A captured log event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub target: String,
    pub fields: HashMap<String, String>,
    pub message: Option<String>,
}

impl CapturedEvent {
    /// Value of a structured field, rendered as text.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Handle to read captured events.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    /// All captured events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Events at exactly `level`.
    #[must_use]
    pub fn at_level(&self, level: tracing::Level) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    /// Warning-level events.
    #[must_use]
    pub fn warnings(&self) -> Vec<CapturedEvent> {
        self.at_level(tracing::Level::WARN)
    }

    /// Events whose message contains `needle`.
    #[must_use]
    pub fn matching(&self, needle: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message.as_deref().is_some_and(|m| m.contains(needle)))
            .collect()
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned();

        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CapturedEvent {
                level: *event.metadata().level(),
                target: event.metadata().target().to_string(),
                fields,
                message,
            });
    }
}

/// Run `f` with a capturing subscriber installed for the current thread.
pub fn with_captured_events<F>(f: F) -> LogCapture
where
    F: FnOnce(),
{
    let capture = LogCapture::default();
    let layer = CaptureLayer {
        events: Arc::clone(&capture.events),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    capture
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_level_target_and_fields() {
        let logs = with_captured_events(|| {
            tracing::debug!(target: "waypoint.test", width = 80u64, "resized");
            tracing::warn!(target: "waypoint.test", selector = "#nav", "missing");
        });

        let events = logs.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, tracing::Level::DEBUG);
        assert_eq!(events[0].field("width"), Some("80"));
        assert_eq!(events[1].target, "waypoint.test");
        assert_eq!(events[1].field("selector"), Some("#nav"));
        assert_eq!(logs.matching("miss").len(), 1);
    }

    #[test]
    fn nothing_leaks_outside_the_closure() {
        let logs = with_captured_events(|| {});
        tracing::warn!("outside");
        assert!(logs.events().is_empty());
    }
}
