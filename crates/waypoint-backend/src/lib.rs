#![forbid(unsafe_code)]
#![doc = "Surface traits for Waypoint: the boundary between the tour runtime and the host."]
#![doc = ""]
#![doc = "The runtime never touches a DOM, terminal, or window system directly. Everything"]
#![doc = "it needs from the host (element creation, class and style mutation, geometry"]
#![doc = "queries, scrolling, listener binding, style injection, and time) flows through"]
#![doc = "the traits in this crate. Hosts implement [`Surface`]; tests use the in-memory"]
#![doc = "implementation from `waypoint-harness`."]

use core::time::Duration;

use waypoint_core::geometry::{PanelSize, Position, Region, SurfaceSize};

/// Opaque handle to an element on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Opaque handle to a bound listener, used to unbind it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Visual elements the runtime creates for a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// Full-surface dimming layer.
    Overlay,
    /// Cutout drawn around the target.
    Highlight,
    /// Info panel holding title, body, and navigation controls.
    Panel,
}

/// Listener categories the runtime asks the host to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    Scroll,
    Keyboard,
    /// Clicks on the overlay and on panel controls.
    Click,
}

/// Listener registration options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Observe the event during the capture phase, so scrolls of nested
    /// containers are seen as well as document scrolls.
    pub capture: bool,
}

/// A resolved tour target.
///
/// Built fresh on every [`GeometryProvider::resolve`] call and never cached
/// across steps, because targets move when the page scrolls or reflows.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Element the selector matched.
    pub element: ElementId,
    /// Selector that produced this target.
    pub selector: String,
    /// Current region in surface coordinates.
    pub region: Region,
}

/// Which panel layout the surface should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelKind {
    /// Panel anchored next to a target.
    #[default]
    Anchored,
    /// Free-floating welcome message.
    Welcome,
}

/// Structured panel payload. Markup and templating belong to the surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelContent {
    pub kind: PanelKind,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Image reference (URL or asset key) for welcome panels.
    pub image: Option<String>,
    /// Progress label such as "2 of 5".
    pub progress: Option<String>,
    /// Label of the back control; `None` hides it.
    pub prev_label: Option<String>,
    /// Label of the forward/confirm control.
    pub next_label: String,
    /// Whether the close control is shown.
    pub show_close: bool,
}

/// Monotonic clock abstraction.
///
/// Native hosts use `Instant`; web hosts use `performance.now()`. The runtime
/// never reads the system clock itself: all time flows through this trait.
pub trait SurfaceClock {
    /// Elapsed time since an unspecified epoch, monotonically increasing.
    fn now_mono(&self) -> Duration;
}

/// Resolves target selectors against the live surface.
///
/// Implementations must re-query on every call and must not cache results.
pub trait GeometryProvider {
    /// Find the element for `selector` and report its current region, or
    /// `None` when nothing matches.
    fn resolve(&self, selector: &str) -> Option<Target>;
}

/// The host surface a tour draws on.
///
/// All operations are infallible from the runtime's point of view: a host
/// that cannot honour one (element already gone, listener unknown) treats it
/// as a no-op.
pub trait Surface: GeometryProvider + SurfaceClock {
    /// Current size of the visible surface.
    fn size(&self) -> SurfaceSize;

    /// Create a visual element for `role` and attach it to the surface.
    fn create_element(&mut self, role: ElementRole) -> ElementId;

    /// Detach and drop an element.
    fn remove_element(&mut self, id: ElementId);

    /// Add (`enabled = true`) or remove a class on an element.
    fn set_class(&mut self, id: ElementId, class: &str, enabled: bool);

    /// Assign one style property.
    fn set_style(&mut self, id: ElementId, property: &str, value: &str);

    /// Render panel content into a panel element.
    fn render_panel(&mut self, id: ElementId, content: &PanelContent);

    /// Measure an element's laid-out size.
    fn measure(&self, id: ElementId) -> PanelSize;

    /// Start scrolling so `element` becomes visible with `padding` to spare.
    ///
    /// Scrolling may be animated; the runtime samples [`Surface::scroll_offset`]
    /// every frame to find out when motion has stopped.
    fn scroll_into_view(&mut self, element: ElementId, padding: f64);

    /// Current scroll offset of the surface.
    fn scroll_offset(&self) -> Position;

    /// Ask the host to forward events of `kind` to the runtime.
    fn bind(&mut self, kind: ListenerKind, options: ListenerOptions) -> ListenerId;

    /// Stop forwarding events for a previously bound listener.
    fn unbind(&mut self, id: ListenerId);

    /// Insert a global stylesheet under `key`.
    ///
    /// Idempotent: returns `false` and changes nothing if `key` is already
    /// present.
    fn inject_style(&mut self, key: &str, css: &str) -> bool;

    /// Remove the stylesheet stored under `key`, if any.
    fn remove_style(&mut self, key: &str);
}

/// Wall-clock backed [`SurfaceClock`] for native and wasm hosts.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: web_time::Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: web_time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceClock for MonotonicClock {
    fn now_mono(&self) -> Duration {
        self.start.elapsed()
    }
}
