#![forbid(unsafe_code)]

//! In-memory surface for deterministic tour tests.
//!
//! [`MemorySurface`] models just enough of a scrolling document to exercise
//! the runtime:
//!
//! - targets live at fixed *document* coordinates and are reported in
//!   *surface* coordinates (document minus scroll offset);
//! - `scroll_into_view` starts an eased scroll that halves the remaining
//!   distance every [`advance_frame`](MemorySurface::advance_frame);
//! - time only moves when the test advances it.
//!
//! Every mutation the runtime performs is recorded so tests can assert on
//! classes, styles, panel content, listeners, and injected styles.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;

use waypoint_backend::{
    ElementId, ElementRole, GeometryProvider, ListenerId, ListenerKind, ListenerOptions,
    PanelContent, Surface, SurfaceClock, Target,
};
use waypoint_core::geometry::{PanelSize, Position, Region, SurfaceSize};

/// One animation frame at 60 Hz, rounded to whole milliseconds.
pub const FRAME: Duration = Duration::from_millis(16);

/// Remaining scroll distance below which motion snaps to the goal.
const SNAP_DISTANCE: f64 = 0.25;

/// Everything the runtime did to one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementRecord {
    pub role: Option<ElementRole>,
    pub classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
    pub content: Option<PanelContent>,
}

impl ElementRecord {
    /// Whether the element currently carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Value of a style property, if assigned.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}

/// In-memory [`Surface`] with a manual clock.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    now: Duration,
    size: SurfaceSize,
    panel_size: PanelSize,
    scroll: Position,
    scroll_goal: Option<Position>,
    targets: HashMap<String, (ElementId, Region)>,
    elements: BTreeMap<ElementId, ElementRecord>,
    removed: Vec<ElementId>,
    listeners: BTreeMap<ListenerId, (ListenerKind, ListenerOptions)>,
    stylesheets: BTreeMap<String, String>,
    scroll_requests: Vec<ElementId>,
    measure_calls: std::cell::Cell<u32>,
    next_id: u64,
}

impl MemorySurface {
    /// Surface of the given size with a 300x150 panel.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            now: Duration::ZERO,
            size: SurfaceSize::new(width, height),
            panel_size: PanelSize::new(300.0, 150.0),
            scroll: Position::default(),
            scroll_goal: None,
            targets: HashMap::new(),
            elements: BTreeMap::new(),
            removed: Vec::new(),
            listeners: BTreeMap::new(),
            stylesheets: BTreeMap::new(),
            scroll_requests: Vec::new(),
            measure_calls: std::cell::Cell::new(0),
            next_id: 1,
        }
    }

    /// Set the size reported when the panel is measured.
    #[must_use]
    pub fn with_panel_size(mut self, width: f64, height: f64) -> Self {
        self.panel_size = PanelSize::new(width, height);
        self
    }

    /// Register a target at document coordinates.
    #[must_use]
    pub fn with_target(mut self, selector: &str, region: Region) -> Self {
        self.add_target(selector, region);
        self
    }

    /// Register (or move) a target at document coordinates.
    pub fn add_target(&mut self, selector: &str, region: Region) -> ElementId {
        if let Some((id, stored)) = self.targets.get_mut(selector) {
            *stored = region;
            return *id;
        }
        let id = self.alloc();
        self.targets.insert(selector.to_string(), (id, region));
        id
    }

    /// Remove a target so it no longer resolves.
    pub fn remove_target(&mut self, selector: &str) {
        self.targets.remove(selector);
    }

    /// Change the size the next measurement reports.
    pub fn set_panel_size(&mut self, width: f64, height: f64) {
        self.panel_size = PanelSize::new(width, height);
    }

    /// Resize the visible surface. Hosts would also forward an
    /// `Event::Resize`.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = SurfaceSize::new(width, height);
    }

    /// Jump the scroll offset without animation.
    pub fn set_scroll(&mut self, offset: Position) {
        self.scroll = offset;
        self.scroll_goal = None;
    }

    /// Advance the clock by `dt` and step any scroll animation once.
    pub fn advance_frame(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
        if let Some(goal) = self.scroll_goal {
            let dx = goal.left - self.scroll.left;
            let dy = goal.top - self.scroll.top;
            if dx.abs() <= SNAP_DISTANCE && dy.abs() <= SNAP_DISTANCE {
                self.scroll = goal;
                self.scroll_goal = None;
            } else {
                self.scroll = Position::new(self.scroll.left + dx / 2.0, self.scroll.top + dy / 2.0);
            }
        }
    }

    /// Advance the clock without touching scroll motion.
    pub fn advance_clock(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Whether a scroll animation is still running.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll_goal.is_some()
    }

    /// Live elements of a role, in creation order.
    #[must_use]
    pub fn elements_with_role(&self, role: ElementRole) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, rec)| rec.role == Some(role))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Record for a live element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&ElementRecord> {
        self.elements.get(&id)
    }

    /// First live element with `role`.
    #[must_use]
    pub fn first(&self, role: ElementRole) -> Option<&ElementRecord> {
        self.elements.values().find(|rec| rec.role == Some(role))
    }

    /// Number of live elements created by the runtime.
    #[must_use]
    pub fn live_element_count(&self) -> usize {
        self.elements.len()
    }

    /// Elements removed so far, in removal order.
    #[must_use]
    pub fn removed(&self) -> &[ElementId] {
        &self.removed
    }

    /// Currently bound listeners.
    #[must_use]
    pub fn listeners(&self) -> Vec<(ListenerKind, ListenerOptions)> {
        self.listeners.values().copied().collect()
    }

    /// Injected stylesheet for `key`.
    #[must_use]
    pub fn stylesheet(&self, key: &str) -> Option<&str> {
        self.stylesheets.get(key).map(String::as_str)
    }

    /// Elements passed to `scroll_into_view`, in call order.
    #[must_use]
    pub fn scroll_requests(&self) -> &[ElementId] {
        &self.scroll_requests
    }

    /// How many times an element has been measured.
    #[must_use]
    pub fn measure_calls(&self) -> u32 {
        self.measure_calls.get()
    }

    fn alloc(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn document_region(&self, element: ElementId) -> Option<Region> {
        self.targets
            .values()
            .find(|(id, _)| *id == element)
            .map(|(_, region)| *region)
    }
}

impl SurfaceClock for MemorySurface {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

impl GeometryProvider for MemorySurface {
    fn resolve(&self, selector: &str) -> Option<Target> {
        let (element, region) = self.targets.get(selector)?;
        Some(Target {
            element: *element,
            selector: selector.to_string(),
            region: region.translate(-self.scroll.left, -self.scroll.top),
        })
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn create_element(&mut self, role: ElementRole) -> ElementId {
        let id = self.alloc();
        self.elements.insert(
            id,
            ElementRecord {
                role: Some(role),
                ..ElementRecord::default()
            },
        );
        id
    }

    fn remove_element(&mut self, id: ElementId) {
        if self.elements.remove(&id).is_some() {
            self.removed.push(id);
        }
    }

    fn set_class(&mut self, id: ElementId, class: &str, enabled: bool) {
        if let Some(rec) = self.elements.get_mut(&id) {
            if enabled {
                rec.classes.insert(class.to_string());
            } else {
                rec.classes.remove(class);
            }
        }
    }

    fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(rec) = self.elements.get_mut(&id) {
            rec.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn render_panel(&mut self, id: ElementId, content: &PanelContent) {
        if let Some(rec) = self.elements.get_mut(&id) {
            rec.content = Some(content.clone());
        }
    }

    fn measure(&self, _id: ElementId) -> PanelSize {
        self.measure_calls.set(self.measure_calls.get() + 1);
        self.panel_size
    }

    fn scroll_into_view(&mut self, element: ElementId, padding: f64) {
        self.scroll_requests.push(element);
        let Some(region) = self.document_region(element) else {
            return;
        };
        let view_top = self.scroll.top;
        let view_bottom = self.scroll.top + self.size.height;
        let goal_top = if region.top - padding < view_top {
            (region.top - padding).max(0.0)
        } else if region.bottom() + padding > view_bottom {
            (region.bottom() + padding - self.size.height).max(0.0)
        } else {
            return;
        };
        self.scroll_goal = Some(Position::new(self.scroll.left, goal_top));
    }

    fn scroll_offset(&self) -> Position {
        self.scroll
    }

    fn bind(&mut self, kind: ListenerKind, options: ListenerOptions) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, (kind, options));
        id
    }

    fn unbind(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn inject_style(&mut self, key: &str, css: &str) -> bool {
        if self.stylesheets.contains_key(key) {
            return false;
        }
        self.stylesheets.insert(key.to_string(), css.to_string());
        true
    }

    fn remove_style(&mut self, key: &str) {
        self.stylesheets.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_reports_surface_coordinates() {
        let mut surface =
            MemorySurface::new(800.0, 600.0).with_target("#a", Region::new(10.0, 900.0, 40.0, 20.0));
        surface.set_scroll(Position::new(0.0, 500.0));
        let target = surface.resolve("#a").expect("target registered");
        assert_eq!(target.region, Region::new(10.0, 400.0, 40.0, 20.0));
        assert!(surface.resolve("#missing").is_none());
    }

    #[test]
    fn scroll_into_view_eases_to_goal() {
        let mut surface = MemorySurface::new(800.0, 600.0)
            .with_target("#far", Region::new(0.0, 1_000.0, 100.0, 40.0));
        let id = surface.resolve("#far").map(|t| t.element).expect("target");
        surface.scroll_into_view(id, 20.0);
        assert!(surface.is_scrolling());

        let mut frames = 0;
        while surface.is_scrolling() && frames < 100 {
            surface.advance_frame(FRAME);
            frames += 1;
        }
        assert!(!surface.is_scrolling());
        assert_eq!(surface.scroll_offset(), Position::new(0.0, 460.0));
        assert_eq!(surface.now_mono(), FRAME * frames);
    }

    #[test]
    fn visible_target_does_not_scroll() {
        let mut surface =
            MemorySurface::new(800.0, 600.0).with_target("#near", Region::new(0.0, 100.0, 50.0, 50.0));
        let id = surface.resolve("#near").map(|t| t.element).expect("target");
        surface.scroll_into_view(id, 20.0);
        assert!(!surface.is_scrolling());
        assert_eq!(surface.scroll_requests(), &[id]);
    }

    #[test]
    fn style_injection_is_idempotent() {
        let mut surface = MemorySurface::new(800.0, 600.0);
        assert!(surface.inject_style("k", "a{}"));
        assert!(!surface.inject_style("k", "b{}"));
        assert_eq!(surface.stylesheet("k"), Some("a{}"));
        surface.remove_style("k");
        assert!(surface.stylesheet("k").is_none());
    }

    #[test]
    fn element_mutations_are_recorded() {
        let mut surface = MemorySurface::new(800.0, 600.0);
        let panel = surface.create_element(ElementRole::Panel);
        surface.set_class(panel, "shown", true);
        surface.set_style(panel, "left", "10px");
        assert!(surface.element(panel).is_some_and(|r| r.has_class("shown")));
        assert_eq!(surface.element(panel).and_then(|r| r.style("left")), Some("10px"));

        surface.set_class(panel, "shown", false);
        assert!(!surface.element(panel).is_some_and(|r| r.has_class("shown")));

        surface.remove_element(panel);
        surface.remove_element(panel);
        assert_eq!(surface.removed(), &[panel]);
        assert_eq!(surface.live_element_count(), 0);
    }
}
