#![forbid(unsafe_code)]

//! Tour controller: the step-transition state machine.
//!
//! [`Tour`] owns the surface, the step list, and everything that lives for
//! one activation (visual elements, listeners, the cached panel size). The
//! host drives it with two calls:
//!
//! - [`Tour::handle_event`] for keyboard, panel, overlay, resize, and scroll
//!   events;
//! - [`Tour::tick`] once per animation frame.
//!
//! Waiting never blocks. Each suspension point is an explicit phase that
//! `tick` advances:
//!
//! ```text
//!             go_to(j)                      release()
//!  Showing(i) ───────▶ on_before_step ─Hold─▶ Gated ──┐
//!                            │ Proceed                │
//!                            ▼                        ▼
//!                     hide i, wait half the animation duration
//!                            │
//!                            ▼
//!              resolve j ──missing/hidden──▶ j + 1 (warn)
//!                            │
//!                            ▼
//!              scroll into view, sample offset per frame
//!                            │ settled (or frame cap)
//!                            ▼
//!                 place, reveal ──▶ Showing(j), on_after_step
//! ```
//!
//! # Invariants
//!
//! 1. At most one transition is pending. A new navigation request replaces
//!    the pending phase, so a superseded wait can never touch the surface.
//! 2. `current_index` is `None` while inactive and in `[0, len)` otherwise.
//! 3. Every phase checks that the tour is still active before touching the
//!    surface; `exit` resets the phase.
//! 4. The previous step's class is removed before the next step is shown.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Target missing or predicate false | Skip to the next index, `warn!` |
//! | Navigation outside `[0, len)` | Finish (`on_finish`, then exit) |
//! | `start` while active | `warn!`, ignored |
//! | `finish`, `set_theme`, `release`, `go_to` while inactive | `warn!`, ignored |
//! | `exit` while inactive | Ignored |
//! | `set_theme` with a name that is not a class token | `warn!`, ignored |
//! | Scroll never settles | Placed anyway after the frame cap |

use std::time::Duration;

use tracing::{debug, warn};
use waypoint_backend::{
    ElementId, ElementRole, ListenerId, ListenerKind, ListenerOptions, PanelContent, PanelKind,
    Surface, Target,
};
use waypoint_core::{Debouncer, Event, PanelAction, PanelSize};
use waypoint_layout::{Placement, PlacementRequest, WidthClass, center};

use crate::config::TourConfig;
use crate::hooks::{Gate, TourHooks};
use crate::keyboard::{NavCommand, command_for};
use crate::settle::{ScrollSettle, SettleState};
use crate::step::{AnchoredStep, Step, WelcomeStep};
use crate::store::StepStore;
use crate::theme;

const LOG_TARGET: &str = "waypoint.tour";

/// Where the controller is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourStatus {
    Inactive,
    /// Moving towards the step at this index.
    Transitioning(usize),
    /// The step at this index is on screen.
    Showing(usize),
}

impl TourStatus {
    /// Index being shown or transitioned to.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Inactive => None,
            Self::Transitioning(index) | Self::Showing(index) => Some(index),
        }
    }
}

/// Activation state of a tour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourState {
    pub is_active: bool,
    /// `None` before start and after exit.
    pub current_index: Option<usize>,
    /// Class of the step currently shown, if it carries one.
    pub last_class: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Elements {
    overlay: ElementId,
    highlight: ElementId,
    panel: ElementId,
}

impl Elements {
    fn all(self) -> [ElementId; 3] {
        [self.overlay, self.highlight, self.panel]
    }
}

#[derive(Debug)]
struct Teardown {
    due: Duration,
    elements: Elements,
    listeners: Vec<ListenerId>,
}

#[derive(Debug, Clone, Copy)]
struct Shown {
    index: usize,
}

#[derive(Debug)]
enum Phase {
    Idle,
    /// `on_before_step` returned [`Gate::Hold`].
    Gated { index: usize },
    /// Previous step hidden; waiting for the fade-out.
    Hiding { index: usize, until: Duration },
    /// Target scrolled into view; waiting for motion to stop.
    Settling { index: usize, settle: ScrollSettle },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Gated { .. } => "gated",
            Self::Hiding { .. } => "hiding",
            Self::Settling { .. } => "settling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    NotFound,
    Hidden,
}

impl SkipReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "target not found",
            Self::Hidden => "visibility predicate false",
        }
    }
}

/// A guided tour over a [`Surface`].
#[derive(Debug)]
pub struct Tour<S> {
    surface: S,
    steps: StepStore,
    config: TourConfig,
    hooks: TourHooks,
    state: TourState,
    status: TourStatus,
    phase: Phase,
    elements: Option<Elements>,
    listeners: Vec<ListenerId>,
    teardown: Option<Teardown>,
    panel_size: Option<PanelSize>,
    width_class: Option<WidthClass>,
    theme: String,
    shown: Option<Shown>,
    resize: Debouncer,
    scroll: Debouncer,
}

impl<S: Surface> Tour<S> {
    /// Create an inactive tour.
    #[must_use]
    pub fn new(surface: S, steps: StepStore, config: TourConfig) -> Self {
        Self {
            resize: Debouncer::new(config.resize_debounce),
            scroll: Debouncer::new(config.scroll_debounce),
            theme: config.theme.clone(),
            surface,
            steps,
            config,
            hooks: TourHooks::default(),
            state: TourState::default(),
            status: TourStatus::Inactive,
            phase: Phase::Idle,
            elements: None,
            listeners: Vec::new(),
            teardown: None,
            panel_size: None,
            width_class: None,
            shown: None,
        }
    }

    /// Install lifecycle hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: TourHooks) -> Self {
        self.hooks = hooks;
        self
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn steps(&self) -> &StepStore {
        &self.steps
    }

    #[must_use]
    pub fn status(&self) -> TourStatus {
        self.status
    }

    #[must_use]
    pub fn state(&self) -> &TourState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// Step at the current index, or `None` while inactive.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.state
            .current_index
            .and_then(|index| self.steps.step_at(index))
    }

    /// Cached panel size; `None` while inactive.
    #[must_use]
    pub fn panel_size(&self) -> Option<PanelSize> {
        self.panel_size
    }

    #[must_use]
    pub fn width_class(&self) -> Option<WidthClass> {
        self.width_class
    }

    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Whether a transition is waiting for [`Tour::release`].
    #[must_use]
    pub fn is_held(&self) -> bool {
        matches!(self.phase, Phase::Gated { .. })
    }

    /// Whether element removal from the last exit is still pending.
    #[must_use]
    pub fn has_pending_teardown(&self) -> bool {
        self.teardown.is_some()
    }

    // ── Public operations ─────────────────────────────────────────────

    /// Build the visual surface and show the first step.
    pub fn start(&mut self) {
        if self.state.is_active {
            warn!(target: LOG_TARGET, operation = "start", "tour already active; ignored");
            return;
        }
        self.flush_teardown();

        let css = theme::base_stylesheet(&self.config);
        self.surface.inject_style(theme::STYLE_KEY, &css);

        let elements = Elements {
            overlay: self.create(ElementRole::Overlay, theme::OVERLAY_CLASS),
            highlight: self.create(ElementRole::Highlight, theme::HIGHLIGHT_CLASS),
            panel: self.create(ElementRole::Panel, theme::PANEL_CLASS),
        };
        let theme_class = theme::theme_class(&self.theme);
        self.surface.set_class(elements.overlay, &theme_class, true);
        self.surface.set_class(elements.panel, &theme_class, true);
        self.surface
            .set_class(elements.overlay, theme::VISIBLE_CLASS, true);
        self.elements = Some(elements);

        self.listeners = self.bind_listeners();
        let width_class = WidthClass::from_width(self.surface.size().width);
        self.width_class = Some(width_class);
        self.panel_size = Some(self.surface.measure(elements.panel));
        self.state.is_active = true;

        debug!(
            target: LOG_TARGET,
            steps = self.steps.len(),
            width_class = width_class.as_str(),
            theme = %self.theme,
            "tour started"
        );
        self.hooks.start();
        self.request(0);
    }

    /// Navigate to `index`. Out-of-range indices finish the tour.
    pub fn go_to(&mut self, index: isize) {
        if !self.state.is_active {
            warn!(target: LOG_TARGET, operation = "go_to", index, "tour inactive; ignored");
            return;
        }
        self.request(index);
    }

    /// Navigate one step forward; past the last step this finishes.
    pub fn next(&mut self) {
        let Some(index) = self.cursor("next") else {
            return;
        };
        self.request(to_signed(index).saturating_add(1));
    }

    /// Navigate one step back. Ignored on the first step.
    pub fn prev(&mut self) {
        let Some(index) = self.cursor("prev") else {
            return;
        };
        if index == 0 {
            debug!(target: LOG_TARGET, "prev on first step; ignored");
            return;
        }
        self.request(to_signed(index) - 1);
    }

    /// Run the finish path: `on_finish`, then [`Tour::exit`].
    pub fn finish(&mut self) {
        if !self.state.is_active {
            warn!(target: LOG_TARGET, operation = "finish", "tour inactive; ignored");
            return;
        }
        self.finish_active();
    }

    /// Deactivate. Visuals hide immediately; elements, listeners, and the
    /// base stylesheet are removed once the animation duration has passed.
    /// Idempotent.
    pub fn exit(&mut self) {
        if !self.state.is_active {
            debug!(target: LOG_TARGET, "exit while inactive; ignored");
            return;
        }
        self.state.is_active = false;
        let last_index = self.state.current_index;
        let abandoned = std::mem::replace(&mut self.phase, Phase::Idle);
        self.resize.cancel();
        self.scroll.cancel();

        if let Some(elements) = self.elements.take() {
            for id in elements.all() {
                self.surface.set_class(id, theme::VISIBLE_CLASS, false);
            }
            let due = self
                .surface
                .now_mono()
                .saturating_add(self.config.animation_duration);
            self.teardown = Some(Teardown {
                due,
                elements,
                listeners: std::mem::take(&mut self.listeners),
            });
        }

        self.shown = None;
        self.panel_size = None;
        self.width_class = None;
        self.state.current_index = None;
        self.state.last_class = None;
        self.status = TourStatus::Inactive;
        debug!(
            target: LOG_TARGET,
            abandoned = abandoned.name(),
            "tour exited"
        );

        if self.config.animation_duration.is_zero() {
            self.flush_teardown();
        }
        self.hooks.exit(last_index);
    }

    /// Swap the theme class on the overlay and panel. Names that are not
    /// class tokens (`[A-Za-z0-9_-]+`) are rejected.
    pub fn set_theme(&mut self, name: &str) {
        if !self.state.is_active {
            warn!(
                target: LOG_TARGET,
                operation = "set_theme",
                theme = name,
                "tour inactive; ignored"
            );
            return;
        }
        if !theme::is_class_token(name) {
            warn!(
                target: LOG_TARGET,
                operation = "set_theme",
                theme = name,
                "theme name is not a class token; ignored"
            );
            return;
        }
        if let Some(elements) = self.elements {
            let old = theme::theme_class(&self.theme);
            let new = theme::theme_class(name);
            for id in [elements.overlay, elements.panel] {
                self.surface.set_class(id, &old, false);
                self.surface.set_class(id, &new, true);
            }
        }
        debug!(target: LOG_TARGET, from = %self.theme, to = name, "theme changed");
        self.theme = name.to_string();
    }

    /// Resume a transition held by `on_before_step`.
    pub fn release(&mut self) {
        if !self.state.is_active {
            warn!(target: LOG_TARGET, operation = "release", "tour inactive; ignored");
            return;
        }
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Gated { index } => {
                debug!(target: LOG_TARGET, index, "transition released");
                self.begin_hide(index, false);
            }
            other => {
                debug!(
                    target: LOG_TARGET,
                    phase = other.name(),
                    "release without a held transition; ignored"
                );
                self.phase = other;
            }
        }
    }

    /// Feed one host event. Returns `true` when the event was consumed
    /// (the host should suppress its default action).
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.state.is_active {
            return false;
        }
        match event {
            Event::Key(key) => {
                if !self.config.keyboard_navigation {
                    return false;
                }
                match command_for(key, self.config.allow_close) {
                    Some(NavCommand::Next) => self.next(),
                    Some(NavCommand::Prev) => self.prev(),
                    Some(NavCommand::Exit) => self.exit(),
                    None => return false,
                }
                true
            }
            Event::Resize { .. } => {
                let now = self.surface.now_mono();
                self.resize.trigger(now);
                false
            }
            Event::Scroll => {
                let now = self.surface.now_mono();
                self.scroll.trigger(now);
                false
            }
            Event::Panel(PanelAction::Next | PanelAction::Done) => {
                self.next();
                true
            }
            Event::Panel(PanelAction::Prev) => {
                self.prev();
                true
            }
            Event::Panel(PanelAction::Close) | Event::OverlayClick => {
                if self.config.allow_close {
                    self.exit();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Advance timers and pending waits. Call once per animation frame.
    pub fn tick(&mut self) {
        let now = self.surface.now_mono();
        if self.teardown.as_ref().is_some_and(|t| now >= t.due) {
            self.flush_teardown();
        }
        if !self.state.is_active {
            return;
        }

        if self.resize.poll(now) {
            self.on_resize();
        }
        if self.scroll.poll(now) {
            debug!(target: LOG_TARGET, "scroll debounce fired");
            self.reposition();
        }

        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Hiding { index, until } if now < until => {
                self.phase = Phase::Hiding { index, until };
            }
            Phase::Hiding { index, .. } => self.enter_step(index),
            Phase::Settling { index, mut settle } => {
                let state = settle.sample(self.surface.scroll_offset());
                if state.is_done() {
                    debug!(
                        target: LOG_TARGET,
                        index,
                        frames = settle.frames(),
                        timed_out = state == SettleState::TimedOut,
                        "scroll settled"
                    );
                    self.show_anchored(index);
                } else {
                    self.phase = Phase::Settling { index, settle };
                }
            }
            other => self.phase = other,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────

    fn cursor(&self, operation: &'static str) -> Option<usize> {
        if !self.state.is_active {
            warn!(target: LOG_TARGET, operation, "tour inactive; ignored");
            return None;
        }
        self.status.index()
    }

    /// Single entry point for navigation. Replaces any pending phase.
    fn request(&mut self, index: isize) {
        let superseded = std::mem::replace(&mut self.phase, Phase::Idle);
        let was_hiding = matches!(superseded, Phase::Hiding { .. });
        if !matches!(superseded, Phase::Idle) {
            debug!(
                target: LOG_TARGET,
                superseded = superseded.name(),
                "pending transition superseded"
            );
        }

        let Some(index) = usize::try_from(index)
            .ok()
            .filter(|&i| i < self.steps.len())
        else {
            debug!(
                target: LOG_TARGET,
                index,
                len = self.steps.len(),
                "navigation out of range; finishing"
            );
            self.finish_active();
            return;
        };

        let gate = match self.steps.step_at(index) {
            Some(step) => self.hooks.before_step(index, step),
            None => Gate::Proceed,
        };
        match gate {
            Gate::Hold => {
                debug!(target: LOG_TARGET, index, "transition held by on_before_step");
                // Keep the shown step current; only a first step has none.
                self.state.current_index.get_or_insert(index);
                self.status = TourStatus::Transitioning(index);
                self.phase = Phase::Gated { index };
            }
            Gate::Proceed => self.begin_hide(index, was_hiding),
        }
    }

    /// Hide whatever is shown, then continue after the settle delay.
    fn begin_hide(&mut self, index: usize, force_delay: bool) {
        self.state.current_index = Some(index);
        self.status = TourStatus::Transitioning(index);

        let was_shown = self.shown.take().is_some();
        if was_shown {
            self.set_step_visible(false);
        }
        let delay = self.config.settle_delay();
        if (was_shown || force_delay) && !delay.is_zero() {
            let until = self.surface.now_mono().saturating_add(delay);
            self.phase = Phase::Hiding { index, until };
        } else {
            self.enter_step(index);
        }
    }

    /// Resolve the step at `index`, skipping forward past unresolvable ones.
    fn enter_step(&mut self, index: usize) {
        self.clear_step_class();
        let mut index = index;
        loop {
            let _span = tracing::debug_span!(target: LOG_TARGET, "tour.step", index).entered();
            let Some(step) = self.steps.step_at(index).cloned() else {
                debug!(target: LOG_TARGET, index, "ran past the last step; finishing");
                self.finish_active();
                return;
            };
            self.state.current_index = Some(index);
            self.status = TourStatus::Transitioning(index);

            let anchored = match &step {
                Step::Welcome(welcome) => {
                    self.show_welcome(index, welcome, &step);
                    return;
                }
                Step::Anchored(anchored) => anchored,
            };
            match self.resolve(anchored) {
                Ok(target) => {
                    debug!(
                        target: LOG_TARGET,
                        index,
                        selector = %anchored.target,
                        "scrolling target into view"
                    );
                    self.surface
                        .scroll_into_view(target.element, self.config.scroll_padding);
                    self.phase = Phase::Settling {
                        index,
                        settle: ScrollSettle::new(self.config.to_settle_policy()),
                    };
                    return;
                }
                Err(reason) => {
                    skip_warning(index, &anchored.target, reason);
                    index += 1;
                }
            }
        }
    }

    fn show_welcome(&mut self, index: usize, welcome: &WelcomeStep, step: &Step) {
        let Some(elements) = self.elements else {
            return;
        };
        let placement = center(
            self.panel_size.unwrap_or_default(),
            self.surface.size(),
            self.config.safe_area,
        );
        let (prev_label, next_label) = self.nav_labels(index);
        let content = PanelContent {
            kind: PanelKind::Welcome,
            title: welcome.title.clone(),
            body: welcome.body.clone(),
            image: welcome.image.clone(),
            progress: self.progress(index),
            prev_label,
            next_label: welcome.confirm_label.clone().unwrap_or(next_label),
            show_close: self.config.allow_close,
        };

        self.surface
            .set_class(elements.highlight, theme::VISIBLE_CLASS, false);
        self.surface.render_panel(elements.panel, &content);
        self.apply_panel_position(elements.panel, placement);
        self.surface
            .set_class(elements.panel, theme::WELCOME_CLASS, true);
        self.surface
            .set_class(elements.panel, theme::VISIBLE_CLASS, true);

        self.reveal(index);
        debug!(target: LOG_TARGET, index, "welcome step shown");
        self.hooks.after_step(index, step, None);
    }

    fn show_anchored(&mut self, index: usize) {
        let Some(step) = self.steps.step_at(index).cloned() else {
            self.finish_active();
            return;
        };
        let Step::Anchored(anchored) = &step else {
            self.enter_step(index);
            return;
        };
        let Some(elements) = self.elements else {
            return;
        };

        // Scrolling moved the target; resolve it again at its final spot.
        let target = match self.resolve(anchored) {
            Ok(target) => target,
            Err(reason) => {
                skip_warning(index, &anchored.target, reason);
                self.enter_step(index + 1);
                return;
            }
        };

        let placement = self.place(anchored, &target);
        let content = self.anchored_content(index, anchored, &target);
        self.surface.render_panel(elements.panel, &content);
        self.apply_highlight(elements.highlight, anchored, &target);
        self.apply_panel_position(elements.panel, placement);
        self.surface
            .set_class(elements.panel, theme::WELCOME_CLASS, false);
        if let Some(class) = &anchored.class {
            self.surface.set_class(elements.highlight, class, true);
            self.surface.set_class(elements.panel, class, true);
            self.state.last_class = Some(class.clone());
        }
        self.set_step_visible(true);

        self.reveal(index);
        debug!(
            target: LOG_TARGET,
            index,
            selector = %anchored.target,
            side = placement.side.as_str(),
            top = placement.top,
            left = placement.left,
            qualified = placement.qualified,
            clamped = placement.clamped,
            "step shown"
        );
        self.hooks.after_step(index, &step, Some(&target));
    }

    fn reveal(&mut self, index: usize) {
        self.shown = Some(Shown { index });
        self.state.current_index = Some(index);
        self.status = TourStatus::Showing(index);
    }

    fn finish_active(&mut self) {
        debug!(target: LOG_TARGET, "tour finished");
        self.hooks.finish(self.state.current_index);
        self.exit();
    }

    // ── Geometry ──────────────────────────────────────────────────────

    fn resolve(&self, step: &AnchoredStep) -> Result<Target, SkipReason> {
        let target = self
            .surface
            .resolve(&step.target)
            .ok_or(SkipReason::NotFound)?;
        if step.is_visible_for(&target) {
            Ok(target)
        } else {
            Err(SkipReason::Hidden)
        }
    }

    /// Place the panel against the padded highlight, not the bare target.
    fn place(&self, step: &AnchoredStep, target: &Target) -> Placement {
        let request = PlacementRequest::new(
            target.region.inflate(self.config.highlight_padding),
            self.panel_size.unwrap_or_default(),
            self.surface.size(),
            self.config.safe_area,
            self.config.panel_gap,
        );
        match step.placement {
            Some(side) => request.place_forced(side),
            None => request.place(),
        }
    }

    fn on_resize(&mut self) {
        let class = WidthClass::from_width(self.surface.size().width);
        if self.width_class != Some(class) {
            if let Some(elements) = self.elements {
                self.panel_size = Some(self.surface.measure(elements.panel));
            }
            debug!(
                target: LOG_TARGET,
                from = self.width_class.map(WidthClass::as_str),
                to = class.as_str(),
                "width class changed; panel re-measured"
            );
            self.width_class = Some(class);
        }
        self.reposition();
    }

    /// Re-place the step on screen after the surface moved under it.
    fn reposition(&mut self) {
        let (Some(shown), Some(elements)) = (self.shown, self.elements) else {
            return;
        };
        let Some(step) = self.steps.step_at(shown.index).cloned() else {
            return;
        };
        match &step {
            Step::Welcome(_) => {
                let placement = center(
                    self.panel_size.unwrap_or_default(),
                    self.surface.size(),
                    self.config.safe_area,
                );
                self.apply_panel_position(elements.panel, placement);
            }
            Step::Anchored(anchored) => match self.surface.resolve(&anchored.target) {
                Some(target) => {
                    let placement = self.place(anchored, &target);
                    self.apply_highlight(elements.highlight, anchored, &target);
                    self.apply_panel_position(elements.panel, placement);
                    debug!(
                        target: LOG_TARGET,
                        index = shown.index,
                        side = placement.side.as_str(),
                        "step repositioned"
                    );
                }
                None => {
                    debug!(
                        target: LOG_TARGET,
                        index = shown.index,
                        selector = %anchored.target,
                        "target gone during reposition; keeping last placement"
                    );
                }
            },
        }
    }

    // ── Surface helpers ───────────────────────────────────────────────

    fn create(&mut self, role: ElementRole, class: &str) -> ElementId {
        let id = self.surface.create_element(role);
        self.surface.set_class(id, class, true);
        id
    }

    fn bind_listeners(&mut self) -> Vec<ListenerId> {
        let mut ids = vec![
            self.surface
                .bind(ListenerKind::Resize, ListenerOptions::default()),
            self.surface
                .bind(ListenerKind::Scroll, ListenerOptions { capture: true }),
            self.surface
                .bind(ListenerKind::Click, ListenerOptions::default()),
        ];
        if self.config.keyboard_navigation {
            ids.push(
                self.surface
                    .bind(ListenerKind::Keyboard, ListenerOptions::default()),
            );
        }
        ids
    }

    fn flush_teardown(&mut self) {
        let Some(teardown) = self.teardown.take() else {
            return;
        };
        for id in teardown.elements.all() {
            self.surface.remove_element(id);
        }
        for id in &teardown.listeners {
            self.surface.unbind(*id);
        }
        self.surface.remove_style(theme::STYLE_KEY);
        debug!(
            target: LOG_TARGET,
            listeners = teardown.listeners.len(),
            "teardown complete"
        );
    }

    fn set_step_visible(&mut self, visible: bool) {
        if let Some(elements) = self.elements {
            self.surface
                .set_class(elements.highlight, theme::VISIBLE_CLASS, visible);
            self.surface
                .set_class(elements.panel, theme::VISIBLE_CLASS, visible);
        }
    }

    fn clear_step_class(&mut self) {
        let Some(class) = self.state.last_class.take() else {
            return;
        };
        if let Some(elements) = self.elements {
            self.surface.set_class(elements.highlight, &class, false);
            self.surface.set_class(elements.panel, &class, false);
        }
    }

    fn apply_highlight(&mut self, highlight: ElementId, step: &AnchoredStep, target: &Target) {
        let region = target.region.inflate(self.config.highlight_padding);
        self.surface.set_style(highlight, "left", &px(region.left));
        self.surface.set_style(highlight, "top", &px(region.top));
        self.surface.set_style(highlight, "width", &px(region.width));
        self.surface.set_style(highlight, "height", &px(region.height));
        if let Some(radius) = step.corner_radius {
            self.surface.set_style(highlight, "border-radius", &px(radius));
        }
    }

    fn apply_panel_position(&mut self, panel: ElementId, placement: Placement) {
        self.surface.set_style(panel, "left", &px(placement.left));
        self.surface.set_style(panel, "top", &px(placement.top));
        self.surface
            .set_style(panel, "--waypoint-side", placement.side.as_str());
    }

    // ── Content ───────────────────────────────────────────────────────

    fn anchored_content(&self, index: usize, step: &AnchoredStep, target: &Target) -> PanelContent {
        let (prev_label, next_label) = self.nav_labels(index);
        PanelContent {
            kind: PanelKind::Anchored,
            title: step.title.as_ref().map(|c| c.resolve(target)),
            body: step.body.as_ref().map(|c| c.resolve(target)),
            image: None,
            progress: self.progress(index),
            prev_label,
            next_label,
            show_close: self.config.allow_close,
        }
    }

    fn progress(&self, index: usize) -> Option<String> {
        self.config
            .show_progress
            .then(|| format!("{} of {}", index + 1, self.steps.len()))
    }

    fn nav_labels(&self, index: usize) -> (Option<String>, String) {
        let prev = (index > 0).then(|| self.config.prev_label.clone());
        let next = if index + 1 >= self.steps.len() {
            self.config.done_label.clone()
        } else {
            self.config.next_label.clone()
        };
        (prev, next)
    }
}

fn skip_warning(index: usize, selector: &str, reason: SkipReason) {
    warn!(
        target: LOG_TARGET,
        index,
        selector,
        reason = reason.as_str(),
        "skipping step"
    );
}

fn px(value: f64) -> String {
    format!("{value}px")
}

fn to_signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
