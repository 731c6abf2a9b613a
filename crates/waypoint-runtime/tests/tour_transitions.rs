#![forbid(unsafe_code)]

//! Suspension points of the tour controller: gate, hide delay, scroll
//! settle, debounced repositioning, teardown, and supersession.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use waypoint_backend::ElementRole;
use waypoint_core::{Event, FocusContext, KeyCode, KeyEvent, PanelAction, PanelSize, Region};
use waypoint_harness::{FRAME, MemorySurface, with_captured_events};
use waypoint_layout::WidthClass;
use waypoint_runtime::theme;
use waypoint_runtime::{
    AnchoredStep, Gate, Step, StepStore, Tour, TourConfig, TourHooks, TourStatus, WelcomeStep,
};

// ── Fixtures ───────────────────────────────────────────────────────────

fn surface() -> MemorySurface {
    MemorySurface::new(1024.0, 768.0)
        .with_target("#a", Region::new(100.0, 100.0, 120.0, 40.0))
        .with_target("#b", Region::new(600.0, 300.0, 120.0, 40.0))
        .with_target("#far", Region::new(200.0, 2000.0, 100.0, 40.0))
}

fn steps(selectors: &[&str]) -> StepStore {
    selectors
        .iter()
        .map(|s| Step::from(AnchoredStep::new(*s)))
        .collect()
}

fn tour(selectors: &[&str], config: TourConfig) -> Tour<MemorySurface> {
    Tour::new(surface(), steps(selectors), config)
}

fn frame(tour: &mut Tour<MemorySurface>) {
    tour.surface_mut().advance_frame(FRAME);
    tour.tick();
}

fn run(tour: &mut Tour<MemorySurface>) -> u32 {
    for frames in 0..500 {
        if matches!(tour.status(), TourStatus::Showing(_) | TourStatus::Inactive) {
            return frames;
        }
        frame(tour);
    }
    panic!("tour never settled: {:?}", tour.status());
}

fn shown_indices() -> (Rc<RefCell<Vec<usize>>>, TourHooks) {
    let shown = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&shown);
    let hooks = TourHooks::new().on_after_step(move |index, _, _| log.borrow_mut().push(index));
    (shown, hooks)
}

fn panel_visible(tour: &Tour<MemorySurface>) -> bool {
    tour.surface()
        .first(ElementRole::Panel)
        .is_some_and(|p| p.has_class(theme::VISIBLE_CLASS))
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

// ── Gate ───────────────────────────────────────────────────────────────

#[test]
fn held_transition_keeps_current_step_until_released() {
    let hooks = TourHooks::new().on_before_step(|index, _| {
        if index == 1 { Gate::Hold } else { Gate::Proceed }
    });
    let mut tour = tour(&["#a", "#b"], TourConfig::default()).with_hooks(hooks);
    tour.start();
    run(&mut tour);

    tour.next();
    assert!(tour.is_held());
    assert_eq!(tour.status(), TourStatus::Transitioning(1));
    for _ in 0..30 {
        frame(&mut tour);
    }
    assert!(tour.is_held());
    assert!(panel_visible(&tour), "step 0 stays up while held");
    assert_eq!(tour.state().current_index, Some(0));

    tour.release();
    assert!(!tour.is_held());
    assert!(!panel_visible(&tour));
    run(&mut tour);
    assert_eq!(tour.status(), TourStatus::Showing(1));
}

#[test]
fn release_without_hold_is_harmless() {
    let mut tour = tour(&["#a"], TourConfig::default());
    tour.start();
    run(&mut tour);
    let logs = with_captured_events(|| tour.release());
    assert!(logs.warnings().is_empty());
    assert_eq!(tour.status(), TourStatus::Showing(0));
}

#[test]
fn navigating_away_from_a_held_transition_supersedes_it() {
    let hooks = TourHooks::new().on_before_step(|index, _| {
        if index == 1 { Gate::Hold } else { Gate::Proceed }
    });
    let mut tour = tour(&["#a", "#b", "#a"], TourConfig::default()).with_hooks(hooks);
    tour.start();
    run(&mut tour);
    tour.next();
    assert!(tour.is_held());

    tour.go_to(2);
    assert!(!tour.is_held());
    run(&mut tour);
    assert_eq!(tour.status(), TourStatus::Showing(2));
}

// ── Hide delay ─────────────────────────────────────────────────────────

#[test]
fn next_step_waits_half_the_animation_duration() {
    let config = TourConfig::new().animation_duration(Duration::from_millis(320));
    let mut tour = tour(&["#a", "#b"], config);
    tour.start();
    run(&mut tour);
    let scrolls_before = tour.surface().scroll_requests().len();

    tour.next();
    assert!(!panel_visible(&tour));
    tour.surface_mut().advance_clock(Duration::from_millis(159));
    tour.tick();
    assert_eq!(tour.surface().scroll_requests().len(), scrolls_before);

    tour.surface_mut().advance_clock(Duration::from_millis(1));
    tour.tick();
    assert_eq!(tour.surface().scroll_requests().len(), scrolls_before + 1);
}

#[test]
fn zero_duration_skips_the_hide_delay() {
    let config = TourConfig::new().animation_duration(Duration::ZERO);
    let mut tour = tour(&["#a", "#b"], config);
    tour.start();
    run(&mut tour);
    tour.next();
    assert_eq!(tour.surface().scroll_requests().len(), 2);
}

// ── Scroll settle ──────────────────────────────────────────────────────

#[test]
fn far_target_is_placed_after_scrolling_stops() {
    let mut tour = tour(&["#far"], TourConfig::default());
    tour.start();
    let frames = run(&mut tour);
    assert!(frames > 10, "settled too early after {frames} frames");
    assert!(!tour.surface().is_scrolling());

    let panel = tour.surface().first(ElementRole::Panel).expect("panel");
    assert_eq!(panel.style("--waypoint-side"), Some("top"));
    let top: f64 = panel
        .style("top")
        .and_then(|v| v.strip_suffix("px"))
        .and_then(|v| v.parse().ok())
        .expect("numeric top");
    assert!((top - 518.0).abs() < 1.0, "top = {top}");
}

#[test]
fn settle_wait_is_capped() {
    let config = TourConfig::new().settle_policy(waypoint_runtime::SettlePolicy {
        samples: 3,
        threshold: 0.5,
        max_frames: 5,
    });
    let mut tour = tour(&["#far"], config);
    tour.start();
    let frames = run(&mut tour);
    assert_eq!(frames, 5);
    assert_eq!(tour.status(), TourStatus::Showing(0));
}

#[test]
fn exit_during_settle_never_reveals() {
    let (shown, hooks) = shown_indices();
    let mut tour = tour(&["#far"], TourConfig::default()).with_hooks(hooks);
    tour.start();
    frame(&mut tour);
    tour.exit();
    for _ in 0..100 {
        frame(&mut tour);
    }
    assert!(shown.borrow().is_empty());
    assert_eq!(tour.surface().live_element_count(), 0);
}

// ── Supersession ───────────────────────────────────────────────────────

#[test]
fn latest_navigation_request_wins() {
    let (shown, hooks) = shown_indices();
    let mut tour = tour(&["#a", "#b", "#a"], TourConfig::default()).with_hooks(hooks);
    tour.start();
    run(&mut tour);

    tour.next();
    frame(&mut tour);
    tour.go_to(2);
    run(&mut tour);

    assert_eq!(tour.status(), TourStatus::Showing(2));
    assert_eq!(*shown.borrow(), vec![0, 2]);
}

#[test]
fn superseded_settle_is_abandoned() {
    let (shown, hooks) = shown_indices();
    let config = TourConfig::new().animation_duration(Duration::ZERO);
    let mut tour = tour(&["#a", "#far"], config).with_hooks(hooks);
    tour.start();
    run(&mut tour);

    tour.next();
    frame(&mut tour);
    assert_eq!(tour.status(), TourStatus::Transitioning(1));
    tour.go_to(0);
    run(&mut tour);

    assert_eq!(tour.status(), TourStatus::Showing(0));
    assert_eq!(*shown.borrow(), vec![0, 0]);
}

// ── Repositioning ──────────────────────────────────────────────────────

#[test]
fn scroll_events_are_debounced_before_repositioning() {
    let mut tour = tour(&["#a"], TourConfig::default());
    tour.start();
    run(&mut tour);
    let highlight_left = |tour: &Tour<MemorySurface>| {
        tour.surface()
            .first(ElementRole::Highlight)
            .and_then(|h| h.style("left").map(str::to_string))
    };
    assert_eq!(highlight_left(&tour).as_deref(), Some("92px"));

    tour.surface_mut()
        .add_target("#a", Region::new(300.0, 100.0, 120.0, 40.0));
    assert!(!tour.handle_event(&Event::Scroll));
    tour.surface_mut().advance_clock(Duration::from_millis(30));
    tour.handle_event(&Event::Scroll);
    tour.surface_mut().advance_clock(Duration::from_millis(40));
    tour.tick();
    assert_eq!(highlight_left(&tour).as_deref(), Some("92px"));

    tour.surface_mut().advance_clock(Duration::from_millis(10));
    tour.tick();
    assert_eq!(highlight_left(&tour).as_deref(), Some("292px"));
}

#[test]
fn resize_across_a_breakpoint_remeasures_the_panel() {
    let mut tour = tour(&["#a"], TourConfig::default());
    tour.start();
    run(&mut tour);
    assert_eq!(tour.surface().measure_calls(), 1);

    // Same width class: cached size reused.
    tour.surface_mut().resize(1100.0, 768.0);
    tour.handle_event(&Event::Resize {
        width: 1100.0,
        height: 768.0,
    });
    tour.surface_mut().advance_clock(Duration::from_millis(100));
    tour.tick();
    assert_eq!(tour.surface().measure_calls(), 1);

    tour.surface_mut().resize(500.0, 768.0);
    tour.surface_mut().set_panel_size(240.0, 180.0);
    tour.handle_event(&Event::Resize {
        width: 500.0,
        height: 768.0,
    });
    tour.surface_mut().advance_clock(Duration::from_millis(99));
    tour.tick();
    assert_eq!(tour.width_class(), Some(WidthClass::Wide));

    tour.surface_mut().advance_clock(Duration::from_millis(1));
    tour.tick();
    assert_eq!(tour.width_class(), Some(WidthClass::Compact));
    assert_eq!(tour.panel_size(), Some(PanelSize::new(240.0, 180.0)));
    assert_eq!(tour.surface().measure_calls(), 2);
}

#[test]
fn welcome_panel_is_recentred_on_resize() {
    let store = StepStore::new(vec![WelcomeStep::new().title("Hi").into()]);
    let mut tour = Tour::new(surface(), store, TourConfig::default());
    tour.start();
    tour.surface_mut().resize(800.0, 600.0);
    tour.handle_event(&Event::Resize {
        width: 800.0,
        height: 600.0,
    });
    tour.surface_mut().advance_clock(Duration::from_millis(100));
    tour.tick();
    let panel = tour.surface().first(ElementRole::Panel).expect("panel");
    assert_eq!(panel.style("left"), Some("250px"));
    assert_eq!(panel.style("top"), Some("225px"));
}

#[test]
fn exit_cancels_pending_repositioning() {
    let config = TourConfig::default().animation_duration(Duration::ZERO);
    let config = TourConfig {
        resize_debounce: Duration::from_millis(300),
        ..config
    };
    let mut tour = tour(&["#a"], config);
    tour.start();
    run(&mut tour);
    assert_eq!(tour.surface().measure_calls(), 1);

    tour.surface_mut().resize(500.0, 768.0);
    tour.surface_mut().set_panel_size(240.0, 180.0);
    tour.handle_event(&Event::Resize {
        width: 500.0,
        height: 768.0,
    });
    tour.surface_mut().advance_clock(Duration::from_millis(20));
    tour.exit();
    tour.start();
    run(&mut tour);
    assert_eq!(tour.width_class(), Some(WidthClass::Compact));
    let measured = tour.surface().measure_calls();
    let panel_left = |tour: &Tour<MemorySurface>| {
        tour.surface()
            .first(ElementRole::Panel)
            .and_then(|p| p.style("left").map(str::to_string))
    };
    let left_before = panel_left(&tour);

    // Widen without an event: only a stale debounce could notice.
    tour.surface_mut().resize(1100.0, 768.0);
    tour.surface_mut().advance_clock(Duration::from_millis(400));
    tour.tick();
    assert_eq!(tour.surface().measure_calls(), measured);
    assert_eq!(tour.width_class(), Some(WidthClass::Compact));
    assert_eq!(panel_left(&tour), left_before);
}

// ── Input ──────────────────────────────────────────────────────────────

#[test]
fn keyboard_navigates_unless_typing() {
    let mut tour = tour(&["#a", "#b"], TourConfig::default());
    tour.start();
    run(&mut tour);

    let typing = Event::Key(KeyEvent::new(KeyCode::Right).with_focus(FocusContext::Editable));
    assert!(!tour.handle_event(&typing));
    assert_eq!(tour.status(), TourStatus::Showing(0));

    assert!(tour.handle_event(&key(KeyCode::Right)));
    run(&mut tour);
    assert_eq!(tour.status(), TourStatus::Showing(1));

    assert!(tour.handle_event(&key(KeyCode::Left)));
    run(&mut tour);
    assert_eq!(tour.status(), TourStatus::Showing(0));

    assert!(tour.handle_event(&key(KeyCode::Escape)));
    assert!(!tour.is_active());
}

#[test]
fn keyboard_ignored_when_disabled() {
    let mut tour = tour(&["#a", "#b"], TourConfig::new().keyboard_navigation(false));
    tour.start();
    run(&mut tour);
    assert!(!tour.handle_event(&key(KeyCode::Right)));
    assert_eq!(tour.status(), TourStatus::Showing(0));
}

#[test]
fn closing_requires_allow_close() {
    let mut locked = tour(&["#a"], TourConfig::new().allow_close(false));
    locked.start();
    run(&mut locked);
    assert!(!locked.handle_event(&key(KeyCode::Escape)));
    assert!(!locked.handle_event(&Event::OverlayClick));
    assert!(!locked.handle_event(&Event::Panel(PanelAction::Close)));
    assert!(locked.is_active());

    let mut open = tour(&["#a"], TourConfig::default());
    open.start();
    run(&mut open);
    assert!(open.handle_event(&Event::OverlayClick));
    assert!(!open.is_active());
}

#[test]
fn panel_done_advances() {
    let mut tour = tour(&["#a", "#b"], TourConfig::default());
    tour.start();
    run(&mut tour);
    assert!(tour.handle_event(&Event::Panel(PanelAction::Done)));
    run(&mut tour);
    assert_eq!(tour.status(), TourStatus::Showing(1));
    assert!(tour.handle_event(&Event::Panel(PanelAction::Prev)));
    run(&mut tour);
    assert_eq!(tour.status(), TourStatus::Showing(0));
}

#[test]
fn events_are_ignored_while_inactive() {
    let mut tour = tour(&["#a"], TourConfig::default());
    assert!(!tour.handle_event(&key(KeyCode::Right)));
    assert!(!tour.handle_event(&Event::OverlayClick));
    assert_eq!(tour.status(), TourStatus::Inactive);
}

// ── Theme ──────────────────────────────────────────────────────────────

#[test]
fn set_theme_swaps_the_theme_class() {
    let mut tour = tour(&["#a"], TourConfig::default());
    tour.start();
    run(&mut tour);
    tour.set_theme("midnight");

    for role in [ElementRole::Overlay, ElementRole::Panel] {
        let record = tour.surface().first(role).expect("element");
        assert!(record.has_class("waypoint-theme-midnight"));
        assert!(!record.has_class("waypoint-theme-default"));
    }
    assert_eq!(tour.theme(), "midnight");
}

#[test]
fn set_theme_rejects_names_that_are_not_class_tokens() {
    let mut tour = tour(&["#a"], TourConfig::default());
    tour.start();
    run(&mut tour);
    let logs = with_captured_events(|| tour.set_theme("dark mode"));

    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("operation"), Some("set_theme"));
    assert_eq!(tour.theme(), "default");
    let overlay = tour.surface().first(ElementRole::Overlay).expect("overlay");
    assert!(overlay.has_class("waypoint-theme-default"));
    assert!(!overlay.classes.iter().any(|c| c.contains(' ')));
}

// ── Teardown ───────────────────────────────────────────────────────────

#[test]
fn teardown_waits_for_the_fade_out() {
    let mut tour = tour(&["#a"], TourConfig::default());
    tour.start();
    run(&mut tour);
    tour.exit();

    assert!(tour.has_pending_teardown());
    assert_eq!(tour.surface().live_element_count(), 3);
    let overlay = tour.surface().first(ElementRole::Overlay).expect("overlay");
    assert!(!overlay.has_class(theme::VISIBLE_CLASS));

    tour.surface_mut().advance_clock(Duration::from_millis(299));
    tour.tick();
    assert!(tour.has_pending_teardown());

    tour.surface_mut().advance_clock(Duration::from_millis(1));
    tour.tick();
    assert!(!tour.has_pending_teardown());
    assert_eq!(tour.surface().live_element_count(), 0);
    assert!(tour.surface().listeners().is_empty());
    assert!(tour.surface().stylesheet(theme::STYLE_KEY).is_none());
}

#[test]
fn zero_duration_tears_down_immediately() {
    let mut tour = tour(&["#a"], TourConfig::new().animation_duration(Duration::ZERO));
    tour.start();
    run(&mut tour);
    tour.exit();
    assert!(!tour.has_pending_teardown());
    assert_eq!(tour.surface().live_element_count(), 0);
}

#[test]
fn restart_flushes_pending_teardown() {
    let mut tour = tour(&["#a"], TourConfig::default());
    tour.start();
    run(&mut tour);
    tour.exit();
    tour.start();

    assert_eq!(tour.surface().removed().len(), 3);
    assert_eq!(tour.surface().live_element_count(), 3);
    assert_eq!(tour.surface().listeners().len(), 4);
    assert!(tour.surface().stylesheet(theme::STYLE_KEY).is_some());
    run(&mut tour);
    assert_eq!(tour.status(), TourStatus::Showing(0));
}
