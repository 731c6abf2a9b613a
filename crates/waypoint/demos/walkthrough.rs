#![forbid(unsafe_code)]

//! Scripted walkthrough against an in-memory surface.
//!
//! Run with `RUST_LOG=waypoint=debug` to see every transition the
//! controller logs.

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use waypoint::prelude::*;
use waypoint_harness::{FRAME, MemorySurface};

fn settle(tour: &mut Tour<MemorySurface>, budget: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < budget {
        tour.surface_mut().advance_frame(FRAME);
        tour.tick();
        elapsed += FRAME;
    }
}

fn report(tour: &Tour<MemorySurface>) {
    let Some(panel) = tour.surface().first(waypoint::ElementRole::Panel) else {
        println!("(no panel)");
        return;
    };
    let content = panel.content.as_ref();
    println!(
        "{:<16} side={:<7} left={:<8} top={:<8} {}",
        format!("{:?}", tour.status()),
        panel.style("--waypoint-side").unwrap_or("-"),
        panel.style("left").unwrap_or("-"),
        panel.style("top").unwrap_or("-"),
        content.and_then(|c| c.title.as_deref()).unwrap_or(""),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("waypoint=info")),
        )
        .init();

    let surface = MemorySurface::new(1280.0, 800.0)
        .with_target("#search", Region::new(40.0, 20.0, 320.0, 36.0))
        .with_target("#inbox", Region::new(0.0, 80.0, 220.0, 600.0))
        .with_target("#compose", Region::new(1100.0, 720.0, 140.0, 44.0))
        .with_target("#archive", Region::new(600.0, 2200.0, 120.0, 40.0));

    let steps = StepStore::new(vec![
        WelcomeStep::new()
            .title("Welcome to Mail")
            .body("A quick look around.")
            .confirm_label("Show me")
            .into(),
        AnchoredStep::new("#search").title("Search").into(),
        AnchoredStep::new("#inbox")
            .computed_body(|target| format!("Your inbox is {:.0}px tall", target.region.height))
            .title("Inbox")
            .into(),
        AnchoredStep::new("#drafts").title("Drafts").into(),
        AnchoredStep::new("#compose")
            .title("Compose")
            .placement(Side::Top)
            .class("pulse")
            .into(),
        AnchoredStep::new("#archive").title("Archive").into(),
    ]);

    let hooks = TourHooks::new()
        .on_start(|| println!("-- tour started"))
        .on_after_step(|index, _, target| {
            let at = target.map(|t| format!("{:?}", t.region));
            println!("-- step {index} shown {}", at.unwrap_or_default());
        })
        .on_finish(|last| println!("-- tour finished after step {last:?}"))
        .on_exit(|_| println!("-- overlay torn down"));

    let config = TourConfig::default().theme("dark");
    let budget = config.animation_duration * 4;
    let mut tour = Tour::new(surface, steps, config).with_hooks(hooks);

    tour.start();
    report(&tour);
    while tour.is_active() {
        tour.handle_event(&Event::Key(KeyEvent::new(KeyCode::Right)));
        settle(&mut tour, budget);
        report(&tour);
    }
    settle(&mut tour, budget);
    println!(
        "elements left: {}",
        tour.surface().live_element_count()
    );
}
