#![forbid(unsafe_code)]

//! Anchored-panel placement.
//!
//! Given a target region, the panel's measured size, and the surface bounds,
//! [`PlacementRequest::place`] picks where the info panel goes.
//!
//! # Algorithm
//!
//! Four candidates are generated, one per side of the target, each centred
//! on the target's cross axis and separated from it by `gap`:
//!
//! | side   | position                                   | score (space left over)                      |
//! |--------|--------------------------------------------|----------------------------------------------|
//! | bottom | `top = t.bottom + gap`, centred on `t.cx`  | `surface.h - (t.bottom + gap + panel.h)`     |
//! | top    | `top = t.top - panel.h - gap`              | `t.top - panel.h - gap`                      |
//! | right  | `left = t.right + gap`, centred on `t.cy`  | `surface.w - (t.right + gap + panel.w)`      |
//! | left   | `left = t.left - panel.w - gap`            | `t.left - panel.w - gap`                     |
//!
//! 1. A candidate *qualifies* when it fits inside the safe area and does not
//!    intersect the target.
//! 2. The qualifying candidate with the highest score wins. Ties go to the
//!    earlier side in [`Side::CANDIDATES`] (bottom, top, right, left).
//! 3. With no qualifying candidate, the highest score among all four wins.
//! 4. The winner is clamped into
//!    `[safe_area, surface - panel - safe_area]` on both axes.
//!
//! # Invariants
//!
//! 1. Placement is a pure function of the request.
//! 2. The result lies inside the safe area whenever the panel is small
//!    enough to fit there.
//! 3. Step 4 may pull the panel back over a target that is larger than the
//!    safe area. This is accepted, not corrected.
//!
//! # Failure Modes
//!
//! None. Every request yields a placement, including degenerate ones
//! (zero-size surface, target covering the whole surface).

use waypoint_core::geometry::{PanelSize, Position, Region, Side, SurfaceSize};

/// Inputs to the placement engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Region of the resolved target (already padded, if padding applies).
    pub target: Region,
    /// Measured panel size.
    pub panel: PanelSize,
    /// Visible surface size.
    pub surface: SurfaceSize,
    /// Minimum inset from every surface edge.
    pub safe_area: f64,
    /// Distance between target and panel.
    pub gap: f64,
}

/// One evaluated candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub side: Side,
    /// Unclamped top-left corner.
    pub position: Position,
    /// Space left over in the candidate's growth direction.
    pub score: f64,
    /// Lies fully inside the safe area.
    pub fits: bool,
    /// Intersects the target region.
    pub overlaps: bool,
}

impl Candidate {
    /// Fits and does not overlap.
    #[inline]
    #[must_use]
    pub fn qualifies(&self) -> bool {
        self.fits && !self.overlaps
    }
}

/// Final panel placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub side: Side,
    /// The chosen candidate qualified before clamping.
    pub qualified: bool,
    /// The clamp moved the panel.
    pub clamped: bool,
}

impl Placement {
    /// Top-left corner as a [`Position`].
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.left, self.top)
    }
}

impl PlacementRequest {
    /// Build a request.
    #[must_use]
    pub fn new(
        target: Region,
        panel: PanelSize,
        surface: SurfaceSize,
        safe_area: f64,
        gap: f64,
    ) -> Self {
        Self {
            target,
            panel,
            surface,
            safe_area,
            gap,
        }
    }

    /// Evaluate the candidate for one anchored side.
    ///
    /// `Side::Center` evaluates to the centred position with a score of zero.
    #[must_use]
    pub fn candidate(&self, side: Side) -> Candidate {
        let t = &self.target;
        let p = &self.panel;
        let (position, score) = match side {
            Side::Bottom => (
                Position::new(t.center_x() - p.width / 2.0, t.bottom() + self.gap),
                self.surface.height - (t.bottom() + self.gap + p.height),
            ),
            Side::Top => (
                Position::new(
                    t.center_x() - p.width / 2.0,
                    t.top - p.height - self.gap,
                ),
                t.top - p.height - self.gap,
            ),
            Side::Right => (
                Position::new(t.right() + self.gap, t.center_y() - p.height / 2.0),
                self.surface.width - (t.right() + self.gap + p.width),
            ),
            Side::Left => (
                Position::new(
                    t.left - p.width - self.gap,
                    t.center_y() - p.height / 2.0,
                ),
                t.left - p.width - self.gap,
            ),
            Side::Center => (centered(*p, self.surface), 0.0),
        };
        let rect = p.at(position);
        Candidate {
            side,
            position,
            score,
            fits: fits_safe_area(position, *p, self.surface, self.safe_area),
            overlaps: rect.intersects(t),
        }
    }

    /// All four anchored candidates in evaluation order.
    #[must_use]
    pub fn candidates(&self) -> [Candidate; 4] {
        Side::CANDIDATES.map(|side| self.candidate(side))
    }

    /// Pick the best candidate and clamp it.
    #[must_use]
    pub fn place(&self) -> Placement {
        let candidates = self.candidates();
        let chosen = best(candidates.iter().filter(|c| c.qualifies()))
            .or_else(|| best(candidates.iter()))
            .copied()
            // `candidates` is never empty; bottom is the documented default.
            .unwrap_or(candidates[0]);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "waypoint.layout",
            side = %chosen.side,
            score = chosen.score,
            qualified = chosen.qualifies(),
            "placement candidate chosen"
        );

        self.finish(chosen)
    }

    /// Use `side` unconditionally, then clamp.
    #[must_use]
    pub fn place_forced(&self, side: Side) -> Placement {
        self.finish(self.candidate(side))
    }

    fn finish(&self, chosen: Candidate) -> Placement {
        let clamped = clamp_position(chosen.position, self.panel, self.surface, self.safe_area);
        Placement {
            top: clamped.top,
            left: clamped.left,
            side: chosen.side,
            qualified: chosen.qualifies(),
            clamped: clamped != chosen.position,
        }
    }
}

/// Highest score wins; the earliest candidate wins ties.
fn best<'a>(candidates: impl Iterator<Item = &'a Candidate>) -> Option<&'a Candidate> {
    candidates.fold(None, |best: Option<&Candidate>, c| match best {
        Some(b) if c.score <= b.score => Some(b),
        _ => Some(c),
    })
}

fn centered(panel: PanelSize, surface: SurfaceSize) -> Position {
    Position::new(
        (surface.width - panel.width) / 2.0,
        (surface.height - panel.height) / 2.0,
    )
}

/// Place the panel for `target` on `surface`.
///
/// Shorthand for [`PlacementRequest::place`].
#[must_use]
pub fn place(
    target: Region,
    panel: PanelSize,
    surface: SurfaceSize,
    safe_area: f64,
    gap: f64,
) -> Placement {
    PlacementRequest::new(target, panel, surface, safe_area, gap).place()
}

/// Centre the panel on the surface (for steps without an anchor) and clamp.
#[must_use]
pub fn center(panel: PanelSize, surface: SurfaceSize, safe_area: f64) -> Placement {
    let raw = centered(panel, surface);
    let pos = clamp_position(raw, panel, surface, safe_area);
    Placement {
        top: pos.top,
        left: pos.left,
        side: Side::Center,
        qualified: fits_safe_area(raw, panel, surface, safe_area),
        clamped: pos != raw,
    }
}

/// Whether a panel at `position` lies inside the safe area.
///
/// Uses the same bounds as [`clamp_position`], so a fitting position is
/// always a fixed point of the clamp.
fn fits_safe_area(position: Position, panel: PanelSize, surface: SurfaceSize, safe_area: f64) -> bool {
    let max_left = surface.width - panel.width - safe_area;
    let max_top = surface.height - panel.height - safe_area;
    position.left >= safe_area
        && position.top >= safe_area
        && position.left <= max_left
        && position.top <= max_top
}

/// Clamp a panel's top-left corner into the safe area.
///
/// When the panel is larger than the safe area on an axis, the range is
/// inverted and the panel sticks to the leading inset.
#[must_use]
pub fn clamp_position(
    position: Position,
    panel: PanelSize,
    surface: SurfaceSize,
    safe_area: f64,
) -> Position {
    let max_left = surface.width - panel.width - safe_area;
    let max_top = surface.height - panel.height - safe_area;
    Position::new(
        position.left.min(max_left).max(safe_area),
        position.top.min(max_top).max(safe_area),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(target: Region) -> PlacementRequest {
        PlacementRequest::new(
            target,
            PanelSize::new(200.0, 100.0),
            SurfaceSize::new(800.0, 600.0),
            10.0,
            12.0,
        )
    }

    #[test]
    fn candidate_geometry_matches_table() {
        let req = request(Region::new(100.0, 500.0, 50.0, 30.0));
        let [bottom, top, right, left] = req.candidates();

        assert_eq!(bottom.position, Position::new(25.0, 542.0));
        assert_eq!(bottom.score, -42.0);
        assert_eq!(top.position, Position::new(25.0, 388.0));
        assert_eq!(top.score, 388.0);
        assert_eq!(right.position, Position::new(162.0, 465.0));
        assert_eq!(right.score, 438.0);
        assert_eq!(left.position, Position::new(-112.0, 465.0));
        assert_eq!(left.score, -112.0);
    }

    #[test]
    fn low_target_prefers_roomiest_side() {
        // The panel cannot fit below a target this close to the bottom edge;
        // right leaves more room than top.
        let placement = request(Region::new(100.0, 500.0, 50.0, 30.0)).place();
        assert_eq!(placement.side, Side::Right);
        assert_eq!(placement.left, 162.0);
        assert_eq!(placement.top, 465.0);
        assert!(placement.qualified);
        assert!(!placement.clamped);
    }

    #[test]
    fn high_target_goes_below() {
        let placement = request(Region::new(300.0, 40.0, 200.0, 40.0)).place();
        assert_eq!(placement.side, Side::Bottom);
        assert_eq!(placement.top, 92.0);
        assert_eq!(placement.left, 300.0);
    }

    #[test]
    fn symmetric_tie_prefers_bottom() {
        // Target centred vertically: top and bottom scores are identical.
        let req = PlacementRequest::new(
            Region::new(350.0, 250.0, 100.0, 100.0),
            PanelSize::new(100.0, 50.0),
            SurfaceSize::new(800.0, 600.0),
            10.0,
            10.0,
        );
        let [bottom, top, right, left] = req.candidates();
        assert_eq!(bottom.score, top.score);
        // Make sure horizontal sides do not outscore the tie.
        assert!(right.score > bottom.score);
        assert_eq!(right.score, left.score);

        let tall = PlacementRequest {
            surface: SurfaceSize::new(500.0, 900.0),
            target: Region::new(200.0, 400.0, 100.0, 100.0),
            ..req
        };
        let [b, t, r, l] = tall.candidates();
        assert_eq!(b.score, t.score);
        assert!(b.score > r.score && b.score > l.score);
        assert_eq!(tall.place().side, Side::Bottom);
    }

    #[test]
    fn horizontal_tie_prefers_right() {
        let req = PlacementRequest::new(
            Region::new(350.0, 250.0, 100.0, 100.0),
            PanelSize::new(100.0, 50.0),
            SurfaceSize::new(800.0, 600.0),
            10.0,
            10.0,
        );
        assert_eq!(req.place().side, Side::Right);
    }

    #[test]
    fn full_surface_target_falls_back_and_clamps() {
        let surface = SurfaceSize::new(800.0, 600.0);
        let req = PlacementRequest::new(
            Region::from_size(surface),
            PanelSize::new(200.0, 100.0),
            surface,
            10.0,
            12.0,
        );
        assert!(req.candidates().iter().all(|c| !c.qualifies()));

        let placement = req.place();
        // Every score is negative; top and bottom tie at -112 and beat
        // left/right at -212, so bottom wins the tie.
        assert_eq!(placement.side, Side::Bottom);
        assert!(!placement.qualified);
        assert!(placement.clamped);
        assert!(placement.left >= 10.0 && placement.left <= 800.0 - 200.0 - 10.0);
        assert!(placement.top >= 10.0 && placement.top <= 600.0 - 100.0 - 10.0);
        assert_eq!(placement.top, 490.0);
    }

    #[test]
    fn forced_side_ignores_fit() {
        let req = request(Region::new(100.0, 500.0, 50.0, 30.0));
        let placement = req.place_forced(Side::Left);
        assert_eq!(placement.side, Side::Left);
        assert!(!placement.qualified);
        assert!(placement.clamped);
        assert_eq!(placement.left, 10.0);
    }

    #[test]
    fn oversized_panel_sticks_to_leading_inset() {
        let pos = clamp_position(
            Position::new(300.0, 300.0),
            PanelSize::new(900.0, 700.0),
            SurfaceSize::new(800.0, 600.0),
            10.0,
        );
        assert_eq!(pos, Position::new(10.0, 10.0));
    }

    #[test]
    fn center_places_in_middle() {
        let placement = center(
            PanelSize::new(200.0, 100.0),
            SurfaceSize::new(800.0, 600.0),
            10.0,
        );
        assert_eq!(placement.side, Side::Center);
        assert_eq!(placement.position(), Position::new(300.0, 250.0));
        assert!(placement.qualified);
        assert!(!placement.clamped);
    }

    #[test]
    fn zero_surface_does_not_panic() {
        let placement = place(
            Region::new(0.0, 0.0, 0.0, 0.0),
            PanelSize::new(10.0, 10.0),
            SurfaceSize::new(0.0, 0.0),
            0.0,
            0.0,
        );
        assert_eq!(placement.position(), Position::new(0.0, 0.0));
    }
}
